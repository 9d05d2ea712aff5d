//! The year-over-year state transition
//!
//! Advances one year's snapshot: applies growth, computes taxes and the
//! benefit clawback, then either allocates surplus cash into the accounts
//! or solves for the withdrawals covering the deficit. The step itself is
//! a pure function from a year to its computed form plus the next year's
//! opening balances; `advance` is the thin in-place driver over the
//! pre-sized sequence.

use crate::model::{PolicyConfig, Rates, YearRecord};
use crate::taxes::{benefit_clawback, progressive_tax, taxable_capital_gain};
use crate::withdrawal::{WithdrawalRequest, solve_required_withdrawal, tax_for_split};

/// Opening balances written into the following year's record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpeningBalances {
    pub non_reg_balance: f64,
    pub non_reg_cost_basis: f64,
    pub rrsp_balance: f64,
    pub rrsp_cost_basis: f64,
    pub tfsa_balance: f64,
    pub rrif_balance: f64,
    pub lira_balance: f64,
    pub lif_balance: f64,
}

impl OpeningBalances {
    pub fn write_to(&self, record: &mut YearRecord) {
        record.non_reg_balance = self.non_reg_balance;
        record.non_reg_cost_basis = self.non_reg_cost_basis;
        record.rrsp_balance = self.rrsp_balance;
        record.rrsp_cost_basis = self.rrsp_cost_basis;
        record.tfsa_balance = self.tfsa_balance;
        record.rrif_balance = self.rrif_balance;
        record.lira_balance = self.lira_balance;
        record.lif_balance = self.lif_balance;
    }
}

/// Run one year's ordered steps and produce the computed record plus the
/// next year's opening balances
///
/// Ledger and withdrawal fields are accumulated (`+=`) rather than
/// assigned so that amounts recorded before the transition — the
/// first-year lump-sum withdrawal and its tax — survive.
pub fn transition_year(
    record: &YearRecord,
    rates: Rates,
    policy: &PolicyConfig,
) -> (YearRecord, OpeningBalances) {
    let mut year = record.clone();
    let total_expenses = year.total_expenses();

    // Home-sale proceeds land before growth: registered room first, the
    // rest into non-registered principal.
    if year.home_sale_proceeds > 0.0 {
        let mut remaining = year.home_sale_proceeds;

        if year.age <= policy.rrsp_age_cutoff {
            let room = (policy.rrsp_contribution_cap - year.rrsp_balance).max(0.0);
            let contribution = room.min(remaining);
            year.rrsp_balance += contribution;
            year.rrsp_cost_basis += contribution;
            remaining -= contribution;
        }

        let room = (policy.tfsa_contribution_cap - year.tfsa_balance).max(0.0);
        let contribution = room.min(remaining);
        year.tfsa_balance += contribution;
        remaining -= contribution;

        if remaining > 0.0 {
            year.non_reg_balance += remaining;
            year.non_reg_cost_basis += remaining;
        }
    }

    // Growth. The non-registered account appreciates by the growth rate
    // alone; its income component is realized separately below.
    year.non_reg_balance *= 1.0 + rates.growth_rate;
    year.rrsp_balance *= 1.0 + rates.blended();
    year.tfsa_balance *= 1.0 + rates.blended();
    year.rrif_balance *= 1.0 + rates.blended();
    year.lira_balance *= 1.0 + rates.blended();
    year.lif_balance *= 1.0 + rates.blended();

    // Taxable income thrown off by the non-registered account without
    // reducing its balance.
    year.investment_income = year.non_reg_balance * rates.income_rate;

    // Mandatory locked-in payouts become ordinary taxable income.
    if year.age > policy.locked_in_payout_age {
        let lira_payout = year.lira_balance * policy.lira_payout_rate;
        let lif_payout = year.lif_balance * policy.lif_payout_rate;
        year.lira_balance -= lira_payout;
        year.lif_balance -= lif_payout;
        year.salary += lira_payout + lif_payout;
    }

    let taxable_income = year.salary + year.investment_income;
    let initial_tax = progressive_tax(taxable_income, &policy.tax_brackets);

    let clawed = benefit_clawback(taxable_income, year.benefit_income, policy);
    year.benefit_clawback = clawed.clawback;
    year.benefit_after_clawback = clawed.benefit_after_clawback;

    let available_cash = taxable_income + clawed.benefit_after_clawback;
    let shortfall = available_cash - (total_expenses + initial_tax);

    let next = if shortfall >= 0.0 {
        surplus_branch(&mut year, shortfall, initial_tax, total_expenses, policy)
    } else {
        deficit_branch(&mut year, total_expenses, policy)
    };

    (year, next)
}

/// Allocate surplus cash in priority order: RRSP room (age-gated), TFSA
/// room, remainder to non-registered. Growth is never added to a cost
/// basis; only the new contributions are.
fn surplus_branch(
    year: &mut YearRecord,
    shortfall: f64,
    initial_tax: f64,
    total_expenses: f64,
    policy: &PolicyConfig,
) -> OpeningBalances {
    year.credits += year.salary + year.investment_income + year.benefit_after_clawback;
    year.debits += total_expenses + initial_tax;
    year.tax_paid += initial_tax;

    let surplus = shortfall + year.benefit_after_clawback;

    let to_rrsp = if year.rrsp_balance <= policy.rrsp_contribution_cap
        && year.age <= policy.rrsp_age_cutoff
    {
        (policy.rrsp_contribution_cap - year.rrsp_balance).min(surplus)
    } else {
        0.0
    };
    let mut leftover = surplus - to_rrsp;

    let to_tfsa = if year.tfsa_balance <= policy.tfsa_contribution_cap {
        (policy.tfsa_contribution_cap - year.tfsa_balance).min(leftover)
    } else {
        0.0
    };
    leftover -= to_tfsa;

    OpeningBalances {
        non_reg_balance: year.non_reg_balance + leftover,
        non_reg_cost_basis: year.non_reg_cost_basis + leftover,
        rrsp_balance: year.rrsp_balance + to_rrsp,
        rrsp_cost_basis: year.rrsp_cost_basis + to_rrsp,
        tfsa_balance: year.tfsa_balance + to_tfsa,
        rrif_balance: year.rrif_balance,
        lira_balance: year.lira_balance,
        lif_balance: year.lif_balance,
    }
}

/// Solve for the withdrawals covering the deficit, recompute the final
/// tax from the actual split, and reduce balances (cost basis
/// proportionally) for the next year
fn deficit_branch(
    year: &mut YearRecord,
    total_expenses: f64,
    policy: &PolicyConfig,
) -> OpeningBalances {
    let req = WithdrawalRequest {
        salary: year.salary,
        non_reg_balance: year.non_reg_balance,
        non_reg_cost_basis: year.non_reg_cost_basis,
        tfsa_balance: year.tfsa_balance,
        rrsp_balance: year.rrsp_balance,
        rrif_balance: year.rrif_balance,
        total_expenses,
        age: year.age,
        policy,
    };
    let split = solve_required_withdrawal(&req);
    let final_tax = tax_for_split(&split, &req);

    year.credits += year.salary + split.total_withdrawal + year.benefit_after_clawback;
    year.debits += total_expenses + final_tax;
    year.tax_paid += final_tax;
    year.non_reg_withdrawal += split.from_non_reg;
    year.tfsa_withdrawal += split.from_tfsa;
    year.rrsp_withdrawal += split.from_rrsp;
    year.rrif_withdrawal += split.from_rrif;

    let cost_basis_used = if split.from_non_reg > 0.0 && year.non_reg_balance > 0.0 {
        year.non_reg_cost_basis * (split.from_non_reg / year.non_reg_balance)
    } else {
        0.0
    };

    OpeningBalances {
        non_reg_balance: year.non_reg_balance - split.from_non_reg,
        non_reg_cost_basis: year.non_reg_cost_basis - cost_basis_used,
        rrsp_balance: year.rrsp_balance - split.from_rrsp,
        // RRSP contributions and withdrawals are tax-sheltered, so its
        // cost basis carries forward untouched.
        rrsp_cost_basis: year.rrsp_cost_basis,
        tfsa_balance: year.tfsa_balance - split.from_tfsa,
        rrif_balance: year.rrif_balance - split.from_rrif,
        lira_balance: year.lira_balance,
        lif_balance: year.lif_balance,
    }
}

/// Advance the record at `index` in place and, if a following record
/// exists, write its opening balances
pub fn advance(records: &mut [YearRecord], index: usize, rates: Rates, policy: &PolicyConfig) {
    let (computed, next_open) = transition_year(&records[index], rates, policy);
    records[index] = computed;
    if let Some(next) = records.get_mut(index + 1) {
        next_open.write_to(next);
    }
}

/// Capital-gains tax owed on an immediate non-registered withdrawal,
/// used for the first-year lump sum before any transition runs
pub(crate) fn lump_sum_tax(amount: f64, record: &YearRecord, policy: &PolicyConfig) -> f64 {
    let cg_taxable = taxable_capital_gain(
        amount,
        record.non_reg_balance,
        record.non_reg_cost_basis,
        policy.capital_gains_inclusion,
    );
    progressive_tax(cg_taxable, &policy.tax_brackets)
}
