//! Multi-account withdrawal solver
//!
//! Finds the total withdrawal W such that `salary + W` covers the year's
//! expenses plus the tax that W itself generates. Tax depends on how W is
//! split across accounts with different treatments, and the split depends
//! on W, so the equilibrium is found by bisection over a monotonic
//! residual rather than by inverting the piecewise-linear tax function.

use crate::model::PolicyConfig;
use crate::taxes::{progressive_tax, taxable_capital_gain};

/// Acceptable residual between cash available and cash required, in
/// monetary units. Callers must tolerate a ledger imbalance up to this.
const EPSILON: f64 = 1.0;

/// Bisection stops once the bracket collapses below this width
const MIN_BRACKET_WIDTH: f64 = 1e-7;

/// Inputs for one deficit year's withdrawal calculation
#[derive(Debug, Clone, Copy)]
pub struct WithdrawalRequest<'a> {
    pub salary: f64,
    pub non_reg_balance: f64,
    pub non_reg_cost_basis: f64,
    pub tfsa_balance: f64,
    pub rrsp_balance: f64,
    pub rrif_balance: f64,
    pub total_expenses: f64,
    pub age: u8,
    pub policy: &'a PolicyConfig,
}

/// How a total withdrawal splits across the account types
///
/// Residual demand past the TFSA is attributed entirely to the RRSP even
/// when that balance is exhausted; `from_rrif` is always zero and the RRIF
/// balance only widens the search interval. The caller plumbs the RRIF
/// tranche through regardless so the split stays the single source of
/// truth for per-account amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WithdrawalSplit {
    pub total_withdrawal: f64,
    pub from_non_reg: f64,
    pub from_tfsa: f64,
    pub from_rrsp: f64,
    pub from_rrif: f64,
}

/// Greedy split of a candidate withdrawal in fixed priority:
/// non-registered first, then TFSA, residual to RRSP
fn split_withdrawal(amount: f64, req: &WithdrawalRequest) -> WithdrawalSplit {
    let mut needed = amount;
    let from_non_reg = needed.min(req.non_reg_balance);
    needed -= from_non_reg;

    let from_tfsa = needed.min(req.tfsa_balance);
    needed -= from_tfsa;

    WithdrawalSplit {
        total_withdrawal: amount,
        from_non_reg,
        from_tfsa,
        from_rrsp: needed,
        from_rrif: 0.0,
    }
}

/// Total tax generated by a candidate split: capital gains on the
/// non-registered tranche, ordinary tax on salary plus the RRSP/RRIF
/// tranches, nothing on the TFSA
pub fn tax_for_split(split: &WithdrawalSplit, req: &WithdrawalRequest) -> f64 {
    let cg_taxable = taxable_capital_gain(
        split.from_non_reg,
        req.non_reg_balance,
        req.non_reg_cost_basis,
        req.policy.capital_gains_inclusion,
    );
    let ordinary_income = req.salary + split.from_rrsp + split.from_rrif;
    progressive_tax(cg_taxable, &req.policy.tax_brackets)
        + progressive_tax(ordinary_income, &req.policy.tax_brackets)
}

/// Bisect for the total withdrawal covering expenses net of induced tax
///
/// Searches `[0, sum of drawable balances]`. Each candidate is split
/// greedily, taxed, and compared against the cash required; the bracket
/// moves toward more withdrawal when credits fall short and less when the
/// candidate overshoots. Terminates within `|residual| <= 1` or when the
/// bracket collapses, returning the best split found either way.
pub fn solve_required_withdrawal(req: &WithdrawalRequest) -> WithdrawalSplit {
    let mut low = 0.0;
    let mut high =
        req.non_reg_balance + req.tfsa_balance + req.rrsp_balance + req.rrif_balance;
    let mut best = WithdrawalSplit::default();

    while high - low > MIN_BRACKET_WIDTH {
        let mid = f64::midpoint(low, high);
        let split = split_withdrawal(mid, req);
        let total_tax = tax_for_split(&split, req);

        let credits = req.salary + mid;
        let debits = req.total_expenses + total_tax;
        let difference = credits - debits;

        best = split;
        if difference.abs() <= EPSILON {
            break;
        }
        if difference < 0.0 {
            // Still short on cash: withdraw more
            low = mid;
        } else {
            // Overshot: withdraw less
            high = mid;
        }
    }

    best
}
