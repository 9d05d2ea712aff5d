//! The per-year financial snapshot
//!
//! One `YearRecord` exists per relative year from 1 to
//! `life_expectancy - current_age`. The builder seeds year 1; every later
//! year's opening balances are written by the previous year's transition.

use serde::{Deserialize, Serialize};

/// A single expense tagged to one relative year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOffExpense {
    /// Relative year (1, 2, 3...)
    pub year: usize,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One simulated year's complete financial snapshot
///
/// Balances are mutated in place by the year transition: after a run,
/// every record except the last holds post-growth, post-withdrawal
/// amounts; the final record holds opening balances only (it is never
/// transitioned because no following year exists).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearRecord {
    /// Relative year index (1-based)
    pub year: usize,
    pub calendar_year: i32,
    /// Person's age this year (`current_age + year - 1`)
    pub age: u8,

    /// Employment and other ordinary income; mandatory LIRA/LIF payouts
    /// are folded in here by the transition since they are taxed the same
    pub salary: f64,
    /// Taxable income thrown off by the non-registered account
    /// (dividend/interest proxy); does not reduce the balance
    pub investment_income: f64,

    // Non-registered
    pub non_reg_balance: f64,
    /// Original principal still in the account; `<= non_reg_balance`
    /// whenever there are unrealized gains
    pub non_reg_cost_basis: f64,
    pub non_reg_withdrawal: f64,

    // RRSP
    pub rrsp_balance: f64,
    pub rrsp_cost_basis: f64,
    pub rrsp_withdrawal: f64,

    // TFSA
    pub tfsa_balance: f64,
    pub tfsa_withdrawal: f64,

    // RRIF
    pub rrif_balance: f64,
    pub rrif_withdrawal: f64,

    // Locked-in accounts, drawn down only by their mandatory payouts
    pub lira_balance: f64,
    pub lif_balance: f64,

    // Expenses, resolved by the builder (flat or staged by age)
    pub expenses: f64,
    pub healthcare_expenses: f64,
    pub one_off_expenses: Vec<OneOffExpense>,

    // Government benefit
    pub benefit_income: f64,
    pub benefit_clawback: f64,
    pub benefit_after_clawback: f64,

    // Ledger (bookkeeping only, not consumed by later years)
    pub credits: f64,
    pub debits: f64,
    pub tax_paid: f64,

    /// Home-sale proceeds; zero unless this is the designated sale year
    pub home_sale_proceeds: f64,
}

impl YearRecord {
    /// Sum of this year's one-off expenses
    pub fn one_off_total(&self) -> f64 {
        self.one_off_expenses.iter().map(|e| e.amount).sum()
    }

    /// Regular + healthcare + one-off expenses for the year
    pub fn total_expenses(&self) -> f64 {
        self.expenses + self.healthcare_expenses + self.one_off_total()
    }
}
