//! Projection configuration: the flat numeric input contract between the
//! presenter and the engine
//!
//! The presenter is responsible for unit consistency — rates are decimals
//! (0.03), not percentages.

use serde::{Deserialize, Serialize};

use super::year::OneOffExpense;

/// The income/growth rate pair applied every year
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rates {
    /// Rate of taxable income thrown off by the non-registered account;
    /// also part of the blended return on registered accounts
    pub income_rate: f64,
    /// Capital growth rate
    pub growth_rate: f64,
}

impl Rates {
    pub fn new(income_rate: f64, growth_rate: f64) -> Self {
        Rates {
            income_rate,
            growth_rate,
        }
    }

    /// Registered accounts earn a single blended total return since their
    /// internal income is not separately taxed
    pub fn blended(&self) -> f64 {
        self.income_rate + self.growth_rate
    }
}

/// One expense/healthcare pair for an age band
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageExpenses {
    pub expenses: f64,
    pub healthcare: f64,
}

/// Flat or age-staged annual expenses
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpensePolicy {
    pub base_expenses: f64,
    pub base_healthcare: f64,
    /// When set, the stage pairs below are selected by age instead of the
    /// flat base amounts
    pub use_stages: bool,
    pub stage_one: StageExpenses,
    pub stage_two: StageExpenses,
    pub stage_three: StageExpenses,
}

/// Fixed annual government benefit, active from a relative start year
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitConfig {
    /// Relative year (1-based) the benefit begins
    pub start_year: usize,
    pub annual_amount: f64,
}

impl Default for BenefitConfig {
    fn default() -> Self {
        BenefitConfig {
            start_year: 1,
            annual_amount: 0.0,
        }
    }
}

/// Optional one-time home sale
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeSale {
    /// Relative year of the sale; `None` means no sale
    pub year: Option<usize>,
    pub amount: f64,
}

/// Opening balances, placed in year 1 only
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialBalances {
    pub non_reg: f64,
    pub non_reg_cost_basis: f64,
    pub rrsp: f64,
    pub tfsa: f64,
    pub rrif: f64,
    pub lira: f64,
    pub lif: f64,
}

/// Complete user-level configuration for one projection run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub start_year: i32,
    pub current_age: u8,
    pub life_expectancy: u8,

    /// Employment/other income indexed by relative year (1-based; element
    /// 0 is unused and a missing entry means no income that year)
    #[serde(default)]
    pub yearly_incomes: Vec<f64>,

    #[serde(default)]
    pub expense_policy: ExpensePolicy,
    #[serde(default)]
    pub initial_balances: InitialBalances,
    #[serde(default)]
    pub benefit: BenefitConfig,
    #[serde(default)]
    pub home_sale: HomeSale,
    #[serde(default)]
    pub one_off_expenses: Vec<OneOffExpense>,
}

impl ProjectionConfig {
    /// Number of years to project; zero when life expectancy does not
    /// exceed the current age (callers receive an empty sequence, not an
    /// error)
    pub fn horizon(&self) -> usize {
        if self.life_expectancy > self.current_age {
            (self.life_expectancy - self.current_age) as usize
        } else {
            0
        }
    }

    /// Salary for a relative year, 0 if the schedule has no entry
    pub fn salary_for(&self, year: usize) -> f64 {
        self.yearly_incomes.get(year).copied().unwrap_or(0.0)
    }
}
