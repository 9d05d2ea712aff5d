//! Projection setup: a fluent configuration builder plus the seeding of
//! the dense year sequence
//!
//! The builder exists for ergonomic setup in tests and callers that
//! construct configs in code; presenters that already hold a parsed
//! `ProjectionConfig` (e.g. from JSON) can call `build_projection`
//! directly.

use crate::model::{
    ExpensePolicy, OneOffExpense, PolicyConfig, ProjectionConfig, StageExpenses, YearRecord,
};

/// Fluent builder for a `ProjectionConfig`
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    config: ProjectionConfig,
}

impl ProjectionBuilder {
    pub fn new(start_year: i32, current_age: u8, life_expectancy: u8) -> Self {
        ProjectionBuilder {
            config: ProjectionConfig {
                start_year,
                current_age,
                life_expectancy,
                ..ProjectionConfig::default()
            },
        }
    }

    /// Set the salary for one relative year
    pub fn salary(mut self, year: usize, amount: f64) -> Self {
        if self.config.yearly_incomes.len() <= year {
            self.config.yearly_incomes.resize(year + 1, 0.0);
        }
        self.config.yearly_incomes[year] = amount;
        self
    }

    /// Set a constant salary for relative years 1 through `last_year`
    pub fn salary_through(mut self, last_year: usize, amount: f64) -> Self {
        for year in 1..=last_year {
            self = self.salary(year, amount);
        }
        self
    }

    /// Flat annual expenses (used when staged expenses are off)
    pub fn annual_expenses(mut self, expenses: f64, healthcare: f64) -> Self {
        self.config.expense_policy.base_expenses = expenses;
        self.config.expense_policy.base_healthcare = healthcare;
        self
    }

    /// Enable age-staged expenses with the three band pairs
    pub fn staged_expenses(
        mut self,
        stage_one: StageExpenses,
        stage_two: StageExpenses,
        stage_three: StageExpenses,
    ) -> Self {
        self.config.expense_policy.use_stages = true;
        self.config.expense_policy.stage_one = stage_one;
        self.config.expense_policy.stage_two = stage_two;
        self.config.expense_policy.stage_three = stage_three;
        self
    }

    pub fn non_registered(mut self, balance: f64, cost_basis: f64) -> Self {
        self.config.initial_balances.non_reg = balance;
        self.config.initial_balances.non_reg_cost_basis = cost_basis;
        self
    }

    pub fn rrsp(mut self, amount: f64) -> Self {
        self.config.initial_balances.rrsp = amount;
        self
    }

    pub fn tfsa(mut self, amount: f64) -> Self {
        self.config.initial_balances.tfsa = amount;
        self
    }

    pub fn rrif(mut self, amount: f64) -> Self {
        self.config.initial_balances.rrif = amount;
        self
    }

    pub fn lira(mut self, amount: f64) -> Self {
        self.config.initial_balances.lira = amount;
        self
    }

    pub fn lif(mut self, amount: f64) -> Self {
        self.config.initial_balances.lif = amount;
        self
    }

    /// Government benefit active from a relative start year
    pub fn benefit(mut self, start_year: usize, annual_amount: f64) -> Self {
        self.config.benefit.start_year = start_year;
        self.config.benefit.annual_amount = annual_amount;
        self
    }

    /// One-time home sale in a relative year
    pub fn home_sale(mut self, year: usize, amount: f64) -> Self {
        self.config.home_sale.year = Some(year);
        self.config.home_sale.amount = amount;
        self
    }

    pub fn one_off_expense(mut self, year: usize, amount: f64, description: &str) -> Self {
        self.config.one_off_expenses.push(OneOffExpense {
            year,
            amount,
            description: (!description.is_empty()).then(|| description.to_string()),
        });
        self
    }

    pub fn build(self) -> ProjectionConfig {
        self.config
    }
}

/// Resolve the expense pair for one age under the policy's stage bands
fn resolve_expenses(policy: &ExpensePolicy, age: u8, bands: &PolicyConfig) -> (f64, f64) {
    if !policy.use_stages {
        return (policy.base_expenses, policy.base_healthcare);
    }
    let stage = if age <= bands.stage_one_max_age {
        policy.stage_one
    } else if age <= bands.stage_two_max_age {
        policy.stage_two
    } else {
        policy.stage_three
    };
    (stage.expenses, stage.healthcare)
}

/// Allocate and seed the full year sequence from the configuration
///
/// Produces one record per relative year 1 through the horizon, dense and
/// ordered. Only year 1 carries the initial balances; every later year
/// starts at zero pending its predecessor's transition. A non-positive
/// horizon yields an empty sequence ("nothing to project", not an error).
pub fn build_projection(config: &ProjectionConfig, policy: &PolicyConfig) -> Vec<YearRecord> {
    let horizon = config.horizon();
    let mut records = Vec::with_capacity(horizon);

    for year in 1..=horizon {
        let age = config.current_age + (year - 1) as u8;
        let (expenses, healthcare_expenses) = resolve_expenses(&config.expense_policy, age, policy);

        let mut record = YearRecord {
            year,
            calendar_year: config.start_year + (year as i32 - 1),
            age,
            salary: config.salary_for(year),
            expenses,
            healthcare_expenses,
            one_off_expenses: config
                .one_off_expenses
                .iter()
                .filter(|e| e.year == year)
                .cloned()
                .collect(),
            benefit_income: if year >= config.benefit.start_year {
                config.benefit.annual_amount
            } else {
                0.0
            },
            home_sale_proceeds: if config.home_sale.year == Some(year) {
                config.home_sale.amount
            } else {
                0.0
            },
            ..YearRecord::default()
        };

        if year == 1 {
            let initial = &config.initial_balances;
            record.non_reg_balance = initial.non_reg;
            record.non_reg_cost_basis = initial.non_reg_cost_basis;
            record.rrsp_balance = initial.rrsp;
            record.rrsp_cost_basis = initial.rrsp;
            record.tfsa_balance = initial.tfsa;
            record.rrif_balance = initial.rrif;
            record.lira_balance = initial.lira;
            record.lif_balance = initial.lif;
        }

        records.push(record);
    }

    records
}
