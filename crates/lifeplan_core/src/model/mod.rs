mod config;
mod policy;
mod year;

pub use config::{
    BenefitConfig, ExpensePolicy, HomeSale, InitialBalances, ProjectionConfig, Rates,
    StageExpenses,
};
pub use policy::{PolicyConfig, TaxBracket};
pub use year::{OneOffExpense, YearRecord};
