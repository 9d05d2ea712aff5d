//! Policy parameters: tax brackets, clawback rules, contribution caps,
//! age cutoffs, and mandatory payout rates
//!
//! These vary by jurisdiction and regulatory year, so they live in one
//! immutable configuration struct instead of inline literals. The
//! `Default` implementation carries the reference table this engine
//! models.

use serde::{Deserialize, Serialize};

/// Single marginal bracket; income up to `up_to` (exclusive of lower
/// brackets) is taxed at `rate`. The last bracket's `up_to` is unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxBracket {
    pub up_to: f64,
    pub rate: f64,
}

/// All policy parameters consumed by the projection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Ordered, non-overlapping combined (federal + provincial) brackets
    pub tax_brackets: Vec<TaxBracket>,

    /// Net income above this threshold reduces the government benefit
    pub clawback_threshold: f64,
    /// Benefit reduction per dollar of income over the threshold
    pub clawback_rate: f64,

    /// Annual RRSP contribution ceiling
    pub rrsp_contribution_cap: f64,
    /// Annual TFSA contribution ceiling
    pub tfsa_contribution_cap: f64,
    /// No RRSP contributions are permitted past this age
    pub rrsp_age_cutoff: u8,

    /// LIRA/LIF mandatory payouts begin the year age exceeds this
    pub locked_in_payout_age: u8,
    pub lira_payout_rate: f64,
    pub lif_payout_rate: f64,

    /// Portion of a positive realized capital gain that is taxable
    pub capital_gains_inclusion: f64,

    /// Last age of the first expense stage (inclusive)
    pub stage_one_max_age: u8,
    /// Last age of the second expense stage (inclusive)
    pub stage_two_max_age: u8,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            tax_brackets: vec![
                TaxBracket {
                    up_to: 15_000.0,
                    rate: 0.15,
                },
                TaxBracket {
                    up_to: 50_000.0,
                    rate: 0.25,
                },
                TaxBracket {
                    up_to: 100_000.0,
                    rate: 0.35,
                },
                TaxBracket {
                    up_to: f64::INFINITY,
                    rate: 0.45,
                },
            ],
            clawback_threshold: 90_997.0,
            clawback_rate: 0.15,
            rrsp_contribution_cap: 30_000.0,
            tfsa_contribution_cap: 30_000.0,
            rrsp_age_cutoff: 71,
            locked_in_payout_age: 65,
            lira_payout_rate: 0.08,
            lif_payout_rate: 0.06,
            capital_gains_inclusion: 0.5,
            stage_one_max_age: 75,
            stage_two_max_age: 85,
        }
    }
}
