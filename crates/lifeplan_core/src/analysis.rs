//! Post-hoc scans over a finished projection
//!
//! Running out of money is a modeled outcome, not an error: balances go
//! negative in the records and these helpers find where.

use serde::{Deserialize, Serialize};

use crate::model::YearRecord;

/// Combined drawable assets for one year (locked-in accounts excluded)
pub fn total_assets(record: &YearRecord) -> f64 {
    record.non_reg_balance + record.rrsp_balance + record.tfsa_balance
}

/// First year whose combined balance has dropped below zero, if any
pub fn first_insolvent_year(records: &[YearRecord]) -> Option<&YearRecord> {
    records.iter().find(|r| total_assets(r) < 0.0)
}

/// Final-year standing of a finished projection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub final_age: u8,
    pub non_reg_balance: f64,
    pub rrsp_balance: f64,
    pub tfsa_balance: f64,
    pub total: f64,
    /// Age in the first insolvent year, if the money ran out
    pub insolvent_at_age: Option<u8>,
}

/// Summarize a finished projection; `None` for an empty sequence
pub fn summarize(records: &[YearRecord]) -> Option<ProjectionSummary> {
    let last = records.last()?;
    Some(ProjectionSummary {
        final_age: last.age,
        non_reg_balance: last.non_reg_balance,
        rrsp_balance: last.rrsp_balance,
        tfsa_balance: last.tfsa_balance,
        total: total_assets(last),
        insolvent_at_age: first_insolvent_year(records).map(|r| r.age),
    })
}
