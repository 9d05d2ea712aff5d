//! Tax and benefit-clawback calculations
//!
//! Pure functions over the policy's bracket table. The withdrawal solver
//! and year transition both lean on these, so keeping them closed-form
//! and side-effect free keeps the equilibrium search auditable.

use crate::model::{PolicyConfig, TaxBracket};

/// Calculate progressive tax on a taxable-income amount
///
/// Income is allocated across the ordered brackets in ascending order;
/// the portion fitting within each bracket's width is taxed at that
/// bracket's marginal rate. Non-positive income owes nothing.
pub fn progressive_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }

    let mut remaining = taxable_income;
    let mut total_tax = 0.0;
    let mut prev_bracket_end = 0.0;

    for bracket in brackets {
        let bracket_size = bracket.up_to - prev_bracket_end;
        let amount_at_this_rate = remaining.min(bracket_size);
        total_tax += amount_at_this_rate * bracket.rate;

        remaining -= amount_at_this_rate;
        prev_bracket_end = bracket.up_to;
        if remaining <= 0.0 {
            break;
        }
    }

    total_tax
}

/// Result of applying the means test to the government benefit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClawbackResult {
    pub clawback: f64,
    pub benefit_after_clawback: f64,
}

/// Calculate the means-tested reduction of the annual benefit
///
/// Income at or below the threshold keeps the full benefit; above it the
/// benefit is reduced at the clawback rate, capped at the gross amount so
/// the paid benefit never goes negative.
pub fn benefit_clawback(
    net_income_before_benefit: f64,
    gross_benefit: f64,
    policy: &PolicyConfig,
) -> ClawbackResult {
    if net_income_before_benefit <= policy.clawback_threshold {
        return ClawbackResult {
            clawback: 0.0,
            benefit_after_clawback: gross_benefit,
        };
    }
    let over = net_income_before_benefit - policy.clawback_threshold;
    let clawback = gross_benefit.min(over * policy.clawback_rate);
    ClawbackResult {
        clawback,
        benefit_after_clawback: gross_benefit - clawback,
    }
}

/// Taxable portion of the capital gain realized by withdrawing `amount`
/// from a non-registered account
///
/// The cost basis consumed is proportional to the fraction of the balance
/// withdrawn; only the inclusion-rate share of a positive gain is taxable
/// and losses are not deductible (clamped to zero, not negative).
pub fn taxable_capital_gain(
    amount: f64,
    balance: f64,
    cost_basis: f64,
    inclusion_rate: f64,
) -> f64 {
    if amount <= 0.0 || balance <= 0.0 {
        return 0.0;
    }
    let proportion = amount / balance;
    let cost_basis_used = cost_basis * proportion;
    let realized_gain = amount - cost_basis_used;
    if realized_gain > 0.0 {
        realized_gain * inclusion_rate
    } else {
        0.0
    }
}
