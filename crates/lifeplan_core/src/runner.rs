//! Projection driver and the sustainable-withdrawal search
//!
//! `run_projection` folds the year transition left to right over the
//! sequence; every year reads the previous year's post-transition
//! balances, so years are inherently sequential. The outer search
//! evaluates isolated candidate projections (each on its own copy of the
//! base sequence), which is why candidates — unlike years — can be
//! evaluated in parallel.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::model::{PolicyConfig, Rates, YearRecord};
use crate::transition::{advance, lump_sum_tax};

/// Combined balance a candidate must keep in every year but the last for
/// the withdrawal to count as sustainable; also the bracket width at
/// which the outer bisection stops
const BALANCE_TOLERANCE: f64 = 1_000.0;

/// Iteration cap for the outer bisection
const MAX_ITERATIONS: usize = 30;

/// Balances that survive to the end of the projection for sustainability
/// purposes (locked-in accounts are excluded; they cannot be drawn at
/// will)
fn combined_balance(record: &YearRecord) -> f64 {
    record.non_reg_balance + record.rrsp_balance + record.tfsa_balance
}

/// Run the full projection in place
///
/// A non-zero `lump_sum_withdrawal` is debited from year 1's
/// non-registered balance first (capped at that balance), with its
/// capital-gains tax recorded immediately against year 1's debits and tax
/// paid and the cost basis reduced proportionally. Transitions then run
/// over every adjacent year pair in order.
pub fn run_projection(
    records: &mut [YearRecord],
    rates: Rates,
    policy: &PolicyConfig,
    lump_sum_withdrawal: f64,
) {
    if records.is_empty() {
        return;
    }

    if lump_sum_withdrawal > 0.0 {
        let first = &mut records[0];
        let amount = lump_sum_withdrawal.min(first.non_reg_balance).max(0.0);
        if amount > 0.0 {
            let tax = lump_sum_tax(amount, first, policy);
            let proportion = amount / first.non_reg_balance;
            first.non_reg_cost_basis -= first.non_reg_cost_basis * proportion;
            first.non_reg_balance -= amount;
            first.non_reg_withdrawal += amount;
            first.debits += tax;
            first.tax_paid += tax;
        }
    }

    for index in 0..records.len().saturating_sub(1) {
        advance(records, index, rates, policy);
    }
}

/// Why the sustainable-withdrawal search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The bracket shrank below the tolerance
    Converged,
    /// Iteration cap reached without convergence
    MaxIterationsReached,
    /// No candidate — not even zero — satisfied the solvency constraint
    NoFeasibleSolution,
}

/// Result of the outer search for the maximum sustainable withdrawal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WithdrawalSearchResult {
    /// Best sustainable first-year withdrawal found; 0 when none validated
    pub withdrawal: f64,
    /// Final-year combined balance at that withdrawal; `None` when no
    /// candidate ever validated ("no sustainable withdrawal found")
    pub final_balance: Option<f64>,
    pub converged: bool,
    pub termination_reason: TerminationReason,
    pub iterations: usize,
}

impl WithdrawalSearchResult {
    fn no_feasible_solution(iterations: usize) -> Self {
        WithdrawalSearchResult {
            withdrawal: 0.0,
            final_balance: None,
            converged: false,
            termination_reason: TerminationReason::NoFeasibleSolution,
            iterations,
        }
    }
}

/// Outcome of projecting one candidate withdrawal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CandidateOutcome {
    pub withdrawal: f64,
    /// Combined balance stayed above the tolerance in every year except
    /// possibly the last
    pub valid: bool,
    pub final_balance: f64,
}

/// Project a single candidate on its own copy of the base sequence
fn evaluate_candidate(
    base: &[YearRecord],
    rates: Rates,
    policy: &PolicyConfig,
    withdrawal: f64,
) -> CandidateOutcome {
    let mut records = base.to_vec();
    run_projection(&mut records, rates, policy, withdrawal);

    let last = records.len() - 1;
    let valid = records[..last]
        .iter()
        .all(|r| combined_balance(r) > BALANCE_TOLERANCE);

    CandidateOutcome {
        withdrawal,
        valid,
        final_balance: combined_balance(&records[last]),
    }
}

/// Evaluate an explicit list of candidate withdrawals, one isolated
/// projection each
///
/// The bounded-exhaustive counterpart to `find_optimal_withdrawal`; with
/// the `parallel` feature the candidates run on the rayon pool.
pub fn evaluate_candidates(
    base: &[YearRecord],
    rates: Rates,
    policy: &PolicyConfig,
    candidates: &[f64],
) -> Vec<CandidateOutcome> {
    if base.is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "parallel")]
    let outcomes = candidates
        .par_iter()
        .map(|&w| evaluate_candidate(base, rates, policy, w))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes = candidates
        .iter()
        .map(|&w| evaluate_candidate(base, rates, policy, w))
        .collect();

    outcomes
}

/// Bisect for the maximum first-year withdrawal that keeps the combined
/// balance above the tolerance through every year and lands the final
/// balance at or above the target
///
/// Candidates run on deep copies of `base`, which is left untouched.
/// Terminates when the bracket shrinks below the tolerance or after the
/// iteration cap; either way the best valid withdrawal seen is returned.
pub fn find_optimal_withdrawal(
    base: &[YearRecord],
    rates: Rates,
    policy: &PolicyConfig,
    target_ending_balance: f64,
) -> WithdrawalSearchResult {
    if base.is_empty() {
        return WithdrawalSearchResult::no_feasible_solution(0);
    }

    let mut low = 0.0;
    let mut high = combined_balance(&base[0]);
    let mut best: Option<CandidateOutcome> = None;
    let mut iterations = 0;

    // Evaluate the zero-withdrawal endpoint first so "no feasible
    // solution" genuinely means even standing still fails.
    let zero = evaluate_candidate(base, rates, policy, 0.0);
    if zero.valid && zero.final_balance >= target_ending_balance {
        best = Some(zero);
    }

    while iterations < MAX_ITERATIONS && high - low > BALANCE_TOLERANCE {
        iterations += 1;
        let mid = f64::midpoint(low, high);
        let outcome = evaluate_candidate(base, rates, policy, mid);

        if outcome.valid && outcome.final_balance >= target_ending_balance {
            // Sustainable with room to spare: try withdrawing more
            if best.is_none_or(|b| outcome.withdrawal > b.withdrawal) {
                best = Some(outcome);
            }
            low = mid;
        } else {
            high = mid;
        }
    }

    match best {
        Some(outcome) => {
            let converged = high - low <= BALANCE_TOLERANCE;
            WithdrawalSearchResult {
                withdrawal: outcome.withdrawal,
                final_balance: Some(outcome.final_balance),
                converged,
                termination_reason: if converged {
                    TerminationReason::Converged
                } else {
                    TerminationReason::MaxIterationsReached
                },
                iterations,
            }
        }
        None => WithdrawalSearchResult::no_feasible_solution(iterations),
    }
}
