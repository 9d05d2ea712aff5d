//! Year-over-year retirement projection engine
//!
//! This crate projects an individual's multi-account finances from the
//! current age to life expectancy. It supports:
//! - Multiple account types with different tax treatments
//!   (non-registered, RRSP, TFSA, RRIF, locked-in LIRA/LIF)
//! - Progressive income tax and a means-tested benefit clawback
//! - Cost-basis tracking for capital gains on non-registered withdrawals
//! - A bisection solver for the withdrawal/tax equilibrium on deficit years
//! - An outer search for the maximum sustainable lump-sum withdrawal
//!
//! # Builder
//!
//! Use the fluent builder for ergonomic projection setup:
//!
//! ```ignore
//! use lifeplan_core::builder::{ProjectionBuilder, build_projection};
//! use lifeplan_core::model::{PolicyConfig, Rates};
//! use lifeplan_core::runner::run_projection;
//!
//! let config = ProjectionBuilder::new(2025, 60, 90)
//!     .non_registered(500_000.0, 350_000.0)
//!     .rrsp(200_000.0)
//!     .tfsa(80_000.0)
//!     .annual_expenses(55_000.0, 5_000.0)
//!     .benefit(5, 8_000.0)
//!     .build();
//!
//! let policy = PolicyConfig::default();
//! let mut records = build_projection(&config, &policy);
//! run_projection(&mut records, Rates::new(0.02, 0.03), &policy, 0.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod builder;
pub mod format;
pub mod runner;
pub mod taxes;
pub mod transition;
pub mod withdrawal;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use builder::{ProjectionBuilder, build_projection};
pub use model::{PolicyConfig, ProjectionConfig, Rates, YearRecord};
pub use runner::{find_optimal_withdrawal, run_projection};
