//! Tests for the single-year state transition

use crate::model::{PolicyConfig, Rates, YearRecord};
use crate::transition::transition_year;

fn zero_rates() -> Rates {
    Rates::new(0.0, 0.0)
}

#[test]
fn test_home_sale_fills_registered_room_first() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 70,
        home_sale_proceeds: 200_000.0,
        rrsp_balance: 20_000.0,
        rrsp_cost_basis: 20_000.0,
        tfsa_balance: 25_000.0,
        ..YearRecord::default()
    };
    let (_, next) = transition_year(&record, zero_rates(), &policy);

    // RRSP room 10k, TFSA room 5k, remainder to non-registered at full basis
    assert!((next.rrsp_balance - 30_000.0).abs() < 1e-9);
    assert!((next.rrsp_cost_basis - 30_000.0).abs() < 1e-9);
    assert!((next.tfsa_balance - 30_000.0).abs() < 1e-9);
    assert!((next.non_reg_balance - 185_000.0).abs() < 1e-9);
    assert!((next.non_reg_cost_basis - 185_000.0).abs() < 1e-9);
}

#[test]
fn test_home_sale_past_rrsp_age_skips_rrsp() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 72,
        home_sale_proceeds: 100_000.0,
        rrsp_balance: 20_000.0,
        ..YearRecord::default()
    };
    let (_, next) = transition_year(&record, zero_rates(), &policy);

    assert!((next.rrsp_balance - 20_000.0).abs() < 1e-9, "no RRSP room past the age cutoff");
    assert!((next.tfsa_balance - 30_000.0).abs() < 1e-9);
    assert!((next.non_reg_balance - 70_000.0).abs() < 1e-9);
}

#[test]
fn test_surplus_allocation_priority() {
    // Salary 50k, no expenses: tax is 2250 + 8750 = 11000, surplus 39000.
    // RRSP takes its 5k of room, TFSA its full 30k cap, 4k spills over.
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 60,
        salary: 50_000.0,
        rrsp_balance: 25_000.0,
        rrsp_cost_basis: 25_000.0,
        ..YearRecord::default()
    };
    let (computed, next) = transition_year(&record, zero_rates(), &policy);

    assert!((computed.tax_paid - 11_000.0).abs() < 1e-9);
    assert!((next.rrsp_balance - 30_000.0).abs() < 1e-9);
    assert!((next.tfsa_balance - 30_000.0).abs() < 1e-9);
    assert!((next.non_reg_balance - 4_000.0).abs() < 1e-9);
    assert!((next.non_reg_cost_basis - 4_000.0).abs() < 1e-9);
}

#[test]
fn test_growth_past_cap_blocks_contribution() {
    // The RRSP grows past its cap during the year; the surplus allocation
    // then skips it entirely rather than topping up to the cap.
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 60,
        salary: 50_000.0,
        rrsp_balance: 29_000.0,
        rrsp_cost_basis: 29_000.0,
        ..YearRecord::default()
    };
    let rates = Rates::new(0.02, 0.03);
    let (_, next) = transition_year(&record, rates, &policy);

    let grown = 29_000.0 * 1.05;
    assert!(grown > policy.rrsp_contribution_cap);
    assert!(
        (next.rrsp_balance - grown).abs() < 1e-6,
        "no contribution on top of {}, got {}",
        grown,
        next.rrsp_balance
    );
}

#[test]
fn test_pure_growth_year_is_surplus() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 62,
        non_reg_balance: 100_000.0,
        non_reg_cost_basis: 100_000.0,
        rrsp_balance: 50_000.0,
        rrsp_cost_basis: 50_000.0,
        tfsa_balance: 20_000.0,
        ..YearRecord::default()
    };
    let rates = Rates::new(0.02, 0.03);
    let (computed, next) = transition_year(&record, rates, &policy);

    // Investment income is thrown off the post-growth non-registered balance
    assert!((computed.investment_income - 103_000.0 * 0.02).abs() < 1e-6);
    assert_eq!(computed.non_reg_withdrawal, 0.0);
    assert_eq!(computed.rrsp_withdrawal, 0.0);

    let combined_before = 100_000.0 + 50_000.0 + 20_000.0;
    let combined_after = next.non_reg_balance + next.rrsp_balance + next.tfsa_balance;
    assert!(
        combined_after > combined_before,
        "growth with no expenses must increase the combined balance"
    );
}

#[test]
fn test_locked_in_payouts_after_payout_age() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 66,
        lira_balance: 100_000.0,
        lif_balance: 50_000.0,
        ..YearRecord::default()
    };
    let (computed, next) = transition_year(&record, zero_rates(), &policy);

    // 8% of LIRA plus 6% of LIF lands in ordinary income
    assert!((computed.salary - 11_000.0).abs() < 1e-9);
    assert!((next.lira_balance - 92_000.0).abs() < 1e-9);
    assert!((next.lif_balance - 47_000.0).abs() < 1e-9);
}

#[test]
fn test_no_locked_in_payout_at_payout_age() {
    // The payout begins strictly after the threshold age
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 65,
        lira_balance: 100_000.0,
        lif_balance: 50_000.0,
        ..YearRecord::default()
    };
    let (computed, next) = transition_year(&record, zero_rates(), &policy);

    assert_eq!(computed.salary, 0.0);
    assert!((next.lira_balance - 100_000.0).abs() < 1e-9);
    assert!((next.lif_balance - 50_000.0).abs() < 1e-9);
}

#[test]
fn test_rrif_carries_forward_on_surplus_year() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 70,
        salary: 30_000.0,
        rrif_balance: 50_000.0,
        ..YearRecord::default()
    };
    let (_, next) = transition_year(&record, zero_rates(), &policy);

    assert!((next.rrif_balance - 50_000.0).abs() < 1e-9);
}

#[test]
fn test_deficit_year_balances_ledger() {
    // No salary, 50k expenses, ample non-registered at full basis: the
    // withdrawal carries no tax and the ledger closes to the solver epsilon.
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 70,
        expenses: 50_000.0,
        non_reg_balance: 200_000.0,
        non_reg_cost_basis: 200_000.0,
        ..YearRecord::default()
    };
    let (computed, next) = transition_year(&record, zero_rates(), &policy);

    assert!(
        (computed.credits - computed.debits).abs() <= 1.5,
        "credits {} vs debits {}",
        computed.credits,
        computed.debits
    );
    assert!((computed.non_reg_withdrawal - 50_000.0).abs() <= 1.5);
    assert!((next.non_reg_balance - 150_000.0).abs() <= 1.5);
    assert!((next.non_reg_cost_basis - next.non_reg_balance).abs() <= 1.5);
}

#[test]
fn test_deficit_year_reduces_cost_basis_proportionally() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 70,
        expenses: 50_000.0,
        non_reg_balance: 200_000.0,
        non_reg_cost_basis: 100_000.0,
        ..YearRecord::default()
    };
    let (computed, next) = transition_year(&record, zero_rates(), &policy);

    let fraction = computed.non_reg_withdrawal / 200_000.0;
    let expected_basis = 100_000.0 * (1.0 - fraction);
    assert!(
        (next.non_reg_cost_basis - expected_basis).abs() < 1e-6,
        "basis should shrink by the withdrawn fraction: {} vs {}",
        next.non_reg_cost_basis,
        expected_basis
    );
}

#[test]
fn test_transition_does_not_mutate_input() {
    let policy = PolicyConfig::default();
    let record = YearRecord {
        age: 70,
        salary: 40_000.0,
        non_reg_balance: 100_000.0,
        non_reg_cost_basis: 80_000.0,
        ..YearRecord::default()
    };
    let before = record.clone();
    let _ = transition_year(&record, Rates::new(0.02, 0.03), &policy);
    assert_eq!(record.non_reg_balance, before.non_reg_balance);
    assert_eq!(record.salary, before.salary);
    assert_eq!(record.tax_paid, before.tax_paid);
}
