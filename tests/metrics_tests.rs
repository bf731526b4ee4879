// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneydash::metrics::{
    account_metrics, budget_progress, decimal_or_zero, display_percentage, summarize_budgets,
    BudgetStatus,
};
use moneydash::models::{Account, AccountType, Budget, BudgetPeriod, BudgetWithProgress};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn account(id: i64, account_type: AccountType, balance: &str, is_active: bool) -> Account {
    Account {
        id,
        name: format!("acct-{}", id),
        account_type,
        balance: balance.to_string(),
        currency: "USD".into(),
        description: None,
        is_active,
        user_id: 1,
        created_at: "2025-01-01T00:00:00".into(),
        updated_at: "2025-01-01T00:00:00".into(),
    }
}

fn budget_row(id: i64, amount: &str, spent: &str) -> BudgetWithProgress {
    let amount_dec = decimal_or_zero(amount);
    let spent_dec = decimal_or_zero(spent);
    let progress = budget_progress(amount_dec, spent_dec);
    BudgetWithProgress {
        budget: Budget {
            id,
            user_id: 1,
            category_id: id,
            category_name: Some(format!("cat-{}", id)),
            amount: amount.to_string(),
            period: BudgetPeriod::Monthly,
            start_date: "2025-08-01".into(),
            end_date: None,
            created_at: "2025-08-01T00:00:00".into(),
            updated_at: "2025-08-01T00:00:00".into(),
        },
        spent: spent.to_string(),
        remaining: progress.remaining.to_string(),
        percentage: 0.0,
        status: progress.status.as_str().to_string(),
    }
}

#[test]
fn budget_under_eighty_percent_is_on_track() {
    // amount=200.00, spent=150.00 -> remaining=50.00, 75%, on_track
    let p = budget_progress(dec("200.00"), dec("150.00"));
    assert_eq!(p.remaining, dec("50.00"));
    assert_eq!(p.percentage, dec("75"));
    assert_eq!(p.status, BudgetStatus::OnTrack);
}

#[test]
fn budget_at_exactly_eighty_percent_is_warning() {
    let p = budget_progress(dec("200.00"), dec("160.00"));
    assert_eq!(p.percentage, dec("80"));
    assert_eq!(p.status, BudgetStatus::Warning);
}

#[test]
fn budget_at_exactly_one_hundred_percent_is_exceeded() {
    let p = budget_progress(dec("200.00"), dec("200.00"));
    assert_eq!(p.percentage, dec("100"));
    assert_eq!(p.status, BudgetStatus::Exceeded);
}

#[test]
fn budget_just_under_boundaries() {
    assert_eq!(
        budget_progress(dec("10000"), dec("7999")).status,
        BudgetStatus::OnTrack
    );
    assert_eq!(
        budget_progress(dec("10000"), dec("9999")).status,
        BudgetStatus::Warning
    );
}

#[test]
fn overspent_budget_reports_negative_remaining() {
    // amount=200.00, spent=250.00 -> remaining=-50.00, 125%, exceeded
    let p = budget_progress(dec("200.00"), dec("250.00"));
    assert_eq!(p.remaining, dec("-50.00"));
    assert_eq!(p.percentage, dec("125"));
    assert_eq!(p.status, BudgetStatus::Exceeded);
}

#[test]
fn zero_amount_budget_is_zero_percent_on_track() {
    let p = budget_progress(Decimal::ZERO, dec("42.00"));
    assert_eq!(p.percentage, Decimal::ZERO);
    assert_eq!(p.status, BudgetStatus::OnTrack);
}

#[test]
fn display_percentage_clamps_but_classification_does_not() {
    let p = budget_progress(dec("200.00"), dec("300.00"));
    assert_eq!(p.percentage, dec("150"));
    assert_eq!(display_percentage(p.percentage), dec("100"));
    assert_eq!(display_percentage(dec("-5")), Decimal::ZERO);
    // The unclamped value still drives the status.
    assert_eq!(BudgetStatus::classify(p.percentage), BudgetStatus::Exceeded);
}

#[test]
fn account_metrics_splits_assets_and_liabilities() {
    // checking 1000.00 + credit 300.00 -> assets 1000, liabilities 300, net 700
    let accounts = vec![
        account(1, AccountType::Checking, "1000.00", true),
        account(2, AccountType::Credit, "300.00", true),
    ];
    let m = account_metrics(&accounts);
    assert_eq!(m.total_assets, dec("1000.00"));
    assert_eq!(m.total_liabilities, dec("300.00"));
    assert_eq!(m.net_worth, dec("700.00"));
    assert_eq!(m.count, 2);
    assert_eq!(m.active_count, 2);
}

#[test]
fn assets_never_include_credit_or_loan() {
    let accounts = vec![
        account(1, AccountType::Savings, "500.00", true),
        account(2, AccountType::Investment, "250.00", false),
        account(3, AccountType::Credit, "100.00", true),
        account(4, AccountType::Loan, "900.00", true),
    ];
    let m = account_metrics(&accounts);
    assert_eq!(m.total_assets, dec("750.00"));
    assert_eq!(m.total_liabilities, dec("1000.00"));
    assert_eq!(m.net_worth, dec("-250.00"));
    assert_eq!(m.active_count, 3);
}

#[test]
fn liabilities_keep_their_stored_sign() {
    // Some sources store owed amounts as negatives; the aggregate keeps the
    // raw sum and net worth subtracts the magnitude either way.
    let accounts = vec![
        account(1, AccountType::Checking, "1000.00", true),
        account(2, AccountType::Credit, "-300.00", true),
    ];
    let m = account_metrics(&accounts);
    assert_eq!(m.total_liabilities, dec("-300.00"));
    assert_eq!(m.net_worth, dec("700.00"));
}

#[test]
fn malformed_balance_counts_as_zero() {
    assert_eq!(decimal_or_zero("not-a-number"), Decimal::ZERO);
    assert_eq!(decimal_or_zero(""), Decimal::ZERO);
    assert_eq!(decimal_or_zero("12.34"), dec("12.34"));

    let accounts = vec![
        account(1, AccountType::Checking, "garbage", true),
        account(2, AccountType::Cash, "50.00", true),
    ];
    let m = account_metrics(&accounts);
    assert_eq!(m.total_assets, dec("50.00"));
    assert_eq!(m.net_worth, dec("50.00"));
}

#[test]
fn account_metrics_is_a_pure_function() {
    let accounts = vec![
        account(1, AccountType::Checking, "1000.00", true),
        account(2, AccountType::Loan, "-250.00", false),
    ];
    let first = account_metrics(&accounts);
    let second = account_metrics(&accounts);
    assert_eq!(first, second);
}

#[test]
fn summary_totals_and_status_counts() {
    let budgets = vec![
        budget_row(1, "200.00", "150.00"), // on_track
        budget_row(2, "200.00", "160.00"), // warning
        budget_row(3, "200.00", "250.00"), // exceeded
    ];
    let s = summarize_budgets(&budgets);
    assert_eq!(s.total_budget, dec("600.00"));
    assert_eq!(s.total_spent, dec("560.00"));
    assert_eq!(s.total_remaining, dec("40.00"));
    assert_eq!(s.on_track_count, 1);
    assert_eq!(s.warning_count, 1);
    assert_eq!(s.exceeded_count, 1);
    // 560 / 600 * 100
    assert_eq!(s.overall_percentage.round_dp(2), dec("93.33"));
}

#[test]
fn empty_summary_has_zero_percentage() {
    let s = summarize_budgets(&[]);
    assert_eq!(s.total_budget, Decimal::ZERO);
    assert_eq!(s.overall_percentage, Decimal::ZERO);
}
