// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side aggregation over raw account and budget records. Everything in
//! here is a pure function of its inputs and recomputes from scratch on every
//! call; account lists are small enough that correctness beats caching.
//!
//! Monetary strings are parsed through [`decimal_or_zero`]: this is display
//! aggregation, not a ledger of record, so malformed input degrades to zero
//! instead of failing the whole view. The backend stays authoritative for
//! actual balance mutation.

use crate::models::{Account, BudgetWithProgress};
use crate::utils::parse_decimal;
use rust_decimal::Decimal;
use serde::Serialize;

/// Lenient boundary parse: invalid decimal strings count as zero.
pub fn decimal_or_zero(s: &str) -> Decimal {
    parse_decimal(s).unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    /// Classify an unclamped spend percentage. Boundaries are inclusive:
    /// exactly 80 is `Warning`, exactly 100 is `Exceeded`.
    pub fn classify(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            BudgetStatus::Exceeded
        } else if percentage >= Decimal::from(80) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on_track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Approaching Limit",
            BudgetStatus::Exceeded => "Budget Exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub remaining: Decimal,
    /// Unclamped; feeds classification and labels. Clamp with
    /// [`display_percentage`] only when rendering a bar.
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// Derive progress for one budget. A zero (or negative) ceiling reports 0%
/// rather than dividing by zero.
pub fn budget_progress(amount: Decimal, spent: Decimal) -> BudgetProgress {
    let remaining = amount - spent;
    let percentage = if amount > Decimal::ZERO {
        spent / amount * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    BudgetProgress {
        remaining,
        percentage,
        status: BudgetStatus::classify(percentage),
    }
}

/// Clamp a percentage into [0, 100] for progress-bar rendering. Never use the
/// clamped value for status classification.
pub fn display_percentage(percentage: Decimal) -> Decimal {
    percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccountMetrics {
    pub count: usize,
    pub active_count: usize,
    pub total_assets: Decimal,
    /// Raw sum of credit/loan balances, sign preserved. Take the absolute
    /// value at display time only.
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
}

/// Partition accounts into asset-like and liability-like (credit, loan) and
/// total their balances. net_worth = total_assets - |total_liabilities|.
pub fn account_metrics(accounts: &[Account]) -> AccountMetrics {
    let mut total_assets = Decimal::ZERO;
    let mut total_liabilities = Decimal::ZERO;
    let mut active_count = 0;
    for account in accounts {
        if account.is_active {
            active_count += 1;
        }
        let balance = decimal_or_zero(&account.balance);
        if account.account_type.is_liability() {
            total_liabilities += balance;
        } else {
            total_assets += balance;
        }
    }
    AccountMetrics {
        count: accounts.len(),
        active_count,
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities.abs(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    pub overall_percentage: Decimal,
    pub on_track_count: usize,
    pub warning_count: usize,
    pub exceeded_count: usize,
}

/// Reduce a budget list to the dashboard summary row. Status counts come from
/// re-classifying each budget's own amount/spent pair, not from the wire
/// `status` string.
pub fn summarize_budgets(budgets: &[BudgetWithProgress]) -> BudgetSummary {
    let mut total_budget = Decimal::ZERO;
    let mut total_spent = Decimal::ZERO;
    let mut on_track_count = 0;
    let mut warning_count = 0;
    let mut exceeded_count = 0;
    for b in budgets {
        let amount = decimal_or_zero(&b.budget.amount);
        let spent = decimal_or_zero(&b.spent);
        total_budget += amount;
        total_spent += spent;
        match budget_progress(amount, spent).status {
            BudgetStatus::OnTrack => on_track_count += 1,
            BudgetStatus::Warning => warning_count += 1,
            BudgetStatus::Exceeded => exceeded_count += 1,
        }
    }
    let overall_percentage = if total_budget > Decimal::ZERO {
        total_spent / total_budget * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    BudgetSummary {
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
        overall_percentage,
        on_track_count,
        warning_count,
        exceeded_count,
    }
}
