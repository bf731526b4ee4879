// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::metrics::{budget_progress, decimal_or_zero, display_percentage, summarize_budgets};
use crate::models::BudgetPeriod;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_budget(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn set(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let category_id = *sub.get_one::<i64>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let period: BudgetPeriod = sub.get_one::<String>("period").unwrap().parse()
        .map_err(anyhow::Error::msg)?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;

    let mut body = json!({
        "category_id": category_id,
        "amount": amount.to_string(),
        "period": period.as_str(),
        "start_date": start.to_string(),
    });
    if let Some(end) = sub.get_one::<String>("end") {
        body["end_date"] = json!(parse_date(end)?.to_string());
    }
    let budget = client.create_budget(&body)?;
    println!(
        "Budget #{} set: category {} ceiling {} ({})",
        budget.id,
        budget
            .category_name
            .as_deref()
            .unwrap_or(&budget.category_id.to_string()),
        budget.amount,
        budget.period.as_str()
    );
    Ok(())
}

/// Twenty cells of bar for a clamped percentage.
fn render_bar(clamped: Decimal) -> String {
    use rust_decimal::prelude::ToPrimitive;
    let filled = (clamped / Decimal::from(5))
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(20);
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = client.list_budgets()?;
    if maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        return Ok(());
    }

    let mut rows = Vec::new();
    for b in &budgets {
        let amount = decimal_or_zero(&b.budget.amount);
        let spent = decimal_or_zero(&b.spent);
        // Progress is re-derived locally; the wire copy is not trusted for
        // display. The bar clamps, the percentage and status do not.
        let progress = budget_progress(amount, spent);
        rows.push(vec![
            b.budget.id.to_string(),
            b.budget
                .category_name
                .clone()
                .unwrap_or_else(|| "(uncategorized)".into()),
            b.budget.period.as_str().to_string(),
            format!("{:.2}", amount),
            format!("{:.2}", spent),
            format!("{:.2}", progress.remaining),
            format!("{:.1}%", progress.percentage),
            render_bar(display_percentage(progress.percentage)),
            progress.status.label().to_string(),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["ID", "Category", "Period", "Budget", "Spent", "Remaining", "%", "Progress", "Status"],
            rows,
        )
    );

    let s = summarize_budgets(&budgets);
    println!(
        "Total budget {:.2} | spent {:.2} ({:.1}% of budget) | {} {:.2} | on track {} / warning {} / exceeded {}",
        s.total_budget,
        s.total_spent,
        s.overall_percentage,
        if s.total_remaining >= Decimal::ZERO {
            "remaining"
        } else {
            "over by"
        },
        s.total_remaining.abs(),
        s.on_track_count,
        s.warning_count,
        s.exceeded_count
    );
    Ok(())
}
