// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::metrics::{account_metrics, decimal_or_zero};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(client, sub)?,
        Some(("spending", sub)) => spending(client, sub)?,
        Some(("recent", sub)) => recent(client, sub)?,
        Some(("accounts", sub)) => accounts(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn accounts(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = client.accounts_summary()?;
    let metrics = account_metrics(&accounts);
    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({ "accounts": accounts, "metrics": metrics }),
    )? {
        return Ok(());
    }
    let rows = accounts
        .iter()
        .map(|a| {
            let balance = decimal_or_zero(&a.balance);
            let shown = if a.account_type.is_liability() {
                balance.abs()
            } else {
                balance
            };
            vec![
                a.name.clone(),
                a.account_type.as_str().to_string(),
                fmt_money(&shown, &a.currency),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Type", "Balance"], rows));
    println!(
        "Net worth {:.2} (assets {:.2}, liabilities {:.2})",
        metrics.net_worth,
        metrics.total_assets,
        metrics.total_liabilities.abs()
    );
    Ok(())
}

fn overview(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let o = client.dashboard_overview()?;
    if !maybe_print_json(json_flag, jsonl_flag, &o)? {
        println!(
            "{}",
            pretty_table(
                &["Total balance", "Monthly income", "Monthly expenses", "Net monthly", "Accounts"],
                vec![vec![
                    format!("{:.2}", o.total_balance),
                    format!("{:.2}", o.monthly_income),
                    format!("{:.2}", o.monthly_expenses),
                    format!("{:.2}", o.net_monthly),
                    o.account_count.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn spending(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let spending = client.spending_by_category()?;

    if let Some(out) = sub.get_one::<String>("out") {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["category_id", "category_name", "amount"])?;
        for s in &spending {
            wtr.write_record([
                s.category_id.to_string(),
                s.category_name.clone(),
                format!("{:.2}", s.amount),
            ])?;
        }
        wtr.flush()?;
        println!("Wrote spending breakdown to {}", out);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &spending)? {
        let rows = spending
            .iter()
            .map(|s| vec![s.category_name.clone(), format!("{:.2}", s.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn recent(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&10);
    let txs = client.recent_transactions(limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &txs)? {
        let rows = txs
            .iter()
            .map(|t| {
                vec![
                    t.transaction_date.to_string(),
                    t.transaction_type.as_str().to_string(),
                    t.amount.clone(),
                    t.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Description"], rows)
        );
    }
    Ok(())
}
