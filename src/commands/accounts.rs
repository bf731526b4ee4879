// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::metrics::{account_metrics, decimal_or_zero};
use crate::models::AccountType;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use serde_json::{json, Map, Value};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("show", sub)) => show(client, sub)?,
        Some(("update", sub)) => update(client, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_account(id)?;
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let typ: AccountType = sub.get_one::<String>("type").unwrap().parse()
        .map_err(anyhow::Error::msg)?;
    let mut body = json!({ "name": name, "account_type": typ.as_str() });
    if let Some(balance) = sub.get_one::<String>("balance") {
        // Validate locally before shipping; the backend would reject it anyway.
        parse_decimal(balance)?;
        body["balance"] = json!(balance);
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        body["currency"] = json!(ccy.to_uppercase());
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        body["description"] = json!(desc);
    }
    let account = client.create_account(&body)?;
    println!(
        "Added account '{}' ({}, {}) as #{}",
        account.name,
        account.account_type.as_str(),
        account.currency,
        account.id
    );
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = client.list_accounts()?;
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
            // Liability balances are owed amounts; show them as magnitudes.
            let shown = if a.account_type.is_liability() {
                balance.abs()
            } else {
                balance
            };
            vec![
                a.id.to_string(),
                a.name.clone(),
                a.account_type.as_str().to_string(),
                fmt_money(&shown, &a.currency),
                if a.is_active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Type", "Balance", "Active"], rows)
    );
    println!(
        "{} accounts ({} active) | assets {:.2} | liabilities {:.2} | net worth {:.2}",
        metrics.count,
        metrics.active_count,
        metrics.total_assets,
        metrics.total_liabilities.abs(),
        metrics.net_worth
    );
    Ok(())
}

fn show(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = *sub.get_one::<i64>("id").unwrap();
    let a = client.get_account(id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &a)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Type", "Balance", "CCY", "Active", "Description"],
                vec![vec![
                    a.id.to_string(),
                    a.name,
                    a.account_type.as_str().to_string(),
                    a.balance,
                    a.currency,
                    a.is_active.to_string(),
                    a.description.unwrap_or_default(),
                ]],
            )
        );
    }
    Ok(())
}

fn update(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut body = Map::new();
    if let Some(name) = sub.get_one::<String>("name") {
        body.insert("name".into(), json!(name));
    }
    if let Some(typ) = sub.get_one::<String>("type") {
        let typ: AccountType = typ.parse().map_err(anyhow::Error::msg)?;
        body.insert("account_type".into(), json!(typ.as_str()));
    }
    if let Some(balance) = sub.get_one::<String>("balance") {
        parse_decimal(balance)?;
        body.insert("balance".into(), json!(balance));
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        body.insert("currency".into(), json!(ccy.to_uppercase()));
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        body.insert("description".into(), json!(desc));
    }
    if body.is_empty() {
        println!("Nothing to update");
        return Ok(());
    }
    let account = client.update_account(id, &Value::Object(body))?;
    println!("Updated account '{}' (#{})", account.name, account.id);
    Ok(())
}
