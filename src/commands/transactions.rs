// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, month_end, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("update", sub)) => update(client, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        Some(("export", sub)) => export(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount <= Decimal::ZERO {
        anyhow::bail!("Amount must be positive; use --type expense for outflows");
    }
    let typ: TransactionType = sub.get_one::<String>("type").unwrap().parse()
        .map_err(anyhow::Error::msg)?;
    let description = sub.get_one::<String>("description").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let account_id = *sub.get_one::<i64>("account").unwrap();

    let mut body = json!({
        "amount": amount.to_string(),
        "transaction_type": typ.as_str(),
        "description": description,
        "transaction_date": date.to_string(),
        "account_id": account_id,
    });
    if let Some(cat) = sub.get_one::<i64>("category") {
        body["category_id"] = json!(cat);
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        body["notes"] = json!(notes);
    }
    let tx = client.create_transaction(&body)?;
    println!(
        "Recorded {} {} '{}' on {} (tx #{})",
        tx.transaction_type.as_str(),
        tx.amount,
        tx.description,
        tx.transaction_date,
        tx.id
    );
    Ok(())
}

fn update(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut body = Map::new();
    if let Some(amount) = sub.get_one::<String>("amount") {
        let amount = parse_decimal(amount)?;
        if amount <= Decimal::ZERO {
            anyhow::bail!("Amount must be positive; use --type expense for outflows");
        }
        body.insert("amount".into(), json!(amount.to_string()));
    }
    if let Some(typ) = sub.get_one::<String>("type") {
        let typ: TransactionType = typ.parse().map_err(anyhow::Error::msg)?;
        body.insert("transaction_type".into(), json!(typ.as_str()));
    }
    if let Some(description) = sub.get_one::<String>("description") {
        body.insert("description".into(), json!(description));
    }
    if let Some(date) = sub.get_one::<String>("date") {
        body.insert("transaction_date".into(), json!(parse_date(date)?.to_string()));
    }
    if let Some(acct) = sub.get_one::<i64>("account") {
        body.insert("account_id".into(), json!(acct));
    }
    if let Some(cat) = sub.get_one::<i64>("category") {
        body.insert("category_id".into(), json!(cat));
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        body.insert("notes".into(), json!(notes));
    }
    if body.is_empty() {
        println!("Nothing to update");
        return Ok(());
    }
    let tx = client.update_transaction(id, &Value::Object(body))?;
    println!(
        "Updated transaction #{}: {} {} '{}' on {}",
        tx.id,
        tx.transaction_type.as_str(),
        tx.amount,
        tx.description,
        tx.transaction_date
    );
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        query.push(("start_date", format!("{}-01", month)));
        query.push(("end_date", month_end(&month)?.to_string()));
    }
    if let Some(typ) = sub.get_one::<String>("type") {
        let typ: TransactionType = typ.parse().map_err(anyhow::Error::msg)?;
        query.push(("transaction_type", typ.as_str().to_string()));
    }
    if let Some(acct) = sub.get_one::<i64>("account") {
        query.push(("account_id", acct.to_string()));
    }
    if let Some(cat) = sub.get_one::<i64>("category") {
        query.push(("category_id", cat.to_string()));
    }
    if let Some(search) = sub.get_one::<String>("search") {
        query.push(("search", search.clone()));
    }
    if let Some(page) = sub.get_one::<usize>("page") {
        query.push(("page", page.to_string()));
    }
    if let Some(size) = sub.get_one::<usize>("size") {
        query.push(("size", size.to_string()));
    }

    let page = client.list_transactions(&query)?;
    if maybe_print_json(json_flag, jsonl_flag, &page.items)? {
        return Ok(());
    }
    let rows = page
        .items
        .iter()
        .map(|t| {
            vec![
                t.transaction.id.to_string(),
                t.transaction.transaction_date.to_string(),
                t.transaction.transaction_type.as_str().to_string(),
                t.transaction.amount.clone(),
                t.transaction.description.clone(),
                t.account_name.clone().unwrap_or_default(),
                t.category_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Amount", "Description", "Account", "Category"],
            rows,
        )
    );
    println!(
        "Page {}/{} ({} transactions total)",
        page.page, page.pages, page.total
    );
    Ok(())
}

/// The backend renders the export; we just save the opaque payload.
fn export(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        anyhow::bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let payload = client.export_transactions(&fmt)?;
    std::fs::write(out, payload)?;
    println!("Exported transactions to {}", out);
    Ok(())
}
