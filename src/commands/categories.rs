// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::{json, Map, Value};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut body = json!({ "name": name });
            if let Some(desc) = sub.get_one::<String>("description") {
                body["description"] = json!(desc);
            }
            if let Some(color) = sub.get_one::<String>("color") {
                body["color"] = json!(color);
            }
            let cat = client.create_category(&body)?;
            println!("Added category '{}' as #{}", cat.name, cat.id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let cats = client.list_categories()?;
            if !maybe_print_json(json_flag, jsonl_flag, &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.color.clone().unwrap_or_default(),
                            if c.is_default { "yes" } else { "no" }.to_string(),
                            c.description.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Color", "Default", "Description"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let mut body = Map::new();
            if let Some(name) = sub.get_one::<String>("name") {
                body.insert("name".into(), json!(name));
            }
            if let Some(desc) = sub.get_one::<String>("description") {
                body.insert("description".into(), json!(desc));
            }
            if let Some(color) = sub.get_one::<String>("color") {
                body.insert("color".into(), json!(color));
            }
            if body.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            let cat = client.update_category(id, &Value::Object(body))?;
            println!("Updated category '{}' (#{})", cat.name, cat.id);
        }
        Some(("rm", sub)) => {
            // Seeded default categories are rejected server-side with a 4xx.
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_category(id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
