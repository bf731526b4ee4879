// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn login(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    match client.login(email, password)? {
        Some(user) => println!("Logged in as {} <{}>", user.full_name, user.email),
        None => println!("Logged in (profile temporarily unavailable)"),
    }
    Ok(())
}

pub fn register(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let user = client.register(email, password, name)?;
    println!("Registered {} <{}>", user.full_name, user.email);
    // The register endpoint returns the user record, not tokens.
    client.login(email, password)?;
    println!("Logged in");
    Ok(())
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.logout();
    println!("Logged out");
    Ok(())
}

pub fn whoami(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = client.me()?;
    client.session().set_user(user.clone())?;
    if !maybe_print_json(json_flag, jsonl_flag, &user)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Email", "Active", "Member since"],
                vec![vec![
                    user.id.to_string(),
                    user.full_name,
                    user.email,
                    user.is_active.to_string(),
                    user.created_at,
                ]],
            )
        );
    }
    Ok(())
}
