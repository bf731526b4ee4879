// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use moneydash::api::ApiClient;
use moneydash::config::Config;
use moneydash::session::{Session, SessionStore};
use moneydash::{cli, commands};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let config = Config::from_env();
    let store = SessionStore::open_default()?;
    let client = ApiClient::new(config.api_url, Session::load(store))?;

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&client, sub)?,
        Some(("register", sub)) => commands::auth::register(&client, sub)?,
        Some(("logout", _)) => commands::auth::logout(&client)?,
        Some(("whoami", sub)) => commands::auth::whoami(&client, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&client, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&client, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&client, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
