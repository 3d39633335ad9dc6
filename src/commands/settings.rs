// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::commands::opt_arg;
use crate::utils::{get_currency, set_currency};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match opt_arg(sub, "set") {
            Some(ccy) => {
                let ccy = ccy.to_uppercase();
                if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                    bail!("Invalid currency code '{}'", ccy);
                }
                set_currency(conn, &ccy)?;
                println!("Display currency set to {}", ccy);
            }
            None => println!("{}", get_currency(conn)?),
        }
    }
    Ok(())
}
