// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::arg;
use crate::identity::{Identity, LocalIdentity};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let identity = LocalIdentity::new(conn);
    match m.subcommand() {
        Some(("signup", sub)) => {
            let user = identity.sign_up(&arg(sub, "email")?)?;
            println!("Welcome, {} (id: {})", user.email, user.id);
        }
        Some(("signin", sub)) => {
            let user = identity.sign_in(&arg(sub, "email")?)?;
            println!("Signed in as {}", user.email);
        }
        Some(("signout", _)) => {
            identity.sign_out()?;
            println!("Signed out");
        }
        Some(("whoami", _)) => match identity.current_user()? {
            Some(u) => println!(
                "{} <{}> (id: {})",
                u.display_name.as_deref().unwrap_or("-"),
                u.email,
                u.id
            ),
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}
