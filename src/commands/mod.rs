// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::error::NotFound;
use crate::identity::{Identity, LocalIdentity};
use crate::models::{User, Workspace};
use crate::store::{SqliteWorkspaces, WorkspaceStore};

pub mod auth;
pub mod dashboards;
pub mod reports;
pub mod settings;
pub mod transactions;

/// Trimmed value of a required argument.
pub(crate) fn arg(sub: &clap::ArgMatches, name: &str) -> Result<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .with_context(|| format!("Missing --{}", name))
}

pub(crate) fn opt_arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).map(|s| s.trim().to_string())
}

pub fn require_user(conn: &Connection) -> Result<User> {
    LocalIdentity::new(conn)
        .current_user()?
        .ok_or_else(|| anyhow!("Not signed in; run `finboard auth signin --email ...`"))
}

/// Looks the dashboard up and checks that `user` owns it.
pub fn owned_workspace(conn: &Connection, user: &User, id: &str) -> Result<Workspace> {
    match SqliteWorkspaces::new(conn).get(id)? {
        Some(ws) if ws.user_id == user.id => Ok(ws),
        _ => Err(NotFound::Workspace(id.to_string()).into()),
    }
}
