// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use rusqlite::Connection;

use crate::commands::{arg, opt_arg, owned_workspace, require_user};
use crate::models::{User, WorkspacePatch};
use crate::reports::summary::{filter_by_month, month_label, summarize_records};
use crate::reports::RecordSummary;
use crate::store::{SqliteTransactions, SqliteWorkspaces, TransactionStore, WorkspaceStore};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => add(conn, &user, sub)?,
        Some(("list", sub)) => list(conn, &user, sub)?,
        Some(("show", sub)) => show(conn, &user, sub)?,
        Some(("edit", sub)) => edit(conn, &user, sub)?,
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            owned_workspace(conn, &user, &id)?;
            SqliteWorkspaces::new(conn).delete(&id)?;
            println!("Removed dashboard {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let name = arg(sub, "name")?;
    let description = opt_arg(sub, "description").unwrap_or_default();
    let ws = SqliteWorkspaces::new(conn).create(&user.id, &name, &description)?;
    println!("Added dashboard '{}' (id: {})", ws.name, ws.id);
    Ok(())
}

fn list(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let data = SqliteWorkspaces::new(conn).list(&user.id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|w| vec![w.id, w.name, w.description, w.updated_at.to_string()])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Description", "Updated"], rows)
        );
    }
    Ok(())
}

/// Totals of one calendar month of a dashboard, without the report window.
pub fn month_overview(
    conn: &Connection,
    user: &User,
    id: &str,
    year: i32,
    month: u32,
) -> Result<RecordSummary> {
    owned_workspace(conn, user, id)?;
    let all = SqliteTransactions::new(conn).list(id)?;
    Ok(summarize_records(&filter_by_month(&all, month, year)))
}

fn show(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    let (year, month) = match opt_arg(sub, "month") {
        Some(m) => parse_month(&m)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let s = month_overview(conn, user, &id, year, month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    println!("{} {}", month_label(month), year);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                fmt_money(&s.total_income, &ccy),
                fmt_money(&s.total_expense, &ccy),
                fmt_money(&s.balance, &ccy),
            ]],
        )
    );
    let mut rows = Vec::new();
    for (cat, v) in &s.income_by_category {
        rows.push(vec!["income".to_string(), cat.to_string(), fmt_money(v, &ccy)]);
    }
    for (cat, v) in &s.expense_by_category {
        rows.push(vec!["expense".to_string(), cat.to_string(), fmt_money(v, &ccy)]);
    }
    if !rows.is_empty() {
        println!("{}", pretty_table(&["Kind", "Category", "Total"], rows));
    }
    Ok(())
}

fn edit(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    owned_workspace(conn, user, &id)?;
    let patch = WorkspacePatch {
        name: opt_arg(sub, "name"),
        description: opt_arg(sub, "description"),
    };
    if patch.name.is_none() && patch.description.is_none() {
        bail!("Nothing to change; pass --name and/or --description");
    }
    let ws = SqliteWorkspaces::new(conn).update(&id, &patch)?;
    println!("Updated dashboard '{}'", ws.name);
    Ok(())
}
