// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Datelike;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::{arg, opt_arg, owned_workspace, require_user};
use crate::error::NotFound;
use crate::models::{
    Category, NewTransaction, PaymentMethod, TransactionKind, TransactionPatch, User,
};
use crate::store::{SqliteTransactions, TransactionStore};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => add(conn, &user, sub)?,
        Some(("list", sub)) => list(conn, &user, sub)?,
        Some(("edit", sub)) => edit(conn, &user, sub)?,
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            check_owner(conn, &user, &id)?;
            SqliteTransactions::new(conn).delete(&id)?;
            println!("Removed entry {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn check_owner(conn: &Connection, user: &User, id: &str) -> Result<()> {
    let t = SqliteTransactions::new(conn)
        .get(id)?
        .ok_or_else(|| NotFound::Transaction(id.to_string()))?;
    owned_workspace(conn, user, &t.workspace_id)?;
    Ok(())
}

pub fn new_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let payment_method = opt_arg(sub, "payment-method")
        .map(|s| s.parse::<PaymentMethod>())
        .transpose()?;
    Ok(NewTransaction {
        name: arg(sub, "name")?,
        description: opt_arg(sub, "description").unwrap_or_default(),
        category: arg(sub, "category")?.parse::<Category>()?,
        date: parse_date(&arg(sub, "date")?)?,
        value: parse_decimal(&arg(sub, "value")?)?,
        kind: TransactionKind::from_payment_method(payment_method),
    })
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    let kind = if sub.get_flag("income") {
        Some(TransactionKind::Income)
    } else {
        opt_arg(sub, "payment-method")
            .map(|s| s.parse::<PaymentMethod>())
            .transpose()?
            .map(|payment_method| TransactionKind::Expense { payment_method })
    };
    Ok(TransactionPatch {
        name: opt_arg(sub, "name"),
        description: opt_arg(sub, "description"),
        category: opt_arg(sub, "category")
            .map(|s| s.parse::<Category>())
            .transpose()?,
        date: opt_arg(sub, "date").map(|s| parse_date(&s)).transpose()?,
        value: opt_arg(sub, "value").map(|s| parse_decimal(&s)).transpose()?,
        kind,
    })
}

fn add(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let ws = owned_workspace(conn, user, &arg(sub, "dashboard")?)?;
    let new = new_from_args(sub)?;
    let t = SqliteTransactions::new(conn).create(&ws.id, new)?;
    println!(
        "Recorded {} '{}' {} on {} (id: {})",
        t.kind.flow(),
        t.name,
        fmt_money(&t.value, &get_currency(conn)?),
        t.date.date(),
        t.id
    );
    Ok(())
}

fn edit(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    check_owner(conn, user, &id)?;
    let patch = patch_from_args(sub)?;
    if patch.is_empty() {
        bail!("Nothing to change");
    }
    let t = SqliteTransactions::new(conn).update(&id, &patch)?;
    println!("Updated entry '{}'", t.name);
    Ok(())
}

fn list(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, user, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.name.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.value.clone(),
                    r.payment_method.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Name", "Kind", "Category", "Value", "Payment"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub value: String,
    pub payment_method: String,
    pub description: String,
}

pub fn query_rows(
    conn: &Connection,
    user: &User,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let ws = owned_workspace(conn, user, &arg(sub, "dashboard")?)?;
    let month = opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?;
    let ccy = get_currency(conn)?;

    let rows = SqliteTransactions::new(conn)
        .list(&ws.id)?
        .into_iter()
        .filter(|t| match month {
            Some((y, m)) => t.date.year() == y && t.date.month() == m,
            None => true,
        })
        .take(sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            date: t.date.date().to_string(),
            kind: t.kind.flow().to_string(),
            category: t.category.to_string(),
            value: fmt_money(&t.value, &ccy),
            payment_method: t
                .kind
                .payment_method()
                .map(|pm| pm.to_string())
                .unwrap_or_default(),
            id: t.id,
            name: t.name,
            description: t.description,
        })
        .collect();
    Ok(rows)
}
