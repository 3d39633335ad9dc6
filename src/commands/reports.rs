// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use log::info;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::{arg, opt_arg, owned_workspace, require_user};
use crate::models::{Flow, Transaction, User};
use crate::reports::{
    bar_chart, line_chart, pie_chart, summarize, summarize_now, CategoryData, FinancialSummary,
};
use crate::state::{TransactionFeed, TransactionState};
use crate::store::SqliteTransactions;
use crate::utils::{fmt_money, fmt_percent, get_currency, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, &user, sub)?,
        Some(("categories", sub)) => categories(conn, &user, sub)?,
        Some(("monthly", sub)) => monthly(conn, &user, sub)?,
        Some(("chart", sub)) => chart(conn, &user, sub)?,
        _ => {}
    }
    Ok(())
}

fn reference_time(sub: &clap::ArgMatches) -> Result<Option<NaiveDateTime>> {
    opt_arg(sub, "now").map(|s| parse_date(&s)).transpose()
}

/// Entries of a dashboard the user owns.
///
/// A failed read is an error here, never an empty list.
fn load_entries(conn: &Connection, user: &User, dashboard_id: &str) -> Result<Vec<Transaction>> {
    let ws = owned_workspace(conn, user, dashboard_id)?;
    let feed = TransactionFeed::new(SqliteTransactions::new(conn));
    let mut state = TransactionState::new();
    feed.load_into(&ws.id, &mut state);
    let txs = state
        .result()
        .map_err(|e| anyhow!("Could not load entries for '{}': {}", ws.name, e))?;
    info!("summarizing {} entries of dashboard {}", txs.len(), ws.id);
    Ok(txs.to_vec())
}

/// Summary of a dashboard the user owns, as of `now`.
pub fn load_summary(
    conn: &Connection,
    user: &User,
    dashboard_id: &str,
    now: NaiveDateTime,
) -> Result<FinancialSummary> {
    Ok(summarize(&load_entries(conn, user, dashboard_id)?, now))
}

fn load_for(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<FinancialSummary> {
    let dashboard_id = arg(sub, "dashboard")?;
    match reference_time(sub)? {
        Some(now) => load_summary(conn, user, &dashboard_id, now),
        None => Ok(summarize_now(&load_entries(conn, user, &dashboard_id)?)),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Totals {
    total_income: Decimal,
    total_expenses: Decimal,
    total_balance: Decimal,
    average_monthly_income: Decimal,
    average_monthly_expenses: Decimal,
}

fn summary(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let s = load_for(conn, user, sub)?;
    let totals = Totals {
        total_income: s.total_income,
        total_expenses: s.total_expenses,
        total_balance: s.total_balance,
        average_monthly_income: s.average_monthly_income,
        average_monthly_expenses: s.average_monthly_expenses,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = vec![
        vec!["Income".into(), fmt_money(&totals.total_income, &ccy)],
        vec!["Expenses".into(), fmt_money(&totals.total_expenses, &ccy)],
        vec!["Balance".into(), fmt_money(&totals.total_balance, &ccy)],
        vec![
            "Avg. monthly income".into(),
            fmt_money(&totals.average_monthly_income, &ccy),
        ],
        vec![
            "Avg. monthly expenses".into(),
            fmt_money(&totals.average_monthly_expenses, &ccy),
        ],
    ];
    println!("{}", pretty_table(&["Last 6 months", "Amount"], rows));
    if s.income_by_category.is_empty() && s.expenses_by_category.is_empty() {
        println!("No entries in this period.");
    }
    Ok(())
}

fn pick(s: &FinancialSummary, flow: Flow) -> &[CategoryData] {
    match flow {
        Flow::Income => &s.income_by_category,
        Flow::Expense => &s.expenses_by_category,
    }
}

fn categories(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let flow: Flow = arg(sub, "kind")?.parse()?;
    let s = load_for(conn, user, sub)?;
    let data = pick(&s, flow);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                fmt_money(&c.value, &ccy),
                fmt_percent(&c.percentage),
                c.color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Total", "Share", "Color"], rows)
    );
    Ok(())
}

fn monthly(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let s = load_for(conn, user, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s.monthly_data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = s
        .monthly_data
        .iter()
        .map(|m| {
            vec![
                format!("{} {}", m.month, m.year),
                fmt_money(&m.income, &ccy),
                fmt_money(&m.expenses, &ccy),
                fmt_money(&m.balance, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
    );
    Ok(())
}

fn chart(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let s = load_for(conn, user, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind = arg(sub, "type")?;
    let rows: Vec<Vec<String>> = match kind.as_str() {
        "pie" => {
            let flow: Flow = arg(sub, "kind")?.parse()?;
            let data = pie_chart(pick(&s, flow));
            if maybe_print_json(json_flag, jsonl_flag, &data)? {
                return Ok(());
            }
            data.into_iter()
                .map(|p| vec![p.name, p.value.to_string(), fmt_percent(&p.percentage), p.fill])
                .collect()
        }
        "bar" => {
            let data = bar_chart(&s.monthly_data);
            if maybe_print_json(json_flag, jsonl_flag, &data)? {
                return Ok(());
            }
            data.into_iter()
                .map(|p| vec![p.name, p.value.to_string(), p.fill])
                .collect()
        }
        "line" => {
            let data = line_chart(&s.monthly_data);
            if maybe_print_json(json_flag, jsonl_flag, &data)? {
                return Ok(());
            }
            data.into_iter()
                .map(|p| vec![p.name, p.value.to_string(), p.date])
                .collect()
        }
        other => return Err(anyhow!("Unknown chart type '{}'", other)),
    };
    let headers: &[&str] = match kind.as_str() {
        "pie" => &["Name", "Value", "Share", "Fill"],
        "bar" => &["Name", "Income", "Fill"],
        _ => &["Name", "Balance", "Date"],
    };
    println!("{}", pretty_table(headers, rows));
    Ok(())
}
