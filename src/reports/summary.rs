// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Six-month financial summary over a dashboard's transactions.
//!
//! Everything here is pure: callers pass the transaction snapshot and the
//! reference time, and get back plain records ready to print or chart.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, Months, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Flow, Transaction};
use crate::reports::palette::category_color;

/// Number of calendar months covered by a summary, current month included.
pub const WINDOW_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    pub month: String,
    pub year: i32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_balance: Decimal,
    pub monthly_data: Vec<MonthlyData>,
    pub income_by_category: Vec<CategoryData>,
    pub expenses_by_category: Vec<CategoryData>,
    pub average_monthly_income: Decimal,
    pub average_monthly_expenses: Decimal,
}

/// Totals over an arbitrary list, without any date window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub income_by_category: BTreeMap<Category, Decimal>,
    pub expense_by_category: BTreeMap<Category, Decimal>,
}

/// First instant counted by a summary taken at `now`.
pub fn window_start(now: NaiveDateTime) -> NaiveDateTime {
    now.checked_sub_months(Months::new(WINDOW_MONTHS - 1))
        .unwrap_or(NaiveDateTime::MIN)
}

pub fn in_window(t: &Transaction, now: NaiveDateTime) -> bool {
    t.date >= window_start(now) && t.date <= now
}

pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[(month.clamp(1, 12) - 1) as usize]
}

/// Every (year, month) from `start` to `end` inclusive, oldest first.
fn month_range(start: NaiveDateTime, end: NaiveDateTime) -> Vec<(i32, u32)> {
    let (mut y, mut m) = (start.year(), start.month());
    let (ey, em) = (end.year(), end.month());
    let mut out = Vec::new();
    while y < ey || (y == ey && m <= em) {
        out.push((y, m));
        m += 1;
        if m > 12 {
            m = 1;
            y += 1;
        }
    }
    out
}

fn split_totals<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in txs {
        match t.kind.flow() {
            Flow::Income => income = income.saturating_add(t.value),
            Flow::Expense => expenses = expenses.saturating_add(t.value),
        }
    }
    (income, expenses)
}

/// `value` never exceeds `total`, so the ratio stays within 0..=1 before scaling.
fn percentage_of(value: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        value / total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Groups one flow by category. Equal totals are ordered by category name.
fn by_category(txs: &[&Transaction], flow: Flow, total: Decimal) -> Vec<CategoryData> {
    let mut sums: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.kind.flow() == flow) {
        let sum = sums.entry(t.category).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.value);
    }
    let mut items: Vec<CategoryData> = sums
        .into_iter()
        .map(|(category, value)| CategoryData {
            name: category.label().to_string(),
            value,
            percentage: percentage_of(value, total),
            color: category_color(category, flow).to_string(),
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    items
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, n) = values.fold((Decimal::ZERO, 0u32), |(s, n), v| {
        (s.saturating_add(v), n + 1)
    });
    if n == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(n)
    }
}

/// Builds the summary for the six calendar months ending at `now`.
pub fn summarize(transactions: &[Transaction], now: NaiveDateTime) -> FinancialSummary {
    let start = window_start(now);
    let recent: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| in_window(t, now))
        .collect();

    let (total_income, total_expenses) = split_totals(recent.iter().copied());

    let monthly_data: Vec<MonthlyData> = month_range(start, now)
        .into_iter()
        .map(|(year, month)| {
            let (income, expenses) = split_totals(
                recent
                    .iter()
                    .copied()
                    .filter(|t| t.date.year() == year && t.date.month() == month),
            );
            MonthlyData {
                month: month_label(month).to_string(),
                year,
                income,
                expenses,
                balance: income.saturating_sub(expenses),
            }
        })
        .collect();

    let income_by_category = by_category(&recent, Flow::Income, total_income);
    let expenses_by_category = by_category(&recent, Flow::Expense, total_expenses);

    let average_monthly_income = mean(monthly_data.iter().map(|m| m.income));
    let average_monthly_expenses = mean(monthly_data.iter().map(|m| m.expenses));

    FinancialSummary {
        total_income,
        total_expenses,
        total_balance: total_income.saturating_sub(total_expenses),
        monthly_data,
        income_by_category,
        expenses_by_category,
        average_monthly_income,
        average_monthly_expenses,
    }
}

/// Same as [`summarize`] with the local wall clock as reference.
pub fn summarize_now(transactions: &[Transaction]) -> FinancialSummary {
    summarize(transactions, Local::now().naive_local())
}

pub fn summarize_records(transactions: &[Transaction]) -> RecordSummary {
    let mut s = RecordSummary::default();
    for t in transactions {
        let (total, map) = match t.kind.flow() {
            Flow::Income => (&mut s.total_income, &mut s.income_by_category),
            Flow::Expense => (&mut s.total_expense, &mut s.expense_by_category),
        };
        *total = total.saturating_add(t.value);
        let sum = map.entry(t.category).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.value);
    }
    s.balance = s.total_income.saturating_sub(s.total_expense);
    s
}

pub fn filter_by_month(transactions: &[Transaction], month: u32, year: i32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn window_start_clamps_to_month_end() {
        let start = window_start(at(2025, 8, 31));
        assert_eq!(start, at(2025, 3, 31));
        let start = window_start(at(2025, 7, 31));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn month_range_crosses_year_boundary() {
        let r = month_range(at(2024, 11, 15), at(2025, 4, 2));
        assert_eq!(
            r,
            vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2), (2025, 3), (2025, 4)]
        );
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage_of(Decimal::from(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            percentage_of(Decimal::from(1), Decimal::from(4)),
            Decimal::from(25)
        );
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(std::iter::empty()), Decimal::ZERO);
    }
}
