// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use finboard::models::{Category, PaymentMethod, Transaction, TransactionKind};
use finboard::reports::palette::DEFAULT_COLOR;
use finboard::reports::summary::{
    filter_by_month, month_label, summarize_records, window_start,
};
use finboard::reports::{summarize, summarize_now, FinancialSummary};
use rust_decimal::Decimal;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn now() -> NaiveDateTime {
    at(2025, 6, 15)
}

fn entry(
    id: &str,
    category: Category,
    value: i64,
    date: NaiveDateTime,
    pm: Option<PaymentMethod>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        workspace_id: "ws".to_string(),
        name: id.to_string(),
        description: String::new(),
        category,
        date,
        value: Decimal::from(value),
        kind: TransactionKind::from_payment_method(pm),
        created_at: date,
        updated_at: date,
    }
}

fn income(id: &str, category: Category, value: i64, date: NaiveDateTime) -> Transaction {
    entry(id, category, value, date, None)
}

fn expense(id: &str, category: Category, value: i64, date: NaiveDateTime) -> Transaction {
    entry(id, category, value, date, Some(PaymentMethod::Pix))
}

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

fn month_income(s: &FinancialSummary, month: &str) -> Decimal {
    s.monthly_data
        .iter()
        .find(|m| m.month == month)
        .map(|m| m.income)
        .unwrap()
}

#[test]
fn empty_input_gives_six_zero_buckets() {
    let s = summarize(&[], now());
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.total_balance, Decimal::ZERO);
    assert_eq!(s.monthly_data.len(), 6);
    assert!(s.monthly_data.iter().all(|m| m.income.is_zero()
        && m.expenses.is_zero()
        && m.balance.is_zero()));
    assert!(s.income_by_category.is_empty());
    assert!(s.expenses_by_category.is_empty());
    assert_eq!(s.average_monthly_income, Decimal::ZERO);
    assert_eq!(s.average_monthly_expenses, Decimal::ZERO);
}

#[test]
fn buckets_are_chronological_and_labelled() {
    let s = summarize(&[], now());
    let labels: Vec<_> = s
        .monthly_data
        .iter()
        .map(|m| format!("{} {}", m.month, m.year))
        .collect();
    assert_eq!(
        labels,
        ["Jan 2025", "Feb 2025", "Mar 2025", "Apr 2025", "May 2025", "Jun 2025"]
    );

    let s = summarize(&[], at(2025, 2, 10));
    let labels: Vec<_> = s
        .monthly_data
        .iter()
        .map(|m| format!("{} {}", m.month, m.year))
        .collect();
    assert_eq!(
        labels,
        ["Sep 2024", "Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]
    );
}

#[test]
fn single_salary_this_month() {
    let txs = vec![income("pay", Category::Salary, 1000, at(2025, 6, 5))];
    let s = summarize(&txs, now());
    assert_eq!(s.total_income, d(1000));
    assert_eq!(s.total_balance, d(1000));
    assert_eq!(s.income_by_category.len(), 1);
    let c = &s.income_by_category[0];
    assert_eq!(c.name, "Salary");
    assert_eq!(c.value, d(1000));
    assert_eq!(c.percentage, d(100));
    assert_eq!(c.color, "#10b981");
    let june = s.monthly_data.last().unwrap();
    assert_eq!(june.income, d(1000));
    assert_eq!(june.balance, d(1000));
}

#[test]
fn market_purchase_counts_as_expense() {
    let txs = vec![expense("food", Category::Market, 200, at(2025, 6, 1))];
    let s = summarize(&txs, now());
    assert_eq!(s.total_expenses, d(200));
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_balance, d(-200));
    assert_eq!(s.expenses_by_category.len(), 1);
    assert_eq!(s.expenses_by_category[0].name, "Market");
    assert_eq!(s.expenses_by_category[0].percentage, d(100));
    assert!(s.income_by_category.is_empty());
}

#[test]
fn same_category_in_two_months() {
    let txs = vec![
        income("a", Category::Salary, 100, at(2025, 3, 10)),
        income("b", Category::Salary, 300, at(2025, 5, 10)),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s.total_income, d(400));
    assert_eq!(s.income_by_category.len(), 1);
    assert_eq!(s.income_by_category[0].value, d(400));
    assert_eq!(s.income_by_category[0].percentage, d(100));
    assert_eq!(month_income(&s, "Mar"), d(100));
    assert_eq!(month_income(&s, "May"), d(300));
    assert_eq!(month_income(&s, "Apr"), Decimal::ZERO);
}

#[test]
fn seven_months_old_entry_is_ignored() {
    let txs = vec![
        income("old", Category::Salary, 999, at(2024, 11, 15)),
        expense("old2", Category::Fees, 50, at(2024, 11, 20)),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s, summarize(&[], now()));
}

#[test]
fn window_starts_mid_month_at_the_reference_time() {
    assert_eq!(window_start(now()), at(2025, 1, 15));
    let txs = vec![
        income("before", Category::Salary, 10, at(2025, 1, 10)),
        income("edge", Category::Salary, 20, at(2025, 1, 15)),
        income("after_now", Category::Salary, 40, at(2025, 6, 20)),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s.total_income, d(20));
    assert_eq!(month_income(&s, "Jan"), d(20));
    assert_eq!(month_income(&s, "Jun"), Decimal::ZERO);
}

#[test]
fn every_windowed_entry_lands_in_exactly_one_bucket() {
    let txs = vec![
        income("a", Category::Salary, 100, at(2025, 1, 31)),
        income("b", Category::Benefit, 50, at(2025, 2, 1)),
        expense("c", Category::Housing, 70, at(2025, 4, 30)),
        expense("e", Category::Leisure, 5, at(2025, 6, 15)),
        income("f", Category::Other, 1, at(2024, 12, 31)),
    ];
    let s = summarize(&txs, now());
    let bucket_income: Decimal = s.monthly_data.iter().map(|m| m.income).sum();
    let bucket_expenses: Decimal = s.monthly_data.iter().map(|m| m.expenses).sum();
    assert_eq!(bucket_income, s.total_income);
    assert_eq!(bucket_expenses, s.total_expenses);
    assert_eq!(s.total_income, d(150));
    assert_eq!(s.total_expenses, d(75));
}

#[test]
fn classification_ignores_category() {
    // an income label paid by card is still spending
    let txs = vec![
        entry("x", Category::Salary, 30, at(2025, 6, 1), Some(PaymentMethod::Credit)),
        entry("y", Category::Market, 12, at(2025, 6, 2), None),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s.total_expenses, d(30));
    assert_eq!(s.total_income, d(12));
    assert_eq!(s.expenses_by_category[0].name, "Salary");
    assert_eq!(s.expenses_by_category[0].color, DEFAULT_COLOR);
    assert_eq!(s.income_by_category[0].name, "Market");
    assert_eq!(s.income_by_category[0].color, DEFAULT_COLOR);
}

#[test]
fn balances_match_income_minus_expenses() {
    let txs = vec![
        income("a", Category::Salary, 3000, at(2025, 2, 5)),
        expense("b", Category::Housing, 1200, at(2025, 2, 6)),
        expense("c", Category::Market, 450, at(2025, 3, 7)),
        income("d", Category::Benefit, 600, at(2025, 4, 1)),
        expense("e", Category::Pharmacy, 80, at(2025, 6, 14)),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s.total_balance, s.total_income - s.total_expenses);
    for m in &s.monthly_data {
        assert_eq!(m.balance, m.income - m.expenses);
    }
    assert_eq!(s.average_monthly_income, d(3600) / d(6));
    assert_eq!(s.average_monthly_expenses, d(1730) / d(6));
}

#[test]
fn category_shares_add_up_and_sort_by_value() {
    let txs = vec![
        expense("a", Category::Market, 100, at(2025, 3, 1)),
        expense("b", Category::Leisure, 100, at(2025, 3, 2)),
        expense("c", Category::Fees, 100, at(2025, 3, 3)),
        expense("d", Category::Market, 50, at(2025, 4, 1)),
        income("e", Category::Salary, 1, at(2025, 4, 1)),
    ];
    let s = summarize(&txs, now());
    let names: Vec<_> = s.expenses_by_category.iter().map(|c| c.name.as_str()).collect();
    // equal totals fall back to name order
    assert_eq!(names, ["Market", "Fees", "Leisure"]);
    let total: Decimal = s.expenses_by_category.iter().map(|c| c.percentage).sum();
    assert!((total - d(100)).abs() < Decimal::new(1, 6), "{}", total);
    let market = s.expenses_by_category[0].percentage;
    assert!((market - Decimal::new(42857142857, 9)).abs() < Decimal::new(1, 6));
}

#[test]
fn single_income_category_takes_the_whole_share() {
    let txs = vec![income("a", Category::Salary, 10, at(2025, 6, 1))];
    let s = summarize(&txs, now());
    assert!(s.expenses_by_category.is_empty());
    assert_eq!(s.income_by_category[0].percentage, d(100));
}

#[test]
fn shares_are_zero_when_totals_are_zero() {
    let txs = vec![
        income("a", Category::Salary, 0, at(2025, 6, 1)),
        income("b", Category::Benefit, 0, at(2025, 5, 1)),
        expense("c", Category::Market, 0, at(2025, 4, 1)),
    ];
    let s = summarize(&txs, now());
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.income_by_category.len(), 2);
    assert_eq!(s.expenses_by_category.len(), 1);
    assert!(s
        .income_by_category
        .iter()
        .chain(&s.expenses_by_category)
        .all(|c| c.percentage == Decimal::ZERO));
}

#[test]
fn very_large_values_do_not_overflow() {
    let big = |v: i128| Decimal::from_i128_with_scale(v, 0);
    let mut txs = vec![
        income("a", Category::Salary, 1, at(2025, 5, 1)),
        income("b", Category::Benefit, 1, at(2025, 6, 1)),
        expense("c", Category::Market, 1, at(2025, 3, 1)),
        expense("d", Category::Housing, 1, at(2025, 3, 2)),
    ];
    txs[0].value = big(10i128.pow(27));
    txs[1].value = big(10i128.pow(27));
    txs[2].value = big(5 * 10i128.pow(28));
    txs[3].value = big(5 * 10i128.pow(28));

    let s = summarize(&txs, now());
    assert_eq!(s.total_income, big(2 * 10i128.pow(27)));
    assert_eq!(s.income_by_category[0].percentage, d(50));
    assert_eq!(s.income_by_category[1].percentage, d(50));
    // the expense sum saturates instead of panicking
    assert_eq!(s.total_expenses, Decimal::MAX);
    assert!(s.total_balance < Decimal::ZERO);
    assert!(s
        .expenses_by_category
        .iter()
        .all(|c| c.percentage > Decimal::ZERO && c.percentage <= d(100)));
    assert_eq!(summarize_records(&txs).total_expense, Decimal::MAX);
}

#[test]
fn wall_clock_summary_ends_at_the_current_month() {
    let today = Local::now().naive_local();
    let s = summarize_now(&[income("a", Category::Salary, 10, today - Duration::hours(1))]);
    assert_eq!(s.monthly_data.len(), 6);
    let last = s.monthly_data.last().unwrap();
    assert_eq!(last.month, month_label(today.month()));
    assert_eq!(last.year, today.year());
    assert_eq!(s.total_income, d(10));
}

#[test]
fn input_order_does_not_change_the_result() {
    let mut txs = vec![
        income("a", Category::Benefit, 40, at(2025, 2, 1)),
        income("b", Category::Other, 40, at(2025, 3, 1)),
        expense("c", Category::Investment, 10, at(2025, 5, 1)),
        expense("d", Category::Custom1, 10, at(2025, 5, 2)),
    ];
    let first = summarize(&txs, now());
    txs.reverse();
    assert_eq!(summarize(&txs, now()), first);
}

#[test]
fn summarize_does_not_touch_input() {
    let txs = vec![income("a", Category::Salary, 5, at(2025, 6, 1))];
    let copy = txs.clone();
    let _ = summarize(&txs, now());
    assert_eq!(txs, copy);
}

#[test]
fn record_summary_ignores_dates() {
    let txs = vec![
        income("a", Category::Salary, 100, at(2020, 1, 1)),
        income("b", Category::Salary, 50, at(2025, 6, 1)),
        expense("c", Category::Market, 30, at(2025, 6, 2)),
    ];
    let s = summarize_records(&txs);
    assert_eq!(s.total_income, d(150));
    assert_eq!(s.total_expense, d(30));
    assert_eq!(s.balance, d(120));
    assert_eq!(s.income_by_category.get(&Category::Salary), Some(&d(150)));
    assert_eq!(s.expense_by_category.get(&Category::Market), Some(&d(30)));

    let june = filter_by_month(&txs, 6, 2025);
    assert_eq!(june.len(), 2);
    assert_eq!(summarize_records(&june).balance, d(20));
}
