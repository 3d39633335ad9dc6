// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::models::{Category, PaymentMethod, Transaction, TransactionKind};
use finboard::reports::palette::INCOME_COLOR;
use finboard::reports::{bar_chart, line_chart, pie_chart, summarize, FinancialSummary};
use rust_decimal::Decimal;

fn sample() -> FinancialSummary {
    let mk = |id: &str, cat: Category, v: i64, m: u32, pm: Option<PaymentMethod>| {
        let date = NaiveDate::from_ymd_opt(2025, m, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Transaction {
            id: id.into(),
            workspace_id: "ws".into(),
            name: id.into(),
            description: String::new(),
            category: cat,
            date,
            value: Decimal::from(v),
            kind: TransactionKind::from_payment_method(pm),
            created_at: date,
            updated_at: date,
        }
    };
    let txs = vec![
        mk("s1", Category::Salary, 2000, 4, None),
        mk("s2", Category::Salary, 2100, 5, None),
        mk("b1", Category::Benefit, 400, 5, None),
        mk("h1", Category::Housing, 900, 5, Some(PaymentMethod::BankSlip)),
        mk("m1", Category::Market, 3000, 6, Some(PaymentMethod::Debit)),
    ];
    let now = NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    summarize(&txs, now)
}

#[test]
fn bar_chart_plots_income() {
    let s = sample();
    let bars = bar_chart(&s.monthly_data);
    assert_eq!(bars.len(), 6);
    for (bar, month) in bars.iter().zip(&s.monthly_data) {
        assert_eq!(bar.name, month.month);
        assert_eq!(bar.value, month.income);
        assert_eq!(bar.fill, INCOME_COLOR);
    }
    assert_eq!(bars[4].value, Decimal::from(2500));
    // June only has spending
    assert_eq!(bars[5].value, Decimal::ZERO);
}

#[test]
fn line_chart_plots_balance() {
    let s = sample();
    let line = line_chart(&s.monthly_data);
    assert_eq!(line.len(), 6);
    for (p, month) in line.iter().zip(&s.monthly_data) {
        assert_eq!(p.value, month.balance);
        assert_eq!(p.date, month.month);
        assert_eq!(p.name, month.month);
    }
    assert_eq!(line[5].value, Decimal::from(-3000));
    assert_eq!(line[4].value, Decimal::from(1600));
}

#[test]
fn pie_chart_passes_category_totals_through() {
    let s = sample();
    let pie = pie_chart(&s.income_by_category);
    assert_eq!(pie.len(), 2);
    for (slice, cat) in pie.iter().zip(&s.income_by_category) {
        assert_eq!(slice.name, cat.name);
        assert_eq!(slice.value, cat.value);
        assert_eq!(slice.percentage, cat.percentage);
        assert_eq!(slice.fill, cat.color);
    }
    assert_eq!(pie[0].name, "Salary");
    assert_eq!(pie[0].value, Decimal::from(4100));

    let spent = pie_chart(&s.expenses_by_category);
    assert_eq!(spent[0].name, "Market");
    assert_eq!(spent[0].fill, "#ef4444");
}

#[test]
fn projections_of_empty_summary() {
    let s = summarize(
        &[],
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    );
    assert!(pie_chart(&s.income_by_category).is_empty());
    assert_eq!(bar_chart(&s.monthly_data).len(), 6);
    assert!(line_chart(&s.monthly_data)
        .iter()
        .all(|p| p.value == Decimal::ZERO));
}
