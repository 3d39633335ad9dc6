// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reshapes summary parts into the rows each chart type plots.
//! The bar chart plots monthly income and the line chart plots monthly balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reports::palette::INCOME_COLOR;
use crate::reports::summary::{CategoryData, MonthlyData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub name: String,
    pub value: Decimal,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub name: String,
    pub value: Decimal,
    pub date: String,
}

pub fn pie_chart(data: &[CategoryData]) -> Vec<PieSlice> {
    data.iter()
        .map(|c| PieSlice {
            name: c.name.clone(),
            value: c.value,
            percentage: c.percentage,
            fill: c.color.clone(),
        })
        .collect()
}

pub fn bar_chart(months: &[MonthlyData]) -> Vec<BarPoint> {
    months
        .iter()
        .map(|m| BarPoint {
            name: m.month.clone(),
            value: m.income,
            fill: INCOME_COLOR.to_string(),
        })
        .collect()
}

pub fn line_chart(months: &[MonthlyData]) -> Vec<LinePoint> {
    months
        .iter()
        .map(|m| LinePoint {
            name: m.month.clone(),
            value: m.balance,
            date: m.month.clone(),
        })
        .collect()
}
