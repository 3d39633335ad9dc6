// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display colours for report charts.

use crate::models::{Category, Flow};

/// Used for any category that has no entry for the requested flow.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Fill for income bars.
pub const INCOME_COLOR: &str = "#10b981";

const INCOME_COLORS: &[(Category, &str)] = &[
    (Category::Salary, "#10b981"),
    (Category::Benefit, "#059669"),
    (Category::Other, "#047857"),
];

const EXPENSE_COLORS: &[(Category, &str)] = &[
    (Category::Market, "#ef4444"),
    (Category::Leisure, "#dc2626"),
    (Category::Housing, "#b91c1c"),
    (Category::Personal, "#991b1b"),
    (Category::Fees, "#7f1d1d"),
    (Category::Investment, "#f97316"),
    (Category::Custom1, "#ea580c"),
    (Category::Pharmacy, "#c2410c"),
];

pub fn category_color(category: Category, flow: Flow) -> &'static str {
    let table = match flow {
        Flow::Income => INCOME_COLORS,
        Flow::Expense => EXPENSE_COLORS,
    };
    table
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_have_their_own_color() {
        assert_eq!(category_color(Category::Salary, Flow::Income), "#10b981");
        assert_eq!(category_color(Category::Pharmacy, Flow::Expense), "#c2410c");
    }

    #[test]
    fn cross_flow_lookup_falls_back() {
        assert_eq!(category_color(Category::Salary, Flow::Expense), DEFAULT_COLOR);
        assert_eq!(category_color(Category::Market, Flow::Income), DEFAULT_COLOR);
    }

    #[test]
    fn every_category_has_a_color_for_its_own_flow() {
        for c in Category::ALL {
            assert_ne!(category_color(c, c.flow()), DEFAULT_COLOR, "{}", c);
        }
    }
}
