// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod charts;
pub mod palette;
pub mod summary;

pub use charts::{bar_chart, line_chart, pie_chart, BarPoint, LinePoint, PieSlice};
pub use summary::{
    summarize, summarize_now, CategoryData, FinancialSummary, MonthlyData, RecordSummary,
};
