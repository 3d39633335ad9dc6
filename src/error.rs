// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Flow};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {what} '{value}'")]
pub struct ParseLabelError {
    pub what: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Value must be greater than zero")]
    NonPositiveValue,
    #[error("Value must not exceed {0}")]
    ValueTooLarge(rust_decimal::Decimal),
    #[error("Category '{category}' cannot be used for an {flow} transaction")]
    CategoryKindMismatch { category: Category, flow: Flow },
    #[error("Invalid email '{0}'")]
    InvalidEmail(String),
    #[error("Email '{0}' is already registered")]
    EmailTaken(String),
    #[error("No account registered for '{0}'")]
    UnknownUser(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotFound {
    #[error("Dashboard '{0}' not found")]
    Workspace(String),
    #[error("Transaction '{0}' not found")]
    Transaction(String),
}
