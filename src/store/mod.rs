// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seams for dashboards and their transactions.
//!
//! Report code only ever sees the `Vec<Transaction>` a store hands back; it
//! does not care which backend produced it.

use anyhow::Result;
use chrono::{Local, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{
    Category, NewTransaction, Transaction, TransactionKind, TransactionPatch, Workspace,
    WorkspacePatch,
};

pub mod sqlite;

pub use sqlite::{SqliteTransactions, SqliteWorkspaces};

pub trait TransactionStore {
    /// All transactions of a dashboard, most recent first.
    fn list(&self, workspace_id: &str) -> Result<Vec<Transaction>>;

    fn get(&self, id: &str) -> Result<Option<Transaction>>;

    fn create(&self, workspace_id: &str, new: NewTransaction) -> Result<Transaction>;

    /// Applies the set fields of `patch`; id and dashboard never change.
    fn update(&self, id: &str, patch: &TransactionPatch) -> Result<Transaction>;

    fn delete(&self, id: &str) -> Result<()>;
}

pub trait WorkspaceStore {
    /// Dashboards owned by `user_id`, ordered by name.
    fn list(&self, user_id: &str) -> Result<Vec<Workspace>>;

    fn get(&self, id: &str) -> Result<Option<Workspace>>;

    fn create(&self, user_id: &str, name: &str, description: &str) -> Result<Workspace>;

    fn update(&self, id: &str, patch: &WorkspacePatch) -> Result<Workspace>;

    /// Removes the dashboard together with all of its transactions.
    fn delete(&self, id: &str) -> Result<()>;
}

/// Largest amount a single entry may carry: 10^15.
pub const MAX_VALUE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_transaction(
    name: &str,
    category: Category,
    value: Decimal,
    kind: &TransactionKind,
) -> Result<(), ValidationError> {
    validate_name(name)?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveValue);
    }
    if value > MAX_VALUE {
        return Err(ValidationError::ValueTooLarge(MAX_VALUE));
    }
    if category.flow() != kind.flow() {
        return Err(ValidationError::CategoryKindMismatch {
            category,
            flow: kind.flow(),
        });
    }
    Ok(())
}

pub fn validate_new(new: &NewTransaction) -> Result<(), ValidationError> {
    validate_transaction(&new.name, new.category, new.value, &new.kind)
}

/// Store timestamps are kept at second precision.
pub(crate) fn now_ts() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
