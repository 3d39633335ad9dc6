// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;

/// Which side of the ledger a category or a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Income,
    Expense,
}

impl Flow {
    pub fn label(self) -> &'static str {
        match self {
            Flow::Income => "income",
            Flow::Expense => "expense",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Flow {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Flow::Income),
            "expense" | "expenses" => Ok(Flow::Expense),
            _ => Err(ParseLabelError::new("kind", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    // income
    Salary,
    Benefit,
    Other,
    // expense
    Market,
    Leisure,
    Housing,
    Personal,
    Fees,
    Investment,
    Custom1,
    Pharmacy,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Salary,
        Category::Benefit,
        Category::Other,
        Category::Market,
        Category::Leisure,
        Category::Housing,
        Category::Personal,
        Category::Fees,
        Category::Investment,
        Category::Custom1,
        Category::Pharmacy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Benefit => "Benefit",
            Category::Other => "Other",
            Category::Market => "Market",
            Category::Leisure => "Leisure",
            Category::Housing => "Housing",
            Category::Personal => "Personal",
            Category::Fees => "Fees",
            Category::Investment => "Investment",
            Category::Custom1 => "Custom1",
            Category::Pharmacy => "Pharmacy",
        }
    }

    /// The set this category is drawn from when a transaction is created.
    pub fn flow(self) -> Flow {
        match self {
            Category::Salary | Category::Benefit | Category::Other => Flow::Income,
            _ => Flow::Expense,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseLabelError::new("category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    #[serde(rename = "PIX")]
    Pix,
    Transfer,
    BankSlip,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
        PaymentMethod::Pix,
        PaymentMethod::Transfer,
        PaymentMethod::BankSlip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::BankSlip => "BankSlip",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PaymentMethod::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseLabelError::new("payment method", s))
    }
}

/// Income carries nothing extra; an expense always knows how it was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense { payment_method: PaymentMethod },
}

impl TransactionKind {
    pub fn flow(&self) -> Flow {
        match self {
            TransactionKind::Income => Flow::Income,
            TransactionKind::Expense { .. } => Flow::Expense,
        }
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self {
            TransactionKind::Income => None,
            TransactionKind::Expense { payment_method } => Some(*payment_method),
        }
    }

    /// Rebuilds the kind from its stored form: a payment method means expense.
    pub fn from_payment_method(pm: Option<PaymentMethod>) -> Self {
        match pm {
            Some(payment_method) => TransactionKind::Expense { payment_method },
            None => TransactionKind::Income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub date: NaiveDateTime,
    pub value: Decimal,
    #[serde(flatten)]
    pub kind: TransactionKind,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }
}

/// Form input for a new transaction; id, owner and timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub date: NaiveDateTime,
    pub value: Decimal,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDateTime>,
    pub value: Option<Decimal>,
    pub kind: Option<TransactionKind>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.value.is_none()
            && self.kind.is_none()
    }
}
