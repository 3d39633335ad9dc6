// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::db::{format_ts, parse_ts};
use crate::error::NotFound;
use crate::models::{
    Category, NewTransaction, PaymentMethod, Transaction, TransactionKind, TransactionPatch,
    Workspace, WorkspacePatch,
};
use crate::store::{
    new_id, now_ts, validate_name, validate_new, validate_transaction, TransactionStore,
    WorkspaceStore,
};

const TX_COLUMNS: &str = "id, workspace_id, name, description, category, date, value, payment_method, created_at, updated_at";

/// Raw column values, decoded separately so one bad row cannot fail a listing.
struct TxRow {
    id: String,
    workspace_id: String,
    name: String,
    description: String,
    category: String,
    date: String,
    value: String,
    payment_method: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TxRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            workspace_id: r.get(1)?,
            name: r.get(2)?,
            description: r.get(3)?,
            category: r.get(4)?,
            date: r.get(5)?,
            value: r.get(6)?,
            payment_method: r.get(7)?,
            created_at: r.get(8)?,
            updated_at: r.get(9)?,
        })
    }

    fn decode(self) -> Result<Transaction> {
        let category: Category = self.category.parse()?;
        let value = self
            .value
            .parse::<Decimal>()
            .with_context(|| format!("Invalid value '{}'", self.value))?;
        let payment_method = match self.payment_method.as_deref().map(str::trim) {
            Some(pm) if !pm.is_empty() => Some(pm.parse::<PaymentMethod>()?),
            _ => None,
        };
        Ok(Transaction {
            id: self.id,
            workspace_id: self.workspace_id,
            name: self.name,
            description: self.description,
            category,
            date: parse_ts(&self.date)?,
            value,
            kind: TransactionKind::from_payment_method(payment_method),
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

pub struct SqliteTransactions<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteTransactions<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn write(&self, t: &Transaction) -> Result<()> {
        self.conn.execute(
            "UPDATE transactions SET name=?2, description=?3, category=?4, date=?5, value=?6,
             payment_method=?7, updated_at=?8 WHERE id=?1",
            params![
                t.id,
                t.name,
                t.description,
                t.category.label(),
                format_ts(&t.date),
                t.value.to_string(),
                t.kind.payment_method().map(|pm| pm.label()),
                format_ts(&t.updated_at),
            ],
        )?;
        Ok(())
    }
}

impl TransactionStore for SqliteTransactions<'_> {
    fn list(&self, workspace_id: &str) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE workspace_id=?1 ORDER BY date DESC, created_at DESC",
            TX_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![workspace_id], TxRow::read)?;
        let mut out = Vec::new();
        for row in rows {
            let row = row?;
            let id = row.id.clone();
            match row.decode() {
                Ok(t) => out.push(t),
                Err(e) => warn!("skipping malformed transaction {}: {:#}", id, e),
            }
        }
        debug!("loaded {} transactions for dashboard {}", out.len(), workspace_id);
        Ok(out)
    }

    fn get(&self, id: &str) -> Result<Option<Transaction>> {
        let sql = format!("SELECT {} FROM transactions WHERE id=?1", TX_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id], TxRow::read)
            .optional()?;
        row.map(TxRow::decode).transpose()
    }

    fn create(&self, workspace_id: &str, new: NewTransaction) -> Result<Transaction> {
        validate_new(&new)?;
        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM workspaces WHERE id=?1",
                params![workspace_id],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(NotFound::Workspace(workspace_id.to_string()).into());
        }

        let now = now_ts();
        let t = Transaction {
            id: new_id(),
            workspace_id: workspace_id.to_string(),
            name: new.name.trim().to_string(),
            description: new.description,
            category: new.category,
            date: new.date,
            value: new.value,
            kind: new.kind,
            created_at: now,
            updated_at: now,
        };
        self.conn.execute(
            "INSERT INTO transactions(id, workspace_id, name, description, category, date, value, payment_method, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                t.id,
                t.workspace_id,
                t.name,
                t.description,
                t.category.label(),
                format_ts(&t.date),
                t.value.to_string(),
                t.kind.payment_method().map(|pm| pm.label()),
                format_ts(&t.created_at),
                format_ts(&t.updated_at),
            ],
        )?;
        info!("created transaction {} in dashboard {}", t.id, workspace_id);
        Ok(t)
    }

    fn update(&self, id: &str, patch: &TransactionPatch) -> Result<Transaction> {
        let mut t = self
            .get(id)?
            .ok_or_else(|| NotFound::Transaction(id.to_string()))?;
        if let Some(name) = &patch.name {
            t.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            t.description = description.clone();
        }
        if let Some(category) = patch.category {
            t.category = category;
        }
        if let Some(date) = patch.date {
            t.date = date;
        }
        if let Some(value) = patch.value {
            t.value = value;
        }
        if let Some(kind) = patch.kind {
            t.kind = kind;
        }
        validate_transaction(&t.name, t.category, t.value, &t.kind)?;
        t.updated_at = now_ts();
        self.write(&t)?;
        info!("updated transaction {}", id);
        Ok(t)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(NotFound::Transaction(id.to_string()).into());
        }
        info!("deleted transaction {}", id);
        Ok(())
    }
}

pub struct SqliteWorkspaces<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteWorkspaces<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

type WorkspaceRow = (String, String, String, String, String, String);

fn read_workspace(r: &Row<'_>) -> rusqlite::Result<WorkspaceRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
    ))
}

fn decode_workspace((id, user_id, name, description, created, updated): WorkspaceRow) -> Result<Workspace> {
    Ok(Workspace {
        id,
        user_id,
        name,
        description,
        created_at: parse_ts(&created)?,
        updated_at: parse_ts(&updated)?,
    })
}

impl WorkspaceStore for SqliteWorkspaces<'_> {
    fn list(&self, user_id: &str) -> Result<Vec<Workspace>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, description, created_at, updated_at
             FROM workspaces WHERE user_id=?1 ORDER BY name, created_at",
        )?;
        let rows = stmt.query_map(params![user_id], read_workspace)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(decode_workspace(row?)?);
        }
        Ok(out)
    }

    fn get(&self, id: &str) -> Result<Option<Workspace>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, name, description, created_at, updated_at
                 FROM workspaces WHERE id=?1",
                params![id],
                read_workspace,
            )
            .optional()?;
        row.map(decode_workspace).transpose()
    }

    fn create(&self, user_id: &str, name: &str, description: &str) -> Result<Workspace> {
        validate_name(name)?;
        let now = now_ts();
        let ws = Workspace {
            id: new_id(),
            user_id: user_id.to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.conn.execute(
            "INSERT INTO workspaces(id, user_id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                ws.id,
                ws.user_id,
                ws.name,
                ws.description,
                format_ts(&ws.created_at),
                format_ts(&ws.updated_at),
            ],
        )?;
        info!("created dashboard {} for user {}", ws.id, user_id);
        Ok(ws)
    }

    fn update(&self, id: &str, patch: &WorkspacePatch) -> Result<Workspace> {
        let mut ws = self
            .get(id)?
            .ok_or_else(|| NotFound::Workspace(id.to_string()))?;
        if let Some(name) = &patch.name {
            validate_name(name)?;
            ws.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            ws.description = description.trim().to_string();
        }
        ws.updated_at = now_ts();
        self.conn.execute(
            "UPDATE workspaces SET name=?2, description=?3, updated_at=?4 WHERE id=?1",
            params![ws.id, ws.name, ws.description, format_ts(&ws.updated_at)],
        )?;
        Ok(ws)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM transactions WHERE workspace_id=?1", params![id])?;
        let n = tx.execute("DELETE FROM workspaces WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(NotFound::Workspace(id.to_string()).into());
        }
        tx.commit()?;
        info!("deleted dashboard {} and {} transactions", id, removed);
        Ok(())
    }
}
