// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local e-mail identity with a persisted session.
//!
//! Credentials are not checked here; a deployment in front of a real
//! provider only needs to implement [`Identity`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ValidationError;
use crate::models::User;

const SESSION_KEY: &str = "session_user";

pub type StateListener = Box<dyn Fn(Option<&User>) + Send + Sync>;

type SharedListener = Arc<dyn Fn(Option<&User>) + Send + Sync>;

type Listeners = Mutex<Vec<(u64, SharedListener)>>;

pub trait Identity {
    fn sign_up(&self, email: &str) -> Result<User>;

    fn sign_in(&self, email: &str) -> Result<User>;

    fn sign_out(&self) -> Result<()>;

    fn current_user(&self) -> Result<Option<User>>;

    /// Calls `listener` with the current user right away and after every
    /// sign-in or sign-out, until the returned subscription is dropped.
    fn on_state_change(&self, listener: StateListener) -> Result<Subscription>;
}

/// Keeps a state listener registered while alive.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut l) = listeners.lock() {
                l.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

pub struct LocalIdentity<'c> {
    conn: &'c Connection,
    listeners: Arc<Listeners>,
    next_id: AtomicU64,
}

impl<'c> LocalIdentity<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, display_name FROM users WHERE email=?1",
                params![email],
                |r| {
                    Ok(User {
                        id: r.get(0)?,
                        email: r.get(1)?,
                        display_name: r.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, display_name FROM users WHERE id=?1",
                params![id],
                |r| {
                    Ok(User {
                        id: r.get(0)?,
                        email: r.get(1)?,
                        display_name: r.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn start_session(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![SESSION_KEY, user.id],
            )
            .context("Failed to store session")?;
        self.notify(Some(user));
        Ok(())
    }

    /// Listeners run after the registry lock is released, so they may
    /// unsubscribe or change the session themselves.
    fn notify(&self, user: Option<&User>) {
        let snapshot: Vec<SharedListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, f)| f.clone()).collect(),
            Err(_) => return,
        };
        debug!("notifying {} auth listeners", snapshot.len());
        for f in snapshot {
            f(user);
        }
    }
}

/// Lower-cases and checks the obvious `local@domain` shape.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let e = email.trim().to_lowercase();
    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(e)
        }
        _ => Err(ValidationError::InvalidEmail(email.trim().to_string())),
    }
}

impl Identity for LocalIdentity<'_> {
    fn sign_up(&self, email: &str) -> Result<User> {
        let email = normalize_email(email)?;
        if self.find_by_email(&email)?.is_some() {
            return Err(ValidationError::EmailTaken(email).into());
        }
        let display_name = email.split('@').next().map(str::to_string);
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            display_name,
        };
        self.conn.execute(
            "INSERT INTO users(id, email, display_name) VALUES (?1, ?2, ?3)",
            params![user.id, user.email, user.display_name],
        )?;
        info!("registered user {}", user.id);
        self.start_session(&user)?;
        Ok(user)
    }

    fn sign_in(&self, email: &str) -> Result<User> {
        let email = normalize_email(email)?;
        let user = self
            .find_by_email(&email)?
            .ok_or(ValidationError::UnknownUser(email))?;
        info!("signed in user {}", user.id);
        self.start_session(&user)?;
        Ok(user)
    }

    fn sign_out(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key=?1", params![SESSION_KEY])?;
        info!("signed out");
        self.notify(None);
        Ok(())
    }

    fn current_user(&self) -> Result<Option<User>> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![SESSION_KEY],
                |r| r.get(0),
            )
            .optional()?;
        match id {
            Some(id) => self.find_by_id(&id),
            None => Ok(None),
        }
    }

    fn on_state_change(&self, listener: StateListener) -> Result<Subscription> {
        let current = self.current_user()?;
        listener(current.as_ref());
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let listener: SharedListener = Arc::from(listener);
        self.listeners
            .lock()
            .map_err(|_| anyhow::anyhow!("auth listener registry poisoned"))?
            .push((id, listener));
        Ok(Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_is_checked() {
        assert_eq!(normalize_email(" Ana@Mail.com ").unwrap(), "ana@mail.com");
        assert!(normalize_email("ana").is_err());
        assert!(normalize_email("@mail.com").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }
}
