// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-process holders for fetched lists.
//!
//! A failed fetch is kept apart from a fetch that returned nothing, so a
//! report never shows zeros for data it could not read.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::models::{Transaction, Workspace};
use crate::store::TransactionStore;

pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Transaction {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Workspace {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    status: LoadStatus,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
        }
    }
}

pub type TransactionState = ListState<Transaction>;

impl<T: Keyed> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fetch` and records either its items or its error.
    /// Items from an earlier successful load survive a failed reload.
    pub fn load(&mut self, fetch: impl FnOnce() -> Result<Vec<T>>) -> &LoadStatus {
        self.status = LoadStatus::Loading;
        match fetch() {
            Ok(items) => {
                debug!("state loaded {} items", items.len());
                self.items = items;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!("state load failed: {:#}", e);
                self.status = LoadStatus::Failed(format!("{:#}", e));
            }
        }
        &self.status
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The items of the last load, or the error it ended with.
    pub fn result(&self) -> Result<&[T], &str> {
        match &self.status {
            LoadStatus::Failed(e) => Err(e.as_str()),
            _ => Ok(self.items.as_slice()),
        }
    }

    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LoadStatus::Loaded;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.status = LoadStatus::Failed(error.into());
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Returns false when no item has `id`.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|i| i.key() == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|i| i.key() == id)?;
        Some(self.items.remove(pos))
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    list: ListState<Workspace>,
    selected: Option<String>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListState<Workspace> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<Workspace> {
        &mut self.list
    }

    /// Selecting an id that is not loaded clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.list.items().iter().any(|w| w.id == *id))
            .map(str::to_string);
    }

    pub fn selected(&self) -> Option<&Workspace> {
        let id = self.selected.as_deref()?;
        self.list.items().iter().find(|w| w.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Workspace> {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.list.remove(id)
    }
}

type Pending<V> = Arc<OnceCell<Result<V, String>>>;

/// Coalesces concurrent loads of the same key into a single run.
///
/// Entries live only while a load is running; the next call after it
/// finishes loads again.
pub struct InFlight<K, V> {
    pending: Mutex<HashMap<K, Pending<V>>>,
}

impl<K, V> Default for InFlight<K, V> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> InFlight<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<K, Pending<V>>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.map().contains_key(key)
    }

    pub fn fetch(&self, key: K, loader: impl FnOnce() -> Result<V>) -> Result<V> {
        let (cell, owner) = {
            let mut map = self.map();
            match map.get(&key) {
                Some(cell) => (cell.clone(), false),
                None => {
                    let cell: Pending<V> = Arc::new(OnceCell::new());
                    map.insert(key.clone(), cell.clone());
                    (cell, true)
                }
            }
        };
        let _release = owner.then(|| Release {
            pending: &self.pending,
            key,
        });
        cell.get_or_init(|| loader().map_err(|e| format!("{:#}", e)))
            .clone()
            .map_err(anyhow::Error::msg)
    }
}

/// Clears the owner's key when its load ends, including by panic.
struct Release<'a, K: Eq + Hash, V> {
    pending: &'a Mutex<HashMap<K, Pending<V>>>,
    key: K,
}

impl<K: Eq + Hash, V> Drop for Release<'_, K, V> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

/// Reads dashboard transactions through a store, one read per dashboard at a time.
pub struct TransactionFeed<S> {
    store: S,
    inflight: InFlight<String, Vec<Transaction>>,
}

impl<S: TransactionStore> TransactionFeed<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            inflight: InFlight::new(),
        }
    }

    pub fn fetch(&self, workspace_id: &str) -> Result<Vec<Transaction>> {
        self.inflight
            .fetch(workspace_id.to_string(), || self.store.list(workspace_id))
    }

    pub fn load_into(&self, workspace_id: &str, state: &mut TransactionState) -> LoadStatus {
        state.load(|| self.fetch(workspace_id)).clone()
    }
}
