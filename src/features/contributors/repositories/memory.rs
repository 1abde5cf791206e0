//! In-process contributor store.
//!
//! Holds rows in a `BTreeMap` behind a single async mutex, so every operation
//! (including delete's find-then-remove) runs as one critical section. Used
//! for local runs without Postgres (`STORE_BACKEND=memory`) and by tests.

use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::contributors::models::{
    Contributor, ContributorFields, ContributorListQuery, ContributorPage,
};
use crate::features::contributors::repositories::ContributorStore;

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Contributor>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryContributorStore {
    state: Mutex<MemoryState>,
    #[cfg(test)]
    fail_after_find: AtomicBool,
}

impl MemoryContributorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next delete fail between its find and remove steps
    #[cfg(test)]
    pub fn fail_next_delete_after_find(&self) {
        self.fail_after_find.store(true, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub async fn row_count(&self) -> usize {
        self.state.lock().await.rows.len()
    }
}

#[async_trait]
impl ContributorStore for MemoryContributorStore {
    async fn list(&self, query: &ContributorListQuery) -> Result<ContributorPage> {
        let state = self.state.lock().await;
        Ok(query.apply(state.rows.values()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contributor>> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn create(&self, fields: ContributorFields) -> Result<Contributor> {
        let mut state = self.state.lock().await;
        state.last_id += 1;
        let contributor = fields.into_contributor(state.last_id);
        state.rows.insert(contributor.id, contributor.clone());
        Ok(contributor)
    }

    async fn update(&self, id: i64, fields: ContributorFields) -> Result<Option<Contributor>> {
        let mut state = self.state.lock().await;
        Ok(state.rows.get_mut(&id).map(|row| {
            *row = fields.into_contributor(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Contributor> {
        let mut state = self.state.lock().await;

        let found = state
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("No contributor found".to_string()))?;

        #[cfg(test)]
        if self.fail_after_find.swap(false, Ordering::SeqCst) {
            return Err(AppError::Internal(format!(
                "injected failure while deleting contributor {}",
                found.id
            )));
        }

        state.rows.remove(&id);
        Ok(found)
    }
}
