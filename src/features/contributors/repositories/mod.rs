//! Storage contract for contributors and its implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::contributors::models::{
    Contributor, ContributorFields, ContributorListQuery, ContributorPage,
};

pub use memory::MemoryContributorStore;
pub use postgres::PgContributorStore;

/// Capabilities the contributor service needs from a relational store
#[async_trait]
pub trait ContributorStore: Send + Sync {
    /// Filtered, sorted and paginated listing plus total/filtered counts
    async fn list(&self, query: &ContributorListQuery) -> Result<ContributorPage>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Contributor>>;

    /// Inserts a row; the store assigns the id
    async fn create(&self, fields: ContributorFields) -> Result<Contributor>;

    /// Overwrites all mutable fields. Returns `None` when no row has this id.
    async fn update(&self, id: i64, fields: ContributorFields) -> Result<Option<Contributor>>;

    /// Finds and removes a row as one atomic unit. Fails with `NotFound` when
    /// the row is absent; any failure leaves the collection untouched.
    async fn delete(&self, id: i64) -> Result<Contributor>;
}
