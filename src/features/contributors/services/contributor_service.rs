//! Contributor Service - CRUD over an injected contributor store

use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::contributors::dtos::{ContributorRequestDto, ContributorResponseDto};
use crate::features::contributors::models::{ContributorFields, ContributorListQuery};
use crate::features::contributors::repositories::ContributorStore;

/// A page of contributors with the collection counts
#[derive(Debug, Clone)]
pub struct ContributorListing {
    pub items: Vec<ContributorResponseDto>,
    pub total: i64,
    pub results: i64,
}

pub struct ContributorService {
    store: Arc<dyn ContributorStore>,
}

impl ContributorService {
    pub fn new(store: Arc<dyn ContributorStore>) -> Self {
        Self { store }
    }

    /// Validates the body, reporting the first field message without the field prefix
    fn validate(dto: &ContributorRequestDto) -> Result<()> {
        dto.validate().map_err(|e| {
            let message = e
                .field_errors()
                .values()
                .flat_map(|errors| errors.iter())
                .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| e.to_string());
            AppError::Validation(message)
        })
    }

    /// List contributors with filtering, sorting and pagination
    pub async fn list(&self, query: &ContributorListQuery) -> Result<ContributorListing> {
        let page = self.store.list(query).await?;

        Ok(ContributorListing {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            results: page.results,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ContributorResponseDto> {
        self.store
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("No contributor found".to_string()))
    }

    pub async fn create(&self, dto: ContributorRequestDto) -> Result<ContributorResponseDto> {
        Self::validate(&dto)?;

        let contributor = self.store.create(dto.into()).await?;
        tracing::info!(
            "Contributor created: id={}, name={}",
            contributor.id,
            contributor.name
        );

        Ok(contributor.into())
    }

    /// Replace name, link and image of an existing contributor.
    ///
    /// The existence check and the write are separate statements. If the row
    /// disappears in between, the write touches nothing and the submitted
    /// values are returned as-is.
    pub async fn update(
        &self,
        id: i64,
        dto: ContributorRequestDto,
    ) -> Result<ContributorResponseDto> {
        self.get_by_id(id).await?;
        Self::validate(&dto)?;

        let fields: ContributorFields = dto.into();
        match self.store.update(id, fields.clone()).await? {
            Some(contributor) => {
                tracing::info!("Contributor updated: id={}", id);
                Ok(contributor.into())
            }
            None => {
                tracing::warn!(
                    "Contributor {} vanished before update was written; nothing changed",
                    id
                );
                Ok(fields.into_contributor(id).into())
            }
        }
    }

    /// Delete a contributor; find and delete run in one transaction
    pub async fn delete(&self, id: i64) -> Result<ContributorResponseDto> {
        let contributor = self.store.delete(id).await?;
        tracing::info!("Contributor deleted: id={}", id);

        Ok(contributor.into())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::features::contributors::models::{Contributor, ContributorPage};
    use crate::features::contributors::repositories::MemoryContributorStore;

    fn request(name: &str) -> ContributorRequestDto {
        ContributorRequestDto {
            name: name.to_string(),
            link: Some(format!("https://example.com/{}", name.to_lowercase())),
            image: None,
        }
    }

    fn service_with(store: Arc<MemoryContributorStore>) -> ContributorService {
        ContributorService::new(store)
    }

    /// Store whose rows disappear right after they are looked up
    struct VanishingStore {
        inner: MemoryContributorStore,
    }

    #[async_trait]
    impl ContributorStore for VanishingStore {
        async fn list(&self, query: &ContributorListQuery) -> Result<ContributorPage> {
            self.inner.list(query).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Contributor>> {
            let found = self.inner.find_by_id(id).await?;
            if found.is_some() {
                self.inner.delete(id).await?;
            }
            Ok(found)
        }

        async fn create(&self, fields: ContributorFields) -> Result<Contributor> {
            self.inner.create(fields).await
        }

        async fn update(&self, id: i64, fields: ContributorFields) -> Result<Option<Contributor>> {
            self.inner.update(id, fields).await
        }

        async fn delete(&self, id: i64) -> Result<Contributor> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_create_with_empty_name_is_rejected() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));

        let result = service.create(request("")).await;

        match result {
            Err(AppError::Validation(message)) => assert_eq!(message, "name info is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(store.row_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_persists_with_generated_id() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));

        let created = service.create(request("Alice")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.link.as_deref(), Some("https://example.com/alice"));
        assert_eq!(service.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found_before_validation() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));

        let result = service.update(5, request("")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(store.row_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_with_empty_name_keeps_row() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));
        service.create(request("Alice")).await.unwrap();

        let result = service.update(1, request("")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.get_by_id(1).await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));
        service.create(request("Alice")).await.unwrap();

        let updated = service
            .update(
                1,
                ContributorRequestDto {
                    name: "Alicia".to_string(),
                    link: None,
                    image: Some("https://example.com/alicia.png".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.link, None);
        assert_eq!(
            service.get_by_id(1).await.unwrap().image.as_deref(),
            Some("https://example.com/alicia.png")
        );
    }

    #[tokio::test]
    async fn test_update_racing_delete_is_a_no_op() {
        let inner = MemoryContributorStore::new();
        inner.create(request("Alice").into()).await.unwrap();
        let service = ContributorService::new(Arc::new(VanishingStore { inner }));

        let updated = service.update(1, request("Alicia")).await.unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Alicia");
        let page = service.list(&ContributorListQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));
        service.create(request("Alice")).await.unwrap();

        let deleted = service.delete(1).await.unwrap();

        assert_eq!(deleted.name, "Alice");
        assert!(matches!(
            service.get_by_id(1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_rolls_back_on_failure_after_find() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));
        service.create(request("Alice")).await.unwrap();
        store.fail_next_delete_after_find();

        let result = service.delete(1).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(service.get_by_id(1).await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_list_maps_counts() {
        let store = Arc::new(MemoryContributorStore::new());
        let service = service_with(Arc::clone(&store));
        for name in ["Alice", "Bob", "Carol"] {
            service.create(request(name)).await.unwrap();
        }

        let query = ContributorListQuery {
            filter: crate::features::contributors::models::ContributorFilter {
                id: None,
                name: Some("o".to_string()),
            },
            ..Default::default()
        };
        let listing = service.list(&query).await.unwrap();

        assert_eq!(listing.total, 3);
        assert_eq!(listing.results, 2);
        let names: Vec<_> = listing.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol"]);
    }
}
