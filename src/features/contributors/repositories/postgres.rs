//! Postgres-backed contributor store

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::contributors::models::{
    Contributor, ContributorFields, ContributorFilter, ContributorListQuery, ContributorPage,
    SortField,
};
use crate::features::contributors::repositories::ContributorStore;

const SELECT_CONTRIBUTORS: &str = "SELECT id, name, link, image FROM contributors";

/// Logs a failed statement and wraps the error
fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

/// Appends the filter predicates joined by `AND`. Values are always bound, never inlined.
fn push_conditions(builder: &mut QueryBuilder<'static, Postgres>, filter: &ContributorFilter) {
    let mut conditions = builder.separated(" AND ");
    if let Some(id) = filter.id {
        conditions.push("id = ").push_bind_unseparated(id);
    }
    if let Some(name) = &filter.name {
        // strpos is a literal, case-sensitive substring test (no LIKE wildcards)
        conditions
            .push("strpos(name, ")
            .push_bind_unseparated(name.clone())
            .push_unseparated(") > 0");
    }
}

/// `SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE ...) AS results FROM contributors`
pub(crate) fn build_count_query(filter: &ContributorFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) AS total, COUNT(*)");
    if !filter.is_empty() {
        builder.push(" FILTER (WHERE ");
        push_conditions(&mut builder, filter);
        builder.push(")");
    }
    builder.push(" AS results FROM contributors");
    builder
}

/// Filtered, ordered and paginated row query
pub(crate) fn build_select_query(query: &ContributorListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_CONTRIBUTORS);

    if !query.filter.is_empty() {
        builder.push(" WHERE ");
        push_conditions(&mut builder, &query.filter);
    }

    // Column names come from the SortField allow-list only
    builder.push(" ORDER BY ");
    match query.sort {
        Some(sort) if sort.field == SortField::Id => {
            builder.push("id ").push(sort.direction.as_sql());
        }
        Some(sort) => {
            // Byte-order collation, same as the in-memory store
            builder
                .push(sort.field.as_sql())
                .push(" COLLATE \"C\" ")
                .push(sort.direction.as_sql())
                .push(", id ASC");
        }
        None => {
            builder.push("id ASC");
        }
    }

    if let Some(limit) = query.pagination.limit() {
        builder.push(" LIMIT ").push_bind(limit);
    }
    if let Some(offset) = query.pagination.offset() {
        builder.push(" OFFSET ").push_bind(offset);
    }

    builder
}

/// Contributor store over the `contributors` relation
#[derive(Clone)]
pub struct PgContributorStore {
    pool: PgPool,
}

impl PgContributorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributorStore for PgContributorStore {
    async fn list(&self, query: &ContributorListQuery) -> Result<ContributorPage> {
        // Counts and rows share one snapshot
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin list transaction"))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(db_error("set list isolation level"))?;

        let (total, results) = build_count_query(&query.filter)
            .build_query_as::<(i64, i64)>()
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("count contributors"))?;

        let items = build_select_query(query)
            .build_query_as::<Contributor>()
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error("list contributors"))?;

        tx.commit()
            .await
            .map_err(db_error("commit list transaction"))?;

        Ok(ContributorPage {
            items,
            total,
            results,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contributor>> {
        sqlx::query_as::<_, Contributor>(
            "SELECT id, name, link, image FROM contributors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("get contributor"))
    }

    async fn create(&self, fields: ContributorFields) -> Result<Contributor> {
        let contributor = sqlx::query_as::<_, Contributor>(
            r#"
            INSERT INTO contributors (name, link, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, link, image
            "#,
        )
        .bind(fields.name)
        .bind(fields.profile_link)
        .bind(fields.image_link)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert contributor"))?;

        Ok(contributor)
    }

    async fn update(&self, id: i64, fields: ContributorFields) -> Result<Option<Contributor>> {
        sqlx::query_as::<_, Contributor>(
            r#"
            UPDATE contributors
            SET name = $1, link = $2, image = $3
            WHERE id = $4
            RETURNING id, name, link, image
            "#,
        )
        .bind(fields.name)
        .bind(fields.profile_link)
        .bind(fields.image_link)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update contributor"))
    }

    async fn delete(&self, id: i64) -> Result<Contributor> {
        // Dropping the transaction on any early return rolls it back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin delete transaction"))?;

        // Row lock: a concurrent delete of the same id waits here and then finds nothing
        let contributor = sqlx::query_as::<_, Contributor>(
            "SELECT id, name, link, image FROM contributors WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("find contributor for delete"))?
        .ok_or_else(|| AppError::NotFound("No contributor found".to_string()))?;

        sqlx::query("DELETE FROM contributors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete contributor"))?;

        tx.commit()
            .await
            .map_err(db_error("commit delete transaction"))?;

        Ok(contributor)
    }
}
