//! Generic client trait for unified database access.

use crate::error::{StoreError, StoreResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// Every store operation takes its handle through this trait, so the same
/// operation can run standalone against a connection or composed inside a
/// transaction. There is no ambient connection state anywhere in the crate.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = StoreResult<Vec<Row>>> + Send;

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = StoreResult<Option<Row>>> + Send;

    /// Execute a query and return the first row.
    ///
    /// Returns [`StoreError::NotFound`] if no rows are returned.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = StoreResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| StoreError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a sequence of statements separated by semicolons (DDL).
    fn batch_execute(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(StoreError::from_db_error)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        let rows = GenericClient::query(self, sql, params).await?;
        Ok(rows.into_iter().next())
    }

    async fn batch_execute(&self, sql: &str) -> StoreResult<()> {
        tokio_postgres::Client::batch_execute(self, sql)
            .await
            .map_err(StoreError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(StoreError::from_db_error)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        let rows = GenericClient::query(self, sql, params).await?;
        Ok(rows.into_iter().next())
    }

    async fn batch_execute(&self, sql: &str) -> StoreResult<()> {
        tokio_postgres::Transaction::batch_execute(self, sql)
            .await
            .map_err(StoreError::from_db_error)
    }
}

impl<C: GenericClient> GenericClient for &C {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        (*self).query(sql, params).await
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        (*self).query_opt(sql, params).await
    }

    async fn batch_execute(&self, sql: &str) -> StoreResult<()> {
        (*self).batch_execute(sql).await
    }
}
