//! Transaction helper macro.
//!
//! Store operations accept a transaction anywhere a [`GenericClient`] is
//! expected, so a caller can group any number of them into one unit of
//! work and commit once.
//!
//! [`GenericClient`]: crate::GenericClient
//!
//! # Example
//!
//! ```ignore
//! use rolodex::{store, StoreResult};
//!
//! # async fn demo(mut client: tokio_postgres::Client) -> StoreResult<()> {
//! rolodex::transaction!(&mut client, tx, {
//!     store::add_user(&tx, "Ivan", "Ivanov", "ivan@example.com").await?;
//!     Ok(())
//! })?;
//! # Ok(()) }
//! ```

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via `$client.transaction().await`.
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`.
///
/// The block must evaluate to [`StoreResult`](crate::StoreResult).
#[macro_export]
macro_rules! transaction {
    ($client:expr, $tx:ident, $body:block) => {{
        let $tx = ($client)
            .transaction()
            .await
            .map_err($crate::StoreError::from_db_error)?;

        let __rolodex_tx_body_result = async { $body }.await;
        match __rolodex_tx_body_result {
            Ok(value) => {
                $tx.commit()
                    .await
                    .map_err($crate::StoreError::from_db_error)?;
                Ok(value)
            }
            Err(error) => match $tx.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::StoreError::Other(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
}
