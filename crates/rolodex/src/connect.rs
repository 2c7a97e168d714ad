//! Connection helper.

use crate::error::{StoreError, StoreResult};
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};

/// Connect to the database and spawn the connection driver task.
///
/// The driver future must be polled for the client to make progress; it is
/// spawned onto the current tokio runtime and ends when the client is
/// dropped. Failure here is fatal to the caller: nothing can proceed
/// without a live connection.
pub async fn connect(database_url: &str) -> StoreResult<Client> {
    let (client, connection) = tokio_postgres::connect(database_url, NoTls)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!(error = %e, "database connection task failed");
        }
    });

    info!("connected to database");
    Ok(client)
}
