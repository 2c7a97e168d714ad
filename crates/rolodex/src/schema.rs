//! Table lifecycle for the directory schema.

use crate::client::GenericClient;
use crate::error::StoreResult;
use tracing::info;

/// Drop both tables if they exist. Phones goes first: it holds the foreign
/// key.
pub async fn drop_tables(client: &impl GenericClient) -> StoreResult<()> {
    client
        .batch_execute(
            "DROP TABLE IF EXISTS phones;
             DROP TABLE IF EXISTS users;",
        )
        .await?;
    info!("dropped tables phones and users (if they existed)");
    Ok(())
}

/// Create both tables when missing.
pub async fn create_tables(client: &impl GenericClient) -> StoreResult<()> {
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                email VARCHAR(255) UNIQUE NOT NULL);

             CREATE TABLE IF NOT EXISTS phones (
                id SERIAL PRIMARY KEY,
                number VARCHAR(255) NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE);",
        )
        .await?;
    info!("created tables users and phones (if missing)");
    Ok(())
}
