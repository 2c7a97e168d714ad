//! The demonstration sequence: rebuild the schema, populate it, and
//! exercise every directory operation once, logging each result.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `DATABASE_URL` names the database; `ROLODEX_LOG_DIR`, when set,
//! additionally mirrors the log to a size-rotated file in that directory.

mod logging;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use rolodex::store::{self, UserFilter};
use rolodex::{FieldSet, connect, schema};
use tracing::info;

/// Run the whole demonstration as one unit of work, committed at the end.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_dir = env::var_os("ROLODEX_LOG_DIR").map(PathBuf::from);
    logging::init(log_dir.as_deref());

    let database_url = env::var("DATABASE_URL")
        .context("DATABASE_URL must be set in .env or the environment")?;
    let mut client = connect(&database_url).await?;

    rolodex::transaction!(&mut client, tx, {
        schema::drop_tables(&tx).await?;
        schema::create_tables(&tx).await?;

        let ivan = store::add_user(&tx, "Ivan", "Ivanov", "ivan@example.com").await?;
        let petr = store::add_user(&tx, "Petr", "Petrov", "petr@example.com").await?;
        let anna = store::add_user(&tx, "Anna", "Sidorova", "anna@example.com").await?;

        store::add_phone(&tx, "1234567890", ivan.id).await?;
        store::add_phone(&tx, "9876543210", ivan.id).await?;
        store::add_phone(&tx, "1112233445", petr.id).await?;

        // Partial update: only the supplied fields change.
        let changes = FieldSet::new()
            .set("last_name", "Petrovich")
            .set("email", "petr.petrovich@example.com");
        store::update_user(&tx, petr.id, &changes).await?;

        store::delete_phones(&tx, petr.id).await?;

        store::find_user(&tx, ivan.id).await?;
        store::find_users_by_name(&tx, "Anna", "Sidorova").await?;
        store::find_user_by_email(&tx, "ivan@example.com").await?;
        store::find_phones(&tx, "1234567890").await?;

        // Combined search: the number resolves to its owner's id.
        let filter = UserFilter {
            first_name: Some("Ivan".into()),
            phone: Some("1234567890".into()),
            ..UserFilter::default()
        };
        store::search_users(&tx, &filter).await?;

        store::list_users(&tx).await?;
        store::delete_user(&tx, anna.id).await?;
        store::list_users(&tx).await?;

        Ok(())
    })?;

    drop(client);
    info!("demonstration complete; changes committed, connection closed");
    Ok(())
}
