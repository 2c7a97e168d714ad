//! Live-database tests.
//!
//! These connect via `DATABASE_URL` and are skipped (early return) when it
//! is not set. The scenarios run sequentially in one test body because
//! they share the two demo tables.

use rolodex::store::{self, UserFilter};
use rolodex::{FieldSet, connect, schema};

async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let client = connect(&database_url)
        .await
        .expect("Failed to connect to DATABASE_URL");
    Some(client)
}

#[tokio::test]
async fn directory_end_to_end() {
    let Some(client) = try_connect().await else {
        return;
    };

    schema::drop_tables(&client).await.unwrap();
    schema::create_tables(&client).await.unwrap();

    // Round-trip: insert, then look the row up by its unique email.
    let ivan = store::add_user(&client, "Ivan", "Ivanov", "ivan@example.com")
        .await
        .unwrap();
    let found = store::find_user_by_email(&client, "ivan@example.com")
        .await
        .unwrap()
        .expect("inserted user should be found by email");
    assert_eq!(found, ivan);

    // Duplicate email: typed violation, first row left intact.
    let err = store::add_user(&client, "Ivan II", "Ivanov", "ivan@example.com")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
    let still_there = store::find_user(&client, ivan.id).await.unwrap().unwrap();
    assert_eq!(still_there, ivan);

    // Partial update: only the supplied field changes.
    let petr = store::add_user(&client, "Petr", "Petrov", "petr@example.com")
        .await
        .unwrap();
    let changes = FieldSet::new().set("email", "petr.petrovich@example.com");
    let updated = store::update_user(&client, petr.id, &changes)
        .await
        .unwrap()
        .expect("fields were supplied");
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].first_name, "Petr");
    assert_eq!(updated[0].last_name, "Petrov");
    assert_eq!(updated[0].email, "petr.petrovich@example.com");

    // Empty field set: nothing to do, no statement issued.
    let outcome = store::update_user(&client, petr.id, &FieldSet::new())
        .await
        .unwrap();
    assert!(outcome.is_none());

    // Update of a missing id: statement runs, zero rows come back.
    let missing = store::update_user(&client, 9999, &changes)
        .await
        .unwrap()
        .unwrap();
    assert!(missing.is_empty());

    // Combined search resolving a phone number to its owner.
    store::add_phone(&client, "1234567890", ivan.id).await.unwrap();
    store::add_phone(&client, "9876543210", ivan.id).await.unwrap();
    let filter = UserFilter {
        first_name: Some("Ivan".into()),
        phone: Some("1234567890".into()),
        ..UserFilter::default()
    };
    let matched = store::search_users(&client, &filter)
        .await
        .unwrap()
        .expect("criteria were supplied");
    assert_eq!(matched, vec![ivan.clone()]);

    // Unmatched phone number: that predicate is dropped, the search still
    // runs on the remaining fields.
    let filter = UserFilter {
        first_name: Some("Petr".into()),
        phone: Some("0000000000".into()),
        ..UserFilter::default()
    };
    let matched = store::search_users(&client, &filter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, petr.id);

    // No criteria at all: no query is issued.
    let outcome = store::search_users(&client, &UserFilter::default())
        .await
        .unwrap();
    assert!(outcome.is_none());

    // Cascade: deleting the user removes both phone rows.
    let deleted = store::delete_user(&client, ivan.id).await.unwrap();
    assert_eq!(deleted.map(|u| u.id), Some(ivan.id));
    assert!(store::find_phones(&client, "1234567890").await.unwrap().is_empty());
    assert!(store::find_phones(&client, "9876543210").await.unwrap().is_empty());

    // Lookup misses are Ok, not errors.
    assert!(store::find_user(&client, ivan.id).await.unwrap().is_none());
    assert!(
        store::find_users_by_name(&client, "Nobody", "Here")
            .await
            .unwrap()
            .is_empty()
    );

    schema::drop_tables(&client).await.unwrap();
}
