//! Directory operations.
//!
//! Every operation takes its storage handle explicitly (a connection or a
//! transaction, via [`GenericClient`]) and maps rows into the crate's
//! models. Mutations use `RETURNING *` so the affected rows can be
//! reported. Lookup misses are logged at warn level and are not errors;
//! constraint violations propagate as typed [`StoreError`] variants.
//!
//! [`StoreError`]: crate::StoreError

use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::fields::{FieldMode, FieldSet};
use crate::model::{Phone, User};
use crate::param::ParamList;
use crate::row::{FromRow, RowExt};
use tokio_postgres::Row;
use tracing::{info, warn};

/// Optional criteria for the combined user search.
///
/// A supplied phone number is not matched directly: it is first resolved
/// to its owning user id, and the id becomes the predicate.
#[derive(Debug, Default)]
pub struct UserFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn collect<T: FromRow>(rows: &[Row]) -> StoreResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

/// Insert a new user and return the created row.
///
/// A duplicate email surfaces as
/// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation).
pub async fn add_user(
    client: &impl GenericClient,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> StoreResult<User> {
    let row = client
        .query_one(
            "INSERT INTO users (first_name, last_name, email)
             VALUES ($1, $2, $3) RETURNING *",
            &[&first_name, &last_name, &email],
        )
        .await?;
    let user = User::from_row(&row)?;
    info!(user = ?user, "added user");
    Ok(user)
}

/// Insert a phone number for an existing user.
pub async fn add_phone(
    client: &impl GenericClient,
    number: &str,
    user_id: i32,
) -> StoreResult<Phone> {
    let row = client
        .query_one(
            "INSERT INTO phones (number, user_id) VALUES ($1, $2) RETURNING *",
            &[&number, &user_id],
        )
        .await?;
    let phone = Phone::from_row(&row)?;
    info!(phone = ?phone, "added phone");
    Ok(phone)
}

fn build_update(id: i32, changes: &FieldSet) -> Option<(String, ParamList)> {
    let mut params = ParamList::new();
    let assignments = changes.render(FieldMode::Assign, &mut params)?;
    // The row key is the final bound value, after every assignment value.
    let key = params.push(id);
    Some((
        format!("UPDATE users SET {assignments} WHERE id = ${key} RETURNING *"),
        params,
    ))
}

/// Apply a partial update to a user: only the fields present in `changes`
/// are touched.
///
/// Returns `None` when `changes` is empty — nothing to do, and no
/// statement is issued. Otherwise returns the rows reported by
/// `RETURNING *` (empty when `id` matched no row).
pub async fn update_user(
    client: &impl GenericClient,
    id: i32,
    changes: &FieldSet,
) -> StoreResult<Option<Vec<User>>> {
    let Some((sql, params)) = build_update(id, changes) else {
        warn!(id, "update skipped: no fields supplied");
        return Ok(None);
    };
    let rows = client.query(&sql, &params.as_refs()).await?;
    let users: Vec<User> = collect(&rows)?;
    if users.is_empty() {
        warn!(id, "update matched no user");
    } else {
        info!(users = ?users, "updated user");
    }
    Ok(Some(users))
}

/// Delete every phone belonging to a user, returning the deleted rows.
pub async fn delete_phones(
    client: &impl GenericClient,
    user_id: i32,
) -> StoreResult<Vec<Phone>> {
    let rows = client
        .query(
            "DELETE FROM phones WHERE user_id = $1 RETURNING *",
            &[&user_id],
        )
        .await?;
    let phones: Vec<Phone> = collect(&rows)?;
    info!(phones = ?phones, "deleted phones");
    Ok(phones)
}

/// Delete a user; the schema cascades the deletion to their phones.
pub async fn delete_user(client: &impl GenericClient, id: i32) -> StoreResult<Option<User>> {
    let row = client
        .query_opt("DELETE FROM users WHERE id = $1 RETURNING *", &[&id])
        .await?;
    match row {
        Some(row) => {
            let user = User::from_row(&row)?;
            info!(user = ?user, "deleted user");
            Ok(Some(user))
        }
        None => {
            warn!(id, "delete matched no user");
            Ok(None)
        }
    }
}

/// Look a user up by id.
pub async fn find_user(client: &impl GenericClient, id: i32) -> StoreResult<Option<User>> {
    let row = client
        .query_opt("SELECT * FROM users WHERE id = $1", &[&id])
        .await?;
    match row {
        Some(row) => {
            let user = User::from_row(&row)?;
            info!(user = ?user, "found user");
            Ok(Some(user))
        }
        None => {
            warn!(id, "no user with this id");
            Ok(None)
        }
    }
}

/// Look users up by first and last name. Names are not unique, so this can
/// return several rows.
pub async fn find_users_by_name(
    client: &impl GenericClient,
    first_name: &str,
    last_name: &str,
) -> StoreResult<Vec<User>> {
    let rows = client
        .query(
            "SELECT * FROM users WHERE first_name = $1 AND last_name = $2",
            &[&first_name, &last_name],
        )
        .await?;
    let users: Vec<User> = collect(&rows)?;
    if users.is_empty() {
        warn!(first_name, last_name, "no user with this name");
    } else {
        info!(users = ?users, "found users");
    }
    Ok(users)
}

/// Look a user up by email. Email is unique, so at most one row matches.
pub async fn find_user_by_email(
    client: &impl GenericClient,
    email: &str,
) -> StoreResult<Option<User>> {
    let row = client
        .query_opt("SELECT * FROM users WHERE email = $1", &[&email])
        .await?;
    match row {
        Some(row) => {
            let user = User::from_row(&row)?;
            info!(user = ?user, "found user");
            Ok(Some(user))
        }
        None => {
            warn!(email, "no user with this email");
            Ok(None)
        }
    }
}

/// Look phone rows up by number.
pub async fn find_phones(client: &impl GenericClient, number: &str) -> StoreResult<Vec<Phone>> {
    let rows = client
        .query("SELECT * FROM phones WHERE number = $1", &[&number])
        .await?;
    let phones: Vec<Phone> = collect(&rows)?;
    if phones.is_empty() {
        warn!(number, "no phone with this number");
    } else {
        info!(phones = ?phones, "found phones");
    }
    Ok(phones)
}

fn build_search(fields: &FieldSet) -> Option<(String, ParamList)> {
    let mut params = ParamList::new();
    let predicates = fields.render(FieldMode::Predicate, &mut params)?;
    Some((format!("SELECT * FROM users WHERE {predicates}"), params))
}

/// Combined multi-field search.
///
/// All supplied criteria must match. A phone number is resolved to its
/// owning user id first; when no phone row matches, that criterion is
/// dropped and the search proceeds on the remaining fields.
///
/// Returns `None` when no criteria were supplied — nothing to do, and no
/// search is issued.
pub async fn search_users(
    client: &impl GenericClient,
    filter: &UserFilter,
) -> StoreResult<Option<Vec<User>>> {
    let mut fields = FieldSet::new()
        .set_opt("first_name", filter.first_name.clone())
        .set_opt("last_name", filter.last_name.clone())
        .set_opt("email", filter.email.clone());

    if let Some(number) = &filter.phone {
        let owner = client
            .query_opt("SELECT user_id FROM phones WHERE number = $1", &[number])
            .await?;
        match owner {
            Some(row) => {
                let user_id: i32 = row.try_get_column("user_id")?;
                fields = fields.set("id", user_id);
            }
            // An unknown number narrows nothing: the predicate is dropped
            // and the search runs on the remaining fields.
            None => warn!(number = %number, "phone matched no row; dropped from search"),
        }
    }

    let Some((sql, params)) = build_search(&fields) else {
        warn!("search skipped: no criteria supplied");
        return Ok(None);
    };
    let rows = client.query(&sql, &params.as_refs()).await?;
    let users: Vec<User> = collect(&rows)?;
    if users.is_empty() {
        warn!(filter = ?filter, "no users matched the search");
    } else {
        info!(users = ?users, "search matched users");
    }
    Ok(Some(users))
}

/// Return every user.
pub async fn list_users(client: &impl GenericClient) -> StoreResult<Vec<User>> {
    let rows = client.query("SELECT * FROM users ORDER BY id", &[]).await?;
    let users: Vec<User> = collect(&rows)?;
    info!(users = ?users, "all users");
    Ok(users)
}
