//! Directory records.

use crate::error::StoreResult;
use crate::row::{FromRow, RowExt};
use tokio_postgres::Row;

/// A directory user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl FromRow for User {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            first_name: row.try_get_column("first_name")?,
            last_name: row.try_get_column("last_name")?,
            email: row.try_get_column("email")?,
        })
    }
}

/// A phone number owned by exactly one user.
///
/// Deleting the owning user cascades to its phone rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: i32,
    pub number: String,
    pub user_id: i32,
}

impl FromRow for Phone {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            number: row.try_get_column("number")?,
            user_id: row.try_get_column("user_id")?,
        })
    }
}
