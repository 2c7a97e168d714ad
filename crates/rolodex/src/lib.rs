//! # rolodex
//!
//! A small PostgreSQL-backed contact directory: users and their phone
//! numbers.
//!
//! - **SQL explicit**: operations are parameterized statements; the one
//!   dynamic piece is the [`FieldSet`] clause builder used for partial
//!   updates and multi-field search
//! - **Explicit handles**: every operation takes its connection or
//!   transaction as an argument via [`GenericClient`] — no ambient state
//! - **Typed errors**: constraint violations surface as distinct
//!   [`StoreError`] variants instead of raw driver errors
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected, or use the [`transaction!`] macro
//!
//! # Partial updates and search
//!
//! ```ignore
//! use rolodex::{store, FieldSet};
//!
//! // Only the supplied fields change; absent ones are left alone.
//! let changes = FieldSet::new().set("email", "petr.petrovich@example.com");
//! store::update_user(&client, petr.id, &changes).await?;
//!
//! // All supplied criteria must match; a phone number is resolved to the
//! // owning user id first.
//! let filter = store::UserFilter {
//!     first_name: Some("Ivan".into()),
//!     phone: Some("1234567890".into()),
//!     ..Default::default()
//! };
//! store::search_users(&client, &filter).await?;
//! ```

pub mod client;
pub mod connect;
pub mod error;
pub mod fields;
pub mod model;
pub mod param;
pub mod row;
pub mod schema;
pub mod store;
pub mod transaction;

pub use client::GenericClient;
pub use connect::connect;
pub use error::{StoreError, StoreResult};
pub use fields::{FieldMode, FieldSet};
pub use model::{Phone, User};
pub use param::{Param, ParamList};
pub use row::{FromRow, RowExt};
pub use store::UserFilter;
