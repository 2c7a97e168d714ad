//! Dynamic predicate/assignment clause builder.
//!
//! Partial updates and multi-field search share one shape: collect the
//! fields that were actually supplied, join them into a SQL fragment, and
//! bind their values positionally. [`FieldSet`] does that once for both.
//! Clauses and values are accumulated as pairs, so placeholder order
//! matches value order by construction.
//!
//! # Example
//!
//! ```ignore
//! let mut params = ParamList::new();
//! let set = FieldSet::new()
//!     .set_opt("first_name", first_name)
//!     .set_opt("email", email);
//!
//! let Some(assignments) = set.render(FieldMode::Assign, &mut params) else {
//!     return Ok(None); // nothing to do, nothing executed
//! };
//! let key = params.push(user_id);
//! let sql = format!("UPDATE users SET {assignments} WHERE id = ${key}");
//! ```

use crate::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// How rendered clauses are joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    /// `a = $1, b = $2` — an UPDATE's SET list.
    Assign,
    /// `a = $1 AND b = $2` — a WHERE chain.
    Predicate,
}

impl FieldMode {
    fn separator(self) -> &'static str {
        match self {
            FieldMode::Assign => ", ",
            FieldMode::Predicate => " AND ",
        }
    }
}

/// An ordered set of named fields with bound values.
///
/// Columns are `&'static str`: the schema is fixed, so no dynamic
/// identifiers ever reach the SQL text. Absence is expressed with
/// [`set_opt`](FieldSet::set_opt) and `None`, never by sniffing for empty
/// strings — a legitimately empty value stays distinguishable from "not
/// supplied".
#[derive(Debug, Default)]
pub struct FieldSet {
    entries: Vec<(&'static str, Param)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a field with its bound value.
    pub fn set<T>(mut self, column: &'static str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.entries.push((column, Param::new(value)));
        self
    }

    /// Append a field only if a value was supplied; `None` skips it
    /// entirely — it contributes neither a clause nor a bound value.
    pub fn set_opt<T>(self, column: &'static str, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the clause fragment, pushing each value onto `params` in
    /// clause order. Placeholder numbering continues from the list's
    /// current length, so the caller may bind further values after the
    /// fragment (the trailing `WHERE id = $n` key of an update, say).
    ///
    /// Returns `None` when no fields are present: there is nothing to
    /// render and nothing should be executed.
    pub fn render(&self, mode: FieldMode, params: &mut ParamList) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let mut clauses = Vec::with_capacity(self.entries.len());
        for (column, value) in &self.entries {
            let idx = params.push_param(value.clone());
            clauses.push(format!("{column} = ${idx}"));
        }
        Some(clauses.join(mode.separator()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_joins_with_commas() {
        let mut params = ParamList::new();
        let set = FieldSet::new()
            .set("first_name", "Ivan")
            .set("email", "ivan@example.com");

        let fragment = set.render(FieldMode::Assign, &mut params).unwrap();
        assert_eq!(fragment, "first_name = $1, email = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn predicate_joins_with_and() {
        let mut params = ParamList::new();
        let set = FieldSet::new()
            .set("first_name", "Ivan")
            .set("last_name", "Ivanov");

        let fragment = set.render(FieldMode::Predicate, &mut params).unwrap();
        assert_eq!(fragment, "first_name = $1 AND last_name = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn absent_fields_are_skipped_entirely() {
        let mut params = ParamList::new();
        let set = FieldSet::new()
            .set_opt("first_name", None::<&str>)
            .set_opt("last_name", Some("Ivanov"))
            .set_opt("email", None::<&str>);

        let fragment = set.render(FieldMode::Predicate, &mut params).unwrap();
        assert_eq!(fragment, "last_name = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn empty_set_renders_nothing() {
        let mut params = ParamList::new();
        let set = FieldSet::new()
            .set_opt("first_name", None::<&str>)
            .set_opt("email", None::<&str>);

        assert!(set.is_empty());
        assert!(set.render(FieldMode::Assign, &mut params).is_none());
        assert!(params.is_empty());
    }

    #[test]
    fn supplied_empty_string_is_still_present() {
        // Present-but-empty is not the same as absent.
        let mut params = ParamList::new();
        let set = FieldSet::new().set_opt("last_name", Some(""));

        let fragment = set.render(FieldMode::Assign, &mut params).unwrap();
        assert_eq!(fragment, "last_name = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn numbering_continues_from_existing_params() {
        let mut params = ParamList::new();
        params.push(7_i32);

        let set = FieldSet::new().set("email", "x@example.com");
        let fragment = set.render(FieldMode::Assign, &mut params).unwrap();
        assert_eq!(fragment, "email = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn clause_order_matches_supply_order() {
        let mut params = ParamList::new();
        let set = FieldSet::new()
            .set("last_name", "Petrov")
            .set("first_name", "Petr")
            .set("email", "petr@example.com");

        let fragment = set.render(FieldMode::Predicate, &mut params).unwrap();
        assert_eq!(
            fragment,
            "last_name = $1 AND first_name = $2 AND email = $3"
        );
        assert_eq!(set.len(), 3);
        assert_eq!(params.len(), 3);
    }
}
