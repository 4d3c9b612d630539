//! # Common API Types
//!
//! Shared response and pagination types used across handlers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, validation_error};

/// Pagination metadata echoed back on list responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListMeta {
    /// Page size that was applied
    pub limit: u64,
    /// Offset that was applied
    pub offset: u64,
    /// Total number of rows matching the filter
    pub total: u64,
}

/// Generic paginated response wrapper for list endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items for the current page
    pub data: Vec<T>,
    /// Pagination metadata
    pub meta: ListMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: u64, offset: u64, total: u64) -> Self {
        Self {
            data,
            meta: ListMeta {
                limit,
                offset,
                total,
            },
        }
    }
}

/// Offset pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Page size (default 20, max 100)
    pub limit: Option<u64>,
    /// Rows to skip (default 0)
    pub offset: Option<u64>,
}

impl PageQuery {
    /// Resolves the effective `(limit, offset)` pair, rejecting out-of-range
    /// limits.
    pub fn resolve(&self) -> Result<(u64, u64), ApiError> {
        let limit = self.limit.unwrap_or(20);
        if !(1..=100).contains(&limit) {
            return Err(validation_error(
                "limit must be between 1 and 100",
                serde_json::json!({ "limit": "must be between 1 and 100" }),
            ));
        }
        Ok((limit, self.offset.unwrap_or(0)))
    }
}

/// Deserializes a nullable PATCH field so "absent" (outer `None`) is
/// distinguishable from an explicit `null` (`Some(None)`). Use with
/// `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.resolve().unwrap(), (20, 0));
    }

    #[test]
    fn page_query_rejects_out_of_range_limit() {
        let query = PageQuery {
            limit: Some(0),
            offset: None,
        };
        assert!(query.resolve().is_err());

        let query = PageQuery {
            limit: Some(101),
            offset: None,
        };
        assert!(query.resolve().is_err());
    }

    #[test]
    fn double_option_distinguishes_absent_from_null() {
        #[derive(serde::Deserialize)]
        struct Patch {
            #[serde(default, deserialize_with = "double_option")]
            field: Option<Option<String>>,
        }

        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.field, None);

        let cleared: Patch = serde_json::from_str(r#"{"field":null}"#).unwrap();
        assert_eq!(cleared.field, Some(None));

        let set: Patch = serde_json::from_str(r#"{"field":"x"}"#).unwrap();
        assert_eq!(set.field, Some(Some("x".to_string())));
    }

    #[test]
    fn page_query_accepts_max_limit() {
        let query = PageQuery {
            limit: Some(100),
            offset: Some(40),
        };
        assert_eq!(query.resolve().unwrap(), (100, 40));
    }
}
