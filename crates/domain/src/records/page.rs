//! Paginated list envelope

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u64,
    /// Page number (1-based)
    #[serde(default)]
    pub page: u32,
    /// Page size
    #[serde(default)]
    pub page_size: u32,
    /// Whether more pages follow
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            page_size: 0,
            has_more: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes() {
        let page: PaginatedResponse<String> = serde_json::from_str(
            r#"{"items":["a","b"],"total":5,"page":1,"pageSize":2,"hasMore":true}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_size, 2);
        assert!(page.has_more);
    }
}
