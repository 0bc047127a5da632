//! Wire types exchanged with the ranking service.

use serde::{Deserialize, Serialize};

/// `status` value the service reports when it is ready to serve queries.
pub const HEALTH_OK: &str = "ok";

/// Payload of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// Absent on the service's root health route.
    #[serde(default)]
    pub document_count: Option<u64>,
}

impl HealthReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == HEALTH_OK
    }
}

/// Payload of `GET /api/categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_documents: Option<u64>,
}

/// Payload of `GET /api/subcategories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryList {
    pub subcategories: Vec<String>,
}

/// Body of `POST /api/search`. `None` filters are sent as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_n: usize,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Payload of `POST /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
}

/// One ranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub subcategory: String,
    /// Preformatted by the service, e.g. `"42.5%"`.
    pub match_percentage: String,
    #[serde(default)]
    pub low_confidence: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
