//! Ranking service boundary.
//!
//! The ranking engine lives in a separate backend and is consumed only as an
//! HTTP contract. Controllers talk to it through [`RankingService`] so tests
//! can substitute a scripted implementation for the HTTP client.

use std::future::Future;

pub mod client;
pub mod types;

pub use client::HttpRankingClient;
pub use types::{
    CategoryList, HEALTH_OK, HealthReport, SearchRequest, SearchResponse, SearchResult,
    SubcategoryList,
};

use crate::error::Result;

/// Operations offered by the remote ranking service.
pub trait RankingService: Send + Sync + 'static {
    /// `GET /health`.
    fn health(&self) -> impl Future<Output = Result<HealthReport>> + Send;

    /// `GET /api/categories`.
    fn categories(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// `GET /api/subcategories?category=<name|All>`. The literal `All` asks
    /// the service for every subcategory.
    fn subcategories(&self, category: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// `POST /api/search`.
    fn search(&self, request: &SearchRequest)
    -> impl Future<Output = Result<Vec<SearchResult>>> + Send;
}
