use crate::api::SearchResult;

/// A search result with predictable fields derived from `id`.
#[must_use]
pub fn result(id: i64, low_confidence: bool) -> SearchResult {
    SearchResult {
        id,
        title: format!("Document {id}"),
        description: format!("Description for document {id}"),
        category: "Technology".to_string(),
        subcategory: "Backend".to_string(),
        match_percentage: if low_confidence {
            "6.1%".to_string()
        } else {
            "54.3%".to_string()
        },
        low_confidence,
        tags: vec!["python".to_string(), "api".to_string()],
        brand: None,
        difficulty_level: Some("Intermediate".to_string()),
        price_range: None,
        score: Some(if low_confidence { 0.061 } else { 0.543 }),
    }
}

/// A product-style result carrying brand and price range.
#[must_use]
pub fn product(id: i64, title: &str, brand: &str) -> SearchResult {
    SearchResult {
        id,
        title: title.to_string(),
        description: format!("{title} from {brand}"),
        category: "Products".to_string(),
        subcategory: "Audio".to_string(),
        match_percentage: "37.0%".to_string(),
        low_confidence: false,
        tags: vec!["audio".to_string()],
        brand: Some(brand.to_string()),
        difficulty_level: None,
        price_range: Some("$$".to_string()),
        score: Some(0.37),
    }
}
