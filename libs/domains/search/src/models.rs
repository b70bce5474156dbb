use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_TOP_K: u32 = 5;
pub const MAX_TOP_K: u32 = 50;
pub const DEFAULT_PAGE: u32 = 1;

/// Upper bound on how many matches one request pulls from the vector store.
pub const MAX_FETCH: u32 = 100;

const SCORE_DECIMALS: usize = 4;

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

/// Query string accepted by `GET /search`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query
    pub q: String,

    /// Results per page
    #[serde(default = "default_top_k")]
    #[validate(range(min = 1, max = 50))]
    #[param(default = 5, minimum = 1, maximum = 50)]
    pub top_k: u32,

    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,
}

/// Dense vector produced for a query
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// One raw hit from the vector store, ordered by descending score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Match {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// A paper as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Similarity rounded to 4 decimal places
    pub score: f64,
}

impl From<Match> for SearchHit {
    fn from(m: Match) -> Self {
        Self {
            title: metadata_text(&m.metadata, "title"),
            link: metadata_text(&m.metadata, "link"),
            abstract_text: metadata_text(&m.metadata, "abstract"),
            score: round_score(m.score),
            id: m.id,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchPage {
    pub results: Vec<SearchHit>,
    /// Number of matches fetched for this request, not a global corpus count
    pub total: usize,
    pub page: u32,
}

/// Offset and fetch size derived from `top_k` and `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub top_k: usize,
    pub fetch_k: u32,
}

impl PageWindow {
    pub fn new(top_k: u32, page: u32) -> Self {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(top_k);
        let fetch_k = offset
            .saturating_add(u64::from(top_k))
            .min(u64::from(MAX_FETCH)) as u32;

        Self {
            offset: usize::try_from(offset).unwrap_or(usize::MAX),
            top_k: top_k as usize,
            fetch_k,
        }
    }

    /// Items in `[offset, offset + top_k)`, clamped to what is available.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.top_k)
            .collect()
    }
}

/// String view of a metadata field. Missing or null is empty, other
/// non-string values use their JSON text.
pub fn metadata_text(metadata: &Map<String, Value>, key: &str) -> String {
    match metadata.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Rounds to 4 decimals from the exact binary value, so ties such as
/// 0.85995 (stored just below the tie) round down.
pub fn round_score(score: f64) -> f64 {
    format!("{:.*}", SCORE_DECIMALS, score)
        .parse()
        .unwrap_or(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_fills_missing_metadata() {
        let m = Match::new("p1", 0.912345).with_metadata("title", "Attention");
        let hit = SearchHit::from(m);

        assert_eq!(hit.id, "p1");
        assert_eq!(hit.title, "Attention");
        assert_eq!(hit.link, "");
        assert_eq!(hit.abstract_text, "");
        assert_eq!(hit.score, 0.9123);
    }

    #[test]
    fn test_metadata_text_non_string_values() {
        let mut metadata = Map::new();
        metadata.insert("year".into(), json!(2017));
        metadata.insert("link".into(), Value::Null);

        assert_eq!(metadata_text(&metadata, "year"), "2017");
        assert_eq!(metadata_text(&metadata, "link"), "");
    }

    #[test]
    fn test_hit_serializes_abstract_key() {
        let hit = SearchHit::from(
            Match::new("p2", 0.5).with_metadata("abstract", "We propose a model"),
        );
        let value = serde_json::to_value(&hit).unwrap();

        assert_eq!(value["abstract"], "We propose a model");
        assert!(value.get("abstract_text").is_none());
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.87654), 0.8765);
        assert_eq!(round_score(0.12345678), 0.1235);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_round_score_decimal_ties() {
        assert_eq!(round_score(0.85995), 0.8599);
        assert_eq!(round_score(0.32125), 0.3212);
        assert_eq!(round_score(0.77), 0.77);
        assert_eq!(round_score(-0.5), -0.5);
    }

    #[test]
    fn test_window_first_page() {
        let window = PageWindow::new(5, 1);
        assert_eq!(window.offset, 0);
        assert_eq!(window.fetch_k, 5);
    }

    #[test]
    fn test_window_fetch_is_capped() {
        let window = PageWindow::new(5, 21);
        assert_eq!(window.offset, 100);
        assert_eq!(window.fetch_k, MAX_FETCH);
        assert!(window.slice((0..100).collect::<Vec<_>>()).is_empty());

        let window = PageWindow::new(50, 3);
        assert_eq!(window.offset, 100);
        assert_eq!(window.fetch_k, MAX_FETCH);
    }

    #[test]
    fn test_window_slice_partial_page() {
        let window = PageWindow::new(5, 2);
        assert_eq!(window.fetch_k, 10);
        assert_eq!(window.slice(vec![1, 2, 3, 4, 5, 6, 7]), vec![6, 7]);
    }

    #[test]
    fn test_window_huge_page_does_not_overflow() {
        let window = PageWindow::new(MAX_TOP_K, u32::MAX);
        assert_eq!(window.fetch_k, MAX_FETCH);
        assert!(window.slice(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn test_params_validation() {
        let ok = SearchParams { q: "transformers".into(), top_k: 5, page: 1 };
        assert!(ok.validate().is_ok());

        let bad_top_k = SearchParams { top_k: 51, ..ok.clone() };
        assert!(bad_top_k.validate().is_err());

        let bad_page = SearchParams { page: 0, ..ok };
        assert!(bad_page.validate().is_err());
    }
}
