//! Wire types for the Elasticsearch REST API

use serde::Deserialize;

/// Body of an index (create) response; only the assigned id matters here.
#[derive(Debug, Deserialize)]
pub(crate) struct IndexCreated {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocSource {
    pub text: String,
}

/// Body of a document GET response.
#[derive(Debug, Deserialize)]
pub(crate) struct DocFetched {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub source: Option<DocSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HitsEnvelope {
    pub total: TotalHits,
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalHits {
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: DocSource,
}

/// A search hit as reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EsHit {
    pub id: String,
    pub text: String,
    pub score: f64,
}

/// Outcome of a search call: hits in the engine's order plus the total match
/// count, which may exceed the number of hits returned.
#[derive(Debug, Clone)]
pub struct EsSearchOutcome {
    pub hits: Vec<EsHit>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_body() {
        let json = r#"{
            "took": 3,
            "hits": {
                "total": {"value": 42, "relation": "eq"},
                "hits": [
                    {"_id": "a", "_score": 2.5, "_source": {"text": "first"}},
                    {"_id": "b", "_score": 1.0, "_source": {"text": "second"}}
                ]
            }
        }"#;
        let body: SearchBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.hits.total.value, 42);
        assert_eq!(body.hits.hits.len(), 2);
        assert_eq!(body.hits.hits[0].id, "a");
        assert_eq!(body.hits.hits[0].source.text, "first");
    }

    #[test]
    fn parses_get_body_without_source() {
        let json = r#"{"_index": "documents", "_id": "x", "found": true}"#;
        let body: DocFetched = serde_json::from_str(json).unwrap();
        assert_eq!(body.id, "x");
        assert!(body.source.is_none());
    }
}
