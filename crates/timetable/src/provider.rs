//! Sources of the timetable document

use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Produces the raw timetable document for an endpoint.
///
/// Implementations own transport and decoding; the service only ever sees a
/// decoded [`Value`].
#[async_trait]
pub trait TimeTableDataProvider: Send + Sync {
    /// Fetch and decode the document published at `endpoint`
    async fn fetch(&self, endpoint: &Url) -> Result<Value, ProviderError>;
}

/// Provider serving a fixed JSON text payload for every endpoint
#[derive(Debug, Clone)]
pub struct StaticDataProvider {
    payload: String,
}

impl StaticDataProvider {
    /// Create a provider for a JSON text payload
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl TimeTableDataProvider for StaticDataProvider {
    async fn fetch(&self, endpoint: &Url) -> Result<Value, ProviderError> {
        tracing::debug!(%endpoint, bytes = self.payload.len(), "decoding static timetable payload");
        Ok(serde_json::from_str(&self.payload)?)
    }
}

/// Provider serving an already decoded document
#[derive(Debug, Clone)]
pub struct ValueDataProvider {
    document: Value,
}

impl ValueDataProvider {
    /// Create a provider for a decoded document
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl TimeTableDataProvider for ValueDataProvider {
    async fn fetch(&self, _endpoint: &Url) -> Result<Value, ProviderError> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> Url {
        Url::parse("https://timetable.example.com/flights").unwrap()
    }

    #[tokio::test]
    async fn test_static_provider_decodes() {
        let provider = StaticDataProvider::new(r#"[{"id": 1}]"#);
        let document = provider.fetch(&endpoint()).await.unwrap();
        assert_eq!(document, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_static_provider_rejects_malformed_text() {
        let provider = StaticDataProvider::new("[{\"id\": ");
        let err = provider.fetch(&endpoint()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_value_provider() {
        let provider = ValueDataProvider::new(json!({"rows": []}));
        assert_eq!(provider.fetch(&endpoint()).await.unwrap(), json!({"rows": []}));
    }
}
