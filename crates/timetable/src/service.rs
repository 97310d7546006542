//! Flight timetable service

use crate::config::TimeTableConfig;
use crate::entity::TimeTableEntity;
use crate::error::ServiceError;
use crate::provider::TimeTableDataProvider;
use keyway_value::prelude::*;
use url::Url;

/// Loads the flight timetable through an injected provider.
///
/// The service keeps no state between calls; each call fetches the document
/// again.
#[derive(Debug)]
pub struct TimeTableService<P> {
    provider: P,
    config: TimeTableConfig,
}

impl<P: TimeTableDataProvider> TimeTableService<P> {
    /// Create a service over `provider`
    pub fn new(provider: P, config: TimeTableConfig) -> Self {
        Self { provider, config }
    }

    /// Active configuration
    pub fn config(&self) -> &TimeTableConfig {
        &self.config
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the timetable and convert its rows.
    ///
    /// The document root must be a list. Rows that fail to convert are
    /// dropped; in strict mode a timetable with no usable row is an error.
    pub async fn flight_timetable(&self) -> Result<Vec<TimeTableEntity>, ServiceError> {
        let endpoint = &self.config.endpoint;
        tracing::info!(%endpoint, lenient = self.config.lenient, "fetching flight timetable");

        let document = self.provider.fetch(endpoint).await.inspect_err(|e| {
            tracing::warn!(%endpoint, error = %e, "timetable provider failed");
        })?;

        let rows: Vec<TimeTableEntity> = if self.config.lenient {
            document.array_of_convertible(())
        } else {
            document.not_empty_array_of_convertible(())
        }
        .inspect_err(|e| {
            tracing::warn!(%endpoint, error = %e, "timetable document rejected");
        })?;

        tracing::info!(%endpoint, rows = rows.len(), "flight timetable loaded");
        Ok(rows)
    }

    /// Provider logo for `entity` at the configured size
    pub fn logo_url(&self, entity: &TimeTableEntity) -> Option<Url> {
        entity.provider_logo_url(self.config.logo_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ValueDataProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_root_must_be_a_list() {
        let service = TimeTableService::new(
            ValueDataProvider::new(json!({"flights": []})),
            TimeTableConfig::default(),
        );

        let err = match service.flight_timetable().await {
            Err(ServiceError::Extract(err)) => err,
            other => panic!("expected an extraction error, got {other:?}"),
        };
        assert_eq!(err.code(), keyway_value::ErrorCode::InvalidType);
        assert_eq!(err.expected_type(), "Vec<TimeTableEntity>");
    }

    #[tokio::test]
    async fn test_logo_url_uses_configured_size() {
        let row = json!([{
            "id": 1,
            "provider_logo": "http://cdn.example.com/logos/{size}/ab.png",
            "price_in_euros": 20,
            "departure_time": "06:00",
            "arrival_time": "07:00",
            "number_of_stops": 1
        }]);
        let service = TimeTableService::new(
            ValueDataProvider::new(row),
            TimeTableConfig::default().with_logo_size(128),
        );
        assert_eq!(service.config().logo_size, 128);

        let rows = service.flight_timetable().await.unwrap();
        let url = service.logo_url(&rows[0]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/logos/128/ab.png");
    }
}
