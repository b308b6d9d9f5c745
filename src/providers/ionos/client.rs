use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::auth::credentials::{CredentialManager, IONOS_API_TOKEN};
use crate::config::Config;
use crate::providers::ionos::error::IonosProviderError;
use crate::providers::ionos::types::*;

/// Thin wrapper over the IONOS DNS REST API.
///
/// Each method is one HTTP exchange, aborted as soon as `cancel` fires.
#[derive(Debug)]
pub struct IonosClient {
    http: Client,
    base_url: Url,
}

impl IonosClient {
    pub fn new(
        config: &Config,
        credentials: &dyn CredentialManager,
    ) -> Result<Self, IonosProviderError> {
        let token = credentials
            .get(IONOS_API_TOKEN)
            .map_err(|e| IonosProviderError::Credential(e.to_string()))?;

        let mut api_key = HeaderValue::from_str(token.expose_secret())
            .map_err(|e| IonosProviderError::Credential(format!("invalid API key: {e}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-API-Key", api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Self::with_client(http, &config.api_url)
    }

    /// Uses `http` as is; the caller is responsible for its auth headers.
    pub fn with_client(http: Client, api_url: &str) -> Result<Self, IonosProviderError> {
        let base_url = Url::parse(api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(IonosProviderError::InvalidInput(format!(
                "API URL cannot carry a path: {api_url}"
            )));
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in with_client
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "HTTP request");
        self.http.request(method, url)
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        req: RequestBuilder,
    ) -> Result<String, IonosProviderError> {
        let exchange = async {
            let response = req.send().await?;
            let status = response.status();
            let body = response.text().await?;
            debug!(%status, bytes = body.len(), "HTTP response");

            if !status.is_success() {
                warn!(%status, %body, "IONOS API request failed");
                return Err(IonosProviderError::Status {
                    status: status.as_u16(),
                    reason: status
                        .canonical_reason()
                        .unwrap_or("Unknown Status")
                        .to_string(),
                });
            }
            Ok(body)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(IonosProviderError::Cancelled),
            result = exchange => result,
        }
    }

    async fn handle_request<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        req: RequestBuilder,
    ) -> Result<T, IonosProviderError> {
        let body = self.execute(cancel, req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // GET /zones
    pub async fn list_zones(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<ZoneDescriptor>, IonosProviderError> {
        let url = self.url(&["zones"]);
        self.handle_request(cancel, self.request(Method::GET, url))
            .await
    }

    /// Reads a zone by id. Empty or absent filters are not sent.
    // GET /zones/{zoneId}?recordType=..&recordName=..
    pub async fn get_zone(
        &self,
        cancel: &CancellationToken,
        zone_id: &str,
        record_type: Option<&str>,
        record_name: Option<&str>,
    ) -> Result<ZoneDetail, IonosProviderError> {
        let mut url = self.url(&["zones", zone_id]);
        let filters = [("recordType", record_type), ("recordName", record_name)];
        if filters.iter().any(|(_, v)| v.is_some_and(|v| !v.is_empty())) {
            let mut query = url.query_pairs_mut();
            for (key, value) in filters {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    query.append_pair(key, value);
                }
            }
        }
        self.handle_request(cancel, self.request(Method::GET, url))
            .await
    }

    /// Records in the zone with exactly this type and absolute name.
    pub async fn find_records(
        &self,
        cancel: &CancellationToken,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<ZoneRecord>, IonosProviderError> {
        let zone = self
            .get_zone(cancel, zone_id, Some(record_type), Some(name))
            .await?;
        Ok(zone
            .records
            .into_iter()
            .filter(|r| {
                r.record_type.eq_ignore_ascii_case(record_type)
                    && r.name.eq_ignore_ascii_case(name)
            })
            .collect())
    }

    // POST /zones/{zoneId}/records
    pub async fn create_records(
        &self,
        cancel: &CancellationToken,
        zone_id: &str,
        records: &[RecordWriteRequest],
    ) -> Result<Vec<ZoneRecord>, IonosProviderError> {
        let url = self.url(&["zones", zone_id, "records"]);
        self.handle_request(cancel, self.request(Method::POST, url).json(records))
            .await
    }

    /// The API returns no body on success.
    // PUT /zones/{zoneId}/records/{recordId}
    pub async fn update_record(
        &self,
        cancel: &CancellationToken,
        zone_id: &str,
        record_id: &str,
        record: &RecordWriteRequest,
    ) -> Result<(), IonosProviderError> {
        let url = self.record_url(zone_id, record_id)?;
        self.execute(cancel, self.request(Method::PUT, url).json(record))
            .await
            .map(|_| ())
    }

    // DELETE /zones/{zoneId}/records/{recordId}
    pub async fn delete_record(
        &self,
        cancel: &CancellationToken,
        zone_id: &str,
        record_id: &str,
    ) -> Result<(), IonosProviderError> {
        let url = self.record_url(zone_id, record_id)?;
        self.execute(cancel, self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    // an empty id would address the records collection itself
    fn record_url(&self, zone_id: &str, record_id: &str) -> Result<Url, IonosProviderError> {
        if record_id.is_empty() {
            return Err(IonosProviderError::InvalidInput(
                "no record id provided".to_string(),
            ));
        }
        Ok(self.url(&["zones", zone_id, "records", record_id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{MockCredentialManager, StaticCredentialManager};
    use crate::error::Error;
    use assert_matches::assert_matches;
    use mockall::predicate::eq;

    fn client_for(api_url: &str) -> IonosClient {
        IonosClient::with_client(Client::new(), api_url).unwrap()
    }

    #[test]
    fn test_url_joins_and_escapes_segments() {
        let client = client_for("https://api.hosting.ionos.com/dns/v1");
        assert_eq!(
            client.url(&["zones"]).as_str(),
            "https://api.hosting.ionos.com/dns/v1/zones"
        );
        assert_eq!(
            client.url(&["zones", "a/b", "records"]).as_str(),
            "https://api.hosting.ionos.com/dns/v1/zones/a%2Fb/records"
        );

        let trailing = client_for("http://localhost:1234/");
        assert_eq!(
            trailing.url(&["zones"]).as_str(),
            "http://localhost:1234/zones"
        );
    }

    #[test]
    fn test_record_url_requires_id() {
        let client = client_for("http://localhost:1234");
        assert_matches!(
            client.record_url("zone-1", ""),
            Err(IonosProviderError::InvalidInput(_))
        );
        assert_eq!(
            client.record_url("zone-1", "rec-1").unwrap().path(),
            "/zones/zone-1/records/rec-1"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert_matches!(
            IonosClient::with_client(Client::new(), "mailto:dns@example.com"),
            Err(IonosProviderError::InvalidInput(_))
        );
        assert_matches!(
            IonosClient::with_client(Client::new(), "not a url"),
            Err(IonosProviderError::Url(_))
        );
    }

    #[test]
    fn test_new_propagates_credential_failure() {
        let mut creds = MockCredentialManager::new();
        creds
            .expect_get()
            .with(eq(IONOS_API_TOKEN))
            .times(1)
            .returning(|_| Err(Error::CredentialError("vault locked".into())));

        let result = IonosClient::new(&Config::default(), &creds);
        assert_matches!(
            result,
            Err(IonosProviderError::Credential(msg)) if msg.contains("vault locked")
        );
    }

    #[test]
    fn test_new_rejects_unprintable_key() {
        let creds = StaticCredentialManager::new("line\nbreak");
        assert_matches!(
            IonosClient::new(&Config::default(), &creds),
            Err(IonosProviderError::Credential(_))
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let creds = StaticCredentialManager::new("s3cr3t-key");
        let client = IonosClient::new(&Config::default(), &creds).unwrap();
        let printed = format!("{client:?}");
        assert!(printed.contains("api.hosting.ionos.com"), "{printed}");
        assert!(!printed.contains("s3cr3t-key"), "{printed}");
    }
}
