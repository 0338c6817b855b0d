use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::domain::Classification;
use crate::error::HarvardError;

/// Seam over the two Harvard Art Museums endpoints. Both calls return the
/// raw `records` array of the JSON body; the caller owns pagination and
/// normalization. No retry policy: the first failure is terminal for a run.
pub trait HarvardClient: Send + Sync {
    fn fetch_classifications(&self, size: u32) -> Result<Vec<Value>, HarvardError>;
    fn fetch_objects_page(
        &self,
        classification: &Classification,
        size: u32,
        page: u32,
    ) -> Result<Vec<Value>, HarvardError>;
}

#[derive(Clone)]
pub struct HarvardHttpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HarvardHttpClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, HarvardError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("harvard-artifacts/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HarvardError::CatalogHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| HarvardError::CatalogHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn classification_url(&self) -> String {
        format!("{}/classification", self.base_url)
    }

    fn object_url(&self) -> String {
        format!("{}/object", self.base_url)
    }

    fn extract_records(body: Value) -> Result<Vec<Value>, HarvardError> {
        match body.get("records") {
            Some(Value::Array(records)) => Ok(records.clone()),
            Some(other) => Err(HarvardError::MalformedResponse(format!(
                "expected \"records\" to be an array, got {other}"
            ))),
            None => Err(HarvardError::MalformedResponse(
                "response body has no \"records\" field".to_string(),
            )),
        }
    }
}

impl HarvardClient for HarvardHttpClient {
    fn fetch_classifications(&self, size: u32) -> Result<Vec<Value>, HarvardError> {
        let size = size.to_string();
        let response = self
            .client
            .get(self.classification_url())
            .query(&[("apikey", self.api_key.as_str()), ("size", size.as_str())])
            .send()
            .map_err(|err| HarvardError::CatalogHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "catalog request failed".to_string());
            return Err(HarvardError::CatalogStatus { status, message });
        }
        let body: Value = response
            .json()
            .map_err(|err| HarvardError::MalformedResponse(err.to_string()))?;
        Self::extract_records(body)
    }

    fn fetch_objects_page(
        &self,
        classification: &Classification,
        size: u32,
        page: u32,
    ) -> Result<Vec<Value>, HarvardError> {
        let size = size.to_string();
        let page = page.to_string();
        let response = self
            .client
            .get(self.object_url())
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("size", size.as_str()),
                ("page", page.as_str()),
                ("classification", classification.as_str()),
            ])
            .send()
            .map_err(|err| HarvardError::ObjectHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "object request failed".to_string());
            return Err(HarvardError::ObjectStatus { status, message });
        }
        let body: Value = response
            .json()
            .map_err(|err| HarvardError::MalformedResponse(err.to_string()))?;
        Self::extract_records(body)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn extract_records_array() {
        let body = json!({"info": {"page": 1}, "records": [{"id": 1}, {"id": 2}]});
        let records = HarvardHttpClient::extract_records(body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn extract_records_missing_field() {
        let err = HarvardHttpClient::extract_records(json!({"info": {}})).unwrap_err();
        assert_matches!(err, HarvardError::MalformedResponse(_));
    }

    #[test]
    fn extract_records_wrong_shape() {
        let err = HarvardHttpClient::extract_records(json!({"records": 7})).unwrap_err();
        assert_matches!(err, HarvardError::MalformedResponse(_));
    }
}
