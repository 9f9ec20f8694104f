use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use super::{ApiError, Destination, OfferGroup, PointRecord, TripApi};

/// REST client for the trip service.
///
/// Every request carries the caller-supplied `Authorization` value. Retries
/// and caching are out of scope; an HTTP error status maps to
/// [`ApiError::Status`] and everything else surfaces as transport errors.
pub struct TripApiClient {
    base_url: String,
    authorization: String,
    client: reqwest::Client,
}

impl TripApiClient {
    pub fn new(base_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            authorization: authorization.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn check_status(response: &reqwest::Response, endpoint: &str) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let endpoint = self.endpoint(path);
        let response = self
            .client
            .get(&endpoint)
            .header(AUTHORIZATION, self.authorization.as_str())
            .send()
            .await?;
        Self::check_status(&response, &endpoint)?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TripApi for TripApiClient {
    async fn event_points(&self) -> Result<Vec<PointRecord>, ApiError> {
        self.get_json("points").await
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>, ApiError> {
        self.get_json("offers").await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.get_json("destinations").await
    }

    async fn create_point(&self, record: PointRecord) -> Result<PointRecord, ApiError> {
        let endpoint = self.endpoint("points");
        let response = self
            .client
            .post(&endpoint)
            .header(AUTHORIZATION, self.authorization.as_str())
            .json(&record)
            .send()
            .await?;
        Self::check_status(&response, &endpoint)?;
        Ok(response.json().await?)
    }

    async fn update_point(&self, record: PointRecord) -> Result<PointRecord, ApiError> {
        let endpoint = self.endpoint(&format!("points/{}", record.id));
        let response = self
            .client
            .put(&endpoint)
            .header(AUTHORIZATION, self.authorization.as_str())
            .json(&record)
            .send()
            .await?;
        Self::check_status(&response, &endpoint)?;
        Ok(response.json().await?)
    }

    async fn delete_point(&self, id: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoint(&format!("points/{id}"));
        let response = self
            .client
            .delete(&endpoint)
            .header(AUTHORIZATION, self.authorization.as_str())
            .send()
            .await?;
        Self::check_status(&response, &endpoint)
    }
}
