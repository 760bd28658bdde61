//! HTTP client for the order and zone REST service.

use std::time::Duration;

use chrono::NaiveDate;
use delivery_core::{GeometryError, NoFlyZone, OrderRecord, Polygon, Position, Restaurant};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::snapshot::{central_area_from_points, DaySnapshot};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid central area: {0}")]
    CentralArea(#[from] GeometryError),
}

/// Client for the REST service.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a client rooted at `base_url`. Endpoint paths are appended to
    /// it, so a trailing `/` is added if missing.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, ClientError> {
        self.get_json("restaurants").await
    }

    /// Orders placed on `date`.
    pub async fn orders(&self, date: NaiveDate) -> Result<Vec<OrderRecord>, ClientError> {
        self.get_json(&format!("orders/{}", date.format("%Y-%m-%d")))
            .await
    }

    pub async fn no_fly_zones(&self) -> Result<Vec<NoFlyZone>, ClientError> {
        self.get_json("noflyzones").await
    }

    pub async fn central_area(&self) -> Result<Polygon, ClientError> {
        let points: Vec<Position> = self.get_json("centralarea").await?;
        Ok(central_area_from_points(points)?)
    }

    /// Fetch all four resources for one day concurrently.
    pub async fn snapshot(&self, date: NaiveDate) -> Result<DaySnapshot, ClientError> {
        let (restaurants, orders, no_fly_zones, central_area) = tokio::try_join!(
            self.restaurants(),
            self.orders(date),
            self.no_fly_zones(),
            self.central_area(),
        )?;

        info!(
            %date,
            restaurants = restaurants.len(),
            orders = orders.len(),
            no_fly_zones = no_fly_zones.len(),
            "fetched day snapshot"
        );

        Ok(DaySnapshot {
            date,
            restaurants,
            orders,
            no_fly_zones,
            central_area,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }
}
