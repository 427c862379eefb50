//! Sentinel Hub catalog queries.

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use stac::{Item, ItemCollection};
use url::Url;

use crate::config::Config;
use crate::error::MosaicError;

pub const SENTINEL2_L2A: &str = "sentinel-2-l2a";

const TOKEN_PATH: &str = "oauth/token";
const CATALOG_SEARCH_PATH: &str = "api/v1/catalog/1.0.0/search";
const PAGE_SIZE: u32 = 100;

/// Rectangular WGS84 query region, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

impl FromStr for BoundingBox {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let corners: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| MosaicError::MalformedBoundingBox(s.to_string()))?;

        match corners[..] {
            [west, south, east, north] => Ok(Self::new(west, south, east, north)),
            _ => Err(MosaicError::MalformedBoundingBox(s.to_string())),
        }
    }
}

/// One catalog query: region, inclusive date window, and the cloud-cover
/// ceiling the service applies on its side.
#[derive(Debug, Clone)]
pub struct SceneSearch {
    pub bbox: BoundingBox,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Maximum allowed cloud cover as a fraction, 0-1 scale.
    pub max_cloud_cover: f64,
}

impl SceneSearch {
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "bbox": [self.bbox.west, self.bbox.south, self.bbox.east, self.bbox.north],
            // end date is extended to the last second of the day
            "datetime": format!("{}T00:00:00Z/{}T23:59:59Z", self.from, self.to),
            "collections": [SENTINEL2_L2A],
            "filter": format!("eo:cloud_cover <= {}", self.max_cloud_cover * 100.0),
            "filter-lang": "cql2-text",
            "limit": PAGE_SIZE,
        })
    }
}

pub trait CatalogSearch {
    async fn search(self: &Self, query: &SceneSearch) -> Result<Vec<Item>>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl CatalogClient {
    /// Exchange the configured client credentials for a bearer token.
    pub async fn authenticate(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::new();

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ];
        let token: TokenResponse = http
            .post(base_url.join(TOKEN_PATH)?)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        log::debug!("authenticated against {}", base_url);

        Ok(Self {
            http,
            base_url,
            access_token: token.access_token,
        })
    }
}

impl CatalogSearch for CatalogClient {
    /// Search the catalog, following the `context.next` token until the
    /// result set is exhausted.
    async fn search(self: &Self, query: &SceneSearch) -> Result<Vec<Item>> {
        let url = self.base_url.join(CATALOG_SEARCH_PATH)?;

        let mut scenes: Vec<Item> = vec![];
        let mut next: Option<u64> = None;
        loop {
            let mut body = query.body();
            if let Some(token) = next {
                body["next"] = serde_json::json!(token);
            }

            let page: ItemCollection = self
                .http
                .post(url.clone())
                .bearer_auth(&self.access_token)
                .json(&body)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            next = page
                .additional_fields
                .get("context")
                .and_then(|context| context.get("next"))
                .and_then(|token| token.as_u64());
            scenes.extend(page.items);

            if next.is_none() {
                break;
            }
            log::debug!("fetching next catalog page at offset {:?}", next);
        }

        log::info!("catalog returned {} scenes", scenes.len());
        Ok(scenes)
    }
}
