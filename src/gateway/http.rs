//! Blocking HTTP implementation of the pricing gateway.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{Category, InstanceFamily, InstanceSize, Operation, PricedProduct, Region, VolumeType};
use super::{
    DetailQuery, FamilyQuery, Gateway, GatewayError, GatewayResult, InstanceProductQuery,
    SizeQuery, VolumeProductQuery,
};

/// Size listing path used by current backends (`instance/types` on older ones)
pub const DEFAULT_SIZES_PATH: &str = "instance/sizes";

/// User agent sent with every request
const USER_AGENT_VALUE: &str = concat!("quicklook/", env!("CARGO_PKG_VERSION"));

/// Gateway backed by the pricing API's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
    sizes_path: String,
}

impl HttpGateway {
    /// Create a gateway for the API rooted at `endpoint`.
    pub fn new(endpoint: &str, sizes_path: &str, timeout: Duration) -> GatewayResult<Self> {
        // Url::join drops the last path segment unless it ends with '/'
        let mut root = endpoint.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base = Url::parse(&root).map_err(|e| GatewayError::Endpoint(format!("{root}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            sizes_path: sizes_path.trim_matches('/').to_string(),
        })
    }

    /// Build the request URL for `path` with the given query parameters.
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> GatewayResult<Url> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| GatewayError::Endpoint(format!("{path}: {e}")))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> GatewayResult<T> {
        let url = self.url(path, params)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("{} returned HTTP {}", path, status.as_u16());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().map_err(|e| {
            if e.is_decode() {
                GatewayError::Decode(format!("{path}: {e}"))
            } else {
                GatewayError::Network(e.to_string())
            }
        })
    }
}

impl Gateway for HttpGateway {
    fn regions(&self) -> GatewayResult<Vec<Region>> {
        self.get_json("instance/regions", &[])
    }

    fn operations(&self) -> GatewayResult<Vec<Operation>> {
        self.get_json("instance/operations", &[])
    }

    fn categories(&self) -> GatewayResult<Vec<Category>> {
        self.get_json("instance/categories", &[])
    }

    fn volume_types(&self) -> GatewayResult<Vec<VolumeType>> {
        self.get_json("instance/voltypes", &[])
    }

    fn families(&self, query: &FamilyQuery) -> GatewayResult<Vec<InstanceFamily>> {
        let mut params = vec![
            ("region", query.region.as_str()),
            ("arch", query.architecture.as_str()),
        ];
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category", category));
        }
        self.get_json("instance/family", &params)
    }

    fn sizes(&self, query: &SizeQuery) -> GatewayResult<Vec<InstanceSize>> {
        self.get_json(
            &self.sizes_path,
            &[
                ("region", query.region.as_str()),
                ("arch", query.architecture.as_str()),
                ("family", query.family.as_str()),
            ],
        )
    }

    fn instance_product(&self, query: &InstanceProductQuery) -> GatewayResult<PricedProduct> {
        // `type` and `typesize` name the same parameter on different backends
        self.get_json(
            "product/instance",
            &[
                ("region", query.region.as_str()),
                ("type", query.instance_type.as_str()),
                ("typesize", query.instance_type.as_str()),
                ("op", query.operation.as_str()),
            ],
        )
    }

    fn volume_product(&self, query: &VolumeProductQuery) -> GatewayResult<PricedProduct> {
        let size = query.volume_size.to_string();
        self.get_json(
            "product/volume",
            &[
                ("region", query.region.as_str()),
                ("type", query.volume_type.as_str()),
                ("size", size.as_str()),
            ],
        )
    }

    fn instance_detail(&self, query: &DetailQuery) -> GatewayResult<serde_json::Value> {
        self.get_json(
            "instance/detail",
            &[
                ("region", query.region.as_str()),
                ("type", query.instance_type.as_str()),
            ],
        )
    }
}
