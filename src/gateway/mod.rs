//! Pricing API gateway
//!
//! The session never talks HTTP directly. Every backend call goes through the
//! [`Gateway`] trait, so the TUI dispatcher and headless commands share one
//! implementation ([`HttpGateway`]) and tests can substitute an in-memory one.
//!
//! # Endpoints
//!
//! | Method                 | Endpoint              | Params                 |
//! |------------------------|-----------------------|------------------------|
//! | `regions`              | `instance/regions`    | none                   |
//! | `operations`           | `instance/operations` | none                   |
//! | `categories`           | `instance/categories` | none                   |
//! | `volume_types`         | `instance/voltypes`   | none                   |
//! | `families`             | `instance/family`     | region, arch, category |
//! | `sizes`                | `instance/sizes`      | region, arch, family   |
//! | `instance_product`     | `product/instance`    | region, type, op       |
//! | `volume_product`       | `product/volume`      | region, type, size     |
//! | `instance_detail`      | `instance/detail`     | region, type           |

mod http;
mod models;

pub use http::{HttpGateway, DEFAULT_SIZES_PATH};
pub use models::{
    Category, InstanceFamily, InstanceSize, ListPrice, Operation, PricePerUnit, PricedProduct,
    Region, SpecGroup, VolumeType, display_value, spec_rows,
};

use crate::types::Architecture;
use thiserror::Error;

/// Failure of a single gateway call.
///
/// Every variant is a `NetworkFailure` in the session's taxonomy: the
/// resolver turns it into an `error` validity with retry feedback. A
/// well-formed empty list is not an error and never produces this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport failure (connection refused, timeout, DNS)
    #[error("request failed: {0}")]
    Network(String),

    /// The API answered with a non-2xx status
    #[error("pricing API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured endpoint is not a usable URL
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// Result alias for gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Filter for `instance/family`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyQuery {
    pub region: String,
    pub architecture: Architecture,
    pub category: Option<String>,
}

/// Filter for `instance/sizes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeQuery {
    pub region: String,
    pub architecture: Architecture,
    pub family: String,
}

/// Key for `product/instance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceProductQuery {
    pub region: String,
    pub instance_type: String,
    pub operation: String,
}

/// Key for `product/volume`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeProductQuery {
    pub region: String,
    pub volume_type: String,
    pub volume_size: u32,
}

/// Key for `instance/detail`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    pub region: String,
    pub instance_type: String,
}

/// Abstract access to the pricing backend.
///
/// Implementations are blocking; the dispatcher calls them from worker
/// threads, which is why `Send + Sync` is required.
pub trait Gateway: Send + Sync {
    fn regions(&self) -> GatewayResult<Vec<Region>>;
    fn operations(&self) -> GatewayResult<Vec<Operation>>;
    fn categories(&self) -> GatewayResult<Vec<Category>>;
    fn volume_types(&self) -> GatewayResult<Vec<VolumeType>>;
    fn families(&self, query: &FamilyQuery) -> GatewayResult<Vec<InstanceFamily>>;
    fn sizes(&self, query: &SizeQuery) -> GatewayResult<Vec<InstanceSize>>;
    fn instance_product(&self, query: &InstanceProductQuery) -> GatewayResult<PricedProduct>;
    fn volume_product(&self, query: &VolumeProductQuery) -> GatewayResult<PricedProduct>;
    fn instance_detail(&self, query: &DetailQuery) -> GatewayResult<serde_json::Value>;
}
