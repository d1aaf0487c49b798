use std::time::Duration;

use sendforge_core::ChainFamily;

/// Price/gas feed client (blocking).
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

/// Error type for feed operations. Internal detail: the `Option`
/// surface swallows these after logging.
#[derive(Debug)]
pub enum FeedError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16),
    /// JSON parsing error
    Parse(String),
    /// Response parsed but did not carry a usable value
    Shape(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {}", msg),
            FeedError::Http(code) => write!(f, "HTTP {}", code),
            FeedError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FeedError::Shape(msg) => write!(f, "Unexpected response shape: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

/// A gas/fee estimate in the chain family's native unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GasEstimate {
    pub price: f64,
    pub unit: String,
}

impl FeedClient {
    /// Create a new client against `api_base`.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("sforge/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, api_base: api_base.into() }
    }

    /// Latest USD price for an asset symbol, or `None` when the feed
    /// cannot provide one. Never panics, never blocks past the client
    /// timeout.
    pub fn fetch_asset_price_usd(&self, symbol: &str) -> Option<f64> {
        match self.try_fetch_price(symbol) {
            Ok(price) => Some(price),
            Err(e) => {
                log::warn!("price fetch for {} failed: {}", symbol, e);
                None
            }
        }
    }

    /// Gas/fee estimate for a chain family, or `None` when unavailable.
    pub fn fetch_gas_estimate(&self, chain: ChainFamily) -> Option<GasEstimate> {
        match self.try_fetch_gas(chain) {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                log::warn!("gas fetch for {} failed: {}", chain, e);
                None
            }
        }
    }

    fn try_fetch_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let url = format!("{}/v1/price", self.api_base);
        let resp = self
            .http
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Http(status.as_u16()));
        }

        let json: serde_json::Value =
            resp.json().map_err(|e| FeedError::Parse(e.to_string()))?;

        let price = json["usd"]
            .as_f64()
            .ok_or_else(|| FeedError::Shape("missing numeric 'usd' field".to_string()))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(FeedError::Shape(format!("non-positive price {}", price)));
        }
        Ok(price)
    }

    fn try_fetch_gas(&self, chain: ChainFamily) -> Result<GasEstimate, FeedError> {
        let url = format!("{}/v1/gas", self.api_base);
        let resp = self
            .http
            .get(&url)
            .query(&[("chain", chain.native_symbol())])
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Http(status.as_u16()));
        }

        let json: serde_json::Value =
            resp.json().map_err(|e| FeedError::Parse(e.to_string()))?;

        let price = json["price"]
            .as_f64()
            .ok_or_else(|| FeedError::Shape("missing numeric 'price' field".to_string()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(FeedError::Shape(format!("negative gas price {}", price)));
        }
        // The feed may omit the unit; fall back to the family's own.
        let unit = json["unit"]
            .as_str()
            .unwrap_or(chain.gas_unit())
            .to_string();
        Ok(GasEstimate { price, unit })
    }
}
