//! Process configuration, read once from the environment at start-up.

use std::fmt::Display;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use axum::http::HeaderValue;

use warehouse_core::BinId;

pub const BIND_ADDR_ENV: &str = "WAREHOUSE_BIND_ADDR";
pub const DEFAULT_BIN_ID_ENV: &str = "WAREHOUSE_DEFAULT_BIN_ID";
pub const DEFAULT_BIN_CAPACITY_ENV: &str = "WAREHOUSE_DEFAULT_BIN_CAPACITY";
pub const CORS_ORIGIN_ENV: &str = "WAREHOUSE_CORS_ORIGIN";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5000));
const DEFAULT_BIN_ID: &str = "B1";
const DEFAULT_BIN_CAPACITY: u64 = 100;
const DEFAULT_CORS_ORIGIN: &str = "*";

const _: () = assert!(!DEFAULT_BIN_ID.is_empty() && DEFAULT_BIN_CAPACITY > 0);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Bin used by add-stock requests that do not name one.
    pub default_bin_id: BinId,
    /// Capacity given to bins auto-provisioned without an explicit capacity.
    pub default_bin_capacity: u64,
    /// Value of `Access-Control-Allow-Origin` on every response.
    pub cors_origin: HeaderValue,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            default_bin_id: BinId::from_static(DEFAULT_BIN_ID),
            default_bin_capacity: DEFAULT_BIN_CAPACITY,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Invalid values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BIND_ADDR_ENV) {
            match raw.trim().parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warn_invalid(BIND_ADDR_ENV, &raw, DEFAULT_BIND_ADDR),
            }
        }

        if let Some(raw) = lookup(DEFAULT_BIN_ID_ENV) {
            match BinId::new(raw.trim()) {
                Ok(id) => config.default_bin_id = id,
                Err(_) => warn_invalid(DEFAULT_BIN_ID_ENV, &raw, DEFAULT_BIN_ID),
            }
        }

        if let Some(raw) = lookup(DEFAULT_BIN_CAPACITY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(capacity) if capacity > 0 => config.default_bin_capacity = capacity,
                _ => warn_invalid(DEFAULT_BIN_CAPACITY_ENV, &raw, DEFAULT_BIN_CAPACITY),
            }
        }

        if let Some(raw) = lookup(CORS_ORIGIN_ENV) {
            match HeaderValue::from_str(raw.trim()) {
                Ok(origin) => config.cors_origin = origin,
                Err(_) => warn_invalid(CORS_ORIGIN_ENV, &raw, DEFAULT_CORS_ORIGIN),
            }
        }

        config
    }
}

fn warn_invalid(key: &str, value: &str, default: impl Display) {
    tracing::warn!(key, value, %default, "invalid configuration value; using default");
}
