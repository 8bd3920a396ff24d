//! HTTP API: server, routing, and request/response mapping for the warehouse.

pub mod app;
pub mod config;
pub mod middleware;
