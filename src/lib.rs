//! # Sitekit API Library
//!
//! This library provides the core functionality for the Sitekit content and
//! marketing-site API, including handlers, models, and server configuration.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod runtime_config;
pub mod seeds;
pub mod server;
pub mod sitemap;
pub mod storage;
pub mod telemetry;
pub use migration;
