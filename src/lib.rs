//! Optimist Trader
//!
//! Daily moving-average signals for a fixed equity universe, served as an HTML table.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod render;
pub mod services;
pub mod signals;
