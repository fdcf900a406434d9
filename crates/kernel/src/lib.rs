//! Canopy content tree kernel.
//!
//! Tree node providers for a CMS admin UI, the content item query layer
//! behind them, and the HTTP routes that expose both. The `canopy` binary
//! runs the admin server.

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod permissions;
pub mod query;
pub mod request;
pub mod routes;
pub mod state;
pub mod tree;
