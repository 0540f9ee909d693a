//! hawiyat-meta library
//!
//! Fetches the Dokploy template catalogue, rebrands it for Hawiyat, keeps it in
//! a time-limited in-memory cache and saves it as JSON. The modules are exposed
//! for the binary and for integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod persist;
pub mod run;
pub mod transform;
