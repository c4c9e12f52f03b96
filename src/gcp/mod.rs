//! GCP API interaction module
//!
//! This module provides the plumbing for talking to the Cloud Asset
//! Inventory API: authentication and the HTTP client.
//!
//! # Module Structure
//!
//! - [`auth`] - GCP authentication using Application Default Credentials
//! - [`client`] - Main GCP client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use gcpassets::gcp::client::{GcpClient, DEFAULT_ASSET_ENDPOINT};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GcpClient::new(DEFAULT_ASSET_ENDPOINT).await?;
//!     let url = client.search_all_resources_url("organizations/123");
//!     let page = client.get(&url, &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
