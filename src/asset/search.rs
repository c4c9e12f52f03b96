//! Asset Search
//!
//! Fetches search results from the Cloud Asset API `searchAllResources`
//! method, following `nextPageToken` until the result set is exhausted.

use super::record::{RawAsset, ResourceRecord};
use crate::gcp::client::GcpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Largest page the API accepts
pub const MAX_PAGE_SIZE: u32 = 500;

/// Asset type whose search results can repeat per (project, name)
pub const DEDUP_ASSET_TYPE: &str = "bigquery.googleapis.com/Dataset";

/// One search request: scope plus asset type filter
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub scope: String,
    pub asset_types: Vec<String>,
    pub page_size: u32,
}

impl SearchRequest {
    pub fn new(scope: &str, asset_types: &[&str]) -> Self {
        Self {
            scope: scope.to_string(),
            asset_types: asset_types.iter().map(|t| t.to_string()).collect(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    fn query(&self, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = self
            .asset_types
            .iter()
            .map(|t| ("assetTypes", t.clone()))
            .collect();
        query.push(("pageSize", self.page_size.to_string()));
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        query
    }
}

/// Result of one page fetch
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<String>,
}

/// Fetch one page of raw search results
pub async fn search_page(
    client: &GcpClient,
    request: &SearchRequest,
    page_token: Option<&str>,
) -> Result<PaginatedResult> {
    let url = client.search_all_resources_url(&request.scope);
    let response = client
        .get(&url, &request.query(page_token))
        .await
        .with_context(|| format!("searchAllResources failed for {}", request.scope))?;

    let items = response
        .get("results")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let next_token = response
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(PaginatedResult { items, next_token })
}

/// Fetch all pages and convert each result into a `RawAsset`.
/// Results that do not match the record shape are skipped.
pub async fn search_all(client: &GcpClient, request: &SearchRequest) -> Result<Vec<RawAsset>> {
    let mut assets = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let result = search_page(client, request, page_token.as_deref()).await?;
        pages += 1;

        for item in result.items {
            match serde_json::from_value::<RawAsset>(item) {
                Ok(asset) => assets.push(asset),
                Err(e) => tracing::warn!("Skipping malformed search result: {}", e),
            }
        }

        if result.next_token.is_none() {
            break;
        }
        page_token = result.next_token;
    }

    tracing::debug!(
        "Fetched {} assets in {} page(s) from {}",
        assets.len(),
        pages,
        request.scope
    );

    Ok(assets)
}

/// Fetch only the first raw result, untouched, for `--debug`
pub async fn first_raw_result(client: &GcpClient, request: &SearchRequest) -> Result<Option<Value>> {
    let request = request.clone().with_page_size(1);
    let result = search_page(client, &request, None).await?;
    Ok(result.items.into_iter().next())
}

/// Fetch flat resources of the requested types, deduplicated
pub async fn search_resources(
    client: &GcpClient,
    request: &SearchRequest,
) -> Result<Vec<ResourceRecord>> {
    let assets = search_all(client, request).await?;
    Ok(dedup_resources(assets))
}

/// Drop repeated BigQuery datasets sharing (project, name); keep first occurrence.
/// Other asset types are kept as-is.
pub fn dedup_resources(assets: Vec<RawAsset>) -> Vec<ResourceRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut records = Vec::with_capacity(assets.len());

    for asset in assets {
        if asset.asset_type == DEDUP_ASSET_TYPE
            && !seen.insert((asset.project.clone(), asset.name.clone()))
        {
            tracing::debug!("Dropping duplicate dataset {}", asset.name);
            continue;
        }
        records.push(ResourceRecord::from(asset));
    }

    records
}
