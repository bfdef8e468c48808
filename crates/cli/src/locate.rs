// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approximate location lookup for controllers with no configured location.
//!
//! The endpoint answers with an ipinfo.io-style body whose `loc` field is
//! `"<latitude>,<longitude>"`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("location request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unusable location {0:?}")]
    BadLocation(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct IpInfo {
    loc: String,
}

/// Parse `"<latitude>,<longitude>"`, rejecting values off the globe.
pub fn parse_loc(text: &str) -> Result<Coordinates, LocateError> {
    let bad = || LocateError::BadLocation(text.to_string());
    let (lat, lon) = text.split_once(',').ok_or_else(bad)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| bad())?;
    let longitude: f64 = lon.trim().parse().map_err(|_| bad())?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(bad());
    }
    Ok(Coordinates { latitude, longitude })
}

/// Looks the location up once and remembers the first answer.
///
/// Failed lookups are not cached; the next [`locate`](Self::locate) tries
/// again.
#[derive(Debug)]
pub struct Locator {
    http: reqwest::Client,
    url: String,
    cached: Option<Coordinates>,
}

impl Locator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LocateError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, url))
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into(), cached: None }
    }

    pub fn cached(&self) -> Option<Coordinates> {
        self.cached
    }

    /// One request to the endpoint, bypassing the cache.
    pub async fn lookup(&self) -> Result<Coordinates, LocateError> {
        let info: IpInfo =
            self.http.get(&self.url).send().await?.error_for_status()?.json().await?;
        parse_loc(&info.loc)
    }

    /// Cached coordinates, or a fresh lookup. `None` when the lookup fails.
    pub async fn locate(&mut self) -> Option<Coordinates> {
        if let Some(coords) = self.cached {
            return Some(coords);
        }
        match self.lookup().await {
            Ok(coords) => {
                let (latitude, longitude) = (coords.latitude, coords.longitude);
                debug!(latitude, longitude, "location detected");
                self.cached = Some(coords);
                Some(coords)
            }
            Err(e) => {
                warn!(error = %e, url = %self.url, "cannot detect location");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
