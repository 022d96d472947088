//! Jellyfin library client.
//!
//! Enumerates the movie library and surfaces the TMDB ID embedded in each
//! item's path, plus a connectivity probe used at startup.

use crate::availability::{HttpClient, Result, TmdbId, tmdb_id_from_path};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MOVIE_FETCH_LIMIT: &str = "1000";

/// Public system information reported by a Jellyfin server
#[derive(Debug, Clone, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "ServerName", default)]
    pub server_name: String,
    #[serde(rename = "LocalAddress", default)]
    pub local_address: String,
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(rename = "Items", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Path", default)]
    path: Option<String>,
}

/// One movie from the library, with the TMDB ID extracted from its path
/// when the path carries the bracket tag.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryMovie {
    pub name: String,
    pub path: Option<String>,
    pub tmdb_id: Option<TmdbId>,
}

/// Client for the Jellyfin items API
pub struct JellyfinClient {
    client: HttpClient,
    api_key: String,
}

impl JellyfinClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(base_url, timeout),
            api_key: api_key.into(),
        }
    }

    /// Fetch public system information; used as a connectivity test.
    pub async fn system_info(&self) -> Result<SystemInfo> {
        self.client
            .get_with_params("/System/Info/Public", &[("api_key", self.api_key.as_str())])
            .await
    }

    /// Enumerate movies in the library with their extracted TMDB IDs.
    pub async fn movies(&self) -> Result<Vec<LibraryMovie>> {
        let params = [
            ("api_key", self.api_key.as_str()),
            ("Type", "Movie"),
            ("ExcludeItemTypes", "Folder, Episode, Season, Series"),
            ("Fields", "Path"),
            ("MediaTypes", "Video"),
            ("IsFolder", "false"),
            ("Recursive", "true"),
            ("Limit", MOVIE_FETCH_LIMIT),
        ];

        let response: ItemsResponse = self.client.get_with_params("/Items", &params).await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| {
                let tmdb_id = item.path.as_deref().and_then(tmdb_id_from_path);
                LibraryMovie {
                    name: item.name,
                    path: item.path,
                    tmdb_id,
                }
            })
            .collect())
    }
}
