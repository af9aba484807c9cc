//! Profile listing for the profile selector; not part of the paging engine

use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::models::Profile;
use crate::source::{get_json, join_url};

pub struct ProfileDirectory {
    client: reqwest::Client,
    api_base_url: String,
}

impl ProfileDirectory {
    pub fn new(client: reqwest::Client, api_base_url: String) -> Self {
        Self {
            client,
            api_base_url,
        }
    }

    pub fn from_config(config: &FeedConfig) -> FeedResult<Self> {
        Ok(Self::new(config.http_client()?, config.api_base_url.clone()))
    }

    /// `GET /api/profiles`
    pub async fn list(&self) -> FeedResult<Vec<Profile>> {
        let url = join_url(&self.api_base_url, "api/profiles");
        let profiles: Vec<Profile> = get_json(self.client.get(&url)).await?;
        log::info!("Loaded {} profiles", profiles.len());
        Ok(profiles)
    }
}

/// Profiles whose instagram id contains `term`, ignoring case
pub fn search_profiles<'a>(profiles: &'a [Profile], term: &str) -> Vec<&'a Profile> {
    let term = term.trim().to_lowercase();
    profiles
        .iter()
        .filter(|profile| profile.instagram_id.to_lowercase().contains(&term))
        .collect()
}
