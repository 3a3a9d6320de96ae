use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::error::{PosyError, Result};
use crate::core::mood::MoodType;

pub const DEFAULT_AFFIRMATION_URL: &str = "http://127.0.0.1:3000/api/affirmation";

/// Used when the request never produced a usable response.
pub const REQUEST_FAILED_FALLBACK: &str =
    "Soft moss gathers where you rest; your growth is quiet, steady, and true.";

/// Used when the service answered but left the affirmation empty.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "The earth remembers your strength even when the frost feels permanent.";

#[derive(Debug, Serialize)]
pub struct AffirmationRequest<'a> {
    pub mood: MoodType,
    pub note: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AffirmationResponse {
    #[serde(default)]
    pub affirmation: Option<String>,
}

/// The text to show for a check-in, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affirmation {
    Received(String),
    Fallback(&'static str),
}

impl Affirmation {
    pub fn text(&self) -> &str {
        match self {
            Affirmation::Received(text) => text,
            Affirmation::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Affirmation::Fallback(_))
    }
}

pub struct AffirmationClient {
    url: String,
    client: Client,
}

impl AffirmationClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        // Building only fails if the TLS backend cannot initialise; a plain client
        // still sends requests and any failure lands on the fallback path.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build HTTP client with timeout, using defaults");
                Client::new()
            });
        Self::with_client(url, client)
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self { url: url.into(), client }
    }

    /// Ask the service for an affirmation. Never fails: every error becomes a fallback.
    pub async fn affirm(&self, mood: MoodType, note: &str) -> Affirmation {
        match self.request(mood, note).await {
            Ok(Some(text)) => Affirmation::Received(text),
            Ok(None) => {
                debug!(url = %self.url, "affirmation response was empty");
                Affirmation::Fallback(EMPTY_RESPONSE_FALLBACK)
            }
            Err(e) => {
                warn!(error = %e, url = %self.url, "affirmation request failed");
                Affirmation::Fallback(REQUEST_FAILED_FALLBACK)
            }
        }
    }

    /// The raw call. `Ok(None)` means the service answered without any text.
    pub async fn request(&self, mood: MoodType, note: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(&self.url)
            .json(&AffirmationRequest { mood, note })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PosyError::Status(response.status()));
        }

        let body: AffirmationResponse = response.json().await?;
        Ok(body.affirmation.filter(|text| !text.is_empty()))
    }
}
