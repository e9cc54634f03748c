//! Best-effort fetch of the author's avatar.

use airpulse_common::{DashboardError, Result};
use airpulse_config::AvatarConfig;
use airpulse_graphs::reencode_as_png;
use airpulse_i18n::Localizer;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Fetches image bytes from a URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Downloads `url`, failing on connection errors, timeouts and non-2xx
    /// statuses.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// [`ImageFetcher`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with its own connection pool.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("airpulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}

/// What the avatar section shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvatarOutcome {
    /// The section is switched off.
    Disabled,
    /// The image with its caption.
    Image {
        /// The served image, re-encoded as PNG.
        #[serde(skip)]
        bytes: Vec<u8>,
        /// Caption under the image.
        caption: String,
    },
    /// The fetch failed; the message carries the cause.
    Warning {
        /// Localised message.
        message: String,
    },
}

/// Fetches the avatar once and converts it to PNG. Every failure,
/// including a body that is not a readable image, becomes a warning.
pub async fn load_avatar(
    fetcher: &dyn ImageFetcher,
    config: &AvatarConfig,
    localizer: &Localizer,
) -> AvatarOutcome {
    if !config.enabled {
        return AvatarOutcome::Disabled;
    }
    let timeout = Duration::from_secs(config.timeout_seconds.max(1));
    let fetched = fetcher
        .fetch(&config.url, timeout)
        .await
        .and_then(|served| reencode_as_png(&served));
    match fetched {
        Ok(bytes) => {
            info!(url = %config.url, bytes = bytes.len(), "Loaded avatar");
            AvatarOutcome::Image {
                bytes,
                caption: config.caption.clone(),
            }
        }
        Err(e) => {
            let cause = error_chain(&e);
            warn!(url = %config.url, error = %cause, "Failed to load avatar");
            AvatarOutcome::Warning {
                message: localizer.image_warning(&cause),
            }
        }
    }
}

/// The error and its sources joined with `: `.
pub fn error_chain(error: &DashboardError) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        let part = inner.to_string();
        if !text.contains(&part) {
            text.push_str(": ");
            text.push_str(&part);
        }
        source = inner.source();
    }
    text
}
