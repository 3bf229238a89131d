//! Reachability checks for URLs.

use url::Url;

/// Checks whether a URL can be reached.
pub trait UrlProber {
    /// Probe `url`, returning a description of the failure if it is not reachable.
    fn probe(&self, url: &Url) -> Result<(), String>;
}

/// A prober that treats every URL as reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProber;

impl UrlProber for OfflineProber {
    fn probe(&self, _url: &Url) -> Result<(), String> {
        Ok(())
    }
}

/// Probes URLs with an HTTP `HEAD` request, following redirects.
#[cfg(feature = "http")]
pub struct HttpProber {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpProber {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

    /// Create a prober with the given request timeout.
    pub fn new(timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("debian-control-lint/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl UrlProber for HttpProber {
    fn probe(&self, url: &Url) -> Result<(), String> {
        log::debug!("Probing {}", url);
        match url.scheme() {
            "http" | "https" => {}
            // Only HTTP can be probed; other schemes are assumed reachable.
            _ => return Ok(()),
        }
        let response = self
            .client
            .head(url.as_str())
            .send()
            .map_err(|e| e.to_string())?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("HTTP {}", status))
        }
    }
}
