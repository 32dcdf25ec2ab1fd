//! Error types shared by the GitHub client, the aggregator and the web layer.

use thiserror::Error;

pub type StatsResult<T> = std::result::Result<T, UpstreamError>;

/// A GitHub REST call that did not produce usable data.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, DNS or timeout failure before a response arrived
    #[error("Network error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status
    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON shape we expect
    #[error("Failed to parse JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_names_url() {
        let err = UpstreamError::Status {
            url: "https://api.github.com/users/ghost/repos".into(),
            status: 404,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "GitHub API returned HTTP 404 for https://api.github.com/users/ghost/repos"
        );
    }
}
