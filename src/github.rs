use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::config::GithubConfig;
use crate::errors::{StatsResult, UpstreamError};
use crate::stats::{CommitRecord, RepositorySummary};

/// Where profile data comes from. `GithubClient` is the production source.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Repositories owned by `username`, most recently updated first.
    async fn list_repositories(&self, username: &str) -> StatsResult<Vec<RepositorySummary>>;

    /// Commits in `repo` authored by `username` since `since` (inclusive).
    async fn list_commits(
        &self,
        username: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> StatsResult<Vec<CommitRecord>>;
}

#[derive(Clone)]
pub struct GithubClient {
    base: Arc<Url>,
    http: Arc<Client>,
    repo_limit: u32,
    commit_limit: u32,
}

impl GithubClient {
    /// Unauthenticated REST client for the public API.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid GitHub API base URL: {}", config.api_base_url))?;
        if base.cannot_be_a_base() {
            bail!("GitHub API base URL cannot carry a path: {}", base);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base: Arc::new(base),
            http: Arc::new(http),
            repo_limit: config.repo_limit,
            commit_limit: config.commit_limit,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = (*self.base).clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document, mapping every failure to an `UpstreamError`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> StatsResult<T> {
        debug!(%url, "GitHub request");

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ProfileSource for GithubClient {
    async fn list_repositories(&self, username: &str) -> StatsResult<Vec<RepositorySummary>> {
        let mut url = self.endpoint(&["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.repo_limit.to_string())
            .append_pair("sort", "updated");

        self.get_json(url).await
    }

    async fn list_commits(
        &self,
        username: &str,
        repo: &str,
        since: DateTime<Utc>,
    ) -> StatsResult<Vec<CommitRecord>> {
        let mut url = self.endpoint(&["repos", username, repo, "commits"]);
        url.query_pairs_mut()
            .append_pair("author", username)
            .append_pair("since", &since.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("per_page", &self.commit_limit.to_string());

        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GithubClient {
        GithubClient::new(&GithubConfig {
            api_base_url: base.to_string(),
            ..GithubConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let c = client("https://api.github.com");
        assert_eq!(
            c.endpoint(&["users", "octocat", "repos"]).as_str(),
            "https://api.github.com/users/octocat/repos"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let c = client("http://ghe.example.com/api/v3/");
        assert_eq!(
            c.endpoint(&["repos", "octocat", "hello-world", "commits"]).as_str(),
            "http://ghe.example.com/api/v3/repos/octocat/hello-world/commits"
        );
    }

    #[test]
    fn endpoint_escapes_path_characters() {
        let c = client("https://api.github.com");
        assert_eq!(
            c.endpoint(&["users", "a/b?c", "repos"]).as_str(),
            "https://api.github.com/users/a%2Fb%3Fc/repos"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let config = GithubConfig {
            api_base_url: "mailto:someone@example.com".to_string(),
            ..GithubConfig::default()
        };
        assert!(GithubClient::new(&config).is_err());

        let config = GithubConfig {
            api_base_url: "not a url".to_string(),
            ..GithubConfig::default()
        };
        assert!(GithubClient::new(&config).is_err());
    }
}
