#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use profile_card::errors::StatsResult;
use profile_card::stats::{CommitRecord, RepositorySummary};
use profile_card::{ProfileSource, UpstreamError};

/// In-memory GitHub that counts the calls made against it.
#[derive(Default)]
pub struct FakeGithub {
    pub repos: Vec<RepositorySummary>,
    /// Commit author dates per repository; a missing entry answers 404
    pub commits: HashMap<String, Vec<DateTime<Utc>>>,
    pub listing_status: Option<u16>,
    pub listing_calls: AtomicUsize,
    pub commit_calls: Mutex<Vec<String>>,
}

impl FakeGithub {
    pub fn with_repos(repos: Vec<RepositorySummary>) -> Self {
        Self {
            repos,
            ..Self::default()
        }
    }

    pub fn failing_listing(status: u16) -> Self {
        Self {
            listing_status: Some(status),
            ..Self::default()
        }
    }

    pub fn commits_for(mut self, repo: &str, dates: Vec<DateTime<Utc>>) -> Self {
        self.commits.insert(repo.to_string(), dates);
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> Vec<String> {
        self.commit_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSource for FakeGithub {
    async fn list_repositories(&self, username: &str) -> StatsResult<Vec<RepositorySummary>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        match self.listing_status {
            Some(status) => Err(UpstreamError::Status {
                url: format!("fake://users/{username}/repos"),
                status,
            }),
            None => Ok(self.repos.clone()),
        }
    }

    async fn list_commits(
        &self,
        username: &str,
        repo: &str,
        _since: DateTime<Utc>,
    ) -> StatsResult<Vec<CommitRecord>> {
        self.commit_calls.lock().unwrap().push(repo.to_string());
        let dates = self.commits.get(repo).ok_or_else(|| UpstreamError::Status {
            url: format!("fake://repos/{username}/{repo}/commits"),
            status: 404,
        })?;
        Ok(dates.iter().map(|d| commit_at(*d)).collect())
    }
}

pub fn repo(name: &str, language: Option<&str>, stars: u64) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        language: language.map(str::to_string),
        stargazers_count: stars,
    }
}

pub fn commit_at(date: DateTime<Utc>) -> CommitRecord {
    serde_json::from_value(serde_json::json!({
        "sha": "0000000",
        "commit": { "author": { "name": "someone", "date": date.to_rfc3339() } }
    }))
    .unwrap()
}
