use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One ranked entry of the language bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: u8,
}

impl LanguageShare {
    pub fn new(name: impl Into<String>, percentage: u8) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Aggregated profile numbers shown on the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    /// At most three entries, most used first.
    pub top_languages: Vec<LanguageShare>,
    pub total_stars: u64,
    pub recent_commits: u64,
    pub last_updated: DateTime<Utc>,
}

impl ProfileStats {
    /// Canned numbers served to local requests so development never hits the API.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            top_languages: vec![
                LanguageShare::new("TypeScript", 35),
                LanguageShare::new("JavaScript", 28),
                LanguageShare::new("Python", 20),
            ],
            total_stars: 1337,
            recent_commits: 42,
            last_updated: now,
        }
    }
}

/// A repository as returned by the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// A commit from the history endpoint. Only the author date is read.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    #[serde(default)]
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    /// ISO 8601 as sent by the API, parsed by `CommitRecord::authored_at`
    #[serde(default)]
    pub date: Option<String>,
}

impl CommitRecord {
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        self.commit
            .as_ref()
            .and_then(|c| c.author.as_ref())
            .and_then(|a| a.date.as_deref())
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc))
    }
}
