//! Reduces a user's repositories and recent commits to the numbers on the card.

use chrono::{DateTime, Months, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::StatsResult;
use crate::github::ProfileSource;
use crate::stats::{CommitRecord, LanguageShare, ProfileStats, RepositorySummary};

pub const TOP_LANGUAGE_COUNT: usize = 3;
pub const DEFAULT_ACTIVE_REPOS: usize = 5;

/// Commit counts folded across the active repositories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitTally {
    pub total: u64,
    /// Repositories whose commit history could not be fetched
    pub skipped: Vec<String>,
}

/// One calendar month before `now`, clamped to the end of a shorter month.
pub fn commit_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(1)).unwrap_or(now)
}

/// Commits authored at or after `cutoff`. Records without an author date are
/// counted, the upstream `since` filter having already admitted them.
pub fn count_recent(commits: &[CommitRecord], cutoff: DateTime<Utc>) -> u64 {
    commits
        .iter()
        .filter(|c| c.authored_at().is_none_or(|at| at >= cutoff))
        .count() as u64
}

/// Top languages by repository count, as a rounded share of all repositories
/// (including those without a language). Equal counts rank alphabetically.
pub fn top_languages(repos: &[RepositorySummary]) -> Vec<LanguageShare> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for repo in repos {
        if let Some(lang) = repo.language.as_deref() {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = repos.len() as u64;
    ranked
        .into_iter()
        .take(TOP_LANGUAGE_COUNT)
        .map(|(name, count)| LanguageShare::new(name, rounded_percent(count, total)))
        .collect()
}

/// `round(100 * part / whole)` with halves rounded up.
fn rounded_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (200 * part + whole) / (2 * whole);
    pct.min(100) as u8
}

pub fn total_stars(repos: &[RepositorySummary]) -> u64 {
    repos
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.stargazers_count))
}

/// Sums recent commits over the first `active` repositories, one request at a
/// time. A failed fetch contributes nothing and is recorded in `skipped`.
pub async fn tally_commits(
    source: &dyn ProfileSource,
    username: &str,
    repos: &[RepositorySummary],
    active: usize,
    cutoff: DateTime<Utc>,
) -> CommitTally {
    let mut tally = CommitTally::default();

    for repo in repos.iter().take(active) {
        match source.list_commits(username, &repo.name, cutoff).await {
            Ok(commits) => {
                tally.total = tally.total.saturating_add(count_recent(&commits, cutoff));
            }
            Err(e) => {
                // don't fail the card for one repo
                warn!(user = username, repo = %repo.name, "Skipping commit history: {e}");
                tally.skipped.push(repo.name.clone());
            }
        }
    }

    tally
}

/// Fetches and reduces a user's profile as of `now`. Only a failed repository
/// listing is an error; commit history failures degrade to a lower count.
pub async fn aggregate(
    source: &dyn ProfileSource,
    username: &str,
    active: usize,
    now: DateTime<Utc>,
) -> StatsResult<ProfileStats> {
    let repos = source.list_repositories(username).await?;

    let cutoff = commit_cutoff(now);
    let tally = tally_commits(source, username, &repos, active, cutoff).await;

    let stats = ProfileStats {
        top_languages: top_languages(&repos),
        total_stars: total_stars(&repos),
        recent_commits: tally.total,
        last_updated: now,
    };

    debug!(
        user = username,
        repos = repos.len(),
        stars = stats.total_stars,
        commits = stats.recent_commits,
        skipped = ?tally.skipped,
        "Aggregated profile"
    );

    Ok(stats)
}
