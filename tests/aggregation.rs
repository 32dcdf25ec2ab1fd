mod common;

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use common::{FakeGithub, repo};
use profile_card::aggregate::{aggregate, commit_cutoff, tally_commits};
use profile_card::{LanguageShare, Origin, ProfileStatsService};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn sample_github() -> FakeGithub {
    let recent = now() - Duration::days(3);
    FakeGithub::with_repos(vec![
        repo("a1", Some("A"), 4),
        repo("a2", Some("A"), 0),
        repo("b1", Some("B"), 1),
        repo("a3", Some("A"), 0),
        repo("b2", Some("B"), 2),
        repo("c1", Some("C"), 0),
        repo("notes", None, 10),
    ])
    .commits_for("a1", vec![recent, recent])
    .commits_for("a2", vec![recent])
    .commits_for("b1", vec![])
    .commits_for("a3", vec![recent])
    .commits_for("b2", vec![recent, recent, recent])
    // outside the active set, never counted
    .commits_for("c1", vec![recent; 9])
}

#[tokio::test]
async fn aggregates_languages_stars_and_commits() {
    let github = sample_github();
    let stats = aggregate(&github, "alice", 5, now()).await.unwrap();

    assert_eq!(
        stats.top_languages,
        vec![
            LanguageShare::new("A", 43),
            LanguageShare::new("B", 29),
            LanguageShare::new("C", 14),
        ]
    );
    assert_eq!(stats.total_stars, 17);
    assert_eq!(stats.recent_commits, 7);
    assert_eq!(stats.last_updated, now());
    assert_eq!(github.commit_calls(), ["a1", "a2", "b1", "a3", "b2"]);
}

#[tokio::test]
async fn aggregation_is_deterministic() {
    let github = sample_github();
    let first = aggregate(&github, "alice", 5, now()).await.unwrap();
    let second = aggregate(&github, "alice", 5, now() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(first.top_languages, second.top_languages);
    assert_eq!(first.total_stars, second.total_stars);
    assert_eq!(first.recent_commits, second.recent_commits);
}

#[tokio::test]
async fn failed_commit_fetch_is_skipped() {
    let recent = now() - Duration::days(1);
    let github = FakeGithub::with_repos(vec![
        repo("ok", Some("Rust"), 0),
        repo("gone", Some("Rust"), 0),
        repo("also-ok", Some("Go"), 0),
    ])
    .commits_for("ok", vec![recent, recent])
    .commits_for("also-ok", vec![recent]);

    let tally = tally_commits(&github, "alice", &github.repos, 5, commit_cutoff(now())).await;
    assert_eq!(tally.total, 3);
    assert_eq!(tally.skipped, ["gone"]);

    let stats = aggregate(&github, "alice", 5, now()).await.unwrap();
    assert_eq!(stats.recent_commits, 3);
}

#[tokio::test]
async fn commits_before_cutoff_are_excluded() {
    let cutoff = commit_cutoff(now());
    let github = FakeGithub::with_repos(vec![repo("r", None, 0)]).commits_for(
        "r",
        vec![cutoff, cutoff - Duration::seconds(1), now()],
    );

    let stats = aggregate(&github, "alice", 5, now()).await.unwrap();
    assert_eq!(stats.recent_commits, 2);
}

#[tokio::test]
async fn stars_only_profile() {
    let github = FakeGithub::with_repos(vec![
        repo("x", None, 0),
        repo("y", None, 5),
        repo("z", None, 12),
    ]);
    let stats = aggregate(&github, "alice", 5, now()).await.unwrap();
    assert_eq!(stats.total_stars, 17);
    assert!(stats.top_languages.is_empty());
    // every commit fetch 404s
    assert_eq!(stats.recent_commits, 0);
}

#[tokio::test]
async fn listing_failure_is_an_error() {
    let github = FakeGithub::failing_listing(404);
    let err = aggregate(&github, "ghost", 5, now()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(github.commit_calls().is_empty());
}

#[tokio::test]
async fn cached_within_ttl_refetched_after() {
    let github = Arc::new(sample_github());
    let service = ProfileStatsService::new(github.clone(), Duration::hours(24));

    let first = service
        .stats_for_at("alice", Origin::Remote, now())
        .await
        .unwrap();
    assert_eq!(github.listing_calls(), 1);

    let again = service
        .stats_for_at("alice", Origin::Remote, now() + Duration::hours(23))
        .await
        .unwrap();
    assert_eq!(github.listing_calls(), 1);
    assert_eq!(again, first);

    let later = now() + Duration::hours(24);
    let refreshed = service
        .stats_for_at("alice", Origin::Remote, later)
        .await
        .unwrap();
    assert_eq!(github.listing_calls(), 2);
    assert_eq!(refreshed.last_updated, later);

    service
        .stats_for_at("alice", Origin::Remote, later + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(github.listing_calls(), 2);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let github = Arc::new(FakeGithub::failing_listing(500));
    let service = ProfileStatsService::new(github.clone(), Duration::hours(24));

    assert!(service.stats_for_at("alice", Origin::Remote, now()).await.is_err());
    assert!(service.stats_for_at("alice", Origin::Remote, now()).await.is_err());
    assert_eq!(github.listing_calls(), 2);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn local_origin_uses_sample_without_fetching() {
    let github = Arc::new(sample_github());
    let service = ProfileStatsService::new(github.clone(), Duration::hours(24));

    let stats = service
        .stats_for_at("alice", Origin::Local, now())
        .await
        .unwrap();
    assert_eq!(stats.total_stars, 1337);
    assert_eq!(stats.recent_commits, 42);
    assert_eq!(github.listing_calls(), 0);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn active_repo_count_is_configurable() {
    let github = Arc::new(sample_github());
    let service =
        ProfileStatsService::new(github.clone(), Duration::hours(24)).with_active_repos(2);

    let stats = service
        .stats_for_at("alice", Origin::Remote, now())
        .await
        .unwrap();
    assert_eq!(stats.recent_commits, 3);
    assert_eq!(github.commit_calls(), ["a1", "a2"]);
}

#[tokio::test]
async fn ttl_past_the_calendar_pins_expiry_at_max() {
    let github = Arc::new(sample_github());
    let ttl = Duration::try_seconds(1_000_000_000_000_000).unwrap();
    let service = ProfileStatsService::new(github.clone(), ttl);

    service
        .stats_for_at("alice", Origin::Remote, now())
        .await
        .unwrap();
    service
        .stats_for_at("alice", Origin::Remote, now() + Duration::days(3650))
        .await
        .unwrap();
    assert_eq!(github.listing_calls(), 1);
}
