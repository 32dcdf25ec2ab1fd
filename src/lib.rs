pub mod aggregate;
pub mod cache;
pub mod config;
pub mod errors;
pub mod github;
pub mod icons;
pub mod service;
pub mod stats;
pub mod svg;
pub mod web;

pub use errors::UpstreamError;
pub use github::{GithubClient, ProfileSource};
pub use service::{Origin, ProfileStatsService};
pub use stats::{LanguageShare, ProfileStats};
