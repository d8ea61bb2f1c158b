//! Release existence check
//!
//! - **slug**: `owner/name` repository identifiers, parsed from flags or remote URLs
//! - **check**: `TagSource` seam and the released/unreleased decision
//! - **github**: `TagSource` backed by the GitHub git matching-refs API

pub mod check;
pub mod github;
pub mod slug;

pub use check::{ReleaseDecision, TagRef, TagSource, check_release};
pub use github::GitHubTags;
pub use slug::RepoSlug;
