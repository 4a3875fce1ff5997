//! GitHub contents API client - the CMS persistence layer

mod client;
mod types;

pub use client::{GithubClient, GithubError};
pub use types::{DirEntry, EntryKind, RepoFile};
