//! Wire types for the GitHub REST API

use serde::{Deserialize, Serialize};

/// Kind of a directory entry returned by the contents API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A decoded file from the content repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    /// Repository path as reported by GitHub
    pub path: String,
    /// Blob SHA, required to update the file
    pub sha: String,
    /// UTF-8 file content
    pub content: String,
}

/// File object of a contents response (content is base64)
#[derive(Debug, Deserialize)]
pub(crate) struct FileObject {
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A contents response is either a directory listing or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Dir(Vec<DirEntry>),
    File(FileObject),
}

/// Request body for create-or-update file contents
#[derive(Debug, Serialize)]
pub(crate) struct PutFileRequest<'a> {
    pub message: &'a str,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub committer: Option<Signature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Signature {
    pub date: Option<String>,
}
