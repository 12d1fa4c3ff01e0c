//! Authenticated remote content-tree client
//!
//! Wraps the GitHub contents API behind the [`RemoteTree`] trait: list a
//! directory at a named branch, read one file at a named branch, verify the
//! credential against the repository endpoint. Each operation is a single
//! blocking request/response exchange with a bounded timeout and no
//! automatic retry; failure isolation is the caller's responsibility.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::auth::Credential;
use crate::{Error, Result};

/// Default base URL of the remote API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Bounded wait for any single remote call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum length of the response-body snippet carried in errors.
const DETAIL_LIMIT: usize = 200;

/// Kind of an entry returned by a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Anything else the remote reports (symlink, submodule). The engine
    /// counts these as skipped.
    Other(String),
}

/// One item of a remote directory listing. Transient: produced and consumed
/// within a single traversal step.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Name unique within the parent listing.
    pub name: String,
    /// Full path from the repository root.
    pub path: String,
    pub kind: EntryKind,
}

/// A remote file payload, transport encoding already decoded.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// Read-only view of a remote content tree at a fixed branch.
pub trait RemoteTree {
    /// Verify that the remote is reachable and the credential is accepted.
    /// Called once at startup; a rejected credential aborts the run.
    fn verify(&self) -> Result<()>;

    /// List the entries of one remote directory.
    fn list_dir(&self, path: &str) -> Result<Vec<TreeEntry>>;

    /// Fetch one remote file, decoding any transport encoding.
    fn fetch_file(&self, path: &str) -> Result<FileContent>;
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FileBody {
    path: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// Blocking client for the GitHub contents API.
pub struct GithubClient {
    http: reqwest::blocking::Client,
    base_url: String,
    owner: String,
    repo: String,
    branch: String,
    credential: Credential,
}

impl GithubClient {
    /// Build a client for one `owner/repo` at one branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        credential: Credential,
    ) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE, owner, repo, branch, credential)
    }

    /// Build a client against a non-default API base URL. Used by tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        credential: Credential,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("mirrorkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            credential,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.base_url, self.owner, self.repo, path, self.branch
        )
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.base_url, self.owner, self.repo)
    }

    /// Perform one authenticated GET and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.credential.as_str())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .map_err(|e| Error::Transport {
                path: path.to_string(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| Error::Transport {
            path: path.to_string(),
            source: e,
        })?;

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::AuthRejected {
                status: status.as_u16(),
                detail: snippet(&body),
            });
        }
        if !status.is_success() {
            return Err(Error::RemoteUnavailable {
                path: path.to_string(),
                status: status.as_u16(),
                detail: snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode {
            path: path.to_string(),
            detail: e.to_string(),
        })
    }
}

impl RemoteTree for GithubClient {
    fn verify(&self) -> Result<()> {
        let url = self.repo_url();
        let _: serde_json::Value = self.get_json(&format!("{}/{}", self.owner, self.repo), &url)?;
        tracing::debug!(owner = %self.owner, repo = %self.repo, "authentication verified");
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<TreeEntry>> {
        let url = self.contents_url(path);
        let items: Vec<ContentItem> = self.get_json(path, &url)?;

        Ok(items
            .into_iter()
            .map(|item| TreeEntry {
                kind: parse_kind(&item.kind),
                name: item.name,
                path: item.path,
            })
            .collect())
    }

    fn fetch_file(&self, path: &str) -> Result<FileContent> {
        let url = self.contents_url(path);
        let body: FileBody = self.get_json(path, &url)?;
        decode_file_body(body)
    }
}

fn parse_kind(raw: &str) -> EntryKind {
    match raw {
        "file" => EntryKind::File,
        "dir" => EntryKind::Dir,
        other => EntryKind::Other(other.to_string()),
    }
}

/// Truncate a response body for inclusion in an error payload.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= DETAIL_LIMIT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(DETAIL_LIMIT).collect();
        format!("{}…", cut)
    }
}

/// Decode the transport encoding of a fetched file body.
///
/// The contents API delivers file bytes base64-encoded with embedded
/// newlines; those are stripped before decoding.
fn decode_file_body(body: FileBody) -> Result<FileContent> {
    let content = body.content.unwrap_or_default();

    let bytes = match body.encoding.as_deref() {
        Some("base64") => {
            let compact: Vec<u8> = content
                .bytes()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            BASE64.decode(compact).map_err(|e| Error::Decode {
                path: body.path.clone(),
                detail: format!("invalid base64 content: {}", e),
            })?
        }
        Some("none") | None => content.into_bytes(),
        Some(other) => {
            return Err(Error::Decode {
                path: body.path.clone(),
                detail: format!("unsupported transport encoding: {}", other),
            });
        }
    };

    Ok(FileContent {
        path: body.path,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_client() -> GithubClient {
        GithubClient::with_base_url(
            "https://example.invalid/",
            "acme",
            "handbook",
            "main",
            Credential::new("tok"),
        )
        .unwrap()
    }

    #[test]
    fn contents_url_includes_branch_ref() {
        let client = test_client();
        assert_eq!(
            client.contents_url("docs/guides"),
            "https://example.invalid/repos/acme/handbook/contents/docs/guides?ref=main"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = test_client();
        assert_eq!(client.repo_url(), "https://example.invalid/repos/acme/handbook");
    }

    #[test]
    fn listing_payload_parses_entry_kinds() {
        let raw = r#"[
            {"name": "a.md", "path": "docs/a.md", "type": "file", "sha": "x", "size": 12},
            {"name": "sub", "path": "docs/sub", "type": "dir", "sha": "y", "size": 0},
            {"name": "link", "path": "docs/link", "type": "symlink", "sha": "z", "size": 0}
        ]"#;
        let items: Vec<ContentItem> = serde_json::from_str(raw).unwrap();

        assert_eq!(parse_kind(&items[0].kind), EntryKind::File);
        assert_eq!(parse_kind(&items[1].kind), EntryKind::Dir);
        assert_eq!(
            parse_kind(&items[2].kind),
            EntryKind::Other("symlink".to_string())
        );
    }

    #[test]
    fn base64_content_decodes_with_embedded_newlines() {
        // "hello world" split across lines the way the API delivers it
        let body = FileBody {
            path: "docs/a.md".to_string(),
            content: Some("aGVsbG8g\nd29ybGQ=\n".to_string()),
            encoding: Some("base64".to_string()),
        };

        let content = decode_file_body(body).unwrap();
        assert_eq!(content.bytes, b"hello world");
    }

    #[test]
    fn plain_encoding_passes_through() {
        let body = FileBody {
            path: "docs/a.md".to_string(),
            content: Some("raw".to_string()),
            encoding: Some("none".to_string()),
        };

        let content = decode_file_body(body).unwrap();
        assert_eq!(content.bytes, b"raw");
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let body = FileBody {
            path: "docs/a.md".to_string(),
            content: Some("!!!not base64!!!".to_string()),
            encoding: Some("base64".to_string()),
        };

        let err = decode_file_body(body).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let body = FileBody {
            path: "docs/a.md".to_string(),
            content: Some("x".to_string()),
            encoding: Some("rot13".to_string()),
        };

        let err = decode_file_body(body).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = snippet(&long);
        assert!(cut.chars().count() <= DETAIL_LIMIT + 1);
        assert!(cut.ends_with('…'));
    }
}
