//! In-memory remote tree with scripted failures
//!
//! [`FakeRemote`] implements [`RemoteTree`] over a map of paths so engine
//! tests can exercise traversal, accounting, and failure isolation without
//! a network. Parent directory listings are derived automatically from the
//! file paths registered.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use mirror_remote::{EntryKind, Error, FileContent, RemoteTree, Result, TreeEntry};

/// Scriptable in-memory implementation of [`RemoteTree`].
#[derive(Default)]
pub struct FakeRemote {
    /// Directory path -> ordered child entries.
    dirs: BTreeMap<String, Vec<TreeEntry>>,
    /// File path -> content bytes.
    files: BTreeMap<String, Vec<u8>>,
    /// Listings that fail with a simulated remote error.
    fail_listings: BTreeSet<String>,
    /// Fetches that fail with a simulated transport-class error.
    fail_fetches: BTreeSet<String>,
    /// When set, `verify` fails with an auth rejection.
    reject_auth: bool,
    calls: Cell<usize>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and every directory on the way to it.
    pub fn file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.insert_entry(path, EntryKind::File);
        self.files.insert(path.to_string(), bytes.to_vec());
        self
    }

    /// Register a directory (possibly empty) and every level above it.
    pub fn dir(mut self, path: &str) -> Self {
        self.insert_entry(path, EntryKind::Dir);
        self.dirs.entry(path.to_string()).or_default();
        self
    }

    /// Register a non-file, non-directory entry (symlink, submodule).
    pub fn other_entry(mut self, path: &str, kind: &str) -> Self {
        self.insert_entry(path, EntryKind::Other(kind.to_string()));
        self
    }

    /// Make listing `path` fail.
    pub fn fail_listing(mut self, path: &str) -> Self {
        self.fail_listings.insert(path.to_string());
        self
    }

    /// Make fetching `path` fail.
    pub fn fail_fetch(mut self, path: &str) -> Self {
        self.fail_fetches.insert(path.to_string());
        self
    }

    /// Make `verify` fail with an auth rejection.
    pub fn reject_auth(mut self) -> Self {
        self.reject_auth = true;
        self
    }

    /// Number of remote calls made so far (verify, listings, fetches).
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    fn insert_entry(&mut self, path: &str, kind: EntryKind) {
        // Walk the path components, registering each directory level once.
        let mut parent = String::new();
        let components: Vec<&str> = path.split('/').collect();
        for (i, component) in components.iter().enumerate() {
            let full = if parent.is_empty() {
                component.to_string()
            } else {
                format!("{}/{}", parent, component)
            };
            let is_last = i + 1 == components.len();
            let entry_kind = if is_last { kind.clone() } else { EntryKind::Dir };

            let children = self.dirs.entry(parent.clone()).or_default();
            if !children.iter().any(|e| e.path == full) {
                children.push(TreeEntry {
                    name: component.to_string(),
                    path: full.clone(),
                    kind: entry_kind,
                });
            }
            if !is_last {
                self.dirs.entry(full.clone()).or_default();
            }
            parent = full;
        }
    }

    fn unavailable(path: &str) -> Error {
        Error::RemoteUnavailable {
            path: path.to_string(),
            status: 500,
            detail: "injected failure".to_string(),
        }
    }
}

impl RemoteTree for FakeRemote {
    fn verify(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.reject_auth {
            return Err(Error::AuthRejected {
                status: 401,
                detail: "bad credentials".to_string(),
            });
        }
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<TreeEntry>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_listings.contains(path) {
            return Err(Self::unavailable(path));
        }
        match self.dirs.get(path) {
            Some(entries) => Ok(entries.clone()),
            None => Err(Error::RemoteUnavailable {
                path: path.to_string(),
                status: 404,
                detail: "not found".to_string(),
            }),
        }
    }

    fn fetch_file(&self, path: &str) -> Result<FileContent> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_fetches.contains(path) {
            return Err(Self::unavailable(path));
        }
        match self.files.get(path) {
            Some(bytes) => Ok(FileContent {
                path: path.to_string(),
                bytes: bytes.clone(),
            }),
            None => Err(Error::RemoteUnavailable {
                path: path.to_string(),
                status: 404,
                detail: "not found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_listings_are_derived() {
        let remote = FakeRemote::new().file("docs/sub/b.md", b"b");

        let root = remote.list_dir("docs").unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].name, "sub");
        assert_eq!(root[0].kind, EntryKind::Dir);

        let sub = remote.list_dir("docs/sub").unwrap();
        assert_eq!(sub[0].name, "b.md");
        assert_eq!(sub[0].kind, EntryKind::File);
    }

    #[test]
    fn scripted_fetch_failure() {
        let remote = FakeRemote::new()
            .file("docs/a.md", b"a")
            .fail_fetch("docs/a.md");

        assert!(remote.fetch_file("docs/a.md").is_err());
    }

    #[test]
    fn call_counter_tracks_operations() {
        let remote = FakeRemote::new().file("docs/a.md", b"a");
        assert_eq!(remote.call_count(), 0);

        remote.verify().unwrap();
        remote.list_dir("docs").unwrap();
        remote.fetch_file("docs/a.md").unwrap();
        assert_eq!(remote.call_count(), 3);
    }
}
