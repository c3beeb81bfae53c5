//! Locating the script file behind a declared path.

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// A script file that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
}

impl ResolvedPath {
    /// Wrap an existing file path, canonicalising it when possible.
    ///
    /// On macOS this turns `/var/...` into `/private/var/...`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::fs::canonicalize(&path).unwrap_or(path);
        Self { path }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Percent-encoded `file://` URI for handing the script to other
    /// applications.
    ///
    /// A path that could not be made absolute has no valid file URI; it is
    /// rendered unencoded instead.
    pub fn to_uri(&self) -> String {
        match Url::from_file_path(&self.path) {
            Ok(url) => url.into(),
            Err(()) => format!("file://{}", self.path.display()),
        }
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Finds the real location of a script whose declared path lacks the
/// document directory.
///
/// Searches exactly one level: the immediate subdirectories of the declared
/// parent. The first subdirectory containing the file name wins, in the
/// order the OS lists them. That order is not guaranteed stable, so two
/// documents holding a same-named script are ambiguous and whichever is
/// listed first is returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, declared_path: &str) -> Option<ResolvedPath> {
        let declared = Path::new(declared_path);
        let (Some(parent), Some(file_name)) = (declared.parent(), declared.file_name()) else {
            tracing::debug!(declared_path, "Declared path has no parent or file name");
            return None;
        };

        let entries = match std::fs::read_dir(parent) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(parent = %parent.display(), error = %e, "Could not list script directory");
                return None;
            }
        };

        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }

            let candidate = dir.join(file_name);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Resolved script path");
                return Some(ResolvedPath::new(candidate));
            }
        }

        tracing::debug!(declared_path, "No subdirectory contains the script");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn declared(root: &Path, name: &str) -> String {
        root.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_finds_file_in_uuid_directory() {
        let root = TempDir::new().unwrap();
        let doc_dir = root.path().join("6F1C2A5E-0000-4C1D-9E3B-2B7A1F0C9D11");
        fs::create_dir(&doc_dir).unwrap();
        fs::write(doc_dir.join("script.js"), "return patch;").unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();

        let resolved = PathResolver::new()
            .resolve(&declared(root.path(), "script.js"))
            .unwrap();

        assert_eq!(
            resolved.as_path(),
            fs::canonicalize(doc_dir.join("script.js")).unwrap()
        );
        assert!(resolved.to_uri().starts_with("file:///"));
        assert!(resolved.to_uri().ends_with("/script.js"));
    }

    #[test]
    fn test_uri_is_percent_encoded() {
        let root = TempDir::new().unwrap();
        let doc_dir = root.path().join("Patch Doc #2");
        fs::create_dir(&doc_dir).unwrap();
        fs::write(doc_dir.join("my script.js"), "").unwrap();

        let resolved = PathResolver::new()
            .resolve(&declared(root.path(), "my script.js"))
            .unwrap();
        let uri = resolved.to_uri();

        assert!(uri.starts_with("file:///"), "{uri}");
        assert!(uri.ends_with("/Patch%20Doc%20%232/my%20script.js"), "{uri}");
        assert!(!uri.contains(' '));
        assert_eq!(
            Url::parse(&uri).unwrap().to_file_path().unwrap(),
            resolved.as_path()
        );
    }

    #[test]
    fn test_does_not_match_file_at_declared_location() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("script.js"), "").unwrap();

        assert_eq!(
            PathResolver::new().resolve(&declared(root.path(), "script.js")),
            None
        );
    }

    #[test]
    fn test_does_not_recurse() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("outer").join("inner");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("script.js"), "").unwrap();

        assert_eq!(
            PathResolver::new().resolve(&declared(root.path(), "script.js")),
            None
        );
    }

    #[test]
    fn test_missing_parent_directory() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("gone");

        assert_eq!(
            PathResolver::new().resolve(&declared(&missing, "script.js")),
            None
        );
    }

    #[test]
    fn test_other_file_names_do_not_match() {
        let root = TempDir::new().unwrap();
        let doc_dir = root.path().join("doc");
        fs::create_dir(&doc_dir).unwrap();
        fs::write(doc_dir.join("other.js"), "").unwrap();

        assert_eq!(
            PathResolver::new().resolve(&declared(root.path(), "script.js")),
            None
        );
    }

    #[test]
    fn test_bare_root_is_unresolvable() {
        assert_eq!(PathResolver::new().resolve("/"), None);
    }
}
