//! Reading a captured script.

use kami_patch::ResolvedPath;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },
}

/// Read the script source so it can be shown in the editor.
pub fn load_script(path: &ResolvedPath) -> Result<String, LoadError> {
    let bytes = std::fs::read(path.as_path()).map_err(|e| LoadError::Io {
        path: path.as_path().to_path_buf(),
        source: e,
    })?;

    let source = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 {
        path: path.as_path().to_path_buf(),
    })?;

    tracing::debug!(path = %path.as_path().display(), bytes = source.len(), "Loaded script");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("patch.js");
        std::fs::write(&file, "function setup() {}\n").unwrap();

        let source = load_script(&ResolvedPath::new(&file)).unwrap();
        assert_eq!(source, "function setup() {}\n");
    }

    #[test]
    fn test_rejects_binary() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("patch.js");
        std::fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            load_script(&ResolvedPath::new(&file)),
            Err(LoadError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_script(&ResolvedPath::new(dir.path().join("gone.js"))).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
