//! Package manifest (`package.json`) reading.
//!
//! Only the `dependencies` mapping is used. Reading is lenient: a missing or
//! malformed manifest, or a missing `dependencies` field, behaves like a
//! manifest that declares no dependencies.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Manifest file name looked up in the project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Declared dependencies: package name to version range.
pub type DependencyMap = BTreeMap<String, String>;

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    dependencies: Option<serde_json::Value>,
}

/// The subset of a package manifest fedconf consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Path the manifest was read from.
    pub path: PathBuf,
    /// Declared runtime dependencies.
    pub dependencies: DependencyMap,
}

impl Manifest {
    /// Read `package.json` from `project_dir`.
    pub fn read(project_dir: &Path) -> Self {
        Self::read_path(&project_dir.join(MANIFEST_FILE))
    }

    /// Read a manifest from an explicit path.
    pub fn read_path(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No manifest at {}: {}", path.display(), e);
                return Self::empty(path);
            }
        };

        Self::parse(&content, path)
    }

    /// Parse manifest JSON content. `path` is only used for reporting.
    pub fn parse(content: &str, path: &Path) -> Self {
        let raw: RawManifest = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Ignoring malformed manifest {}: {}", path.display(), e);
                return Self::empty(path);
            }
        };

        let dependencies = match raw.dependencies {
            Some(serde_json::Value::Object(entries)) => entries
                .into_iter()
                .filter_map(|(name, version)| match version {
                    serde_json::Value::String(range) => Some((name, range)),
                    other => {
                        tracing::warn!(
                            "Skipping dependency '{}' with non-string version {}",
                            name,
                            other
                        );
                        None
                    }
                })
                .collect(),
            Some(serde_json::Value::Null) | None => DependencyMap::new(),
            Some(other) => {
                tracing::warn!(
                    "Ignoring 'dependencies' in {}: expected an object, found {}",
                    path.display(),
                    other
                );
                DependencyMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            dependencies,
        }
    }

    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            dependencies: DependencyMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_dependencies() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "shell", "dependencies": {"react": "^18.0.0", "react-dom": "^18.0.0"}}"#,
        )
        .unwrap();

        let manifest = Manifest::read(temp.path());
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies["react"], "^18.0.0");
    }

    #[test]
    fn missing_manifest_is_empty() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::read(temp.path());
        assert!(manifest.dependencies.is_empty());
        assert_eq!(manifest.path, temp.path().join("package.json"));
    }

    #[test]
    fn malformed_manifest_is_empty() {
        let manifest = Manifest::parse("{ not json", Path::new("package.json"));
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn missing_dependencies_field_is_empty() {
        let manifest = Manifest::parse(
            r#"{"name": "shell", "devDependencies": {"vite": "^5.0.0"}}"#,
            Path::new("package.json"),
        );
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn non_object_dependencies_is_empty() {
        let manifest = Manifest::parse(r#"{"dependencies": ["react"]}"#, Path::new("p.json"));
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn non_string_versions_are_skipped() {
        let manifest = Manifest::parse(
            r#"{"dependencies": {"react": "^18.0.0", "weird": {"version": "1"}}}"#,
            Path::new("package.json"),
        );
        assert_eq!(manifest.dependencies.len(), 1);
        assert!(manifest.dependencies.contains_key("react"));
    }

    #[test]
    fn non_object_manifest_is_empty() {
        let manifest = Manifest::parse("[1, 2, 3]", Path::new("package.json"));
        assert!(manifest.dependencies.is_empty());
    }
}
