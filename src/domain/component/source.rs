// Copyright 2025 Kompo Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::component::descriptor::{SourceKind, SourceRef};
use crate::shared::error::{ComponentError, Result};
use std::path::Path;

/// Normalizes user-supplied source references into canonical form:
/// git URLs pass through untouched, filesystem paths become absolute.
pub struct SourceResolver;

impl SourceResolver {
    /// Git sources never touch the local filesystem.
    pub fn resolve_git(url: &str) -> SourceRef {
        SourceRef::new(SourceKind::Git, url)
    }

    /// Local sources must resolve to an existing directory.
    pub fn resolve_local(path: &str) -> Result<SourceRef> {
        let abs = Self::to_absolute(path)?;

        let metadata = std::fs::metadata(&abs)
            .map_err(|e| ComponentError::path_resolution(path, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(ComponentError::NotADirectory { path: abs });
        }

        Ok(SourceRef::new(SourceKind::Local, abs))
    }

    /// Binary artifacts only need an absolute path; the artifact is
    /// streamed to the cluster as-is.
    pub fn resolve_binary(path: &str) -> Result<SourceRef> {
        let abs = Self::to_absolute(path)?;
        Ok(SourceRef::new(SourceKind::Binary, abs))
    }

    /// No source flag given: the component is built from the current
    /// working directory.
    pub fn resolve_default() -> Result<SourceRef> {
        let cwd = std::env::current_dir()
            .map_err(|e| ComponentError::path_resolution(".", e.to_string()))?;
        Ok(SourceRef::new(SourceKind::Local, cwd.to_string_lossy()))
    }

    fn to_absolute(path: &str) -> Result<String> {
        if path.is_empty() {
            return Err(ComponentError::path_resolution(path, "empty path"));
        }

        let abs = std::path::absolute(Path::new(path))
            .map_err(|e| ComponentError::path_resolution(path, e.to_string()))?;
        Ok(abs.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_url_passes_through() {
        let url = "https://github.com/openshift/nodejs-ex.git";
        let source = SourceResolver::resolve_git(url);
        assert_eq!(source.kind, SourceKind::Git);
        assert_eq!(source.location, url);
    }

    #[test]
    fn test_local_resolution_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = SourceResolver::resolve_local(dir.path().to_str().unwrap()).unwrap();
        let second = SourceResolver::resolve_local(&first.location).unwrap();
        assert_eq!(first.location, second.location);
    }

    #[test]
    fn test_local_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("sample.war");
        std::fs::write(&file_path, b"binary").unwrap();

        let err = SourceResolver::resolve_local(file_path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ComponentError::NotADirectory { .. }));
    }

    #[test]
    fn test_local_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = SourceResolver::resolve_local(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ComponentError::PathResolution { .. }));
    }

    #[test]
    fn test_binary_resolves_relative_path() {
        let source = SourceResolver::resolve_binary("./downloads/sample.war").unwrap();
        assert_eq!(source.kind, SourceKind::Binary);
        assert!(Path::new(&source.location).is_absolute());
        assert!(source.location.ends_with("sample.war"));
    }

    #[test]
    fn test_default_resolves_cwd() {
        let source = SourceResolver::resolve_default().unwrap();
        assert_eq!(source.kind, SourceKind::Local);
        assert_eq!(
            source.location,
            std::env::current_dir().unwrap().to_string_lossy()
        );
    }
}
