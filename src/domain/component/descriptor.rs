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

use crate::shared::error::ComponentError;
use serde::{Deserialize, Serialize};

/// Origin of a component's source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Git,
    Local,
    Binary,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Git => "git",
            SourceKind::Local => "local",
            SourceKind::Binary => "binary",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(SourceKind::Git),
            "local" => Ok(SourceKind::Local),
            "binary" => Ok(SourceKind::Binary),
            _ => Err(ComponentError::Config(format!(
                "Invalid source kind: {}",
                s
            ))),
        }
    }
}

/// A normalized source reference: kind plus its canonical location
/// (a URL for git, an absolute filesystem path for local/binary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub location: String,
}

impl SourceRef {
    pub fn new(kind: SourceKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }
}

/// Declared configuration of a component. Created once at provisioning
/// time; the source kind and location are immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub source: SourceRef,
    pub application: String,
    pub project: String,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        component_type: impl Into<String>,
        source: SourceRef,
        application: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            component_type: component_type.into(),
            source,
            application: application.into(),
            project: project.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_round_trip() {
        for kind in [SourceKind::Git, SourceKind::Local, SourceKind::Binary] {
            assert_eq!(kind.as_str().parse::<SourceKind>().unwrap(), kind);
        }
        assert!("tarball".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_descriptor_yaml_round_trip() {
        let descriptor = ComponentDescriptor::new(
            "frontend",
            "nodejs",
            SourceRef::new(SourceKind::Git, "https://github.com/openshift/nodejs-ex.git"),
            "app",
            "default",
        );

        let yaml = serde_yaml::to_string(&descriptor).unwrap();
        let parsed: ComponentDescriptor = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "frontend");
        assert_eq!(parsed.component_type, "nodejs");
        assert_eq!(parsed.source.kind, SourceKind::Git);
    }
}
