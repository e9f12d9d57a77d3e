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

use kompo::infrastructure::cluster::{CatalogEntry, ComponentInfo, CATALOG};
use kompo::{ClusterGateway, ComponentError, CreateRequest, Provisioner, SourceKind};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CatalogExists(String),
    ComponentExists(String),
    CreateFromGit {
        name: String,
        url: String,
    },
    CreateFromPath {
        name: String,
        path: String,
        kind: SourceKind,
    },
    Build {
        name: String,
        wait: bool,
        show_progress: bool,
    },
    SetCurrent(String),
}

/// Records every gateway call so tests can assert on ordering and on
/// which calls were never made.
struct MockGateway {
    catalog_types: Vec<&'static str>,
    existing_components: Vec<&'static str>,
    calls: Mutex<Vec<Call>>,
}

impl MockGateway {
    fn new() -> Self {
        Self {
            catalog_types: vec!["nodejs", "python", "wildfly"],
            existing_components: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_existing(component: &'static str) -> Self {
        let mut gateway = Self::new();
        gateway.existing_components.push(component);
        gateway
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ClusterGateway for MockGateway {
    async fn catalog_exists(&self, component_type: &str) -> Result<bool, ComponentError> {
        self.record(Call::CatalogExists(component_type.to_string()));
        Ok(self.catalog_types.contains(&component_type))
    }

    async fn component_exists(
        &self,
        name: &str,
        _application: &str,
        _project: &str,
    ) -> Result<bool, ComponentError> {
        self.record(Call::ComponentExists(name.to_string()));
        Ok(self.existing_components.contains(&name))
    }

    async fn create_from_git(
        &self,
        name: &str,
        _component_type: &str,
        url: &str,
        _application: &str,
    ) -> Result<(), ComponentError> {
        self.record(Call::CreateFromGit {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    async fn create_from_path(
        &self,
        name: &str,
        _component_type: &str,
        path: &str,
        _application: &str,
        kind: SourceKind,
    ) -> Result<(), ComponentError> {
        self.record(Call::CreateFromPath {
            name: name.to_string(),
            path: path.to_string(),
            kind,
        });
        Ok(())
    }

    async fn build(
        &self,
        name: &str,
        _application: &str,
        wait: bool,
        show_progress: bool,
    ) -> Result<(), ComponentError> {
        self.record(Call::Build {
            name: name.to_string(),
            wait,
            show_progress,
        });
        Ok(())
    }

    async fn set_current(
        &self,
        name: &str,
        _application: &str,
        _project: &str,
    ) -> Result<(), ComponentError> {
        self.record(Call::SetCurrent(name.to_string()));
        Ok(())
    }

    async fn current_component(
        &self,
        _application: &str,
        _project: &str,
    ) -> Result<Option<String>, ComponentError> {
        Ok(None)
    }

    async fn list_components(
        &self,
        _application: &str,
        _project: &str,
    ) -> Result<Vec<ComponentInfo>, ComponentError> {
        Ok(Vec::new())
    }

    async fn get_component(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<ComponentInfo, ComponentError> {
        Err(ComponentError::Gateway(format!(
            "Component '{}' not found in application '{}' (project '{}')",
            name, application, project
        )))
    }

    async fn delete_component(
        &self,
        _name: &str,
        _application: &str,
        _project: &str,
    ) -> Result<(), ComponentError> {
        Ok(())
    }

    fn catalog(&self) -> &'static [CatalogEntry] {
        CATALOG
    }
}

fn request(component_type: &str) -> CreateRequest {
    CreateRequest {
        component_type: component_type.to_string(),
        component_name: None,
        git: None,
        local: None,
        binary: None,
        application: "app".to_string(),
        project: "default".to_string(),
    }
}

#[tokio::test]
async fn conflicting_source_flags_fail_before_any_cluster_call() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let mut req = request("nodejs");
    req.git = Some("https://github.com/openshift/nodejs-ex.git".to_string());
    req.local = Some("./src".to_string());

    let err = provisioner.provision(&req).await.unwrap_err();
    assert!(matches!(err, ComponentError::ConflictingSource));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn all_three_source_flags_also_conflict() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let mut req = request("nodejs");
    req.git = Some("https://example.com/a.git".to_string());
    req.local = Some("./a".to_string());
    req.binary = Some("./a.war".to_string());

    let err = provisioner.provision(&req).await.unwrap_err();
    assert!(matches!(err, ComponentError::ConflictingSource));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn invalid_name_fails_before_any_cluster_call() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let mut req = request("nodejs");
    req.component_name = Some("Not_Valid".to_string());

    let err = provisioner.provision(&req).await.unwrap_err();
    assert!(matches!(err, ComponentError::InvalidName { .. }));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn unknown_type_makes_no_creation_call() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let err = provisioner.provision(&request("cobol")).await.unwrap_err();
    assert!(matches!(err, ComponentError::UnknownType { .. }));
    assert_eq!(
        gateway.calls(),
        vec![Call::CatalogExists("cobol".to_string())]
    );
}

#[tokio::test]
async fn duplicate_name_makes_no_creation_call() {
    let gateway = MockGateway::with_existing("nodejs");
    let provisioner = Provisioner::new(&gateway);

    let err = provisioner.provision(&request("nodejs")).await.unwrap_err();
    assert!(matches!(err, ComponentError::DuplicateName { .. }));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::CatalogExists("nodejs".to_string()),
            Call::ComponentExists("nodejs".to_string()),
        ]
    );
}

#[tokio::test]
async fn name_defaults_to_component_type() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let descriptor = provisioner.provision(&request("nodejs")).await.unwrap();
    assert_eq!(descriptor.name, "nodejs");
    assert!(gateway
        .calls()
        .contains(&Call::SetCurrent("nodejs".to_string())));
}

#[tokio::test]
async fn positional_name_overrides_type() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let mut req = request("nodejs");
    req.component_name = Some("frontend".to_string());
    req.git = Some("https://github.com/openshift/nodejs-ex.git".to_string());

    let descriptor = provisioner.provision(&req).await.unwrap();
    assert_eq!(descriptor.name, "frontend");
    assert_eq!(descriptor.component_type, "nodejs");
}

#[tokio::test]
async fn git_source_passes_url_through_and_waits_for_build() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let url = "https://github.com/openshift/nodejs-ex.git";
    let mut req = request("nodejs");
    req.git = Some(url.to_string());

    let descriptor = provisioner.provision(&req).await.unwrap();
    assert_eq!(descriptor.source.kind, SourceKind::Git);
    assert_eq!(descriptor.source.location, url);

    let calls = gateway.calls();
    assert!(calls.contains(&Call::CreateFromGit {
        name: "nodejs".to_string(),
        url: url.to_string(),
    }));
    assert!(calls.contains(&Call::Build {
        name: "nodejs".to_string(),
        wait: true,
        show_progress: true,
    }));
}

#[tokio::test]
async fn default_source_is_current_directory_and_build_does_not_wait() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let descriptor = provisioner.provision(&request("nodejs")).await.unwrap();

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(descriptor.source.kind, SourceKind::Local);
    assert_eq!(descriptor.source.location, cwd.to_string_lossy());

    let calls = gateway.calls();
    assert!(calls.contains(&Call::CreateFromPath {
        name: "nodejs".to_string(),
        path: cwd.to_string_lossy().into_owned(),
        kind: SourceKind::Local,
    }));
    assert!(calls.contains(&Call::Build {
        name: "nodejs".to_string(),
        wait: false,
        show_progress: true,
    }));
}

#[tokio::test]
async fn local_source_resolves_to_absolute_directory() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let dir = tempfile::tempdir().unwrap();
    let mut req = request("nodejs");
    req.component_name = Some("frontend".to_string());
    req.local = Some(dir.path().to_string_lossy().into_owned());

    let descriptor = provisioner.provision(&req).await.unwrap();
    assert_eq!(descriptor.source.kind, SourceKind::Local);
    assert!(std::path::Path::new(&descriptor.source.location).is_absolute());
}

#[tokio::test]
async fn local_source_pointing_at_file_fails_without_creation() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("frontend");
    std::fs::write(&file_path, b"not a directory").unwrap();

    let mut req = request("nodejs");
    req.component_name = Some("frontend".to_string());
    req.local = Some(file_path.to_string_lossy().into_owned());

    let err = provisioner.provision(&req).await.unwrap_err();
    assert!(matches!(err, ComponentError::NotADirectory { .. }));

    let calls = gateway.calls();
    assert!(!calls
        .iter()
        .any(|call| matches!(call, Call::CreateFromPath { .. } | Call::Build { .. })));
}

#[tokio::test]
async fn binary_source_builds_without_waiting() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("sample.war");
    std::fs::write(&artifact, b"war").unwrap();

    let mut req = request("wildfly");
    req.component_name = Some("backend".to_string());
    req.binary = Some(artifact.to_string_lossy().into_owned());

    let descriptor = provisioner.provision(&req).await.unwrap();
    assert_eq!(descriptor.source.kind, SourceKind::Binary);

    assert!(gateway.calls().contains(&Call::Build {
        name: "backend".to_string(),
        wait: false,
        show_progress: true,
    }));
}

#[tokio::test]
async fn successful_provisioning_activates_component_last() {
    let gateway = MockGateway::new();
    let provisioner = Provisioner::new(&gateway);

    provisioner.provision(&request("python")).await.unwrap();

    let calls = gateway.calls();
    assert_eq!(
        calls.last(),
        Some(&Call::SetCurrent("python".to_string()))
    );

    let build_index = calls
        .iter()
        .position(|call| matches!(call, Call::Build { .. }))
        .unwrap();
    let create_index = calls
        .iter()
        .position(|call| matches!(call, Call::CreateFromPath { .. }))
        .unwrap();
    assert!(create_index < build_index);
}
