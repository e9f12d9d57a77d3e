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

use crate::domain::component::descriptor::{ComponentDescriptor, SourceKind, SourceRef};
use crate::domain::component::source::SourceResolver;
use crate::domain::component::validator;
use crate::infrastructure::cluster::ClusterGateway;
use crate::shared::error::{ComponentError, Result};
use tracing::debug;

/// Everything the orchestrator needs to provision one component. Built
/// by the CLI layer from parsed flags; no global state involved.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub component_type: String,
    pub component_name: Option<String>,
    pub git: Option<String>,
    pub local: Option<String>,
    pub binary: Option<String>,
    pub application: String,
    pub project: String,
}

impl CreateRequest {
    /// The component name defaults to the component type when no second
    /// positional argument was given.
    pub fn resolved_name(&self) -> &str {
        self.component_name
            .as_deref()
            .unwrap_or(&self.component_type)
    }

    fn source_flag_count(&self) -> usize {
        [&self.git, &self.local, &self.binary]
            .iter()
            .filter(|flag| flag.is_some())
            .count()
    }
}

/// Drives the create/build/activate control flow. Each step failure
/// aborts the remaining sequence immediately; no partial rollback is
/// attempted.
pub struct Provisioner<'a> {
    gateway: &'a dyn ClusterGateway,
}

impl<'a> Provisioner<'a> {
    pub fn new(gateway: &'a dyn ClusterGateway) -> Self {
        Self { gateway }
    }

    pub async fn provision(&self, request: &CreateRequest) -> Result<ComponentDescriptor> {
        debug!(
            "component create called with type={}, name={:?}, git={:?}, local={:?}, binary={:?}",
            request.component_type,
            request.component_name,
            request.git,
            request.local,
            request.binary
        );

        // Flag conflicts are rejected before any cluster call is made.
        if request.source_flag_count() > 1 {
            return Err(ComponentError::ConflictingSource);
        }

        let name = request.resolved_name().to_string();
        validator::validate_name(&name)?;

        if !self.gateway.catalog_exists(&request.component_type).await? {
            return Err(ComponentError::UnknownType {
                component_type: request.component_type.clone(),
            });
        }

        if self
            .gateway
            .component_exists(&name, &request.application, &request.project)
            .await?
        {
            return Err(ComponentError::DuplicateName {
                name,
                application: request.application.clone(),
                project: request.project.clone(),
            });
        }

        println!(
            "Creating {} component called {}",
            request.component_type, name
        );

        let source = self.dispatch_creation(request, &name).await?;

        // Only git builds block until completion; path-based components
        // finish their first build when the source is pushed.
        let wait = source.kind == SourceKind::Git;
        self.gateway
            .build(&name, &request.application, wait, true)
            .await?;

        self.gateway
            .set_current(&name, &request.application, &request.project)
            .await?;

        println!(
            "\nComponent {} successfully deployed and set as active component",
            name
        );

        Ok(ComponentDescriptor::new(
            name,
            &request.component_type,
            source,
            &request.application,
            &request.project,
        ))
    }

    async fn dispatch_creation(
        &self,
        request: &CreateRequest,
        name: &str,
    ) -> Result<SourceRef> {
        if let Some(ref url) = request.git {
            let source = SourceResolver::resolve_git(url);
            println!(
                "Building component {} from Git repository: {}\n",
                name, source.location
            );
            self.gateway
                .create_from_git(
                    name,
                    &request.component_type,
                    &source.location,
                    &request.application,
                )
                .await?;
            Ok(source)
        } else if let Some(ref path) = request.local {
            let source = SourceResolver::resolve_local(path)?;
            println!(
                "Building component {} from local directory {}",
                name, source.location
            );
            self.gateway
                .create_from_path(
                    name,
                    &request.component_type,
                    &source.location,
                    &request.application,
                    SourceKind::Local,
                )
                .await?;
            Ok(source)
        } else if let Some(ref path) = request.binary {
            let source = SourceResolver::resolve_binary(path)?;
            println!(
                "Building component {} from binary {}\n",
                name, source.location
            );
            self.gateway
                .create_from_path(
                    name,
                    &request.component_type,
                    &source.location,
                    &request.application,
                    SourceKind::Binary,
                )
                .await?;
            Ok(source)
        } else {
            let source = SourceResolver::resolve_default()?;
            println!(
                "Building component {} from directory {}\n",
                name, source.location
            );
            self.gateway
                .create_from_path(
                    name,
                    &request.component_type,
                    &source.location,
                    &request.application,
                    SourceKind::Local,
                )
                .await?;
            Ok(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_name_defaults_to_type() {
        let req = request("nodejs");
        assert_eq!(req.resolved_name(), "nodejs");
    }

    #[test]
    fn test_positional_name_wins() {
        let mut req = request("nodejs");
        req.component_name = Some("frontend".to_string());
        assert_eq!(req.resolved_name(), "frontend");
    }

    #[test]
    fn test_source_flag_count() {
        let mut req = request("nodejs");
        assert_eq!(req.source_flag_count(), 0);
        req.git = Some("https://example.com/repo.git".to_string());
        assert_eq!(req.source_flag_count(), 1);
        req.local = Some("./src".to_string());
        assert_eq!(req.source_flag_count(), 2);
    }
}
