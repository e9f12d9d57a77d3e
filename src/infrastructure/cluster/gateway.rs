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
use crate::infrastructure::cluster::catalog::{self, CatalogEntry};
use crate::infrastructure::constants::*;
use crate::shared::error::ComponentError;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{ConfigMap, Container, EnvVar, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use kube::{Api, Client};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;

/// A component as observed on the cluster: its declared descriptor plus
/// the current deployment state.
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    pub descriptor: ComponentDescriptor,
    pub replicas: u32,
    pub ready_replicas: u32,
    pub active: bool,
}

/// Narrow interface over the cluster build/deploy/query operations.
///
/// The provisioning orchestrator only ever talks to the cluster through
/// this trait, which keeps the control flow testable with a mock.
#[async_trait::async_trait]
pub trait ClusterGateway: Send + Sync {
    /// Whether the catalog knows the given component type.
    async fn catalog_exists(&self, component_type: &str) -> Result<bool, ComponentError>;

    /// Whether a component with this name already exists in the
    /// (application, project) scope.
    async fn component_exists(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<bool, ComponentError>;

    async fn create_from_git(
        &self,
        name: &str,
        component_type: &str,
        url: &str,
        application: &str,
    ) -> Result<(), ComponentError>;

    async fn create_from_path(
        &self,
        name: &str,
        component_type: &str,
        path: &str,
        application: &str,
        kind: SourceKind,
    ) -> Result<(), ComponentError>;

    async fn build(
        &self,
        name: &str,
        application: &str,
        wait: bool,
        show_progress: bool,
    ) -> Result<(), ComponentError>;

    async fn set_current(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<(), ComponentError>;

    async fn current_component(
        &self,
        application: &str,
        project: &str,
    ) -> Result<Option<String>, ComponentError>;

    async fn list_components(
        &self,
        application: &str,
        project: &str,
    ) -> Result<Vec<ComponentInfo>, ComponentError>;

    async fn get_component(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<ComponentInfo, ComponentError>;

    async fn delete_component(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<(), ComponentError>;

    fn catalog(&self) -> &'static [CatalogEntry];
}

/// `kube`-backed gateway. The client is scoped to one project, which maps
/// onto a Kubernetes namespace.
pub struct KubeClusterGateway {
    client: Client,
    namespace: String,
}

impl KubeClusterGateway {
    pub async fn new(project: String) -> Result<Self, ComponentError> {
        let client = Client::try_default().await.map_err(|e| {
            ComponentError::gateway(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            namespace: project,
        })
    }

    pub async fn new_with_config(
        project: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, ComponentError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path).map_err(|e| {
                ComponentError::gateway(format!("Failed to load kubeconfig: {}", e))
            })?
        } else {
            Kubeconfig::read().map_err(|e| {
                ComponentError::gateway(format!("Failed to load kubeconfig: {}", e))
            })?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                ComponentError::gateway(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            ComponentError::gateway(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            namespace: project,
        })
    }

    pub fn project(&self) -> &str {
        &self.namespace
    }

    fn deployment_name(application: &str, name: &str) -> String {
        format!("{}-{}", application, name)
    }

    fn descriptor_name(application: &str, name: &str) -> String {
        format!("{}-{}{}", application, name, SUFFIX_DESCRIPTOR)
    }

    fn active_config_name(application: &str) -> String {
        format!("{}{}", application, SUFFIX_ACTIVE)
    }

    fn component_labels(application: &str, name: &str) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), application.to_string());
        labels.insert(LABEL_COMPONENT.to_string(), name.to_string());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());
        labels
    }

    fn build_descriptor_configmap(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> Result<ConfigMap, ComponentError> {
        let mut data = BTreeMap::new();
        data.insert(
            DESCRIPTOR_FILE_NAME.to_string(),
            serde_yaml::to_string(descriptor)?,
        );

        let mut annotations = BTreeMap::new();
        annotations.insert(
            ANNOTATION_COMPONENT_TYPE.to_string(),
            descriptor.component_type.clone(),
        );
        annotations.insert(
            ANNOTATION_SOURCE_KIND.to_string(),
            descriptor.source.kind.as_str().to_string(),
        );
        annotations.insert(
            ANNOTATION_SOURCE_LOCATION.to_string(),
            descriptor.source.location.clone(),
        );

        Ok(ConfigMap {
            metadata: ObjectMeta {
                name: Some(Self::descriptor_name(
                    &descriptor.application,
                    &descriptor.name,
                )),
                namespace: Some(self.namespace.clone()),
                labels: Some(Self::component_labels(
                    &descriptor.application,
                    &descriptor.name,
                )),
                annotations: Some(annotations),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        })
    }

    fn build_deployment(
        &self,
        descriptor: &ComponentDescriptor,
        builder_image: &str,
    ) -> Deployment {
        let labels = Self::component_labels(&descriptor.application, &descriptor.name);

        let mut selector = BTreeMap::new();
        selector.insert(LABEL_APP.to_string(), descriptor.application.clone());
        selector.insert(LABEL_COMPONENT.to_string(), descriptor.name.clone());

        let container = Container {
            name: CONTAINER_NAME.to_string(),
            image: Some(builder_image.to_string()),
            env: Some(vec![
                EnvVar {
                    name: ENV_SOURCE_KIND.to_string(),
                    value: Some(descriptor.source.kind.as_str().to_string()),
                    ..Default::default()
                },
                EnvVar {
                    name: ENV_SOURCE_LOCATION.to_string(),
                    value: Some(descriptor.source.location.clone()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        Deployment {
            metadata: ObjectMeta {
                name: Some(Self::deployment_name(
                    &descriptor.application,
                    &descriptor.name,
                )),
                namespace: Some(self.namespace.clone()),
                labels: Some(labels.clone()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(1),
                selector: LabelSelector {
                    match_labels: Some(selector),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(labels),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    async fn create_component(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<(), ComponentError> {
        let entry = catalog::lookup(&descriptor.component_type).ok_or_else(|| {
            ComponentError::UnknownType {
                component_type: descriptor.component_type.clone(),
            }
        })?;

        let configmap = self.build_descriptor_configmap(&descriptor)?;
        let deployment = self.build_deployment(&descriptor, entry.builder_image);

        let cm_api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);
        let dep_api: Api<Deployment> = Api::namespaced(self.client.clone(), &self.namespace);
        let pp = kube::api::PostParams::default();

        cm_api.create(&pp, &configmap).await?;
        dep_api.create(&pp, &deployment).await?;
        Ok(())
    }

    async fn get_deployment(&self, name: &str) -> Result<Deployment, ComponentError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), &self.namespace);
        api.get(name).await.map_err(|e| {
            if let kube::Error::Api(ae) = e {
                ComponentError::Gateway(ae.message)
            } else {
                ComponentError::Gateway(e.to_string())
            }
        })
    }

    async fn wait_for_ready(&self, deployment_name: &str) -> Result<(), ComponentError> {
        let mut waited = 0;

        while waited < BUILD_MAX_WAIT_SECONDS {
            if let Ok(deployment) = self.get_deployment(deployment_name).await {
                let replicas = deployment
                    .spec
                    .as_ref()
                    .and_then(|s| s.replicas)
                    .unwrap_or(0);
                let ready = deployment
                    .status
                    .as_ref()
                    .and_then(|s| s.ready_replicas)
                    .unwrap_or(0);

                if replicas > 0 && ready == replicas {
                    return Ok(());
                }
            }

            sleep(Duration::from_secs(BUILD_CHECK_INTERVAL_SECONDS)).await;
            waited += BUILD_CHECK_INTERVAL_SECONDS;
        }

        Err(ComponentError::gateway(format!(
            "Build of '{}' did not become ready within {} seconds",
            deployment_name, BUILD_MAX_WAIT_SECONDS
        )))
    }

    fn parse_descriptor(configmap: &ConfigMap) -> Result<ComponentDescriptor, ComponentError> {
        let data = configmap
            .data
            .as_ref()
            .and_then(|d| d.get(DESCRIPTOR_FILE_NAME))
            .ok_or_else(|| {
                ComponentError::gateway(format!(
                    "ConfigMap '{}' has no '{}' entry",
                    configmap.metadata.name.as_deref().unwrap_or("unknown"),
                    DESCRIPTOR_FILE_NAME
                ))
            })?;

        Ok(serde_yaml::from_str(data)?)
    }
}

#[async_trait::async_trait]
impl ClusterGateway for KubeClusterGateway {
    async fn catalog_exists(&self, component_type: &str) -> Result<bool, ComponentError> {
        Ok(catalog::exists(component_type))
    }

    async fn component_exists(
        &self,
        name: &str,
        application: &str,
        _project: &str,
    ) -> Result<bool, ComponentError> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);

        match api.get(&Self::descriptor_name(application, name)).await {
            Ok(_) => Ok(true),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(false),
            Err(e) => Err(ComponentError::Gateway(e.to_string())),
        }
    }

    async fn create_from_git(
        &self,
        name: &str,
        component_type: &str,
        url: &str,
        application: &str,
    ) -> Result<(), ComponentError> {
        let descriptor = ComponentDescriptor::new(
            name,
            component_type,
            SourceRef::new(SourceKind::Git, url),
            application,
            &self.namespace,
        );
        self.create_component(descriptor).await
    }

    async fn create_from_path(
        &self,
        name: &str,
        component_type: &str,
        path: &str,
        application: &str,
        kind: SourceKind,
    ) -> Result<(), ComponentError> {
        let descriptor = ComponentDescriptor::new(
            name,
            component_type,
            SourceRef::new(kind, path),
            application,
            &self.namespace,
        );
        self.create_component(descriptor).await
    }

    async fn build(
        &self,
        name: &str,
        application: &str,
        wait: bool,
        show_progress: bool,
    ) -> Result<(), ComponentError> {
        let deployment_name = Self::deployment_name(application, name);
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), &self.namespace);

        // Rolling the pod template annotation forces a fresh rollout that
        // picks up the current source reference.
        let build_id = chrono::Utc::now().to_rfc3339();
        let patch = serde_json::json!({
            "spec": {
                "template": {
                    "metadata": {
                        "annotations": {
                            ANNOTATION_BUILD_ID: build_id,
                        }
                    }
                }
            }
        });

        api.patch(
            &deployment_name,
            &kube::api::PatchParams::default(),
            &kube::api::Patch::Merge(&patch),
        )
        .await?;

        if show_progress {
            println!("✓ Build triggered for component '{}'", name);
        }

        if wait {
            if show_progress {
                println!("Waiting for build of '{}' to complete...", name);
            }
            self.wait_for_ready(&deployment_name).await?;
            if show_progress {
                println!("✓ Build of '{}' completed", name);
            }
        }

        Ok(())
    }

    async fn set_current(
        &self,
        name: &str,
        application: &str,
        _project: &str,
    ) -> Result<(), ComponentError> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);
        let config_name = Self::active_config_name(application);

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), application.to_string());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_ACTIVE_VALUE.to_string());

        let mut data = BTreeMap::new();
        data.insert(ACTIVE_COMPONENT_KEY.to_string(), name.to_string());

        let configmap = ConfigMap {
            metadata: ObjectMeta {
                name: Some(config_name.clone()),
                namespace: Some(self.namespace.clone()),
                labels: Some(labels),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };

        match api.get(&config_name).await {
            Ok(_) => {
                let patch_params = kube::api::PatchParams::apply(FIELD_MANAGER).force();
                let patch = serde_json::to_value(&configmap)?;
                api.patch(
                    &config_name,
                    &patch_params,
                    &kube::api::Patch::Apply(patch),
                )
                .await?;
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                let pp = kube::api::PostParams::default();
                api.create(&pp, &configmap).await?;
            }
            Err(e) => return Err(ComponentError::Gateway(e.to_string())),
        }

        Ok(())
    }

    async fn current_component(
        &self,
        application: &str,
        _project: &str,
    ) -> Result<Option<String>, ComponentError> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);

        match api.get(&Self::active_config_name(application)).await {
            Ok(cm) => Ok(cm
                .data
                .and_then(|d| d.get(ACTIVE_COMPONENT_KEY).cloned())),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(None),
            Err(e) => Err(ComponentError::Gateway(e.to_string())),
        }
    }

    async fn list_components(
        &self,
        application: &str,
        project: &str,
    ) -> Result<Vec<ComponentInfo>, ComponentError> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);
        let label_selector = format!(
            "{}={},{}={}",
            LABEL_TYPE, LABEL_TYPE_VALUE, LABEL_APP, application
        );
        let lp = kube::api::ListParams::default().labels(&label_selector);

        let configmaps = api
            .list(&lp)
            .await
            .map_err(|e| ComponentError::Gateway(e.to_string()))?;

        let active = self.current_component(application, project).await?;

        let mut components = Vec::new();
        for cm in configmaps.items {
            let descriptor = Self::parse_descriptor(&cm)?;
            let deployment = self
                .get_deployment(&Self::deployment_name(application, &descriptor.name))
                .await
                .ok();

            let replicas = deployment
                .as_ref()
                .and_then(|d| d.spec.as_ref())
                .and_then(|s| s.replicas)
                .unwrap_or(0) as u32;
            let ready_replicas = deployment
                .as_ref()
                .and_then(|d| d.status.as_ref())
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0) as u32;

            let is_active = active.as_deref() == Some(descriptor.name.as_str());
            components.push(ComponentInfo {
                descriptor,
                replicas,
                ready_replicas,
                active: is_active,
            });
        }

        components.sort_by(|a, b| a.descriptor.name.cmp(&b.descriptor.name));
        Ok(components)
    }

    async fn get_component(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<ComponentInfo, ComponentError> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);

        let cm = api
            .get(&Self::descriptor_name(application, name))
            .await
            .map_err(|e| match e {
                kube::Error::Api(ae) if ae.code == 404 => ComponentError::gateway(format!(
                    "Component '{}' not found in application '{}' (project '{}')",
                    name, application, project
                )),
                other => ComponentError::Gateway(other.to_string()),
            })?;

        let descriptor = Self::parse_descriptor(&cm)?;
        let deployment = self
            .get_deployment(&Self::deployment_name(application, name))
            .await
            .ok();

        let replicas = deployment
            .as_ref()
            .and_then(|d| d.spec.as_ref())
            .and_then(|s| s.replicas)
            .unwrap_or(0) as u32;
        let ready_replicas = deployment
            .as_ref()
            .and_then(|d| d.status.as_ref())
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0) as u32;

        let active = self.current_component(application, project).await?;

        Ok(ComponentInfo {
            active: active.as_deref() == Some(name),
            descriptor,
            replicas,
            ready_replicas,
        })
    }

    async fn delete_component(
        &self,
        name: &str,
        application: &str,
        project: &str,
    ) -> Result<(), ComponentError> {
        if !self.component_exists(name, application, project).await? {
            return Err(ComponentError::gateway(format!(
                "Component '{}' not found in application '{}' (project '{}')",
                name, application, project
            )));
        }

        let cm_api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);
        let dep_api: Api<Deployment> = Api::namespaced(self.client.clone(), &self.namespace);
        let dp = kube::api::DeleteParams::default();

        let _ = dep_api
            .delete(&Self::deployment_name(application, name), &dp)
            .await;
        cm_api
            .delete(&Self::descriptor_name(application, name), &dp)
            .await?;

        // Drop the active marker if it still points at the deleted component.
        if self.current_component(application, project).await?.as_deref() == Some(name) {
            let _ = cm_api
                .delete(&Self::active_config_name(application), &dp)
                .await;
        }

        Ok(())
    }

    fn catalog(&self) -> &'static [CatalogEntry] {
        catalog::CATALOG
    }
}
