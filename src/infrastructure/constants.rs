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

/// Machine-readable output identity
pub const MACHINE_OUTPUT_KIND_ERROR: &str = "Error";
pub const MACHINE_OUTPUT_API_VERSION: &str = "kompo.dev/v1alpha1";

/// Scoping defaults
pub const DEFAULT_APPLICATION: &str = "app";
pub const DEFAULT_PROJECT: &str = "default";

/// Resource labels
pub const LABEL_APP: &str = "app";
pub const LABEL_COMPONENT: &str = "component";
pub const LABEL_TYPE: &str = "type";
pub const LABEL_TYPE_VALUE: &str = "kompo-component";
pub const LABEL_TYPE_ACTIVE_VALUE: &str = "kompo-active";

/// Resource annotations
pub const ANNOTATION_COMPONENT_TYPE: &str = "kompo.dev/component-type";
pub const ANNOTATION_SOURCE_KIND: &str = "kompo.dev/source-kind";
pub const ANNOTATION_SOURCE_LOCATION: &str = "kompo.dev/source-location";
pub const ANNOTATION_BUILD_ID: &str = "kompo.dev/build-id";

/// Resource name suffixes
pub const SUFFIX_DESCRIPTOR: &str = "-component";
pub const SUFFIX_ACTIVE: &str = "-current";

/// Descriptor ConfigMap payload
pub const DESCRIPTOR_FILE_NAME: &str = "component.yaml";
pub const ACTIVE_COMPONENT_KEY: &str = "component";

/// Container settings
pub const CONTAINER_NAME: &str = "component";
pub const ENV_SOURCE_KIND: &str = "KOMPO_SOURCE_KIND";
pub const ENV_SOURCE_LOCATION: &str = "KOMPO_SOURCE_LOCATION";

/// Build wait configuration
pub const BUILD_MAX_WAIT_SECONDS: u64 = 300;
pub const BUILD_CHECK_INTERVAL_SECONDS: u64 = 5;

/// Field manager for server-side apply
pub const FIELD_MANAGER: &str = "kompo-cli";

/// Release check
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/kompo-dev/kompo/releases/latest";
pub const RELEASE_CHECK_TIMEOUT_SECONDS: u64 = 5;

/// Preference file
pub const PREFERENCE_DIR: &str = ".kompo";
pub const PREFERENCE_FILE: &str = "preference.toml";
