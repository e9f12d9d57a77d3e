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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, ComponentError>;

#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("The source can be either --binary or --local or --git")]
    ConflictingSource,

    #[error("Invalid component name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid component type: {component_type}\nRun 'kompo catalog' to see a list of supported components")]
    UnknownType { component_type: String },

    #[error("Component with the name '{name}' already exists in application '{application}' (project '{project}')")]
    DuplicateName {
        name: String,
        application: String,
        project: String,
    },

    #[error("Unable to resolve source path '{path}': {reason}")]
    PathResolution { path: String, reason: String },

    #[error("Source path '{path}' is not a directory, please provide a path to a directory")]
    NotADirectory { path: String },

    #[error("Cluster error: {0}")]
    Gateway(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for ComponentError {
    fn from(err: kube::Error) -> Self {
        ComponentError::Gateway(err.to_string())
    }
}

impl ComponentError {
    pub fn config(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn gateway(context: impl Into<String>) -> Self {
        Self::Gateway(context.into())
    }

    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn path_resolution(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathResolution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
