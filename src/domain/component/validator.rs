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

use crate::shared::error::{ComponentError, Result};
use regex::Regex;

// Component names end up as Kubernetes resource names, so they follow
// the DNS-1123 label rules.
const DNS1123_LABEL_PATTERN: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const MAX_NAME_LENGTH: usize = 63;

pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ComponentError::invalid_name(name, "name must not be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ComponentError::invalid_name(
            name,
            format!("name must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }

    let pattern = Regex::new(DNS1123_LABEL_PATTERN)
        .map_err(|e| ComponentError::config(format!("invalid name pattern: {}", e)))?;

    if !pattern.is_match(name) {
        return Err(ComponentError::invalid_name(
            name,
            "name must consist of lowercase alphanumeric characters or '-', \
             and must start and end with an alphanumeric character",
        ));
    }

    Ok(())
}
