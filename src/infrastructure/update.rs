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

//! Best-effort check for a newer released version.
//!
//! The check runs concurrently with the main command and its result is
//! read with a zero-wait poll just before normal termination. It never
//! gates the main flow or affects the exit status.

use crate::infrastructure::constants::{LATEST_RELEASE_URL, RELEASE_CHECK_TIMEOUT_SECONDS};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct ReleaseInfo {
    tag_name: String,
}

/// Spawn the release check. The receiver yields a human-readable notice
/// when a newer release exists; it is dropped silently otherwise.
pub fn spawn_release_check() -> oneshot::Receiver<String> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        match fetch_latest_release().await {
            Ok(Some(message)) => {
                let _ = tx.send(message);
            }
            Ok(None) => {}
            Err(e) => debug!("Could not fetch the latest release information: {}", e),
        }
    });

    rx
}

async fn fetch_latest_release() -> Result<Option<String>, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(RELEASE_CHECK_TIMEOUT_SECONDS))
        .user_agent(format!("kompo/{}", CURRENT_VERSION))
        .build()?;

    let release: ReleaseInfo = client
        .get(LATEST_RELEASE_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let latest = release.tag_name.trim_start_matches('v');
    if is_newer(latest, CURRENT_VERSION) {
        Ok(Some(format!(
            "---\nA newer version of kompo is available: v{} (you are running v{})\nUpdate at https://github.com/kompo-dev/kompo/releases",
            latest, CURRENT_VERSION
        )))
    } else {
        Ok(None)
    }
}

// Plain numeric comparison of dotted versions; non-numeric segments
// compare as zero.
fn is_newer(candidate: &str, current: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.parse::<u64>().unwrap_or(0))
            .collect()
    };

    let candidate = parse(candidate);
    let current = parse(current);
    let len = candidate.len().max(current.len());

    for i in 0..len {
        let a = candidate.get(i).copied().unwrap_or(0);
        let b = current.get(i).copied().unwrap_or(0);
        if a != b {
            return a > b;
        }
    }
    false
}
