// Dweve Smithy Tools - Smithy IDL language support
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Server configuration, read from the client's `initializationOptions`.
//!
//! ```json
//! {
//!   "maxDocumentSize": 10485760,
//!   "fileExtension": "smithy",
//!   "scanWorkspace": true
//! }
//! ```
//!
//! Every field is optional. Options that fail to deserialize are ignored
//! as a whole and the defaults are used.

use crate::constants::{DEFAULT_FILE_EXTENSION, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_SCAN_WORKSPACE};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Documents larger than this many bytes are not analysed.
    pub max_document_size: usize,
    /// Extension, without the dot, of files found by the workspace scan.
    pub file_extension: String,
    /// Scan workspace roots after initialization.
    pub scan_workspace: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            scan_workspace: DEFAULT_SCAN_WORKSPACE,
        }
    }
}

impl ServerConfig {
    pub fn from_initialization_options(options: Option<Value>) -> Self {
        let Some(options) = options.filter(|value| !value.is_null()) else {
            return Self::default();
        };
        match serde_json::from_value::<Self>(options) {
            Ok(mut config) => {
                config.file_extension = config.file_extension.trim_start_matches('.').to_string();
                config
            }
            Err(err) => {
                warn!("Ignoring invalid initialization options: {}", err);
                Self::default()
            }
        }
    }

    /// True for paths with the configured extension.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.file_extension.as_str())
    }
}
