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

//! Error types for the language server.
//!
//! Analysis itself never fails; these cover the server's own I/O and
//! protocol plumbing. They are logged and, where the user can act on them,
//! shown in the editor. None of them stop the server.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LspError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a file URI: {0}")]
    InvalidUri(String),

    #[error("path cannot be expressed as a file URI: {0}")]
    InvalidPath(PathBuf),

    #[error("document too large: {size} bytes exceeds maximum of {max} bytes")]
    DocumentTooLarge { size: usize, max: usize },
}

/// Result type for server operations.
pub type LspResult<T> = Result<T, LspError>;
