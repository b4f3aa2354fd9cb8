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

//! # Smithy Language Server
//!
//! A Language Server Protocol implementation for the Smithy interface
//! definition language, built on the [`smithy_core`] analysis engine.
//!
//! ## Features
//!
//! - **Diagnostics**: syntax errors, schema mismatches in shape bodies and
//!   trait values, duplicate definitions and unresolved shape references
//! - **Go to Definition**: jump to the shape a reference names, across
//!   every file of the workspace
//! - **Workspace scan**: every model file under the workspace roots takes
//!   part in cross-file resolution, not just the open ones
//!
//! ## Configuration
//!
//! Clients may pass `initializationOptions`:
//!
//! ```json
//! { "maxDocumentSize": 52428800, "fileExtension": "smithy", "scanWorkspace": true }
//! ```
//!
//! ## Usage
//!
//! The `smithy-lsp` binary speaks the protocol over stdin/stdout and logs
//! to stderr. Set `RUST_LOG=smithy_lsp=debug` for detailed logs.

pub mod backend;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod discovery;
pub mod document_manager;
pub mod error;
pub mod uri;

pub use backend::SmithyLanguageServer;
pub use config::ServerConfig;
pub use document_manager::{DocumentManager, Publication};
pub use error::{LspError, LspResult};

/// Server version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
