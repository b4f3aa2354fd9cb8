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

//! Server constants and defaults.
//!
//! # Organization
//!
//! - **Memory Limits**: document size constraints
//! - **Workspace**: file discovery defaults
//! - **LSP Protocol**: protocol-facing names and values

// ============================================================================
// Memory Limits
// ============================================================================

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// Default maximum document size in bytes (50 MB).
///
/// **Rationale**: Smithy models are hand-written and rarely exceed a few
/// hundred kilobytes. Each change reparses the whole file on the event loop,
/// so a pathological file blocks every other request while it is analysed.
///
/// **Memory Usage**: A 50 MB document keeps its rope, the decoded `String`
/// handed to the parser and one token per reference alive at once.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 50 * BYTES_PER_MEGABYTE;

// ============================================================================
// Workspace
// ============================================================================

/// File extension of Smithy IDL files, without the dot.
pub const DEFAULT_FILE_EXTENSION: &str = "smithy";

/// Whether `initialized` scans the workspace roots by default.
pub const DEFAULT_SCAN_WORKSPACE: bool = true;

// ============================================================================
// LSP Protocol Constants
// ============================================================================

/// `source` field of every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "smithy";

/// Server name reported in `initialize`.
pub const SERVER_NAME: &str = "smithy-lsp";
