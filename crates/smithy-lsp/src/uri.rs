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

//! Conversions between `file:` URIs and filesystem paths.
//!
//! The codec is symmetric: `uri_to_path(path_to_uri(p)) == p` for every
//! absolute path, with `\` separators normalized to `/`. Windows drive
//! letters are recognised by a `:` in the second position
//! (`C:/model.smithy` <-> `file:///C:/model.smithy`) independent of the host
//! platform, so URIs from any client map to the same document key.

use crate::error::{LspError, LspResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};
use tower_lsp::lsp_types::Url;

/// Characters escaped in the path component.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// True for paths starting with `X:` followed by a separator or nothing.
fn has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
}

/// Decodes a `file:` URI to a path.
pub fn uri_to_path(uri: &Url) -> LspResult<PathBuf> {
    if uri.scheme() != "file" {
        return Err(LspError::InvalidUri(uri.to_string()));
    }
    let decoded = percent_decode_str(uri.path())
        .decode_utf8()
        .map_err(|_| LspError::InvalidUri(uri.to_string()))?;
    let path = match decoded.strip_prefix('/') {
        Some(rest) if has_drive_letter(rest) => rest,
        _ => &*decoded,
    };
    Ok(PathBuf::from(path))
}

/// Encodes an absolute path as a `file:` URI.
pub fn path_to_uri(path: &Path) -> LspResult<Url> {
    let text = path
        .to_str()
        .ok_or_else(|| LspError::InvalidPath(path.to_path_buf()))?
        .replace('\\', "/");
    let absolute = if has_drive_letter(&text) {
        format!("/{}", text)
    } else if text.starts_with('/') {
        text
    } else {
        return Err(LspError::InvalidPath(path.to_path_buf()));
    };
    let encoded = utf8_percent_encode(&absolute, PATH).to_string();
    Url::parse(&format!("file://{}", encoded))
        .map_err(|_| LspError::InvalidPath(path.to_path_buf()))
}

/// The canonical form of a document URI, used as the model key.
///
/// `file:` URIs are passed through the codec so that differently escaped
/// spellings of one path agree. Other URIs are kept as they are.
pub fn normalize_uri(uri: &Url) -> Url {
    uri_to_path(uri)
        .and_then(|path| path_to_uri(&path))
        .unwrap_or_else(|_| uri.clone())
}
