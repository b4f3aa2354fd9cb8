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

//! Workspace-level behaviour of the document manager against real files.

use smithy_lsp::uri::path_to_uri;
use smithy_lsp::{DocumentManager, Publication};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower_lsp::lsp_types::{Position, Url};

const SERVICE: &str = r#"$version: "2"
namespace example.weather

service Weather {
    version: "2006-03-01"
    operations: [GetForecast]
}
"#;

const OPERATION: &str = r#"$version: "2"
namespace example.weather

operation GetForecast {
    input: GetForecastInput
}

structure GetForecastInput {
    city: String
}
"#;

fn write(dir: &Path, name: &str, text: &str) -> Url {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path_to_uri(&path).unwrap()
}

fn diagnostics_for<'a>(publications: &'a [Publication], uri: &Url) -> Option<&'a Publication> {
    publications.iter().find(|publication| &publication.uri == uri)
}

#[test]
fn test_scan_resolves_across_files() {
    let dir = TempDir::new().unwrap();
    let service = write(dir.path(), "model/service.smithy", SERVICE);
    let operation = write(dir.path(), "model/ops/forecast.smithy", OPERATION);
    write(dir.path(), "model/notes.txt", "operation Nope {}");

    let manager = DocumentManager::default();
    let publications = manager.scan(&[dir.path().to_path_buf()], "smithy");

    assert_eq!(publications.len(), 2);
    assert_eq!(manager.len(), 2);
    for uri in [&service, &operation] {
        let publication = diagnostics_for(&publications, uri).unwrap();
        assert!(publication.diagnostics.is_empty(), "{:?}", publication);
    }
}

#[test]
fn test_scan_does_not_overwrite_open_documents() {
    let dir = TempDir::new().unwrap();
    let service = write(dir.path(), "service.smithy", SERVICE);

    let manager = DocumentManager::default();
    let opened = manager.open(&service, SERVICE).unwrap();
    assert_eq!(opened[0].diagnostics.len(), 1);
    assert_eq!(opened[0].diagnostics[0].message, "Unknown shape: GetForecast");

    fs::write(dir.path().join("service.smithy"), "garbage {").unwrap();
    write(dir.path(), "forecast.smithy", OPERATION);
    let publications = manager.scan(&[dir.path().to_path_buf()], "smithy");

    let publication = diagnostics_for(&publications, &service).unwrap();
    assert!(publication.diagnostics.is_empty());
    assert!(manager.is_open(&service));
}

#[test]
fn test_close_reloads_from_disk() {
    let dir = TempDir::new().unwrap();
    let operation = write(dir.path(), "forecast.smithy", OPERATION);

    let manager = DocumentManager::default();
    manager.open(&operation, OPERATION).unwrap();
    let publications = manager.close(&operation);

    assert_eq!(publications[0].uri, operation);
    assert!(publications[0].diagnostics.is_empty());
    assert!(!manager.is_open(&operation));
    assert!(manager.contains(&operation));
}

#[test]
fn test_watched_file_changes() {
    let dir = TempDir::new().unwrap();
    let service = write(dir.path(), "service.smithy", SERVICE);
    let operation = write(dir.path(), "forecast.smithy", OPERATION);

    let manager = DocumentManager::default();
    manager.open(&service, SERVICE).unwrap();

    let publications = manager.load_from_disk(&operation).unwrap();
    assert_eq!(publications[0].uri, operation);
    let service_update = diagnostics_for(&publications, &service).unwrap();
    assert!(service_update.diagnostics.is_empty());

    fs::remove_file(dir.path().join("forecast.smithy")).unwrap();
    let publications = manager.delete(&operation);
    assert!(diagnostics_for(&publications, &operation).is_none());
    let service_update = diagnostics_for(&publications, &service).unwrap();
    assert_eq!(service_update.diagnostics.len(), 1);
    assert!(!manager.contains(&operation));
}

#[test]
fn test_disk_changes_skip_open_documents() {
    let dir = TempDir::new().unwrap();
    let service = write(dir.path(), "service.smithy", SERVICE);

    let manager = DocumentManager::default();
    manager.open(&service, "namespace example.weather\n").unwrap();
    assert!(manager.load_from_disk(&service).unwrap().is_empty());
    assert_eq!(manager.diagnostics(&service), Some(Vec::new()));
}

#[test]
fn test_missing_watched_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let uri = path_to_uri(&dir.path().join("gone.smithy")).unwrap();
    let manager = DocumentManager::default();
    assert!(manager.load_from_disk(&uri).is_err());
    assert!(manager.is_empty());
}

#[test]
fn test_definition_across_scanned_files() {
    let dir = TempDir::new().unwrap();
    let service = write(dir.path(), "service.smithy", SERVICE);
    let operation = write(dir.path(), "forecast.smithy", OPERATION);

    let manager = DocumentManager::default();
    manager.scan(&[dir.path().to_path_buf()], "smithy");

    // `GetForecast` inside `operations: [GetForecast]`
    let location = manager.definition(&service, Position::new(5, 20)).unwrap();
    assert_eq!(location.uri, operation);
    assert_eq!(location.range.start, Position::new(3, 10));
    assert_eq!(location.range.end, Position::new(3, 21));
}
