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

//! The `tower-lsp` language server.

use crate::config::ServerConfig;
use crate::constants::{BYTES_PER_MEGABYTE, SERVER_NAME};
use crate::document_manager::{DocumentManager, Publication};
use crate::error::LspError;
use crate::uri::uri_to_path;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

const WATCHED_FILES_METHOD: &str = "workspace/didChangeWatchedFiles";
const WATCHED_FILES_REGISTRATION: &str = "smithy-watched-files";

pub struct SmithyLanguageServer {
    client: Client,
    documents: Arc<DocumentManager>,
    config: RwLock<ServerConfig>,
    roots: RwLock<Vec<PathBuf>>,
}

impl SmithyLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentManager::default()),
            config: RwLock::new(ServerConfig::default()),
            roots: RwLock::new(Vec::new()),
        }
    }

    async fn publish(&self, publications: Vec<Publication>) {
        publish_all(&self.client, publications).await;
    }

    async fn report(&self, uri: &Url, err: LspError) {
        match err {
            LspError::DocumentTooLarge { size, max } => {
                error!(
                    "Document size limit exceeded: {} has {} bytes > {} bytes maximum",
                    uri, size, max
                );
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!(
                            "Document too large: {} bytes exceeds maximum of {} bytes ({} MB)",
                            size,
                            max,
                            max / BYTES_PER_MEGABYTE
                        ),
                    )
                    .await;
            }
            err => warn!("Could not analyse {}: {}", uri, err),
        }
    }

    async fn register_file_watcher(&self, extension: &str) {
        let registration = match watcher_registration(extension) {
            Ok(registration) => registration,
            Err(err) => {
                error!("Could not build file watcher registration: {}", err);
                return;
            }
        };
        if let Err(err) = self.client.register_capability(vec![registration]).await {
            warn!("Client refused file watcher registration: {}", err);
        }
    }
}

async fn publish_all(client: &Client, publications: Vec<Publication>) {
    for publication in publications {
        debug!(
            "Publishing {} diagnostics for {}",
            publication.diagnostics.len(),
            publication.uri
        );
        client
            .publish_diagnostics(publication.uri, publication.diagnostics, None)
            .await;
    }
}

/// Workspace folders, or the root URI when the client sends no folders.
pub fn workspace_roots(params: &InitializeParams) -> Vec<PathBuf> {
    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();
    let uris: Vec<&Url> = match &params.workspace_folders {
        Some(folders) if !folders.is_empty() => folders.iter().map(|f| &f.uri).collect(),
        _ => root_uri.into_iter().collect(),
    };
    uris.into_iter()
        .filter_map(|uri| match uri_to_path(uri) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Ignoring workspace root: {}", err);
                None
            }
        })
        .collect()
}

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                ..Default::default()
            },
        )),
        definition_provider: Some(OneOf::Left(true)),
        ..Default::default()
    }
}

/// Dynamic registration for disk changes of model files.
pub fn watcher_registration(extension: &str) -> serde_json::Result<Registration> {
    let options = DidChangeWatchedFilesRegistrationOptions {
        watchers: vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String(format!("**/*.{}", extension)),
            kind: None,
        }],
    };
    Ok(Registration {
        id: WATCHED_FILES_REGISTRATION.to_string(),
        method: WATCHED_FILES_METHOD.to_string(),
        register_options: Some(serde_json::to_value(options)?),
    })
}

#[tower_lsp::async_trait]
impl LanguageServer for SmithyLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Smithy Language Server initializing");

        let config =
            ServerConfig::from_initialization_options(params.initialization_options.clone());
        self.documents.set_max_document_size(config.max_document_size);
        let roots = workspace_roots(&params);
        info!("Workspace roots: {:?}", roots);
        *self.config.write() = config;
        *self.roots.write() = roots;

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Smithy Language Server initialized");

        let config = self.config.read().clone();
        self.register_file_watcher(&config.file_extension).await;
        if !config.scan_workspace {
            return;
        }

        let roots = self.roots.read().clone();
        let documents = Arc::clone(&self.documents);
        let documents_after = Arc::clone(&self.documents);
        let client = self.client.clone();
        tokio::spawn(async move {
            let extension = config.file_extension;
            let scan = tokio::task::spawn_blocking(move || documents.scan(&roots, &extension));
            let publications = match scan.await {
                Ok(publications) => publications,
                Err(err) => {
                    error!("Workspace scan failed: {}", err);
                    return;
                }
            };
            // Documents may have changed since the scan released the lock.
            let current = publications
                .iter()
                .filter_map(|publication| documents_after.publication(&publication.uri))
                .collect();
            publish_all(&client, current).await;
        });
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Smithy Language Server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        info!(
            "Document opened: {} ({} bytes)",
            uri,
            params.text_document.text.len()
        );
        match self.documents.open(&uri, &params.text_document.text) {
            Ok(publications) => self.publish(publications).await,
            Err(err) => self.report(&uri, err).await,
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            warn!("Document change event for {} had no content changes", uri);
            return;
        };
        match self.documents.change(&uri, &change.text) {
            Ok(publications) => self.publish(publications).await,
            Err(err) => self.report(&uri, err).await,
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);
        let documents = Arc::clone(&self.documents);
        match tokio::task::spawn_blocking(move || documents.close(&uri)).await {
            Ok(publications) => self.publish(publications).await,
            Err(err) => error!("Closing document failed: {}", err),
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let config = self.config.read().clone();
        for change in params.changes {
            let is_model = uri_to_path(&change.uri)
                .map(|path| config.matches_extension(&path))
                .unwrap_or(false);
            if !is_model {
                continue;
            }

            let publications = if change.typ == FileChangeType::DELETED {
                self.documents.delete(&change.uri)
            } else {
                let documents = Arc::clone(&self.documents);
                let uri = change.uri.clone();
                match tokio::task::spawn_blocking(move || documents.load_from_disk(&uri)).await {
                    Ok(Ok(publications)) => publications,
                    Ok(Err(err)) => {
                        self.report(&change.uri, err).await;
                        continue;
                    }
                    Err(err) => {
                        error!("Reading {} failed: {}", change.uri, err);
                        continue;
                    }
                }
            };
            self.publish(publications).await;
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!(
            "Definition request for {} at {}:{}",
            uri, position.line, position.character
        );
        Ok(self
            .documents
            .definition(uri, position)
            .map(GotoDefinitionResponse::Scalar))
    }
}
