// ==========================================
// footy-stats - import API
// ==========================================
// Wires configuration, store and pipeline together for one call.
// The summary it returns is the import output contract; fatal
// problems (structural CSV errors, unreachable store) surface as
// ApiError instead.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::import::{ImportKind, ImportOptions, ImportSummary};
use crate::importer::ImportOrchestrator;
use crate::repository::SqliteStore;
use crate::templates;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi {
    config: AppConfig,
}

impl ImportApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run options pre-filled with the configured batch size
    pub fn default_options(&self) -> ImportOptions {
        ImportOptions {
            batch_size: self.config.batch_size,
            ..ImportOptions::default()
        }
    }

    /// Import CSV text for one entity kind
    ///
    /// # Parameters
    /// - kind: importable entity the CSV describes
    /// - csv_text: raw CSV including the header row
    /// - options: dry_run / skip_duplicates / batch_size
    ///
    /// # Returns
    /// - Ok(ImportSummary): the run completed (errors, if any, are in
    ///   the summary)
    /// - Err(ApiError): configuration/store failure or structurally
    ///   unreadable input
    pub async fn import(
        &self,
        kind: ImportKind,
        csv_text: &str,
        options: &ImportOptions,
    ) -> ApiResult<ImportSummary> {
        info!(kind = %kind, dry_run = options.dry_run, "import requested");

        let store = SqliteStore::new(&self.config.database_path)
            .map_err(|e| ApiError::ConfigurationError(format!("store init failed: {e}")))?;

        let orchestrator = ImportOrchestrator::new(Arc::new(store));
        let summary = orchestrator.run(kind, csv_text, options).await?;

        Ok(summary)
    }

    /// Read-only CSV header template for one kind
    pub fn template(&self, kind: ImportKind) -> &'static str {
        templates::header_template(kind)
    }
}
