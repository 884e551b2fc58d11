// ==========================================
// footy-stats - import orchestrator
// ==========================================
// Entry point of the pipeline. Sequences
//   parse -> resolve -> validate -> (dry-run stop | batch import)
// and assembles the summary. A structurally unreadable input is the
// only mid-run abort; everything downstream degrades to per-row or
// per-batch entries in the summary's error list.
// ==========================================

use crate::domain::import::{
    ImportKind, ImportOptions, ImportSummary, ProcessedRecord, RowIssue,
};
use crate::importer::batch_importer::BatchImporter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_parser::RecordParser;
use crate::importer::reference_resolver::{ReferenceResolver, ReferenceTable};
use crate::importer::validator::Validator;
use crate::repository::store::ImportStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ImportOrchestrator
// ==========================================
pub struct ImportOrchestrator {
    store: Arc<dyn ImportStore>,
    parser: RecordParser,
}

impl ImportOrchestrator {
    pub fn new(store: Arc<dyn ImportStore>) -> Self {
        Self {
            store,
            parser: RecordParser::new(),
        }
    }

    pub fn with_parser(store: Arc<dyn ImportStore>, parser: RecordParser) -> Self {
        Self { store, parser }
    }

    /// Run one import
    ///
    /// # Parameters
    /// - kind: which entity the CSV describes (explicit, never sniffed)
    /// - text: raw CSV, header row required
    /// - options: dry_run / skip_duplicates / batch_size
    ///
    /// # Returns
    /// - Ok(ImportSummary): the run completed; non-fatal problems are
    ///   inside `errors` (row issues first, then batch errors)
    /// - Err(ImportError): store unreachable or structurally
    ///   unreadable input
    #[instrument(skip(self, text, options), fields(kind = %kind))]
    pub async fn run(
        &self,
        kind: ImportKind,
        text: &str,
        options: &ImportOptions,
    ) -> ImportResult<ImportSummary> {
        let schema = kind.schema();

        // === store availability, before any row processing ===
        self.store
            .ping()
            .await
            .map_err(|e| ImportError::StoreUnavailable(e.to_string()))?;

        // === step 1: parse ===
        let raw_records = self.parser.parse(text)?;
        let total_rows = raw_records.len();
        info!(entity = schema.entity, total_rows, "parse complete");

        // === step 2: reference data ===
        let table = match schema.reference_entity() {
            Some(entity) => {
                let pairs = self
                    .store
                    .list_refs(entity)
                    .await
                    .map_err(|e| ImportError::StoreUnavailable(e.to_string()))?;

                if pairs.is_empty() {
                    // one top-level advisory instead of per-row noise
                    warn!(entity = entity.label(), "reference table is empty");
                    return Ok(ImportSummary {
                        message: format!("imported 0 of {total_rows} row(s)"),
                        records_processed: 0,
                        records_imported: 0,
                        errors: vec![format!(
                            "no {} found — create some first",
                            entity.plural()
                        )],
                    });
                }

                debug!(entity = entity.label(), refs = pairs.len(), "reference table built");
                Some(ReferenceTable::build(entity, &pairs))
            }
            None => None,
        };

        // === step 3: resolve ===
        let resolver = ReferenceResolver::new(schema, table.as_ref());
        let mut resolved: Vec<ProcessedRecord> = Vec::with_capacity(total_rows);
        let mut issues: Vec<RowIssue> = Vec::new();
        for raw in &raw_records {
            match resolver.resolve(raw) {
                Ok(record) => resolved.push(record),
                Err(row_issues) => issues.extend(row_issues),
            }
        }
        info!(resolved = resolved.len(), excluded = total_rows - resolved.len(), "resolution complete");

        // === step 4: validate ===
        let mut valid: Vec<ProcessedRecord> = Vec::with_capacity(resolved.len());
        for record in resolved {
            let record_issues = Validator::validate(&record, schema);
            if record_issues.is_empty() {
                valid.push(record);
            } else {
                issues.extend(record_issues);
            }
        }
        let records_processed = valid.len();
        info!(records_processed, issues = issues.len(), "validation complete");

        let mut errors: Vec<String> = issues.iter().map(|i| i.to_string()).collect();

        // === step 5: dry-run short circuit ===
        if options.dry_run {
            info!(records_processed, "dry run, skipping store mutation");
            return Ok(ImportSummary {
                message: format!(
                    "dry run: {records_processed} of {total_rows} row(s) valid; nothing written"
                ),
                records_processed,
                records_imported: 0,
                errors,
            });
        }

        // === step 6: batch import ===
        let importer =
            BatchImporter::new(self.store.as_ref(), options.batch_size, options.skip_duplicates);
        let report = importer.import(schema, &valid).await;
        errors.extend(report.errors);

        let summary = ImportSummary {
            message: format!("imported {} of {} row(s)", report.imported, total_rows),
            records_processed,
            records_imported: report.imported,
            errors,
        };

        info!(
            imported = summary.records_imported,
            processed = summary.records_processed,
            errors = summary.errors.len(),
            "import complete"
        );

        Ok(summary)
    }
}
