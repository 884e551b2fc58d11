// ==========================================
// footy-stats - batch importer
// ==========================================
// Partitions validated records into consecutive fixed-size batches
// and applies them one at a time, in order. A rejected batch is
// recorded and skipped; the remaining batches still run, so one bad
// batch never sinks the whole import.
// ==========================================

use crate::domain::import::{ImportSchema, ProcessedRecord};
use crate::repository::store::ImportStore;
use tracing::{debug, warn};

// ==========================================
// BatchReport
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Rows in batches the store accepted
    pub imported: usize,
    /// One message per rejected batch, in batch order
    pub errors: Vec<String>,
    pub batches_attempted: usize,
}

// ==========================================
// BatchImporter
// ==========================================
pub struct BatchImporter<'a> {
    store: &'a dyn ImportStore,
    batch_size: usize,
    skip_duplicates: bool,
}

impl<'a> BatchImporter<'a> {
    pub fn new(store: &'a dyn ImportStore, batch_size: usize, skip_duplicates: bool) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
            skip_duplicates,
        }
    }

    /// Apply all records batch by batch
    ///
    /// Batches run strictly sequentially: ordering in the report stays
    /// deterministic and the store never sees more than one in-flight
    /// write from a single run.
    pub async fn import(
        &self,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for (idx, chunk) in records.chunks(self.batch_size).enumerate() {
            let batch_no = idx + 1;
            report.batches_attempted += 1;

            match self
                .store
                .upsert_batch(schema, chunk, self.skip_duplicates)
                .await
            {
                Ok(count) => {
                    debug!(batch_no, rows = count, table = schema.table, "batch applied");
                    report.imported += count;
                }
                Err(e) => {
                    let first = chunk.first().map(|r| r.row_number()).unwrap_or(0);
                    let last = chunk.last().map(|r| r.row_number()).unwrap_or(0);
                    warn!(batch_no, error = %e, "batch rejected, continuing");
                    report
                        .errors
                        .push(format!("batch {batch_no} (rows {first}-{last}): {e}"));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::{
        NumField, ProcessedRecord, RefEntity, RefPair, TeamRow, TEAM_SCHEMA,
    };
    use crate::repository::error::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock store: records the size of every batch it sees and fails
    // the configured batch numbers.
    struct MockStore {
        fail_batches: Vec<usize>,
        seen: Mutex<Vec<usize>>,
    }

    impl MockStore {
        fn new(fail_batches: Vec<usize>) -> Self {
            Self {
                fail_batches,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImportStore for MockStore {
        async fn ping(&self) -> RepositoryResult<()> {
            Ok(())
        }

        async fn list_refs(&self, _entity: RefEntity) -> RepositoryResult<Vec<RefPair>> {
            Ok(vec![])
        }

        async fn upsert_batch(
            &self,
            _schema: &ImportSchema,
            records: &[ProcessedRecord],
            _skip_duplicates: bool,
        ) -> RepositoryResult<usize> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(records.len());
            let batch_no = seen.len();
            if self.fail_batches.contains(&batch_no) {
                return Err(RepositoryError::DatabaseQueryError(
                    "simulated rejection".to_string(),
                ));
            }
            Ok(records.len())
        }
    }

    fn team_records(count: usize) -> Vec<ProcessedRecord> {
        (1..=count)
            .map(|i| {
                ProcessedRecord::Team(TeamRow {
                    row_number: i,
                    name: Some(format!("Team {i}")),
                    team_type: Some("club".to_string()),
                    city: None,
                    founded_year: NumField::Missing,
                })
            })
            .collect()
    }

    #[tokio::test]
    async fn test_partitioning_preserves_order_and_size() {
        let store = MockStore::new(vec![]);
        let importer = BatchImporter::new(&store, 2, true);

        let report = importer.import(&TEAM_SCHEMA, &team_records(5)).await;

        assert_eq!(report.imported, 5);
        assert_eq!(report.batches_attempted, 3);
        assert!(report.errors.is_empty());
        assert_eq!(*store.seen.lock().unwrap(), vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_abort_the_rest() {
        let store = MockStore::new(vec![2]);
        let importer = BatchImporter::new(&store, 2, true);

        let report = importer.import(&TEAM_SCHEMA, &team_records(6)).await;

        // batches 1 and 3 applied, batch 2 recorded as an error
        assert_eq!(report.imported, 4);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("batch 2 (rows 3-4)"));
        assert_eq!(report.batches_attempted, 3);
    }

    #[tokio::test]
    async fn test_zero_records_means_zero_batches() {
        let store = MockStore::new(vec![]);
        let importer = BatchImporter::new(&store, 100, true);

        let report = importer.import(&TEAM_SCHEMA, &[]).await;

        assert_eq!(report.imported, 0);
        assert_eq!(report.batches_attempted, 0);
    }
}
