// ==========================================
// footy-stats - import store interface
// ==========================================
// The single query-and-mutate seam the import pipeline depends on.
// Passed in explicitly so the pipeline runs unchanged against the
// SQLite store or an in-memory/mock store in tests.
// ==========================================

use crate::domain::import::{ImportSchema, ProcessedRecord, RefEntity, RefPair};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportStore trait
// ==========================================
// Implementors: SqliteStore (production), mock stores (tests)
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Availability probe, called once before any row processing
    ///
    /// # Returns
    /// - Ok(()): the store is reachable
    /// - Err: connection/configuration problem, aborts the run
    async fn ping(&self) -> RepositoryResult<()>;

    /// Current {id, name} pairs of a referenced entity
    ///
    /// Fetched once per run; the resolver builds its lookup from the
    /// returned set and never queries again.
    async fn list_refs(&self, entity: RefEntity) -> RepositoryResult<Vec<RefPair>>;

    /// Apply one batch as a single transactional upsert
    ///
    /// # Parameters
    /// - schema: kind contract (target table, conflict target)
    /// - records: valid-only records, input order preserved
    /// - skip_duplicates: true keeps existing rows on natural-key
    ///   conflict, false overwrites their non-key columns
    ///
    /// # Returns
    /// - Ok(count): rows applied (the whole batch, atomically)
    /// - Err: the store rejected the batch as a unit
    async fn upsert_batch(
        &self,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize>;
}
