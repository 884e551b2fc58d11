// ==========================================
// footy-stats - reference resolver
// ==========================================
// Resolves user-typed natural keys (team/player names) to canonical
// ids through a lookup built once per run, and produces the typed
// ProcessedRecord for the kind. Rows whose natural key is missing or
// unknown are excluded with a RowIssue; nothing here is fatal.
// ==========================================

use crate::domain::import::{
    DateField, ImportKind, ImportSchema, MatchRow, NumField, PlayerRow, PlayerStatRow,
    ProcessedRecord, RawRecord, RefEntity, RefPair, RowIssue, TeamRow,
};
use std::collections::HashMap;

/// Natural keys are matched after trimming and lower-casing; names are
/// user-typed and must tolerate casing drift.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

// ==========================================
// ReferenceTable
// ==========================================
// Normalized name -> id, built once per run from the current store
// state and read-only afterwards.
pub struct ReferenceTable {
    entity: RefEntity,
    by_name: HashMap<String, String>,
}

impl ReferenceTable {
    /// Build the lookup in time proportional to the reference set.
    /// When two names differ only by case, the first in scan order
    /// wins and later collisions are ignored.
    pub fn build(entity: RefEntity, pairs: &[RefPair]) -> Self {
        let mut by_name = HashMap::with_capacity(pairs.len());
        for pair in pairs {
            let key = normalize(&pair.name);
            if key.is_empty() {
                continue;
            }
            by_name.entry(key).or_insert_with(|| pair.id.clone());
        }
        Self { entity, by_name }
    }

    pub fn entity(&self) -> RefEntity {
        self.entity
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(&normalize(name)).map(|id| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }
}

// ==========================================
// ReferenceResolver
// ==========================================
pub struct ReferenceResolver<'a> {
    schema: &'static ImportSchema,
    table: Option<&'a ReferenceTable>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(schema: &'static ImportSchema, table: Option<&'a ReferenceTable>) -> Self {
        Self { schema, table }
    }

    /// Resolve one raw row into a typed record
    ///
    /// # Returns
    /// - Ok(record): all natural keys resolved; numeric/date fields
    ///   coerced (invalid values preserved for the validator)
    /// - Err(issues): the row is excluded. Every missing natural-key
    ///   field is reported; unknown names contribute at most one
    ///   issue per row (first in field order wins).
    pub fn resolve(&self, raw: &RawRecord) -> Result<ProcessedRecord, Vec<RowIssue>> {
        let mut resolved: HashMap<&'static str, String> = HashMap::new();
        let mut issues = Vec::new();
        let mut not_found: Option<RowIssue> = None;

        for rule in self.schema.references {
            match raw.get(rule.field) {
                None => {
                    issues.push(RowIssue::new(
                        raw.row_number,
                        format!("missing {}", rule.field),
                    ));
                }
                Some(value) => {
                    if not_found.is_some() {
                        continue;
                    }
                    match self.table.and_then(|t| t.resolve(value)) {
                        Some(id) => {
                            resolved.insert(rule.target, id.to_string());
                        }
                        None => {
                            not_found = Some(RowIssue::new(
                                raw.row_number,
                                format!("{} '{}' not found", rule.entity.label(), value),
                            ));
                        }
                    }
                }
            }
        }
        issues.extend(not_found);

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(self.build_record(raw, &resolved))
    }

    fn build_record(
        &self,
        raw: &RawRecord,
        resolved: &HashMap<&'static str, String>,
    ) -> ProcessedRecord {
        let text = |name: &str| raw.get(name).map(str::to_string);

        match self.schema.kind {
            ImportKind::Team => ProcessedRecord::Team(TeamRow {
                row_number: raw.row_number,
                name: text("name"),
                team_type: text("team_type"),
                city: text("city"),
                founded_year: NumField::from_raw(raw.get("founded_year")),
            }),
            ImportKind::Player => ProcessedRecord::Player(PlayerRow {
                row_number: raw.row_number,
                name: text("name"),
                team_id: resolved.get("team_id").cloned(),
                position: text("position"),
                jersey_number: NumField::from_raw(raw.get("jersey_number")),
            }),
            ImportKind::Match => ProcessedRecord::Match(MatchRow {
                row_number: raw.row_number,
                match_date: DateField::from_raw(raw.get("match_date")),
                home_team_id: resolved.get("home_team_id").cloned(),
                away_team_id: resolved.get("away_team_id").cloned(),
                home_score: NumField::from_raw(raw.get("home_score")),
                away_score: NumField::from_raw(raw.get("away_score")),
            }),
            ImportKind::PlayerStat => ProcessedRecord::PlayerStat(PlayerStatRow {
                row_number: raw.row_number,
                player_id: resolved.get("player_id").cloned(),
                match_date: DateField::from_raw(raw.get("match_date")),
                goals: NumField::from_raw(raw.get("goals")),
                assists: NumField::from_raw(raw.get("assists")),
                minutes_played: NumField::from_raw(raw.get("minutes_played")),
                clean_sheet: NumField::from_raw(raw.get("clean_sheet")),
            }),
        }
    }
}
