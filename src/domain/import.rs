// ==========================================
// footy-stats - import data model
// ==========================================
// Everything the CSV pipeline passes between its stages:
// raw rows, per-kind schemas, typed processed records,
// row issues and the summary contract.
// All of it is created fresh per import run and dropped
// once the summary is returned.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default number of records applied per store operation
pub const DEFAULT_BATCH_SIZE: usize = 100;

// ==========================================
// ImportKind - explicit kind selection
// ==========================================
// Each importable entity has its own column contract; the kind is an
// explicit parameter of the run, never sniffed from the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Team,
    Player,
    Match,
    PlayerStat,
}

impl ImportKind {
    pub fn all() -> &'static [ImportKind] {
        &[
            ImportKind::Team,
            ImportKind::Player,
            ImportKind::Match,
            ImportKind::PlayerStat,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Team => "team",
            ImportKind::Player => "player",
            ImportKind::Match => "match",
            ImportKind::PlayerStat => "player_stat",
        }
    }

    /// Parse a CLI/request token; unknown tokens yield None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "team" | "teams" => Some(ImportKind::Team),
            "player" | "players" => Some(ImportKind::Player),
            "match" | "matches" => Some(ImportKind::Match),
            "player_stat" | "player_stats" => Some(ImportKind::PlayerStat),
            _ => None,
        }
    }

    /// Static column contract for this kind
    pub fn schema(&self) -> &'static ImportSchema {
        match self {
            ImportKind::Team => &TEAM_SCHEMA,
            ImportKind::Player => &PLAYER_SCHEMA,
            ImportKind::Match => &MATCH_SCHEMA,
            ImportKind::PlayerStat => &PLAYER_STAT_SCHEMA,
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Reference data
// ==========================================

/// Entity whose {id, name} pairs feed natural-key resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefEntity {
    Team,
    Player,
}

impl RefEntity {
    /// Singular label used in issue messages
    pub fn label(&self) -> &'static str {
        match self {
            RefEntity::Team => "team",
            RefEntity::Player => "player",
        }
    }

    /// Plural label used in the empty-reference advisory
    pub fn plural(&self) -> &'static str {
        match self {
            RefEntity::Team => "teams",
            RefEntity::Player => "players",
        }
    }
}

/// One {id, name} pair from the current store state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefPair {
    pub id: String,
    pub name: String,
}

// ==========================================
// ImportSchema - per-kind column contract
// ==========================================

/// Enumerated-value constraint: field value must be one of `allowed`
#[derive(Debug, Clone, Copy)]
pub struct EnumRule {
    pub field: &'static str,
    pub allowed: &'static [&'static str],
}

/// Natural-key reference: `field` holds a user-typed name that resolves
/// to an id stored under `target` on the processed record
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRule {
    pub field: &'static str,
    pub target: &'static str,
    pub entity: RefEntity,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportSchema {
    pub kind: ImportKind,
    /// Singular entity label for messages
    pub entity: &'static str,
    pub table: &'static str,
    /// CSV column contract, in template order
    pub columns: &'static [&'static str],
    pub required: &'static [&'static str],
    pub enums: &'static [EnumRule],
    pub numeric: &'static [&'static str],
    pub dates: &'static [&'static str],
    pub references: &'static [ReferenceRule],
    /// Natural-key conflict target for the upsert
    pub conflict_target: &'static [&'static str],
}

impl ImportSchema {
    /// Entity the run needs reference data for, if any.
    /// All reference rules of one kind point at the same entity.
    pub fn reference_entity(&self) -> Option<RefEntity> {
        self.references.first().map(|r| r.entity)
    }
}

pub static TEAM_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::Team,
    entity: "team",
    table: "teams",
    columns: &["name", "team_type", "city", "founded_year"],
    required: &["name", "team_type"],
    enums: &[EnumRule {
        field: "team_type",
        allowed: &["internal", "club"],
    }],
    numeric: &["founded_year"],
    dates: &[],
    references: &[],
    conflict_target: &["name"],
};

pub static PLAYER_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::Player,
    entity: "player",
    table: "players",
    columns: &["name", "team_name", "position", "jersey_number"],
    required: &["name"],
    enums: &[EnumRule {
        field: "position",
        allowed: &["GK", "DF", "MF", "FW"],
    }],
    numeric: &["jersey_number"],
    dates: &[],
    references: &[ReferenceRule {
        field: "team_name",
        target: "team_id",
        entity: RefEntity::Team,
    }],
    conflict_target: &["name", "team_id"],
};

pub static MATCH_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::Match,
    entity: "match",
    table: "matches",
    columns: &[
        "match_date",
        "home_team_name",
        "away_team_name",
        "home_score",
        "away_score",
    ],
    required: &["match_date"],
    enums: &[],
    numeric: &["home_score", "away_score"],
    dates: &["match_date"],
    references: &[
        ReferenceRule {
            field: "home_team_name",
            target: "home_team_id",
            entity: RefEntity::Team,
        },
        ReferenceRule {
            field: "away_team_name",
            target: "away_team_id",
            entity: RefEntity::Team,
        },
    ],
    conflict_target: &["match_date", "home_team_id", "away_team_id"],
};

pub static PLAYER_STAT_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::PlayerStat,
    entity: "player stat",
    table: "player_stats",
    columns: &[
        "player_name",
        "match_date",
        "goals",
        "assists",
        "minutes_played",
        "clean_sheet",
    ],
    required: &["match_date"],
    enums: &[],
    numeric: &["goals", "assists", "minutes_played", "clean_sheet"],
    dates: &["match_date"],
    references: &[ReferenceRule {
        field: "player_name",
        target: "player_id",
        entity: RefEntity::Player,
    }],
    conflict_target: &["player_id", "match_date"],
};

// ==========================================
// RawRecord - parser output
// ==========================================
// One per input data row; column name -> trimmed value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based index over data rows (header, blank and comment
    /// lines are not counted)
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// Field value, trimmed, with empty strings normalized away
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.as_str().trim())
            .filter(|v| !v.is_empty())
    }
}

// ==========================================
// Coerced field values
// ==========================================
// A present-but-unparseable value is preserved so the validator can
// report it distinctly from a missing one.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumField {
    Missing,
    Invalid(String),
    Value(f64),
}

impl NumField {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => NumField::Missing,
            Some(s) => s
                .parse::<f64>()
                .map(NumField::Value)
                .unwrap_or_else(|_| NumField::Invalid(s.to_string())),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            NumField::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value().map(|v| v as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DateField {
    Missing,
    Invalid(String),
    Value(NaiveDate),
}

impl DateField {
    /// Dates are ISO `YYYY-MM-DD`
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => DateField::Missing,
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(DateField::Value)
                .unwrap_or_else(|_| DateField::Invalid(s.to_string())),
        }
    }

    pub fn value(&self) -> Option<NaiveDate> {
        match self {
            DateField::Value(d) => Some(*d),
            _ => None,
        }
    }
}

// ==========================================
// ProcessedRecord - resolver output
// ==========================================
// Typed per-kind rows: reference names replaced by resolved ids,
// numeric/date fields coerced. Built by the resolver, checked by the
// validator, bound by the store.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub row_number: usize,
    pub name: Option<String>,
    pub team_type: Option<String>,
    pub city: Option<String>,
    pub founded_year: NumField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub row_number: usize,
    pub name: Option<String>,
    pub team_id: Option<String>,
    pub position: Option<String>,
    pub jersey_number: NumField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub row_number: usize,
    pub match_date: DateField,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    pub home_score: NumField,
    pub away_score: NumField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub row_number: usize,
    pub player_id: Option<String>,
    pub match_date: DateField,
    pub goals: NumField,
    pub assists: NumField,
    pub minutes_played: NumField,
    pub clean_sheet: NumField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProcessedRecord {
    Team(TeamRow),
    Player(PlayerRow),
    Match(MatchRow),
    PlayerStat(PlayerStatRow),
}

/// Read-only view of one field for schema-driven validation
#[derive(Debug, Clone, Copy)]
pub enum FieldView<'a> {
    Absent,
    Text(&'a str),
    Num(&'a NumField),
    Date(&'a DateField),
}

impl ProcessedRecord {
    pub fn row_number(&self) -> usize {
        match self {
            ProcessedRecord::Team(r) => r.row_number,
            ProcessedRecord::Player(r) => r.row_number,
            ProcessedRecord::Match(r) => r.row_number,
            ProcessedRecord::PlayerStat(r) => r.row_number,
        }
    }

    /// Field lookup by schema column name.
    /// Reference name columns resolve to their id targets upstream and
    /// are reported Absent here; no validation rule consults them.
    pub fn field(&self, name: &str) -> FieldView<'_> {
        fn text(v: &Option<String>) -> FieldView<'_> {
            match v {
                Some(s) => FieldView::Text(s.as_str()),
                None => FieldView::Absent,
            }
        }

        match self {
            ProcessedRecord::Team(r) => match name {
                "name" => text(&r.name),
                "team_type" => text(&r.team_type),
                "city" => text(&r.city),
                "founded_year" => FieldView::Num(&r.founded_year),
                _ => FieldView::Absent,
            },
            ProcessedRecord::Player(r) => match name {
                "name" => text(&r.name),
                "team_id" => text(&r.team_id),
                "position" => text(&r.position),
                "jersey_number" => FieldView::Num(&r.jersey_number),
                _ => FieldView::Absent,
            },
            ProcessedRecord::Match(r) => match name {
                "match_date" => FieldView::Date(&r.match_date),
                "home_team_id" => text(&r.home_team_id),
                "away_team_id" => text(&r.away_team_id),
                "home_score" => FieldView::Num(&r.home_score),
                "away_score" => FieldView::Num(&r.away_score),
                _ => FieldView::Absent,
            },
            ProcessedRecord::PlayerStat(r) => match name {
                "player_id" => text(&r.player_id),
                "match_date" => FieldView::Date(&r.match_date),
                "goals" => FieldView::Num(&r.goals),
                "assists" => FieldView::Num(&r.assists),
                "minutes_played" => FieldView::Num(&r.minutes_played),
                "clean_sheet" => FieldView::Num(&r.clean_sheet),
                _ => FieldView::Absent,
            },
        }
    }
}

// ==========================================
// RowIssue - non-fatal per-row annotation
// ==========================================
// Collected, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row: usize,
    pub message: String,
}

impl RowIssue {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

// ==========================================
// Run options and summary contract
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub skip_duplicates: bool,
    pub batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            skip_duplicates: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// The sole output contract import consumers depend on.
/// `errors` carries row issues first, batch errors after, each in the
/// order encountered; the key is omitted entirely when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub message: String,
    pub records_processed: usize,
    pub records_imported: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_accepts_both_forms() {
        assert_eq!(ImportKind::parse("team"), Some(ImportKind::Team));
        assert_eq!(ImportKind::parse("teams"), Some(ImportKind::Team));
        assert_eq!(ImportKind::parse("player_stats"), Some(ImportKind::PlayerStat));
        assert_eq!(ImportKind::parse("squad"), None);
    }

    #[test]
    fn test_schema_lookup_matches_kind() {
        for kind in ImportKind::all() {
            assert_eq!(kind.schema().kind, *kind);
        }
    }

    #[test]
    fn test_num_field_coercion() {
        assert_eq!(NumField::from_raw(None), NumField::Missing);
        assert_eq!(NumField::from_raw(Some("12")), NumField::Value(12.0));
        assert_eq!(
            NumField::from_raw(Some("twelve")),
            NumField::Invalid("twelve".to_string())
        );
        assert_eq!(NumField::Value(7.0).as_i64(), Some(7));
    }

    #[test]
    fn test_date_field_coercion() {
        assert_eq!(
            DateField::from_raw(Some("2026-03-14")),
            DateField::Value(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        );
        assert_eq!(
            DateField::from_raw(Some("14/03/2026")),
            DateField::Invalid("14/03/2026".to_string())
        );
        assert_eq!(DateField::from_raw(None), DateField::Missing);
    }

    #[test]
    fn test_raw_record_get_normalizes_empty() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "FCB United".to_string());
        fields.insert("city".to_string(), String::new());
        let record = RawRecord {
            row_number: 1,
            fields,
        };

        assert_eq!(record.get("name"), Some("FCB United"));
        assert_eq!(record.get("city"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_summary_serialization_omits_empty_errors() {
        let summary = ImportSummary {
            message: "imported 2 of 2 row(s)".to_string(),
            records_processed: 2,
            records_imported: 2,
            errors: Vec::new(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["recordsProcessed"], 2);
        assert_eq!(json["recordsImported"], 2);
        assert!(json.get("errors").is_none());

        let with_errors = ImportSummary {
            errors: vec!["row 2: missing name".to_string()],
            ..summary
        };
        let json = serde_json::to_value(&with_errors).unwrap();
        assert_eq!(json["errors"][0], "row 2: missing name");
    }
}
