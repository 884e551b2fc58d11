// ==========================================
// footy-stats - record validator
// ==========================================
// Schema-driven per-row checks: required fields, enumerated values,
// numeric and date coercion results. Pure and total: always returns
// a (possibly empty) issue list, never mutates, never fails.
// ==========================================

use crate::domain::import::{DateField, FieldView, ImportSchema, NumField, ProcessedRecord, RowIssue};

pub struct Validator;

impl Validator {
    /// Validate one record against its kind's schema
    ///
    /// Every missing required field is reported; beyond that a row
    /// contributes at most one issue (first failing check in column
    /// order wins).
    pub fn validate(record: &ProcessedRecord, schema: &ImportSchema) -> Vec<RowIssue> {
        let row = record.row_number();
        let mut issues = Vec::new();

        // required fields: report them all
        for field in schema.required {
            let missing = matches!(
                record.field(field),
                FieldView::Absent | FieldView::Num(NumField::Missing) | FieldView::Date(DateField::Missing)
            );
            if missing {
                issues.push(RowIssue::new(row, format!("missing {field}")));
            }
        }
        if !issues.is_empty() {
            return issues;
        }

        // remaining rule classes: first failure in column order wins
        for col in schema.columns {
            if let Some(rule) = schema.enums.iter().find(|r| r.field == *col) {
                if let FieldView::Text(value) = record.field(col) {
                    if !rule.allowed.contains(&value) {
                        issues.push(RowIssue::new(
                            row,
                            format!(
                                "invalid {} '{}' (expected one of: {})",
                                col,
                                value,
                                rule.allowed.join(", ")
                            ),
                        ));
                        break;
                    }
                }
                continue;
            }

            if schema.numeric.contains(col) {
                if let FieldView::Num(NumField::Invalid(raw)) = record.field(col) {
                    issues.push(RowIssue::new(row, format!("{col} is not a number: '{raw}'")));
                    break;
                }
                continue;
            }

            if schema.dates.contains(col) {
                if let FieldView::Date(DateField::Invalid(raw)) = record.field(col) {
                    issues.push(RowIssue::new(
                        row,
                        format!("invalid date for {col}: '{raw}' (expected YYYY-MM-DD)"),
                    ));
                    break;
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::{
        ImportKind, MatchRow, TeamRow, MATCH_SCHEMA, TEAM_SCHEMA,
    };

    fn team_row(name: Option<&str>, team_type: Option<&str>) -> ProcessedRecord {
        ProcessedRecord::Team(TeamRow {
            row_number: 1,
            name: name.map(str::to_string),
            team_type: team_type.map(str::to_string),
            city: None,
            founded_year: NumField::Missing,
        })
    }

    #[test]
    fn test_valid_record_yields_no_issues() {
        let issues = Validator::validate(&team_row(Some("FCB United"), Some("internal")), &TEAM_SCHEMA);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_all_missing_required_fields_are_reported() {
        let issues = Validator::validate(&team_row(None, None), &TEAM_SCHEMA);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "missing name");
        assert_eq!(issues[1].message, "missing team_type");
    }

    #[test]
    fn test_invalid_enum_value_embeds_the_offender() {
        let issues = Validator::validate(&team_row(Some("Red Team"), Some("bogus")), &TEAM_SCHEMA);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "invalid team_type 'bogus' (expected one of: internal, club)"
        );
    }

    #[test]
    fn test_non_numeric_is_distinct_from_missing() {
        let record = ProcessedRecord::Team(TeamRow {
            row_number: 4,
            name: Some("FCB United".to_string()),
            team_type: Some("club".to_string()),
            city: None,
            founded_year: NumField::Invalid("eighteen-99".to_string()),
        });
        let issues = Validator::validate(&record, &TEAM_SCHEMA);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "founded_year is not a number: 'eighteen-99'"
        );
    }

    #[test]
    fn test_missing_required_fields_win_over_other_checks() {
        // a row that is both missing its name and carrying a bad enum
        // reports only the missing-field issues
        let issues = Validator::validate(&team_row(None, Some("bogus")), &TEAM_SCHEMA);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "missing name");
    }

    #[test]
    fn test_invalid_date_is_reported() {
        assert_eq!(MATCH_SCHEMA.kind, ImportKind::Match);
        let record = ProcessedRecord::Match(MatchRow {
            row_number: 2,
            match_date: DateField::Invalid("03/14/2026".to_string()),
            home_team_id: Some("t-1".to_string()),
            away_team_id: Some("t-2".to_string()),
            home_score: NumField::Missing,
            away_score: NumField::Missing,
        });
        let issues = Validator::validate(&record, &MATCH_SCHEMA);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "invalid date for match_date: '03/14/2026' (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_first_failing_check_wins_in_column_order() {
        // invalid date (earlier column) masks the invalid score
        let record = ProcessedRecord::Match(MatchRow {
            row_number: 5,
            match_date: DateField::Invalid("soon".to_string()),
            home_team_id: Some("t-1".to_string()),
            away_team_id: Some("t-2".to_string()),
            home_score: NumField::Invalid("two".to_string()),
            away_score: NumField::Missing,
        });
        let issues = Validator::validate(&record, &MATCH_SCHEMA);

        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("invalid date for match_date"));
    }
}
