use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{GradeRow, RecordStore, StoreError};

/// Inbound grade payload. Clients never send an id; the store assigns one.
/// Scores and weights are accepted as-is (no range or sign validation).
#[derive(Debug, Clone, Deserialize)]
pub struct NewGrade {
    pub student_id: String,
    pub course_id: String,
    pub score: f64,
    #[serde(default = "default_weight")]
    pub weight: i32,
}

fn default_weight() -> i32 {
    1
}

/// Public record shape: the storage identifier is surfaced as `id` and no
/// other identifier field appears.
#[derive(Debug, Clone, Serialize)]
pub struct GradeRecord {
    pub id: Uuid,
    pub student_id: String,
    pub course_id: String,
    pub score: f64,
    pub weight: i32,
}

impl From<GradeRow> for GradeRecord {
    fn from(row: GradeRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            score: row.score,
            weight: row.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Failing,
    Passing,
    Satisfactory,
    Good,
    Excellent,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Classification {
    /// Fixed threshold bands, first match wins.
    pub fn from_average(average: f64) -> Self {
        if average < 10.0 {
            Classification::Failing
        } else if average >= 16.0 {
            Classification::Excellent
        } else if average >= 14.0 {
            Classification::Good
        } else if average >= 12.0 {
            Classification::Satisfactory
        } else {
            Classification::Passing
        }
    }
}

/// Result of the average computation.
///
/// The `NoRecords` and `ZeroWeight` shapes differ on purpose: existing
/// consumers distinguish the two degenerate cases by shape, so both are kept
/// rather than unified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AverageSummary {
    NoRecords {
        student_id: String,
        average: f64,
        classification: Classification,
    },
    ZeroWeight {
        average: f64,
    },
    Weighted {
        student_id: String,
        record_count: usize,
        average: f64,
        classification: Classification,
    },
}

/// Business logic over the record store. Holds no record state itself; it
/// mediates between transient input and the store.
#[derive(Clone)]
pub struct GradeService {
    store: Arc<RecordStore>,
}

impl GradeService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn add_grade(&self, grade: NewGrade) -> Result<Uuid, StoreError> {
        self.store
            .insert(&grade.student_id, &grade.course_id, grade.score, grade.weight)
            .await
    }

    pub async fn get_by_student(&self, student_id: &str) -> Result<Vec<GradeRecord>, StoreError> {
        let rows = self.store.find_by_student(student_id).await?;
        Ok(rows.into_iter().map(GradeRecord::from).collect())
    }

    pub async fn calculate_average(&self, student_id: &str) -> Result<AverageSummary, StoreError> {
        let rows = self.store.find_by_student(student_id).await?;
        Ok(summarize(student_id, &rows))
    }
}

/// Weighted-average summary over fetched rows. Pure so the edge cases are
/// testable without a database.
fn summarize(student_id: &str, rows: &[GradeRow]) -> AverageSummary {
    if rows.is_empty() {
        return AverageSummary::NoRecords {
            student_id: student_id.to_string(),
            average: 0.0,
            classification: Classification::NotApplicable,
        };
    }

    let total_points: f64 = rows.iter().map(|r| r.score * f64::from(r.weight)).sum();
    let total_weight: i64 = rows.iter().map(|r| i64::from(r.weight)).sum();

    if total_weight == 0 {
        return AverageSummary::ZeroWeight { average: 0.0 };
    }

    let average = round2(total_points / total_weight as f64);
    AverageSummary::Weighted {
        student_id: student_id.to_string(),
        record_count: rows.len(),
        average,
        classification: Classification::from_average(average),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(score: f64, weight: i32) -> GradeRow {
        GradeRow {
            id: Uuid::new_v4(),
            student_id: "s-1".into(),
            course_id: "c-1".into(),
            score,
            weight,
        }
    }

    #[test]
    fn no_records_yields_sentinel_summary() {
        let summary = summarize("s-1", &[]);
        assert_eq!(
            summary,
            AverageSummary::NoRecords {
                student_id: "s-1".into(),
                average: 0.0,
                classification: Classification::NotApplicable,
            }
        );
    }

    #[test]
    fn weighted_average_rounds_to_two_decimals() {
        // (12*2 + 18*1) / 3 = 14.0
        let summary = summarize("s-1", &[row(12.0, 2), row(18.0, 1)]);
        assert_eq!(
            summary,
            AverageSummary::Weighted {
                student_id: "s-1".into(),
                record_count: 2,
                average: 14.0,
                classification: Classification::Good,
            }
        );

        // 40/3 = 13.333... rounds to 13.33
        let summary = summarize("s-1", &[row(10.0, 1), row(15.0, 2)]);
        match summary {
            AverageSummary::Weighted { average, .. } => assert_eq!(average, 13.33),
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn all_zero_weights_yield_minimal_shape() {
        let summary = summarize("s-1", &[row(12.0, 0), row(18.0, 0)]);
        assert_eq!(summary, AverageSummary::ZeroWeight { average: 0.0 });
    }

    #[test]
    fn degenerate_shapes_stay_distinct_when_serialized() {
        let empty = serde_json::to_value(summarize("s-1", &[])).expect("json");
        let zero = serde_json::to_value(summarize("s-1", &[row(12.0, 0)])).expect("json");

        let empty_keys: Vec<&String> = empty.as_object().expect("object").keys().collect();
        assert_eq!(empty_keys, ["average", "classification", "student_id"]);
        assert_eq!(empty["classification"], "N/A");

        let zero_keys: Vec<&String> = zero.as_object().expect("object").keys().collect();
        assert_eq!(zero_keys, ["average"]);
    }

    #[test]
    fn classification_boundaries_are_exact() {
        assert_eq!(Classification::from_average(9.99), Classification::Failing);
        assert_eq!(Classification::from_average(10.0), Classification::Passing);
        assert_eq!(
            Classification::from_average(12.0),
            Classification::Satisfactory
        );
        assert_eq!(Classification::from_average(14.0), Classification::Good);
        assert_eq!(Classification::from_average(16.0), Classification::Excellent);
    }

    #[test]
    fn negative_weights_pass_through_unvalidated() {
        // Accepted as-is: a net-negative total weight still divides.
        let summary = summarize("s-1", &[row(10.0, -1), row(20.0, 2)]);
        match summary {
            AverageSummary::Weighted {
                average,
                record_count,
                ..
            } => {
                assert_eq!(record_count, 2);
                assert_eq!(average, 30.0);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }
}
