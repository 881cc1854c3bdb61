use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stored shape of one subject's marks.
///
/// Both components are optional on the wire. Whether the combination is
/// scoreable is decided by `services::merit::SubjectMark::from_raw`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubjectMark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcq: Option<u32>,
}

impl RawSubjectMark {
    pub fn written(written: u32) -> Self {
        Self {
            written: Some(written),
            mcq: None,
        }
    }

    pub fn with_mcq(written: u32, mcq: u32) -> Self {
        Self {
            written: Some(written),
            mcq: Some(mcq),
        }
    }
}

/// Subject name -> marks. Ordered so responses are stable.
pub type MarkSheet = BTreeMap<String, RawSubjectMark>;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: Uuid,
    pub roll: String,
    pub student_name: String,
    pub class_id: String,
    pub exam_type: String,
    pub year: i32,
    pub marks: Json<MarkSheet>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identifies a cohort: every result sharing class, exam and year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortKey {
    pub class_id: String,
    pub exam_type: String,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct NewResult {
    pub roll: String,
    pub student_name: String,
    pub class_id: String,
    pub exam_type: String,
    pub year: i32,
    pub marks: MarkSheet,
}
