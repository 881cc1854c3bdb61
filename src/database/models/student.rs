use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::{optional_string_or_number, optional_year};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    /// Public 5-digit identifier printed on admit cards
    pub student_id: String,
    pub name: String,
    pub birth_reg: String,
    #[serde(rename = "class")]
    pub class_id: String,
    pub year: i32,
    pub roll: Option<String>,
    pub section: Option<String>,
    pub shift: Option<String>,
    #[serde(rename = "group")]
    pub group_name: Option<String>,
    pub gender: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
    pub birth_reg: String,
    pub class_id: String,
    pub year: i32,
    pub details: StudentChanges,
}

/// Optional student fields. Used for the descriptive part of a new student
/// and for partial updates, where `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub birth_reg: Option<String>,
    #[serde(default, alias = "class", deserialize_with = "optional_string_or_number")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "optional_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub roll: Option<String>,
    pub section: Option<String>,
    pub shift: Option<String>,
    #[serde(alias = "group")]
    pub group_name: Option<String>,
    pub gender: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    #[serde(default, alias = "classId", deserialize_with = "optional_string_or_number")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "optional_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub roll: Option<String>,
    pub section: Option<String>,
    pub shift: Option<String>,
    pub group: Option<String>,
}
