// handlers/results.rs - exam results and merit queries

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::models::result::{CohortKey, MarkSheet, NewResult, ResultRecord};
use crate::database::repositories::result::ResultFilter;
use crate::database::repositories::ResultRepository;
use crate::error::{parse_id, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::merit::{self, MeritEntry, MeritPosition};
use crate::state::AppState;
use crate::types::{optional_string_or_number, optional_year, parse_year};

use super::students::Deleted;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResultRequest {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub roll: Option<String>,
    #[serde(alias = "name")]
    pub student_name: Option<String>,
    #[serde(default, alias = "class", deserialize_with = "optional_string_or_number")]
    pub class_id: Option<String>,
    pub exam_type: Option<String>,
    #[serde(default, deserialize_with = "optional_year")]
    pub year: Option<i32>,
    pub marks: Option<MarkSheet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultRequest {
    #[serde(alias = "name")]
    pub student_name: Option<String>,
    pub marks: Option<MarkSheet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultQuery {
    #[serde(default, alias = "classId", deserialize_with = "optional_string_or_number")]
    pub class: Option<String>,
    pub exam_type: Option<String>,
    #[serde(default, deserialize_with = "optional_year")]
    pub year: Option<i32>,
}

/// A stored result with its derived merit outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(flatten)]
    pub record: ResultRecord,
    pub total_marks: u32,
    pub merit_position: MeritPosition,
}

/// POST /results - Publish one student's result
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateResultRequest>, JsonRejection>,
) -> ApiResult<ResultRecord> {
    let Json(body) = payload?;
    let new = new_result(body)?;

    let record = ResultRepository::new(state.db.pool()).create(&new).await?;
    info!(
        "Published {} result for roll {} (class {}, {})",
        record.exam_type, record.roll, record.class_id, record.year
    );
    Ok(ApiResponse::created(record))
}

/// GET /results - List results, optionally narrowed to a cohort
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ResultQuery>, QueryRejection>,
) -> ApiResult<Vec<ResultRecord>> {
    let Query(query) = query?;
    let filter = ResultFilter {
        class_id: query.class,
        exam_type: query.exam_type,
        year: query.year,
    };
    let results = ResultRepository::new(state.db.pool()).list(&filter).await?;
    Ok(ApiResponse::success(results))
}

/// GET /results/student/:roll/:classId/:examType/:year - One result with its merit position
pub async fn student_result(
    State(state): State<AppState>,
    Path((roll, class_id, exam_type, year)): Path<(String, String, String, String)>,
) -> ApiResult<RankedResult> {
    let key = cohort_key(class_id, exam_type, &year)?;
    let repo = ResultRepository::new(state.db.pool());

    let record = repo.find_for_student(&roll, &key).await?;
    let outcome = merit::evaluate_student(&record.marks)?;

    let merit_position = if outcome.failed {
        MeritPosition::Fail
    } else {
        let cohort = repo.cohort(&key).await?;
        merit::rank_cohort(&record, &cohort)?
    };

    Ok(ApiResponse::success(RankedResult {
        record,
        total_marks: outcome.total_marks,
        merit_position,
    }))
}

/// GET /results/merit/:classId/:examType/:year - Whole cohort in merit order
pub async fn merit_list(
    State(state): State<AppState>,
    Path((class_id, exam_type, year)): Path<(String, String, String)>,
) -> ApiResult<Vec<MeritEntry>> {
    let key = cohort_key(class_id, exam_type, &year)?;
    let cohort = ResultRepository::new(state.db.pool()).cohort(&key).await?;
    Ok(ApiResponse::success(merit::merit_list(&cohort)?))
}

/// PUT /results/:id - Replace the student name and/or marks
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateResultRequest>, JsonRejection>,
) -> ApiResult<ResultRecord> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;

    let student_name = body
        .student_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if student_name.is_none() && body.marks.is_none() {
        return Err(ApiError::bad_request("Nothing to update: send name and/or marks"));
    }
    if let Some(marks) = &body.marks {
        check_marks(marks)?;
    }

    let record = ResultRepository::new(state.db.pool())
        .update(id, student_name, body.marks.as_ref())
        .await?;
    Ok(ApiResponse::success(record))
}

/// DELETE /results/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let id = parse_id(&id)?;
    ResultRepository::new(state.db.pool()).delete(id).await?;
    info!("Deleted result {}", id);
    Ok(ApiResponse::success(Deleted { id }))
}

fn cohort_key(class_id: String, exam_type: String, year: &str) -> Result<CohortKey, ApiError> {
    let year = parse_year(year).map_err(ApiError::bad_request)?;
    Ok(CohortKey {
        class_id,
        exam_type,
        year,
    })
}

fn new_result(body: CreateResultRequest) -> Result<NewResult, ApiError> {
    let text = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    match (
        text(body.roll),
        text(body.student_name),
        text(body.class_id),
        text(body.exam_type),
        body.year,
        body.marks,
    ) {
        (Some(roll), Some(student_name), Some(class_id), Some(exam_type), Some(year), Some(marks)) => {
            check_marks(&marks)?;
            Ok(NewResult {
                roll,
                student_name,
                class_id,
                exam_type,
                year,
                marks,
            })
        }
        (roll, name, class_id, exam_type, year, marks) => {
            let missing: Vec<&str> = [
                ("roll", roll.is_none()),
                ("name", name.is_none()),
                ("class", class_id.is_none()),
                ("marks", marks.is_none()),
                ("examType", exam_type.is_none()),
                ("year", year.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(ApiError::missing_fields(&missing))
        }
    }
}

/// Marks must name at least one subject and every subject must be scoreable.
fn check_marks(marks: &MarkSheet) -> Result<(), ApiError> {
    if marks.is_empty() {
        return Err(ApiError::validation_error(
            "Marks must include at least one subject",
            None,
        ));
    }
    merit::validate_marks(marks)?;
    Ok(())
}
