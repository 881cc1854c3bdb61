// handlers/students.rs - /students collection and record handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::database::models::student::{NewStudent, Student, StudentChanges, StudentFilter};
use crate::database::repositories::StudentRepository;
use crate::error::{parse_id, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::students::create_student;
use crate::state::AppState;
use crate::types::optional_string_or_number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// Preferred id; replaced when already taken.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub student_id: Option<String>,
    #[serde(flatten)]
    pub fields: StudentChanges,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// GET /students - List students matching the query filters
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<StudentFilter>, QueryRejection>,
) -> ApiResult<Vec<Student>> {
    let Query(filter) = query?;
    let students = StudentRepository::new(state.db.pool()).list(&filter).await?;
    Ok(ApiResponse::success(students))
}

/// POST /students - Admit a student and assign a student id
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> ApiResult<Student> {
    let Json(body) = payload?;
    let new = new_student(body.fields)?;

    let repo = StudentRepository::new(state.db.pool());
    let student = create_student(&repo, new, body.student_id).await?;
    info!(
        "Created student {} ({}) in class {} / {}",
        student.student_id, student.name, student.class_id, student.year
    );

    Ok(ApiResponse::created(student))
}

/// PUT /students/:id - Partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentChanges>, JsonRejection>,
) -> ApiResult<Student> {
    let id = parse_id(&id)?;
    let Json(changes) = payload?;

    let student = StudentRepository::new(state.db.pool())
        .update(id, &changes)
        .await?;
    Ok(ApiResponse::success(student))
}

/// DELETE /students/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let id = parse_id(&id)?;
    StudentRepository::new(state.db.pool()).delete(id).await?;
    info!("Deleted student {}", id);
    Ok(ApiResponse::success(Deleted { id }))
}

/// Split the required identity fields out of a create payload.
fn new_student(mut fields: StudentChanges) -> Result<NewStudent, ApiError> {
    let name = non_blank(fields.name.take());
    let birth_reg = non_blank(fields.birth_reg.take());
    let class_id = non_blank(fields.class_id.take());
    let year = fields.year.take();

    match (name, birth_reg, class_id, year) {
        (Some(name), Some(birth_reg), Some(class_id), Some(year)) => Ok(NewStudent {
            student_id: String::new(),
            name,
            birth_reg,
            class_id,
            year,
            details: fields,
        }),
        (name, birth_reg, class_id, year) => {
            let missing: Vec<&str> = [
                ("birthReg", birth_reg.is_none()),
                ("class", class_id.is_none()),
                ("year", year.is_none()),
                ("name", name.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(ApiError::missing_fields(&missing))
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
