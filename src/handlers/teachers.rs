// handlers/teachers.rs - teacher profiles with optional photo upload

use axum::extract::{Multipart, Path, State};
use tracing::info;

use super::multipart::FormData;
use super::students::Deleted;
use crate::database::models::teacher::{NewTeacher, Teacher, TeacherChanges};
use crate::database::repositories::TeacherRepository;
use crate::error::{parse_id, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const PHOTO_FIELD: &str = "photo";

/// POST /teachers - Create a teacher from a multipart form
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Teacher> {
    let mut form = FormData::read(multipart).await?;
    let mut details = changes_from(&form);
    let name = details
        .name
        .take()
        .ok_or_else(|| ApiError::missing_fields(&["name"]))?;

    if let Some(photo) = form.take_file(PHOTO_FIELD) {
        details.photo = Some(
            state
                .uploads
                .save(photo.file_name.as_deref(), &photo.bytes)
                .await?,
        );
    }

    let created = TeacherRepository::new(state.db.pool())
        .create(&NewTeacher {
            name,
            details: details.clone(),
        })
        .await;

    match created {
        Ok(teacher) => {
            info!("Created teacher {} ({})", teacher.name, teacher.id);
            Ok(ApiResponse::created(teacher))
        }
        Err(e) => {
            state.uploads.discard(details.photo.as_deref()).await;
            Err(e.into())
        }
    }
}

/// GET /teachers
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Teacher>> {
    let teachers = TeacherRepository::new(state.db.pool()).list().await?;
    Ok(ApiResponse::success(teachers))
}

/// GET /teachers/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Teacher> {
    let id = parse_id(&id)?;
    let teacher = TeacherRepository::new(state.db.pool()).find_by_id(id).await?;
    Ok(ApiResponse::success(teacher))
}

/// PUT /teachers/:id - Partial update; a new photo replaces the stored one
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Teacher> {
    let id = parse_id(&id)?;
    let mut form = FormData::read(multipart).await?;
    let mut changes = changes_from(&form);

    let repo = TeacherRepository::new(state.db.pool());
    let existing = repo.find_by_id(id).await?;

    if let Some(photo) = form.take_file(PHOTO_FIELD) {
        changes.photo = Some(
            state
                .uploads
                .save(photo.file_name.as_deref(), &photo.bytes)
                .await?,
        );
    }

    match repo.update(id, &changes).await {
        Ok(teacher) => {
            if changes.photo.is_some() {
                state.uploads.discard(existing.photo.as_deref()).await;
            }
            Ok(ApiResponse::success(teacher))
        }
        Err(e) => {
            state.uploads.discard(changes.photo.as_deref()).await;
            Err(e.into())
        }
    }
}

/// DELETE /teachers/:id - Remove the teacher and their photo
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let id = parse_id(&id)?;
    let removed = TeacherRepository::new(state.db.pool()).delete(id).await?;
    state.uploads.discard(removed.photo.as_deref()).await;
    info!("Deleted teacher {}", id);
    Ok(ApiResponse::success(Deleted { id }))
}

fn changes_from(form: &FormData) -> TeacherChanges {
    TeacherChanges {
        name: form.text("name"),
        designation: form.text("designation"),
        subject: form.text("subject"),
        qualification: form.text("qualification"),
        phone: form.text("phone"),
        email: form.text("email"),
        bio: form.text("bio"),
        photo: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_map_to_changes() {
        let form = FormData::with_fields(&[
            ("name", "Nasrin Akter"),
            ("designation", "Assistant Teacher"),
            ("subject", " "),
            ("photo", "ignored-as-text"),
        ]);
        let changes = changes_from(&form);

        assert_eq!(
            changes,
            TeacherChanges {
                name: Some("Nasrin Akter".into()),
                designation: Some("Assistant Teacher".into()),
                ..TeacherChanges::default()
            }
        );
    }
}
