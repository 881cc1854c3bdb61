// handlers/notices.rs - notice board with optional attachment

use axum::extract::{Multipart, Path, State};
use tracing::info;

use super::multipart::FormData;
use super::students::Deleted;
use crate::database::models::notice::Notice;
use crate::database::repositories::NoticeRepository;
use crate::error::{parse_id, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /notices - multipart `title` plus optional `file`
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Notice> {
    let mut form = FormData::read(multipart).await?;
    let title = form
        .text("title")
        .ok_or_else(|| ApiError::missing_fields(&["title"]))?;

    let file = match form.take_file("file") {
        Some(upload) => Some(
            state
                .uploads
                .save(upload.file_name.as_deref(), &upload.bytes)
                .await?,
        ),
        None => None,
    };

    match NoticeRepository::new(state.db.pool())
        .create(&title, file.as_deref())
        .await
    {
        Ok(notice) => {
            info!("Published notice {}", notice.id);
            Ok(ApiResponse::created(notice))
        }
        Err(e) => {
            state.uploads.discard(file.as_deref()).await;
            Err(e.into())
        }
    }
}

/// GET /notices - newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Notice>> {
    let notices = NoticeRepository::new(state.db.pool()).list().await?;
    Ok(ApiResponse::success(notices))
}

/// DELETE /notices/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let id = parse_id(&id)?;
    let removed = NoticeRepository::new(state.db.pool()).delete(id).await?;
    state.uploads.discard(removed.file.as_deref()).await;
    Ok(ApiResponse::success(Deleted { id }))
}
