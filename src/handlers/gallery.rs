// handlers/gallery.rs - photo gallery

use axum::extract::{Multipart, Path, State};
use tracing::info;

use super::multipart::FormData;
use super::students::Deleted;
use crate::database::models::gallery::GalleryItem;
use crate::database::repositories::GalleryRepository;
use crate::error::{parse_id, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /gallery - multipart `title` and `file`, both required
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> ApiResult<GalleryItem> {
    let mut form = FormData::read(multipart).await?;

    let (title, upload) = match (form.text("title"), form.take_file("file")) {
        (Some(title), Some(upload)) => (title, upload),
        (title, upload) => {
            let missing: Vec<&str> = [("title", title.is_none()), ("file", upload.is_none())]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
            return Err(ApiError::validation_error(
                "Title and Image required",
                Some(
                    missing
                        .into_iter()
                        .map(|f| (f.to_string(), "This field is required".to_string()))
                        .collect(),
                ),
            ));
        }
    };

    let img = state
        .uploads
        .save(upload.file_name.as_deref(), &upload.bytes)
        .await?;

    match GalleryRepository::new(state.db.pool()).create(&title, &img).await {
        Ok(item) => {
            info!("Added gallery image {}", item.id);
            Ok(ApiResponse::created(item))
        }
        Err(e) => {
            state.uploads.discard(Some(&img)).await;
            Err(e.into())
        }
    }
}

/// GET /gallery - newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<GalleryItem>> {
    let items = GalleryRepository::new(state.db.pool()).list().await?;
    Ok(ApiResponse::success(items))
}

/// DELETE /gallery/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let id = parse_id(&id)?;
    let removed = GalleryRepository::new(state.db.pool()).delete(id).await?;
    state.uploads.discard(Some(&removed.img)).await;
    Ok(ApiResponse::success(Deleted { id }))
}
