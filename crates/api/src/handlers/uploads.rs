//! Handlers for `/uploads`: admin image uploads through the configured
//! [`FileStorage`](greenhomes_core::storage::FileStorage).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use greenhomes_core::error::CoreError;
use greenhomes_core::listing::{PageRequest, Paginated};
use greenhomes_core::types::DbId;
use greenhomes_core::upload::{
    stored_file_name, validate_image_file_name, DEFAULT_UPLOAD_PAGE_SIZE, MAX_TITLE_LENGTH,
    UPLOAD_FOLDER, UPLOAD_PAGE_SIZES,
};
use greenhomes_core::validation::FieldErrors;
use greenhomes_db::models::uploaded_image::{CreateUploadedImage, UploadedImage};
use greenhomes_db::repositories::UploadedImageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, message, ok, Envelope};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UploadListParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// The parts of an upload form we care about.
#[derive(Default)]
struct UploadForm {
    file_name: Option<String>,
    bytes: Option<Vec<u8>>,
    title: Option<String>,
    description: Option<String>,
}

/// POST /api/v1/uploads
///
/// Multipart fields: `image` (file), `title`, `description` (optional).
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Envelope<UploadedImage>)> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("image") => {
                form.file_name = field.file_name().map(str::to_string);
                form.bytes = Some(field.bytes().await?.to_vec());
            }
            Some("title") => form.title = Some(field.text().await?),
            Some("description") => form.description = Some(field.text().await?),
            _ => {}
        }
    }

    let mut errors = FieldErrors::new();
    let title = form
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    match title {
        None => errors.add("title", "Title is required."),
        Some(ref t) if t.chars().count() > MAX_TITLE_LENGTH => errors.add(
            "title",
            format!("Title must be at most {MAX_TITLE_LENGTH} characters long."),
        ),
        Some(_) => {}
    }

    let mut extension = None;
    match (form.file_name.as_deref(), form.bytes.as_deref()) {
        (Some(name), Some(bytes)) if !bytes.is_empty() => match validate_image_file_name(name) {
            Ok(ext) => extension = Some(ext),
            Err(e) => errors.add("image", e),
        },
        _ => errors.add("image", "No image file provided."),
    }
    if let Some(bytes) = form.bytes.as_deref() {
        if bytes.len() > state.config.max_upload_bytes {
            errors.add(
                "image",
                format!(
                    "Image must be at most {} MB.",
                    state.config.max_upload_bytes / (1024 * 1024)
                ),
            );
        }
    }
    errors.into_result()?;

    let (Some(ext), Some(bytes)) = (extension, form.bytes) else {
        return Err(AppError::BadRequest("No image file provided".into()));
    };

    let stored = state
        .storage
        .save(UPLOAD_FOLDER, &stored_file_name(&ext), &bytes)
        .await?;

    let input = CreateUploadedImage {
        title,
        description: form
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        image_url: stored.url.clone(),
        storage_path: stored.path.clone(),
        uploaded_by: Some(admin.user_id),
    };
    let image = match UploadedImageRepo::create(&state.pool, &input).await {
        Ok(image) => image,
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(&stored.path).await {
                tracing::warn!(path = %stored.path, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        image_id = image.id,
        admin_id = admin.user_id,
        size = bytes.len(),
        "Image uploaded"
    );
    Ok(created("Image uploaded successfully", image))
}

/// GET /api/v1/uploads
pub async fn list_uploads(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<UploadListParams>,
) -> AppResult<Envelope<Paginated<UploadedImage>>> {
    let page = PageRequest::resolve(
        params.page,
        params.page_size,
        UPLOAD_PAGE_SIZES,
        DEFAULT_UPLOAD_PAGE_SIZE,
    );
    let (rows, total) = UploadedImageRepo::search(&state.pool, params.search.as_deref(), page).await?;
    Ok(ok(
        "Images retrieved successfully",
        Paginated::new(rows, total, page),
    ))
}

/// GET /api/v1/uploads/{id}
pub async fn get_upload(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<UploadedImage>> {
    let image = UploadedImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(ok("Image retrieved successfully", image))
}

/// DELETE /api/v1/uploads/{id}
///
/// The row is always removed; a failure to remove the stored file is only
/// logged.
pub async fn delete_upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<()>> {
    let image = UploadedImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    if let Err(e) = state.storage.delete(&image.storage_path).await {
        tracing::error!(image_id = id, path = %image.storage_path, error = %e, "Failed to delete stored image");
    }
    UploadedImageRepo::delete(&state.pool, id).await?;

    tracing::info!(image_id = id, admin_id = admin.user_id, "Image deleted");
    Ok(message("Image deleted successfully"))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Image",
        id,
    })
}
