//! File listing, upload, detail, download, edit and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use fileshare_core::error::AppError;
use fileshare_service::file::{EditFileForm, FileForm, UploadedBlob};
use fileshare_storage::sanitize_filename;

use crate::dto::request::ListingQuery;
use crate::dto::response::{ApiResponse, FileDetailResponse, FileResponse, ListingResponse};
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// GET /api/files?search=&page=
pub async fn list_files(
    State(state): State<AppState>,
    _auth: MaybeAuthUser,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let page = match query.page.as_deref().map(str::trim) {
        None | Some("") => 1,
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| AppError::not_found("Invalid page"))?,
    };

    let listing = state
        .search_service
        .filter_listing(query.search.as_deref(), page)
        .await?;

    Ok(Json(ApiResponse::ok(listing.into())))
}

/// POST /api/files (multipart: name, file, access)
pub async fn create_file(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponse>>), AppError> {
    let fields = read_form(multipart).await?;
    let form = FileForm::new(fields.name, fields.access, fields.file);

    let file = state.upload_service.create(&auth, form).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file.into()))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileDetailResponse>>, AppError> {
    let detail = state.file_service.get_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail.into())))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (file, stream) = state.file_service.download(&auth, id).await?;

    let content_type = file
        .mime_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                sanitize_filename(&file.original_filename)
            ),
        )
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// PUT /api/files/{id} (multipart: name, file, access; all optional)
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<FileResponse>>, AppError> {
    let fields = read_form(multipart).await?;
    let form = EditFileForm::new(fields.name, fields.access, fields.file);

    let file = state.file_service.update_file(&auth, id, form).await?;

    Ok(Json(ApiResponse::ok(file.into())))
}

/// DELETE /api/files/{id}, then redirect to the listing
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Redirect::to("/api/files"))
}

/// Raw multipart fields shared by the create and edit forms.
#[derive(Debug, Default)]
struct FormFields {
    name: Option<String>,
    access: Option<String>,
    file: Option<UploadedBlob>,
}

async fn read_form(mut multipart: Multipart) -> Result<FormFields, AppError> {
    let mut fields = FormFields::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => fields.name = Some(field.text().await.map_err(multipart_error)?),
            "access" => fields.access = Some(field.text().await.map_err(multipart_error)?),
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                fields.file = Some(UploadedBlob {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    Ok(fields)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Request body exceeds the upload limit")
    } else {
        AppError::validation(format!("Multipart error: {}", e.body_text()))
    }
}
