use actix_multipart::form::{bytes::Bytes, MultipartForm};
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{required, ApiResponse, DeleteImageForm, ServiceError, UploadQuery};
use crate::services::UploadService;

/// Largest multipart body buffered before the size check rejects it.
pub const MULTIPART_MEMORY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(MultipartForm)]
pub struct ImageUpload {
    #[multipart(limit = "10MB")]
    pub file: Option<Bytes>,
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    params(("folder" = Option<String>, Query, description = "Target folder (default gudang-pancing)")),
    responses(
        (status = 200, description = "Image uploaded successfully", body = UploadedImage),
        (status = 400, description = "Missing file, wrong type or too large", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Media service unavailable", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    req: HttpRequest,
    payload: web::Payload,
    query: web::Query<UploadQuery>,
    jwt_manager: web::Data<JwtManager>,
    upload_service: web::Data<UploadService>,
) -> Result<HttpResponse, actix_web::Error> {
    authenticate_request(&req, &jwt_manager)?;

    // The body is only read once the caller is authenticated
    let MultipartForm(form) =
        MultipartForm::<ImageUpload>::from_request(&req, &mut payload.into_inner()).await?;

    let Some(file) = form.file else {
        return Err(ServiceError::ValidationError("No file uploaded".to_string()).into());
    };

    let content_type = file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
    let file_name = file.file_name.clone().unwrap_or_else(|| "upload".to_string());

    let image = upload_service
        .upload_image(
            file.data.to_vec(),
            &file_name,
            &content_type,
            query.folder.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        image,
        "Image uploaded successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/upload",
    tag = "upload",
    request_body = DeleteImageForm,
    responses(
        (status = 200, description = "Image deleted successfully"),
        (status = 400, description = "Public ID missing", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Media service unavailable", body = ErrorResponse)
    )
)]
pub async fn delete_image(
    req: HttpRequest,
    form: web::Json<DeleteImageForm>,
    jwt_manager: web::Data<JwtManager>,
    upload_service: web::Data<UploadService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let Some(public_id) = required(&form.public_id) else {
        return Err(ServiceError::ValidationError(
            "Public ID is required".to_string(),
        ));
    };

    upload_service.delete_image(public_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Image deleted successfully")))
}
