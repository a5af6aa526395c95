// ============================================================
// HTTP INTERFACE
// ============================================================
// Upload form, duplicate results page, and CSV download endpoint

use actix_multipart::form::bytes::Bytes as UploadedBytes;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::cookie::Cookie;
use actix_web::dev::Server;
use actix_web::http::{header, StatusCode};
use actix_web::{get, post, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError};
use uuid::Uuid;

use crate::application::DuplicateDetector;
use crate::domain::error::AppError;
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::csv::{write_table, CsvReader};
use crate::infrastructure::session::SessionStore;

pub mod render;

const SESSION_COOKIE: &str = "sid";

/// Shared state: the session-scoped export buffers
pub struct HttpState {
    pub sessions: SessionStore,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InputMissing(_) | AppError::NoData(_) => StatusCode::BAD_REQUEST,
            AppError::ParseError(_) | AppError::Internal(_) | AppError::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_client_error() {
            tracing::warn!(error = %self, "Request rejected");
        } else {
            tracing::error!(error = %self, "Request failed");
        }
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

#[derive(Debug, MultipartForm)]
struct UploadForm {
    file: Option<UploadedBytes>,
}

/// Reuse the session id from the request cookie, or mint a new one that
/// the response must set.
fn resolve_session(req: &HttpRequest) -> (String, Option<Cookie<'static>>) {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return (cookie.value().to_string(), None);
    }
    let session_id = Uuid::new_v4().to_string();
    let cookie = Cookie::build(SESSION_COOKIE, session_id.clone())
        .path("/")
        .http_only(true)
        .finish();
    (session_id, Some(cookie))
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render::index_page())
}

#[post("/upload")]
async fn upload(
    req: HttpRequest,
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, AppError> {
    let file = form
        .file
        .ok_or_else(|| AppError::InputMissing("no file part in the upload form".to_string()))?;
    if file.file_name.as_deref().unwrap_or("").is_empty() {
        return Err(AppError::InputMissing("no file selected".to_string()));
    }

    let table = CsvReader::new().read_bytes(&file.data)?;
    let scan = DuplicateDetector::new().scan(&table);

    let (session_id, new_cookie) = resolve_session(&req);
    let has_duplicates = state.sessions.capture(&session_id, &scan.subset)?;

    tracing::info!(
        rows = table.row_count(),
        duplicates = scan.subset.row_count(),
        "Processed upload"
    );

    let html = render::results_page(
        &table,
        if has_duplicates {
            Some(&scan.subset)
        } else {
            None
        },
    );

    let mut builder = HttpResponse::Ok();
    builder.content_type("text/html; charset=utf-8");
    if let Some(cookie) = new_cookie {
        builder.cookie(cookie);
    }
    Ok(builder.body(html))
}

#[get("/download")]
async fn download(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> Result<HttpResponse, AppError> {
    let session_id = req
        .cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            AppError::NoData(
                "no duplicate rows available for download. Upload a CSV file first.".to_string(),
            )
        })?;

    let subset = state.sessions.export(&session_id)?;
    let bytes = write_table(&subset)?;

    tracing::info!(rows = subset.row_count(), "Serving duplicate rows download");

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"duplicates.csv\"",
        ))
        .body(bytes))
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(upload).service(download);
}

pub fn start_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        sessions: SessionStore::new(),
    });
    let upload_limit = config.max_upload_bytes;

    tracing::info!(host = %config.host, port = config.port, "Starting HTTP server");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(upload_limit),
            )
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
