//! Request handlers for the upload API.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use crate::api::AppContext;
use crate::error::Result;
use crate::progress::ProgressTx;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    nombre_archivo: String,
    texto_procesado: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Liveness probe.
pub async fn liveness() -> &'static str {
    "docsift API is up"
}

/// `POST /procesar` — multipart field `file`, returns the cleaned text.
///
/// The upload is persisted under the configured directory only for the
/// lifetime of the request; the drop guard removes it on every exit path.
pub async fn process_document(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(data) => upload = Some((filename, data)),
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("unreadable upload: {e}"),
                        )
                    }
                }
                break;
            }
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid multipart payload: {e}"),
                )
            }
        }
    }

    let Some((filename, data)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "no file was uploaded");
    };

    let filename = sanitize_filename(&filename);
    let supported = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ctx.dispatcher.supports(ext));
    if filename.is_empty() || !supported {
        return error_response(
            StatusCode::BAD_REQUEST,
            "file type not allowed or file has no name",
        );
    }

    // A per-process counter keeps concurrent uploads of the same name from
    // clobbering each other in the shared upload directory.
    static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
    let stored = ctx.upload_dir.join(format!("{seq}-{filename}"));

    // Guard first, so an interrupted write still gets cleaned up.
    let _guard = TempUpload(stored.clone());
    if let Err(e) = tokio::fs::write(&stored, &data).await {
        error!("failed to store upload: {e}");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not store upload");
    }

    let dispatcher = ctx.dispatcher.clone();
    let cleaner = ctx.cleaner.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<String> {
        let raw = dispatcher.extract_text(&stored, &mut ProgressTx::none())?;
        Ok(cleaner.clean(&raw))
    })
    .await;

    match result {
        Ok(Ok(text)) => {
            info!("processed upload '{filename}'");
            (
                StatusCode::OK,
                Json(ProcessResponse {
                    nombre_archivo: filename,
                    texto_procesado: text,
                }),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            let status = if e.is_rejection() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, e.to_string())
        }
        Err(e) => {
            error!("processing task failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "processing failed")
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Removes the stored upload when the request ends, on every exit path.
struct TempUpload(PathBuf);

impl Drop for TempUpload {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Reduce an uploaded filename to a safe basename: path components dropped,
/// anything outside [A-Za-z0-9._-] mapped to underscores.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
