//! Axum route handlers for the upload page, live preview and HTML export.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Datelike;
use tracing::info;

use crate::errors::AppError;
use crate::extract::handlers::{extract_upload, read_upload};
use crate::models::portfolio::PortfolioDocument;
use crate::render::export::{export_filename, render_document, render_preview_page};
use crate::render::templates::Template;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn html_attachment(html: String, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        html,
    )
        .into_response()
}

/// GET /preview/:template
///
/// With nothing stored there is nothing to preview, so the client is sent to
/// the upload page instead.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Response, AppError> {
    let Some(document) = state.store.load().await? else {
        return Ok(Redirect::to("/upload").into_response());
    };
    let template = Template::from_id(&template);
    Ok(Html(render_preview_page(template, &document, current_year())).into_response())
}

/// GET /api/portfolio/export/:template
pub async fn handle_export_stored(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Response, AppError> {
    let document = state
        .store
        .load()
        .await?
        .ok_or_else(|| AppError::NotFound("No portfolio has been uploaded yet".to_string()))?;
    Ok(export(&template, &document))
}

/// POST /api/export/:template
///
/// Stateless export of the document in the request body.
pub async fn handle_export(
    Path(template): Path<String>,
    payload: Result<Json<PortfolioDocument>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(document) = payload?;
    Ok(export(&template, &document))
}

fn export(template: &str, document: &PortfolioDocument) -> Response {
    let template = Template::from_id(template);
    let filename = export_filename(&document.personal.name);
    info!("Exporting {template} portfolio as {filename}");
    html_attachment(render_document(template, document, current_year()), &filename)
}

/// GET /upload
pub async fn handle_upload_page(State(state): State<AppState>) -> Html<String> {
    let options: String = Template::ALL
        .iter()
        .map(|t| {
            let selected = if *t == state.config.default_template {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{selected}>{}</option>",
                t.as_str(),
                t.display_name()
            )
        })
        .collect();

    Html(UPLOAD_PAGE.replace("{options}", &options))
}

/// POST /upload
///
/// Extract, parse and store, then hand off to the live preview. A running
/// enhancement batch would be reviewed against a replaced document, so the
/// upload is refused with a conflict until the batch finishes.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let upload = read_upload(multipart).await?;
    ensure_no_batch_running(&state)?;
    let template = upload
        .template
        .as_deref()
        .map(Template::from_id)
        .unwrap_or(state.config.default_template);

    let extracted = extract_upload(&upload).await?;
    let document = parse_resume(&extracted.text, &state.llm).await?;

    // Checked again: a batch may have started while the resume was parsed.
    let mut workflow = state.workflow.try_lock().map_err(|_| batch_running())?;
    state.store.save(&document).await?;
    // A review computed against the previous document no longer applies.
    workflow.reject()?;

    info!("Upload parsed and stored, previewing with {template}");
    Ok(Redirect::to(&format!("/preview/{template}")))
}

fn ensure_no_batch_running(state: &AppState) -> Result<(), AppError> {
    state.workflow.try_lock().map(drop).map_err(|_| batch_running())
}

fn batch_running() -> AppError {
    AppError::Conflict(
        "An enhancement batch is running; upload again once it finishes".to_string(),
    )
}

const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>CareerCanvas - Upload your resume</title>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; background: #f8fafc; color: #0f172a; display: flex; min-height: 100vh; align-items: center; justify-content: center; margin: 0; }
    form { background: #fff; padding: 2rem; border-radius: 1rem; box-shadow: 0 10px 30px rgba(15, 23, 42, 0.08); display: grid; gap: 1rem; width: min(420px, 90vw); }
    h1 { margin: 0; font-size: 1.5rem; }
    p { margin: 0; color: #64748b; }
    button { padding: 0.75rem; border: 0; border-radius: 0.5rem; background: #4f46e5; color: #fff; font-weight: 600; cursor: pointer; }
  </style>
</head>
<body>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <h1>Turn your resume into a portfolio</h1>
    <p>PDF, DOCX or plain text.</p>
    <input type="file" name="file" accept=".pdf,.docx,.txt,.md" required>
    <label>Template <select name="template">{options}</select></label>
    <button type="submit">Build my portfolio</button>
  </form>
</body>
</html>
"#;
