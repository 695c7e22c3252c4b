use crate::errors::AppError;
use crate::jobs::{self, Upload};
use crate::models::{
    ColumnsQuery, ColumnsResponse, JobStatusResponse, Language, ReportGoal, WritingStyle,
};
use crate::pdf::export_pdf;
use crate::render::{RenderOptions, pdf_file_name, render_report};
use crate::spreadsheet::required_columns;
use crate::state::AppState;
use crate::ui::{render_index, render_progress};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
    Json,
};
use tracing::error;

pub async fn index() -> Html<String> {
    Html(render_index())
}

/// Browser form submit: starts the job and sends the user to its page.
pub async fn create_report_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let upload = read_upload(multipart).await?;
    let job = jobs::start_job(&state, upload).await?;
    Ok(Redirect::to(&format!("/reports/{}", job.id)))
}

pub async fn create_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<JobStatusResponse>), AppError> {
    let upload = read_upload(multipart).await?;
    let job = jobs::start_job(&state, upload).await?;
    Ok((StatusCode::ACCEPTED, Json(jobs::status_response(&state, &job))))
}

pub async fn show_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let job = jobs::get_job(&state, &id).await?;
    let html = match (&job.report, job.is_ready()) {
        (Some(report), true) => {
            let pdf_url = format!("/reports/{}/pdf", job.id);
            let options = RenderOptions {
                agency_name: &state.settings.agency_name,
                pdf_url: state.settings.pdf_converter.as_ref().map(|_| pdf_url.as_str()),
                for_pdf: false,
            };
            render_report(&job, report, &options)
        }
        _ => render_progress(&job, state.settings.max_retries),
    };
    Ok(Html(html))
}

pub async fn report_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let job = jobs::get_job(&state, &id).await?;
    let Some(report) = job.report.as_ref().filter(|_| job.is_ready()) else {
        return Err(AppError::conflict("The report is still being generated"));
    };
    let Some(converter) = state.settings.pdf_converter.as_deref() else {
        return Err(AppError::not_implemented(
            "PDF export is not configured on this server; use your browser's print dialog and choose \"Save as PDF\"",
        ));
    };

    let options = RenderOptions {
        agency_name: &state.settings.agency_name,
        pdf_url: None,
        for_pdf: true,
    };
    let html = render_report(&job, report, &options);
    let bytes = export_pdf(converter, &state.settings.pdf_converter_args, &html)
        .await
        .map_err(|err| {
            error!(request_id = %id, "pdf export failed: {err}");
            AppError::internal(err)
        })?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", pdf_file_name(report)),
        ),
    ];
    Ok((headers, bytes))
}

pub async fn columns(Query(query): Query<ColumnsQuery>) -> Result<Json<ColumnsResponse>, AppError> {
    let goal = match query.goal.as_deref() {
        Some(value) => parse_goal(value)?,
        None => ReportGoal::default(),
    };
    let metrics: Vec<String> = query
        .metrics
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Json(ColumnsResponse {
        goal,
        columns: required_columns(goal, &metrics),
    }))
}

pub async fn report_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobStatusResponse>, AppError> {
    let job = jobs::get_job(&state, &id).await?;
    Ok(Json(jobs::status_response(&state, &job)))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    jobs::delete_job(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn report_callback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<JobStatusResponse>, AppError> {
    let response = jobs::deliver_callback(&state, &id, body).await?;
    Ok(Json(response))
}

fn parse_goal(value: &str) -> Result<ReportGoal, AppError> {
    ReportGoal::parse(value).ok_or_else(|| AppError::bad_request(format!("unknown goal '{value}'")))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file = None;
    let mut goal = ReportGoal::default();
    let mut writing_style = WritingStyle::default();
    let mut language = Language::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((file_name, bytes.to_vec()));
            }
            "goal" => goal = parse_goal(&field.text().await?)?,
            "writing_style" => {
                let value = field.text().await?;
                writing_style = WritingStyle::parse(&value)
                    .ok_or_else(|| AppError::bad_request(format!("unknown writing style '{value}'")))?;
            }
            "language" => {
                let value = field.text().await?;
                language = Language::parse(&value)
                    .ok_or_else(|| AppError::bad_request(format!("unknown language '{value}'")))?;
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = file.filter(|(name, bytes)| !name.is_empty() || !bytes.is_empty())
    else {
        return Err(AppError::bad_request("Please upload a file first"));
    };

    Ok(Upload {
        file_name,
        bytes,
        goal,
        writing_style,
        language,
    })
}
