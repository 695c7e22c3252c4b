//! Report job orchestration.
//!
//! A job moves `generating` → `complete` when the webhook answers within the
//! retry budget. Otherwise it enters `polling`, where it waits for a late
//! delivery through the callback route, and finally falls back to the bundled
//! sample report.

use crate::errors::AppError;
use crate::models::{
    JobStatus, JobStatusResponse, Language, ReportGoal, ReportJob, ReportSource, WebhookPayload,
    WritingStyle,
};
use crate::report::Report;
use crate::sample::{SAMPLE_NOTICE, sample_report};
use crate::spreadsheet::{
    SpreadsheetError, accepts_file_name, detect_date_range, missing_columns, parse_workbook,
    required_columns,
};
use crate::state::AppState;
use crate::storage::persist_data;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const START_PROGRESS: u8 = 5;
pub const SENDING_PROGRESS: u8 = 10;
pub const POLL_START_PROGRESS: u8 = 10;
pub const POLL_STEP: u8 = 2;
pub const POLL_CEILING: u8 = 95;

pub const POLLING_MESSAGE: &str =
    "We're processing your report in the background. This might take a few minutes...";

#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub goal: ReportGoal,
    pub writing_style: WritingStyle,
    pub language: Language,
}

fn now_string() -> String {
    Utc::now().to_rfc3339()
}

fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validates the upload, stores the job and spawns its generation task.
pub async fn start_job(state: &AppState, upload: Upload) -> Result<ReportJob, AppError> {
    if upload.goal.coming_soon() {
        return Err(AppError::bad_request(
            "Custom metrics reports are coming soon; choose the ROAS or CPA focus",
        ));
    }
    if upload.bytes.is_empty() {
        return Err(AppError::bad_request("Please upload a file first"));
    }
    if !accepts_file_name(&upload.file_name) {
        return Err(AppError::bad_request(
            SpreadsheetError::UnsupportedFile(upload.file_name).to_string(),
        ));
    }

    let bytes = upload.bytes;
    let rows = tokio::task::spawn_blocking(move || parse_workbook(&bytes))
        .await
        .map_err(AppError::internal)?
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let missing = missing_columns(&rows, &required_columns(upload.goal, &[]));
    let mut warnings = Vec::new();
    if !missing.is_empty() {
        warnings.push(format!("Missing expected columns: {}", missing.join(", ")));
    }
    let date_range = detect_date_range(&rows);

    let id = new_request_id();
    let now = Utc::now();
    let job = ReportJob {
        id: id.clone(),
        goal: upload.goal,
        file_name: upload.file_name,
        status: JobStatus::Generating,
        progress: START_PROGRESS,
        retry_count: 0,
        message: None,
        warnings,
        date_range,
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
        request: WebhookPayload {
            excel_data: rows,
            report_focus: upload.goal.report_focus().to_string(),
            writing_style: upload.writing_style,
            language: upload.language,
            timestamp: now.timestamp_millis(),
            report_id: id.clone(),
        },
        report: None,
        source: None,
    };

    {
        let mut data = state.data.lock().await;
        data.jobs.insert(id.clone(), job.clone());
        persist_data(&state.settings.data_path, &data).await?;
    }

    info!(
        request_id = %id,
        goal = upload.goal.as_str(),
        rows = job.request.excel_data.len(),
        "report job created"
    );
    tokio::spawn(run_job(state.clone(), id));
    Ok(job)
}

/// Applies `change` to a stored job and persists the store. False when the
/// job no longer exists.
async fn update_job(state: &AppState, id: &str, change: impl FnOnce(&mut ReportJob)) -> bool {
    let mut data = state.data.lock().await;
    let Some(job) = data.jobs.get_mut(id) else {
        return false;
    };
    change(job);
    job.updated_at = now_string();
    if let Err(err) = persist_data(&state.settings.data_path, &data).await {
        error!(request_id = %id, "failed to persist report store: {}", err.message);
    }
    true
}

/// Like [`update_job`], but only while the job is still waiting for a report.
/// False when the job is gone or already has one.
async fn update_pending(state: &AppState, id: &str, change: impl FnOnce(&mut ReportJob)) -> bool {
    let mut pending = false;
    let exists = update_job(state, id, |job| {
        pending = job.report.is_none();
        if pending {
            change(job);
        }
    })
    .await;
    exists && pending
}

async fn complete_job(state: &AppState, id: &str, report: Report, source: ReportSource) -> bool {
    update_pending(state, id, |job| {
        job.report = Some(report);
        job.source = Some(source);
        job.status = JobStatus::Complete;
        job.progress = 100;
        job.message = (source == ReportSource::Sample).then(|| SAMPLE_NOTICE.to_string());
    })
    .await
}

/// Sends the stored payload with linear backoff, then falls back to polling.
pub async fn run_job(state: AppState, id: String) {
    let snapshot = {
        let data = state.data.lock().await;
        data.jobs.get(&id).map(|job| (job.request.clone(), job.goal))
    };
    let Some((payload, goal)) = snapshot else {
        return;
    };

    let max_retries = state.settings.max_retries;
    for attempt in 0..=max_retries {
        let pending = update_pending(&state, &id, |job| {
            job.status = JobStatus::Generating;
            job.progress = job.progress.max(SENDING_PROGRESS);
        })
        .await;
        if !pending {
            return;
        }

        match state.webhook.send(&payload, goal).await {
            Ok(report) => {
                info!(request_id = %id, attempt = attempt + 1, "webhook report received");
                complete_job(&state, &id, report, ReportSource::Webhook).await;
                return;
            }
            Err(err) => {
                warn!(request_id = %id, attempt = attempt + 1, "webhook attempt failed: {err}");
                if attempt == max_retries {
                    break;
                }
                let message = err.to_string();
                update_pending(&state, &id, |job| {
                    job.retry_count = attempt + 1;
                    job.message = Some(message);
                })
                .await;
                sleep(state.settings.retry_delay(attempt)).await;
            }
        }
    }

    warn!(request_id = %id, "webhook retries exhausted, polling for a late delivery");
    poll_for_report(&state, &id, goal).await;
}

async fn poll_for_report(state: &AppState, id: &str, goal: ReportGoal) {
    let mut progress = POLL_START_PROGRESS;
    let entered = update_pending(state, id, |job| {
        job.status = JobStatus::Polling;
        job.progress = progress;
        job.message = Some(POLLING_MESSAGE.to_string());
    })
    .await;
    if !entered {
        return;
    }

    loop {
        sleep(state.settings.poll_interval).await;
        progress = progress.saturating_add(POLL_STEP).min(POLL_CEILING);

        let pending = update_pending(state, id, |job| job.progress = progress).await;
        if !pending {
            info!(request_id = %id, "polling stopped, report delivered or job removed");
            return;
        }
        if progress >= POLL_CEILING {
            warn!(request_id = %id, "report generation timed out, using sample data");
            complete_job(state, id, sample_report(goal), ReportSource::Sample).await;
            return;
        }
    }
}

/// Late delivery of the webhook result for a job.
pub async fn deliver_callback(
    state: &AppState,
    id: &str,
    body: serde_json::Value,
) -> Result<JobStatusResponse, AppError> {
    let mut data = state.data.lock().await;
    let job = data
        .jobs
        .get_mut(id)
        .ok_or_else(|| AppError::not_found(format!("unknown report {id}")))?;

    if job.report.is_some() && job.source != Some(ReportSource::Sample) {
        return Err(AppError::conflict("report already delivered"));
    }

    let report =
        Report::from_webhook(job.goal, body).map_err(|err| AppError::unprocessable(err.to_string()))?;
    job.report = Some(report);
    job.source = Some(ReportSource::Callback);
    job.status = JobStatus::Complete;
    job.progress = 100;
    job.message = None;
    job.updated_at = now_string();
    let response = status_response(state, job);

    persist_data(&state.settings.data_path, &data).await?;
    info!(request_id = %id, "report delivered through callback");
    Ok(response)
}

/// Restarts jobs that were still in flight when the process stopped.
pub async fn resume_unfinished(state: &AppState) -> usize {
    let ids: Vec<String> = {
        let data = state.data.lock().await;
        data.jobs
            .values()
            .filter(|job| job.status != JobStatus::Complete)
            .map(|job| job.id.clone())
            .collect()
    };
    for id in &ids {
        info!(request_id = %id, "resuming unfinished report job");
        tokio::spawn(run_job(state.clone(), id.clone()));
    }
    ids.len()
}

pub async fn get_job(state: &AppState, id: &str) -> Result<ReportJob, AppError> {
    let data = state.data.lock().await;
    data.jobs
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("unknown report {id}")))
}

pub async fn delete_job(state: &AppState, id: &str) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    if data.jobs.remove(id).is_none() {
        return Err(AppError::not_found(format!("unknown report {id}")));
    }
    persist_data(&state.settings.data_path, &data).await?;
    info!(request_id = %id, "report job deleted");
    Ok(())
}

pub fn status_response(state: &AppState, job: &ReportJob) -> JobStatusResponse {
    JobStatusResponse {
        request_id: job.id.clone(),
        goal: job.goal,
        status: job.status,
        progress: job.progress,
        retry_count: job.retry_count,
        max_retries: state.settings.max_retries,
        ready: job.is_ready(),
        source: job.source,
        message: job.message.clone(),
        warnings: job.warnings.clone(),
        date_range: job.date_range.clone(),
        row_count: job.request.excel_data.len(),
        report_url: format!("/reports/{}", job.id),
    }
}
