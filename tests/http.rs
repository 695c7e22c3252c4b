use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, Client};
use rust_xlsxwriter::Workbook;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const SAMPLE_NOTICE: &str =
    "Report generation took longer than expected. We've generated a sample report for you.";

#[derive(Debug, Deserialize)]
struct JobStatusResponse {
    request_id: String,
    goal: String,
    status: String,
    progress: u8,
    retry_count: u32,
    max_retries: u32,
    ready: bool,
    source: Option<String>,
    message: Option<String>,
    warnings: Vec<String>,
    row_count: usize,
    report_url: String,
}

#[derive(Debug, Deserialize)]
struct ColumnsResponse {
    goal: String,
    columns: Vec<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

struct ServerOptions<'a> {
    webhook_url: &'a str,
    max_retries: u32,
    poll_interval_ms: u64,
    pdf_converter: Option<&'a str>,
}

impl Default for ServerOptions<'_> {
    fn default() -> Self {
        Self {
            // nothing listens on the discard port
            webhook_url: "http://127.0.0.1:9/webhook",
            max_retries: 0,
            poll_interval_ms: 10,
            pdf_converter: None,
        }
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("adreport_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(options: ServerOptions<'_>) -> TestServer {
    let port = pick_free_port();
    let mut command = Command::new(env!("CARGO_BIN_EXE_adreport"));
    command
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("WEBHOOK_URL", options.webhook_url)
        .env("WEBHOOK_MAX_RETRIES", options.max_retries.to_string())
        .env("WEBHOOK_RETRY_DELAY_MS", "10")
        .env("WEBHOOK_TIMEOUT_SECS", "5")
        .env("REPORT_POLL_INTERVAL_MS", options.poll_interval_ms.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    match options.pdf_converter {
        Some(converter) => command.env("PDF_CONVERTER", converter),
        None => command.env_remove("PDF_CONVERTER"),
    };
    let child = command.spawn().expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    let server = TestServer { base_url, child };
    wait_until_ready(&server.base_url).await;
    server
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(ServerOptions::default()).await);
    #[cfg(unix)]
    cleanup::register(server.child.id());
    *guard = Some(Arc::clone(&server));
    server
}

#[derive(Clone, Copy)]
enum MockMode {
    Revenue,
    Lead,
    Fail,
    // answers 500 this many times, then behaves like Revenue
    FailFirst(usize),
}

#[derive(Clone)]
struct MockWebhook {
    mode: MockMode,
    calls: Arc<std::sync::Mutex<Vec<(String, Value)>>>,
}

impl MockWebhook {
    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

async fn mock_handler(
    State(mock): State<MockWebhook>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let call_number = {
        let mut calls = mock.calls.lock().unwrap();
        calls.push((request_id, payload));
        calls.len()
    };

    match mock.mode {
        MockMode::Revenue => Json(json!([{ "output": revenue_output() }])).into_response(),
        MockMode::Lead => Json(json!({ "output": lead_output("Emergency Plumbing") })).into_response(),
        MockMode::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "workflow crashed").into_response(),
        MockMode::FailFirst(failures) if call_number <= failures => {
            (StatusCode::INTERNAL_SERVER_ERROR, "workflow crashed").into_response()
        }
        MockMode::FailFirst(_) => Json(json!({ "output": revenue_output() })).into_response(),
    }
}

async fn spawn_mock(mode: MockMode) -> (String, MockWebhook) {
    let mock = MockWebhook {
        mode,
        calls: Arc::default(),
    };
    let app = Router::new()
        .route("/webhook", post(mock_handler))
        .with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/webhook", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (url, mock)
}

fn revenue_output() -> Value {
    json!({
        "dateRange": "March 2025",
        "keyMetrics": {
            "totalAdSpend": "1,250",
            "revenueFromAds": 5000,
            "roas": 4,
            "adEngagementRate": 0.032,
            "costPerVisitor": 1.39
        },
        "businessSummary": "Spring campaigns paid back four times over.",
        "campaigns": [{
            "name": "Spring Sale Search",
            "spend": 1250,
            "revenue": 5000,
            "roas": 4,
            "clicks": 900,
            "costPerVisitor": 1.39,
            "engagementRate": 3.2,
            "insight": "Carried the month"
        }],
        "visibility_campaign": [{
            "name": "Spring Sale Search",
            "reachCaptured": 70,
            "reachMissedDueToBudget": 20,
            "reachMissedDueToLowRanking": 10
        }],
        "performanceSummary": { "allsummary": "Solid month overall." },
        "actionPlan": { "whatsWorking": ["Search"], "needsReview": [], "nextSteps": ["Raise budget"] },
        "dailyTrends": [
            { "date": "03/01", "roas": 3.8, "revenue": 2400, "spend": 630, "engagementRate": 3.1, "clicks": 440 },
            { "date": "03/02", "roas": 4.2, "revenue": 2600, "spend": 620, "engagementRate": 3.3, "clicks": 460 }
        ]
    })
}

fn lead_output(campaign: &str) -> Value {
    json!({
        "businessSummary": {
            "dateRange": "March 2025",
            "summary": "Lead volume held steady.",
            "businessImplications": ["Calls are up"]
        },
        "reportMetrics": {
            "totalAdSpend": 800,
            "leadsGenerated": 40,
            "costPerLead": 20,
            "websiteVisitors": 1600,
            "costPerVisitor": 0.5,
            "siteLeadRate": 2.5
        },
        "topCampaigns": [{
            "campaignName": campaign,
            "spend": 800,
            "leads": 40,
            "costPerLead": 20,
            "clicks": 1600,
            "siteLeadRate": 0.025,
            "performance": "Green"
        }]
    })
}

fn workbook_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["Date", "Campaign Name", "Cost (€)", "Conversions", "Clicks"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    let rows = [
        ("2025-03-01", "Spring Sale Search", 630.0, 12.0, 440.0),
        ("2025-03-02", "Spring Sale Search", 620.0, 14.0, 460.0),
    ];
    for (idx, (date, campaign, cost, conversions, clicks)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *date).unwrap();
        sheet.write_string(row, 1, *campaign).unwrap();
        sheet.write_number(row, 2, *cost).unwrap();
        sheet.write_number(row, 3, *conversions).unwrap();
        sheet.write_number(row, 4, *clicks).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn upload_form(goal: &str, file_name: &str, bytes: Vec<u8>) -> Form {
    Form::new()
        .text("goal", goal.to_string())
        .text("writing_style", "casual")
        .text("language", "fr")
        .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
}

async fn create_report(client: &Client, base_url: &str, form: Form) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/reports"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

async fn fetch_status(client: &Client, base_url: &str, id: &str) -> JobStatusResponse {
    client
        .get(format!("{base_url}/api/reports/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn wait_for_status(
    client: &Client,
    base_url: &str,
    id: &str,
    done: impl Fn(&JobStatusResponse) -> bool,
) -> JobStatusResponse {
    let deadline = Instant::now() + Duration::from_secs(15);
    loop {
        let status = fetch_status(client, base_url, id).await;
        if done(&status) {
            return status;
        }
        if Instant::now() > deadline {
            panic!("report {id} stuck in {status:?}");
        }
        sleep(Duration::from_millis(50)).await;
    }
}

async fn page(client: &Client, url: String) -> (reqwest::StatusCode, String) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn http_index_shows_upload_form() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let (status, html) = page(&client, format!("{}/", server.base_url)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(html.contains("Google Ads Report Generator"));
    assert!(html.contains(r#"accept=".xlsx""#));
    assert!(html.contains("Coming Soon"));
}

#[tokio::test]
async fn http_columns_follow_goal() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let roas: ColumnsResponse = client
        .get(format!("{}/api/columns?goal=roas", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(roas.goal, "roas");
    assert!(roas.columns.contains(&"Conv. Value (€)".to_string()));

    let custom: ColumnsResponse = client
        .get(format!("{}/api/columns?goal=custom&metrics=cost,unknown_metric", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        custom.columns,
        vec!["Date", "Campaign Name", "Cost (€)", "unknown_metric"]
    );

    let bad = client
        .get(format!("{}/api/columns?goal=clicks", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_upload_validation_errors() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let csv = create_report(&client, &server.base_url, upload_form("roas", "export.csv", b"Date\n".to_vec())).await;
    assert_eq!(csv.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(csv.text().await.unwrap().contains(".xlsx"));

    let missing = create_report(&client, &server.base_url, Form::new().text("goal", "roas")).await;
    assert_eq!(missing.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(missing.text().await.unwrap(), "Please upload a file first");

    let custom = create_report(&client, &server.base_url, upload_form("custom", "export.xlsx", workbook_bytes())).await;
    assert_eq!(custom.status(), reqwest::StatusCode::BAD_REQUEST);

    let broken = create_report(
        &client,
        &server.base_url,
        upload_form("roas", "export.xlsx", b"definitely not a zip".to_vec()),
    )
    .await;
    assert_eq!(broken.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(broken.text().await.unwrap().starts_with("Error reading file"));
}

#[tokio::test]
async fn http_unknown_report_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    assert_eq!(page(&client, format!("{base}/reports/missing")).await.0, reqwest::StatusCode::NOT_FOUND);
    assert_eq!(page(&client, format!("{base}/reports/missing/pdf")).await.0, reqwest::StatusCode::NOT_FOUND);
    assert_eq!(page(&client, format!("{base}/api/reports/missing")).await.0, reqwest::StatusCode::NOT_FOUND);

    let delete = client.delete(format!("{base}/api/reports/missing")).send().await.unwrap();
    assert_eq!(delete.status(), reqwest::StatusCode::NOT_FOUND);

    let callback = client
        .post(format!("{base}/api/reports/missing/callback"))
        .json(&json!({ "output": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(callback.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_form_submit_redirects_and_delete_evicts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder().redirect(redirect::Policy::none()).build().unwrap();
    let base = &server.base_url;

    let response = client
        .post(format!("{base}/reports"))
        .multipart(upload_form("cpa", "export.xlsx", workbook_bytes()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    let id = location.trim_start_matches("/reports/").to_string();
    assert!(!id.is_empty());

    let status = fetch_status(&client, base, &id).await;
    assert_eq!(status.goal, "cpa");
    assert_eq!(status.row_count, 2);
    assert!(status.warnings[0].starts_with("Missing expected columns"));

    let delete = client.delete(format!("{base}/api/reports/{id}")).send().await.unwrap();
    assert_eq!(delete.status(), reqwest::StatusCode::NO_CONTENT);
    assert_eq!(page(&client, format!("{base}{location}")).await.0, reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_roas_report_from_webhook() {
    let (webhook_url, mock) = spawn_mock(MockMode::Revenue).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let response = create_report(&client, base, upload_form("roas", "export.xlsx", workbook_bytes())).await;
    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    let created: JobStatusResponse = response.json().await.unwrap();
    assert_eq!(created.report_url, format!("/reports/{}", created.request_id));

    let done = wait_for_status(&client, base, &created.request_id, |s| s.ready).await;
    assert_eq!(done.status, "complete");
    assert_eq!(done.progress, 100);
    assert_eq!(done.source.as_deref(), Some("webhook"));

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let (header_id, payload) = &calls[0];
    assert_eq!(header_id, &created.request_id);
    assert_eq!(payload["reportId"], json!(created.request_id));
    assert_eq!(payload["reportFocus"], "roas");
    assert_eq!(payload["writingStyle"], "casual");
    assert_eq!(payload["language"], "fr");
    assert_eq!(payload["excelData"][0]["Campaign Name"], "Spring Sale Search");
    assert_eq!(payload["excelData"][1]["Cost (€)"], json!(620));

    let (status, html) = page(&client, format!("{base}{}", done.report_url)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(html.contains("Google Ads Revenue Performance Report"));
    assert!(html.contains("Spring Sale Search"));
    assert!(html.contains("€1,250"));
    assert!(html.contains("Solid month overall."));
    assert!(html.contains("window.print()"));

    let pdf = client.get(format!("{base}/reports/{}/pdf", done.request_id)).send().await.unwrap();
    assert_eq!(pdf.status(), reqwest::StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn http_cpa_report_uses_lead_layout() {
    let (webhook_url, mock) = spawn_mock(MockMode::Lead).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let created: JobStatusResponse = create_report(&client, base, upload_form("cpa", "export.xlsx", workbook_bytes()))
        .await
        .json()
        .await
        .unwrap();
    let done = wait_for_status(&client, base, &created.request_id, |s| s.ready).await;
    assert_eq!(done.source.as_deref(), Some("webhook"));
    assert_eq!(mock.calls()[0].1["reportFocus"], "cpl");

    let (_, html) = page(&client, format!("{base}{}", done.report_url)).await;
    assert!(html.contains("Google Ads Lead Generation Report"));
    assert!(html.contains("Emergency Plumbing"));
    assert!(html.contains("badge excellent"));
    assert!(html.contains("2.50%"));
}

#[tokio::test]
async fn http_failing_webhook_falls_back_to_sample() {
    let (webhook_url, mock) = spawn_mock(MockMode::Fail).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        max_retries: 2,
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let created: JobStatusResponse = create_report(&client, base, upload_form("roas", "export.xlsx", workbook_bytes()))
        .await
        .json()
        .await
        .unwrap();
    let done = wait_for_status(&client, base, &created.request_id, |s| s.ready).await;
    assert_eq!(done.source.as_deref(), Some("sample"));
    assert_eq!(done.message.as_deref(), Some(SAMPLE_NOTICE));
    assert_eq!(done.retry_count, 2);
    assert_eq!(done.max_retries, 2);

    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(id, _)| id == &created.request_id));

    let (_, html) = page(&client, format!("{base}{}", done.report_url)).await;
    assert!(html.contains("Performance Max"));
    assert!(html.contains("notice sample"));
}

#[tokio::test]
async fn http_webhook_recovers_on_retry() {
    let (webhook_url, mock) = spawn_mock(MockMode::FailFirst(1)).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        max_retries: 2,
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let created: JobStatusResponse = create_report(&client, base, upload_form("roas", "export.xlsx", workbook_bytes()))
        .await
        .json()
        .await
        .unwrap();
    let done = wait_for_status(&client, base, &created.request_id, |s| s.ready).await;
    assert_eq!(done.source.as_deref(), Some("webhook"));
    assert_eq!(done.retry_count, 1);
    assert_eq!(done.progress, 100);
    assert_eq!(mock.calls().len(), 2);

    let (_, html) = page(&client, format!("{base}{}", done.report_url)).await;
    assert!(html.contains("Spring Sale Search"));
    assert!(!html.contains("notice sample"));
}

#[tokio::test]
async fn http_callback_completes_polling_job() {
    let (webhook_url, _mock) = spawn_mock(MockMode::Fail).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        poll_interval_ms: 500,
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let created: JobStatusResponse = create_report(&client, base, upload_form("cpa", "export.xlsx", workbook_bytes()))
        .await
        .json()
        .await
        .unwrap();
    let polling = wait_for_status(&client, base, &created.request_id, |s| s.status == "polling").await;
    assert!(!polling.ready);

    let (_, html) = page(&client, format!("{base}{}", polling.report_url)).await;
    assert!(html.contains("Generating your report"));

    let callback_url = format!("{base}/api/reports/{}/callback", created.request_id);
    let delivered = client
        .post(&callback_url)
        .json(&json!({ "output": lead_output("Late Delivery Campaign") }))
        .send()
        .await
        .unwrap();
    assert_eq!(delivered.status(), reqwest::StatusCode::OK);
    let delivered: JobStatusResponse = delivered.json().await.unwrap();
    assert!(delivered.ready);
    assert_eq!(delivered.source.as_deref(), Some("callback"));

    let again = client
        .post(&callback_url)
        .json(&json!({ "output": lead_output("Twice") }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), reqwest::StatusCode::CONFLICT);

    sleep(Duration::from_millis(700)).await;
    let settled = fetch_status(&client, base, &created.request_id).await;
    assert_eq!(settled.source.as_deref(), Some("callback"));

    let (_, html) = page(&client, format!("{base}{}", settled.report_url)).await;
    assert!(html.contains("Late Delivery Campaign"));
}

#[cfg(unix)]
#[tokio::test]
async fn http_pdf_export_runs_converter() {
    let (webhook_url, _mock) = spawn_mock(MockMode::Revenue).await;
    let server = spawn_server(ServerOptions {
        webhook_url: &webhook_url,
        pdf_converter: Some("cp"),
        ..ServerOptions::default()
    })
    .await;
    let client = Client::new();
    let base = &server.base_url;

    let created: JobStatusResponse = create_report(&client, base, upload_form("roas", "export.xlsx", workbook_bytes()))
        .await
        .json()
        .await
        .unwrap();
    let done = wait_for_status(&client, base, &created.request_id, |s| s.ready).await;

    let (_, html) = page(&client, format!("{base}{}", done.report_url)).await;
    assert!(html.contains(&format!(r#"href="/reports/{}/pdf""#, done.request_id)));

    let pdf = client.get(format!("{base}/reports/{}/pdf", done.request_id)).send().await.unwrap();
    assert_eq!(pdf.status(), reqwest::StatusCode::OK);
    assert_eq!(pdf.headers()["content-type"], "application/pdf");
    assert_eq!(
        pdf.headers()["content-disposition"],
        r#"attachment; filename="google-ads-report.pdf""#
    );
    let body = pdf.text().await.unwrap();
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(!body.contains("Download as PDF"));
}
