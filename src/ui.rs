use crate::format::esc;
use crate::jobs::POLLING_MESSAGE;
use crate::models::{JobStatus, Language, ReportGoal, ReportJob, WritingStyle};
use crate::spreadsheet::{METRIC_CATALOG, required_columns};

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{GOALS}}", &goal_cards())
        .replace("{{STYLES}}", &style_choices())
        .replace("{{LANGUAGES}}", &language_choices())
        .replace("{{COLUMNS}}", &column_list(ReportGoal::default()))
        .replace("{{CATALOG}}", &metric_catalog())
}

pub fn render_progress(job: &ReportJob, max_retries: u32) -> String {
    PROGRESS_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{ID}}", &esc(&job.id))
        .replace("{{GOAL}}", &esc(job.goal.title()))
        .replace("{{PROGRESS}}", &job.progress.to_string())
        .replace("{{STATUS}}", &esc(status_line(job)))
        .replace("{{RETRY}}", &esc(retry_line(job, max_retries)))
        .replace(
            "{{POLLING_MESSAGE}}",
            &serde_json::Value::from(POLLING_MESSAGE).to_string(),
        )
        // Last, so placeholders inside the file name stay literal.
        .replace("{{FILE}}", &esc(&job.file_name))
}

pub fn status_line(job: &ReportJob) -> String {
    match job.status {
        JobStatus::Polling => POLLING_MESSAGE.to_string(),
        JobStatus::Generating => format!("Analyzing your campaign data... {}%", job.progress),
        JobStatus::Complete => "Your report is ready".to_string(),
    }
}

pub fn retry_line(job: &ReportJob, max_retries: u32) -> String {
    if job.status == JobStatus::Generating && job.retry_count > 0 {
        format!("Connection retry {}/{}...", job.retry_count, max_retries)
    } else {
        String::new()
    }
}

fn goal_cards() -> String {
    ReportGoal::ALL
        .iter()
        .map(|goal| {
            let checked = if *goal == ReportGoal::default() { " checked" } else { "" };
            let disabled = if goal.coming_soon() { " disabled" } else { "" };
            let badge = if goal.coming_soon() {
                r#"<span class="badge">Coming Soon</span>"#
            } else {
                ""
            };
            format!(
                r#"<label class="goal{disabled}"><input type="radio" name="goal" value="{}"{checked}{disabled} /><span class="goal-title">{}{badge}</span><span class="goal-text">{}</span></label>"#,
                goal.as_str(),
                esc(goal.title()),
                esc(goal.description()),
            )
        })
        .collect()
}

fn style_choices() -> String {
    WritingStyle::ALL
        .iter()
        .map(|style| {
            let checked = if *style == WritingStyle::default() { " checked" } else { "" };
            format!(
                r#"<label class="pill"><input type="radio" name="writing_style" value="{}"{checked} />{}</label>"#,
                style.as_str(),
                style.label()
            )
        })
        .collect()
}

fn language_choices() -> String {
    Language::ALL
        .iter()
        .map(|language| {
            let checked = if *language == Language::default() { " checked" } else { "" };
            let label = match language {
                Language::En => "English",
                Language::Fr => "Français",
            };
            format!(
                r#"<label class="pill"><input type="radio" name="language" value="{}"{checked} />{label}</label>"#,
                language.as_str()
            )
        })
        .collect()
}

fn column_list(goal: ReportGoal) -> String {
    required_columns(goal, &[])
        .iter()
        .map(|column| format!("<li>{}</li>", esc(column)))
        .collect()
}

fn metric_catalog() -> String {
    let mut out = String::new();
    for category in METRIC_CATALOG {
        out.push_str(&format!(r#"<div class="category"><h4>{}</h4><ul>"#, esc(category.title)));
        for metric in category.metrics {
            out.push_str(&format!(
                r#"<li><strong>{}</strong> <span>{}</span></li>"#,
                esc(metric.label),
                esc(metric.description)
            ));
        }
        out.push_str("</ul></div>");
    }
    out
}

const BASE_STYLE: &str = r#"
    :root {
      --bg-1: #eef2ff;
      --bg-2: #c7d2fe;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #4f46e5;
      --accent-2: #1e3a8a;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(30, 58, 138, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e0e7ff 60%, #f5f7ff 100%);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .status {
      min-height: 1.4em;
      font-weight: 500;
    }

    .status[data-type="error"] {
      color: #b91c1c;
    }

    .status[data-type="info"] {
      color: var(--accent-2);
    }

    button {
      border: none;
      border-radius: 16px;
      padding: 14px 28px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:hover:not(:disabled) {
      transform: translateY(-1px);
      box-shadow: 0 12px 24px rgba(79, 70, 229, 0.3);
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(12px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 640px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Google Ads Report Generator</title>
  <style>
{{STYLE}}
    .goals {
      display: grid;
      grid-template-columns: repeat(3, minmax(0, 1fr));
      gap: 14px;
    }

    .goal {
      display: grid;
      gap: 6px;
      padding: 18px;
      border: 2px solid #e5e7eb;
      border-radius: 18px;
      background: #fff;
      cursor: pointer;
    }

    .goal input {
      display: none;
    }

    .goal:has(input:checked) {
      border-color: var(--accent);
      background: #eef2ff;
    }

    .goal.disabled {
      opacity: 0.55;
      cursor: not-allowed;
    }

    .goal-title {
      font-weight: 600;
      display: flex;
      justify-content: space-between;
      gap: 8px;
    }

    .goal-text {
      font-size: 0.9rem;
      color: var(--muted);
    }

    .badge {
      font-size: 0.7rem;
      background: #fef3c7;
      color: #92400e;
      border-radius: 999px;
      padding: 2px 8px;
    }

    .choices {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .pill {
      display: inline-flex;
      align-items: center;
      gap: 6px;
      padding: 8px 14px;
      border-radius: 999px;
      background: #fff;
      border: 1px solid #e5e7eb;
    }

    .drop {
      display: grid;
      place-items: center;
      gap: 8px;
      padding: 28px;
      border: 2px dashed #a5b4fc;
      border-radius: 18px;
      background: #fff;
      text-align: center;
    }

    .columns {
      columns: 2;
      margin: 0;
      padding-left: 18px;
      color: var(--muted);
      font-size: 0.9rem;
    }

    details {
      font-size: 0.9rem;
    }

    .catalog {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 12px;
    }

    .category ul {
      padding-left: 18px;
      margin: 6px 0 0;
    }

    .category span {
      color: var(--muted);
    }

    @media (max-width: 640px) {
      .goals,
      .catalog {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Google Ads Report Generator</h1>
      <p class="subtitle">Upload your Google Ads export and get a client-ready performance report.</p>
    </header>

    <form id="report-form" method="post" action="/reports" enctype="multipart/form-data">
      <section>
        <h2>1. Choose the report focus</h2>
        <div class="goals">{{GOALS}}</div>
      </section>

      <section>
        <h2>2. Writing style</h2>
        <div class="choices">{{STYLES}}</div>
      </section>

      <section>
        <h2>3. Language</h2>
        <div class="choices">{{LANGUAGES}}</div>
      </section>

      <section>
        <h2>4. Upload your export</h2>
        <label class="drop">
          <span>Drop your Google Ads export here or click to browse</span>
          <input id="file" type="file" name="file" accept=".xlsx" required />
          <small class="subtitle">Only .xlsx files are supported</small>
        </label>
        <p class="subtitle">Required columns:</p>
        <ul id="columns" class="columns">{{COLUMNS}}</ul>
      </section>

      <details>
        <summary>Custom metrics (coming soon)</summary>
        <div class="catalog">{{CATALOG}}</div>
      </details>

      <div class="status" id="status"></div>
      <button id="submit" type="submit">Generate Report</button>
    </form>
  </main>

  <script>
    const form = document.getElementById('report-form');
    const fileEl = document.getElementById('file');
    const columnsEl = document.getElementById('columns');
    const statusEl = document.getElementById('status');
    const submitEl = document.getElementById('submit');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeHtml = (text) =>
      text.replace(/[&<>"']/g, (ch) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[ch]);

    const loadColumns = async (goal) => {
      const res = await fetch(`/api/columns?goal=${encodeURIComponent(goal)}`);
      if (!res.ok) {
        throw new Error('Unable to load required columns');
      }
      const data = await res.json();
      columnsEl.innerHTML = data.columns.map((column) => `<li>${escapeHtml(column)}</li>`).join('');
    };

    document.querySelectorAll('input[name="goal"]').forEach((input) => {
      input.addEventListener('change', () => {
        loadColumns(input.value).catch((err) => setStatus(err.message, 'error'));
      });
    });

    fileEl.addEventListener('change', () => {
      const file = fileEl.files[0];
      if (file && !file.name.toLowerCase().endsWith('.xlsx')) {
        setStatus('Only .xlsx files are supported', 'error');
        fileEl.value = '';
      } else {
        setStatus('', '');
      }
    });

    form.addEventListener('submit', (event) => {
      if (!fileEl.files.length) {
        event.preventDefault();
        setStatus('Please upload a file first', 'error');
        return;
      }
      submitEl.disabled = true;
      setStatus('Uploading...', 'info');
    });
  </script>
</body>
</html>
"#;

const PROGRESS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Generating report</title>
  <style>
{{STYLE}}
    .track {
      height: 14px;
      border-radius: 999px;
      background: #e0e7ff;
      overflow: hidden;
    }

    .fill {
      height: 100%;
      background: linear-gradient(90deg, var(--accent), #3b82f6);
      transition: width 400ms ease;
    }

    .meta {
      display: flex;
      justify-content: space-between;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .retry {
      color: #b45309;
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Generating your report</h1>
      <p class="subtitle">{{GOAL}} &middot; {{FILE}}</p>
    </header>

    <section>
      <div class="track"><div class="fill" id="fill" style="width: {{PROGRESS}}%"></div></div>
      <p class="status" id="status">{{STATUS}}</p>
      <p class="retry" id="retry">{{RETRY}}</p>
      <div class="meta">
        <span id="rows"></span>
        <span id="range"></span>
      </div>
    </section>

    <p class="subtitle">You can keep this page open; it refreshes when the report is ready.</p>
  </main>

  <script>
    const requestId = '{{ID}}';
    const fillEl = document.getElementById('fill');
    const statusEl = document.getElementById('status');
    const retryEl = document.getElementById('retry');
    const rowsEl = document.getElementById('rows');
    const rangeEl = document.getElementById('range');

    const render = (job) => {
      fillEl.style.width = `${job.progress}%`;
      if (job.status === 'polling') {
        statusEl.textContent = {{POLLING_MESSAGE}};
      } else {
        statusEl.textContent = `Analyzing your campaign data... ${job.progress}%`;
      }
      retryEl.textContent =
        job.status === 'generating' && job.retry_count > 0
          ? `Connection retry ${job.retry_count}/${job.max_retries}...`
          : '';
      rowsEl.textContent = `${job.row_count} rows`;
      rangeEl.textContent = job.date_range ? `${job.date_range.start} → ${job.date_range.end}` : '';
    };

    const poll = async () => {
      const res = await fetch(`/api/reports/${requestId}`);
      if (!res.ok) {
        statusEl.dataset.type = 'error';
        statusEl.textContent = res.status === 404 ? 'This report no longer exists' : 'Unable to load report status';
        return;
      }
      const job = await res.json();
      if (job.ready) {
        window.location.reload();
        return;
      }
      render(job);
      setTimeout(() => poll().catch(() => setTimeout(poll, 3000)), 1000);
    };

    poll().catch(() => setTimeout(poll, 3000));
  </script>
</body>
</html>
"#;
