//! Server-side HTML for finished reports.
//!
//! Every string that came from the webhook goes through [`esc`].

use crate::charts::{Mark, PALETTE, Series, Slice, XyChart, render_donut, render_xy};
use crate::format::{count, esc, euros, euros_fixed, fixed, grouped, percent};
use crate::models::{ReportJob, ReportSource};
use crate::report::{LeadReport, Report, RevenueReport};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub agency_name: &'a str,
    /// Link for the "Download as PDF" button; the print dialog is used without one.
    pub pdf_url: Option<&'a str>,
    /// Drops interactive blocks entirely, for the converter.
    pub for_pdf: bool,
}

pub fn pdf_file_name(report: &Report) -> &'static str {
    match report {
        Report::Revenue(_) => "google-ads-report.pdf",
        Report::Lead(_) => "lead-generation-report.pdf",
    }
}

pub fn render_report(job: &ReportJob, report: &Report, options: &RenderOptions) -> String {
    match report {
        Report::Revenue(report) => render_revenue_report(job, report, options),
        Report::Lead(report) => render_lead_report(job, report, options),
    }
}

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(32 * 1024),
        }
    }

    fn push(&mut self, s: impl AsRef<str>) {
        self.buf.push_str(s.as_ref());
    }

    fn section(&mut self, title: &str) {
        self.push(format!("<section><h2>{}</h2>", esc(title)));
    }

    fn end_section(&mut self) {
        self.push("</section>");
    }

    fn tile(&mut self, label: &str, value: &str, caption: &str) {
        self.push(format!(
            r#"<div class="tile"><span class="label">{}</span><strong>{}</strong><small>{}</small></div>"#,
            esc(label),
            esc(value),
            esc(caption)
        ));
    }

    fn list(&mut self, class: &str, title: &str, items: &[String]) {
        self.push(format!(r#"<div class="plan {class}"><h3>{}</h3><ul>"#, esc(title)));
        if items.is_empty() {
            self.push(r#"<li class="muted">Nothing to report</li>"#);
        }
        for item in items {
            self.push(format!("<li>{}</li>", esc(item)));
        }
        self.push("</ul></div>");
    }

    fn chart(&mut self, title: &str, caption: &str, svg: String) {
        self.push(format!(
            r#"<figure class="chart-card"><figcaption><h3>{}</h3><p>{}</p></figcaption>{svg}</figure>"#,
            esc(title),
            esc(caption)
        ));
    }

    fn finish(self, job: &ReportJob, title: &str) -> String {
        REPORT_HTML
            .replace("{{LANG}}", job.request.language.as_str())
            .replace("{{TITLE}}", &esc(title))
            .replace("{{BODY}}", &self.buf)
    }
}

fn notices(w: &mut Html, job: &ReportJob, options: &RenderOptions) {
    if options.for_pdf {
        return;
    }
    if job.source == Some(ReportSource::Sample) {
        let message = job.message.as_deref().unwrap_or_default();
        w.push(format!(r#"<div class="notice sample pdf-exclude">{}</div>"#, esc(message)));
    }
    for warning in &job.warnings {
        w.push(format!(r#"<div class="notice pdf-exclude">{}</div>"#, esc(warning)));
    }
}

fn actions(w: &mut Html, heading: &str, options: &RenderOptions) {
    if options.for_pdf {
        return;
    }
    w.push(format!(r#"<div class="actions pdf-exclude"><h2>{}</h2><div class="buttons">"#, esc(heading)));
    match options.pdf_url {
        Some(url) => w.push(format!(r#"<a class="button" href="{}">Download as PDF</a>"#, esc(url))),
        None => w.push(r#"<button class="button" type="button" onclick="window.print()">Download as PDF</button>"#),
    }
    w.push(r#"<a class="button secondary" href="/">Generate Another Report</a></div></div>"#);
}

fn labels<T>(points: &[T], date: impl Fn(&T) -> &str) -> Vec<String> {
    points.iter().map(|p| date(p).to_string()).collect()
}

fn values<T>(points: &[T], value: impl Fn(&T) -> f64) -> Vec<f64> {
    points.iter().map(value).collect()
}

/// Executive summary sentence when the webhook sent no narrative.
fn composed_summary(report: &RevenueReport) -> String {
    let metrics = &report.key_metrics;
    let mut summary = format!(
        "This month, your campaigns generated {} in tracked revenue from {} in ad spend. \
         This means you earned {} for every €1 invested.",
        euros(metrics.revenue_from_ads),
        euros(metrics.total_ad_spend),
        euros_fixed(metrics.roas)
    );
    let top: Vec<String> = report
        .top_campaigns(2)
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    match top.len() {
        0 => {}
        1 => summary.push_str(&format!(" {} was your top performing campaign.", top[0])),
        _ => summary.push_str(&format!(
            " {} and {} were your top performing campaigns, delivering the majority of the revenue.",
            top[0], top[1]
        )),
    }
    summary
}

pub fn render_revenue_report(job: &ReportJob, report: &RevenueReport, options: &RenderOptions) -> String {
    let mut w = Html::new();
    let metrics = &report.key_metrics;

    w.push(r#"<header class="hero">"#);
    w.push("<h1>Google Ads Revenue Performance Report</h1>");
    w.push(format!(
        "<p>How your ad investment performed - {}</p>",
        esc(&report.date_range)
    ));
    w.push(format!(r#"<p class="agency">Prepared by {}</p>"#, esc(options.agency_name)));
    w.push(r#"<p class="quote">"Let's take a look at what your ad spend delivered this month."</p>"#);
    w.push("</header>");
    notices(&mut w, job, options);

    w.section("Executive Summary");
    let summary = if report.business_summary.trim().is_empty() {
        composed_summary(report)
    } else {
        report.business_summary.clone()
    };
    w.push(format!(r#"<p class="summary">{}</p><div class="tiles five">"#, esc(summary)));
    w.tile("Ad Spend", &euros(metrics.total_ad_spend), "TOTAL INVESTMENT THIS MONTH");
    w.tile("Revenue", &euros(metrics.revenue_from_ads), "REVENUE GENERATED FROM ADS");
    w.tile("ROAS", &format!("{}x", fixed(metrics.roas, 2)), "RETURN ON AD SPEND");
    w.tile(
        "Engagement",
        &percent(metrics.ad_engagement_rate * 100.0, 2),
        "AVERAGE ENGAGEMENT RATE",
    );
    w.tile("Cost per Click", &euros_fixed(metrics.cost_per_visitor), "AVERAGE COST PER CLICK");
    w.push("</div>");
    w.end_section();

    let days = &report.daily_trends;
    let day_labels = labels(days, |d| d.date.as_str());
    w.section("Visual Performance Dashboard");
    w.push(r#"<div class="charts">"#);
    w.chart(
        "Revenue vs Spend by Day",
        "Daily revenue compared with what was spent",
        render_xy(&XyChart {
            title: "Revenue vs Spend by Day".to_string(),
            labels: day_labels.clone(),
            series: vec![
                Series::new("Revenue", PALETTE[0], values(days, |d| d.revenue)),
                Series::new("Spend", PALETTE[2], values(days, |d| d.spend)),
            ],
            mark: Mark::Bar,
        }),
    );
    w.chart(
        "Ad Return Over Time (ROAS)",
        "Revenue earned for every €1 spent",
        render_xy(&XyChart {
            title: "Ad Return Over Time (ROAS)".to_string(),
            labels: day_labels.clone(),
            series: vec![Series::new("ROAS", PALETTE[0], values(days, |d| d.roas))],
            mark: Mark::Area,
        }),
    );
    w.chart(
        "Click Performance Trend",
        "Daily clicks and engagement rate",
        render_xy(&XyChart {
            title: "Click Performance Trend".to_string(),
            labels: day_labels,
            series: vec![
                Series::new("Clicks", PALETTE[1], values(days, |d| d.clicks)),
                Series::new("Engagement %", PALETTE[0], values(days, |d| d.engagement_rate)).on_right(),
            ],
            mark: Mark::Line,
        }),
    );
    let slices: Vec<Slice> = report
        .revenue_shares()
        .into_iter()
        .enumerate()
        .map(|(idx, (name, value))| Slice {
            name,
            value,
            color: PALETTE[idx % PALETTE.len()],
        })
        .collect();
    w.chart(
        "Revenue Distribution",
        "Share of tracked revenue by campaign",
        render_donut("Revenue Distribution", &slices),
    );
    w.push("</div>");
    w.end_section();

    w.section("Campaign Performance");
    for campaign in &report.campaigns {
        w.push(r#"<article class="card">"#);
        w.push(format!("<h3>{}</h3>", esc(&campaign.name)));
        if !campaign.insight.is_empty() {
            w.push(format!(r#"<p class="muted">{}</p>"#, esc(&campaign.insight)));
        }
        w.push(r#"<dl class="stats">"#);
        for (label, value) in [
            ("Spend", euros(campaign.spend)),
            ("Revenue", euros(campaign.revenue)),
            ("€ per €", fixed(campaign.roas, 2)),
            ("Clicks", grouped(campaign.clicks, 0)),
            ("Cost/Visitor", euros_fixed(campaign.cost_per_visitor)),
            ("Engagement", percent(campaign.engagement_rate, 2)),
        ] {
            w.push(format!("<div><dt>{}</dt><dd>{}</dd></div>", esc(label), esc(value)));
        }
        w.push("</dl></article>");
    }
    if report.campaigns.is_empty() {
        w.push(r#"<p class="muted">No campaign data in this report.</p>"#);
    }
    w.end_section();

    w.section("Visibility & Missed Opportunities");
    if let Some(worst) = report.most_missed_visibility() {
        w.push(format!(
            r#"<p class="summary">{} missed {} of available visibility. {}</p>"#,
            esc(&worst.name),
            percent(worst.missed(), 0),
            if worst.reach_missed_due_to_low_ranking > worst.reach_missed_due_to_budget {
                "Ad quality and ranking are the main limit on exposure."
            } else {
                "Limited budget is the main limit on exposure."
            }
        ));
    }
    for campaign in &report.visibility_campaign {
        w.push(r#"<article class="card"><div class="card-head">"#);
        w.push(format!(
            r#"<h3>{}</h3><span class="muted">Total Potential Reach</span></div>"#,
            esc(&campaign.name)
        ));
        w.push(format!(
            r#"<div class="reach"><span class="captured" style="width:{}%"></span><span class="budget" style="width:{}%"></span><span class="ranking" style="width:{}%"></span></div>"#,
            fixed(campaign.reach_captured.clamp(0.0, 100.0), 1),
            fixed(campaign.reach_missed_due_to_budget.clamp(0.0, 100.0), 1),
            fixed(campaign.reach_missed_due_to_low_ranking.clamp(0.0, 100.0), 1),
        ));
        w.push(format!(
            r#"<div class="reach-legend"><span class="captured">Captured ({})</span><span class="budget">Budget Limited ({})</span><span class="ranking">Ranking Limited ({})</span></div>"#,
            percent(campaign.reach_captured, 1),
            percent(campaign.reach_missed_due_to_budget, 1),
            percent(campaign.reach_missed_due_to_low_ranking, 1),
        ));
        if !campaign.insight.is_empty() {
            w.push(format!(r#"<p class="muted">{}</p>"#, esc(&campaign.insight)));
        }
        w.push("</article>");
    }
    w.end_section();

    w.section("Performance Summary");
    let overall = report.performance_summary.allsummary.trim();
    if overall.is_empty() {
        w.push(r#"<p class="summary muted">No performance summary available</p>"#);
    } else {
        w.push(format!(r#"<p class="summary">{}</p>"#, esc(overall)));
    }
    w.end_section();

    w.section("Strategic Action Plan");
    w.push(r#"<div class="plans">"#);
    w.list("good", "What's Working", &report.action_plan.whats_working);
    w.list("review", "What Needs Review", &report.action_plan.needs_review);
    w.list("next", "Next Steps", &report.action_plan.next_steps);
    w.push("</div>");
    w.end_section();

    actions(&mut w, "Want to increase revenue next month?", options);
    w.finish(job, "Google Ads Revenue Performance Report")
}

pub fn render_lead_report(job: &ReportJob, report: &LeadReport, options: &RenderOptions) -> String {
    let mut w = Html::new();
    let metrics = &report.report_metrics;
    let summary = &report.business_summary;

    w.push(r#"<header class="hero blue">"#);
    w.push("<h1>Google Ads Lead Generation Report</h1>");
    w.push(format!("<p>{}</p>", esc(&summary.date_range)));
    w.push("<p>How your ad budget turned into real business inquiries</p>");
    w.push(format!(r#"<p class="agency">Prepared by {}</p>"#, esc(options.agency_name)));
    w.push("</header>");
    notices(&mut w, job, options);

    w.section("Executive Summary");
    w.push(format!(r#"<p class="summary">{}</p>"#, esc(&summary.summary)));
    if !summary.business_implications.is_empty() {
        w.push(r#"<h3>What This Means for Your Business:</h3><ul class="implications">"#);
        for (idx, implication) in summary.business_implications.iter().enumerate() {
            let marker = ["good", "review", "next"].get(idx).copied().unwrap_or("plain");
            w.push(format!(r#"<li class="{marker}">{}</li>"#, esc(implication)));
        }
        w.push("</ul>");
    }
    w.push(r#"<div class="tiles six">"#);
    w.tile("Total Ad Spend", &euros(metrics.total_ad_spend), "Total budget used this month");
    w.tile("Leads Generated", &count(metrics.leads_generated), "Inquiries from your ads");
    w.tile("Cost per Lead", &euros_fixed(metrics.cost_per_lead), "How much each lead cost you");
    w.tile("Website Visitors", &grouped(metrics.website_visitors, 3), "Total clicks from your ads");
    w.tile("Cost per Visitor", &euros_fixed(metrics.cost_per_visitor), "Average cost of each click");
    w.tile("Site Lead Rate", &percent(metrics.site_lead_rate, 2), "Visitors who became leads");
    w.push("</div>");
    w.end_section();

    let charts = &report.visualizations;
    w.section("Performance Charts");
    w.push(r#"<div class="charts">"#);
    w.chart(
        "Leads vs Spend Over Time",
        "Shows how your daily ad budget turned into leads",
        render_xy(&XyChart {
            title: "Leads vs Spend Over Time".to_string(),
            labels: labels(&charts.daily_data, |d| d.date.as_str()),
            series: vec![
                Series::new("Leads", PALETTE[0], values(&charts.daily_data, |d| d.leads)),
                Series::new("Spend", PALETTE[2], values(&charts.daily_data, |d| d.spend)).on_right(),
            ],
            mark: Mark::Bar,
        }),
    );
    w.chart(
        "Cost per Lead Trend",
        "Shows how lead efficiency changed this month",
        render_xy(&XyChart {
            title: "Cost per Lead Trend".to_string(),
            labels: labels(&charts.cost_per_lead_data, |d| d.date.as_str()),
            series: vec![Series::new(
                "Cost per Lead",
                PALETTE[0],
                values(&charts.cost_per_lead_data, |d| d.cpl),
            )],
            mark: Mark::Area,
        }),
    );
    w.chart(
        "Click Performance",
        "Shows daily clicks and engagement rate",
        render_xy(&XyChart {
            title: "Click Performance".to_string(),
            labels: labels(&charts.click_data, |d| d.date.as_str()),
            series: vec![
                Series::new("Clicks", PALETTE[1], values(&charts.click_data, |d| d.clicks)),
                Series::new("Rate %", PALETTE[0], values(&charts.click_data, |d| d.rate)).on_right(),
            ],
            mark: Mark::Line,
        }),
    );
    w.push("</div>");
    w.end_section();

    w.section("Campaign Performance");
    w.push(
        "<table><thead><tr><th>CAMPAIGN</th><th>SPEND</th><th>LEADS</th><th>COST PER LEAD</th>\
         <th>CLICKS</th><th>SITE LEAD RATE</th><th>STATUS</th></tr></thead><tbody>",
    );
    for campaign in &report.top_campaigns {
        let (badge, label) = if campaign.is_excellent() {
            ("excellent", "Excellent")
        } else {
            ("warning", "Warning")
        };
        w.push(format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="badge {badge}">{label}</span></td></tr>"#,
            esc(&campaign.campaign_name),
            euros(campaign.spend),
            count(campaign.leads),
            euros_fixed(campaign.cost_per_lead),
            grouped(campaign.clicks, 0),
            percent(campaign.site_lead_rate * 100.0, 2),
        ));
        if !campaign.insight.is_empty() {
            w.push(format!(
                r#"<tr class="insight"><td colspan="7">{}</td></tr>"#,
                esc(&campaign.insight)
            ));
        }
    }
    w.push("</tbody></table>");
    w.end_section();

    w.section("Visibility Breakdown");
    w.push(r#"<div class="visibility">"#);
    for campaign in &report.visibility.campaigns {
        w.push(format!(r#"<article class="card"><h3>{}</h3>"#, esc(&campaign.name)));
        for (class, label, value) in [
            ("captured", "Reach Captured", campaign.reach_captured),
            ("budget", "Missed (Budget)", campaign.reach_missed_budget),
            ("ranking", "Missed (Ranking)", campaign.reach_missed_ranking),
        ] {
            w.push(format!(
                r#"<div class="meter"><div class="meter-head"><span>{label}</span><span>{}</span></div><div class="bar"><span class="{class}" style="width:{}%"></span></div></div>"#,
                percent(value, 1),
                fixed(value.clamp(0.0, 100.0), 1),
            ));
        }
        w.push("</article>");
    }
    w.push("</div>");
    if !report.visibility.insights.is_empty() {
        w.push(r#"<ul class="insights">"#);
        for insight in &report.visibility.insights {
            w.push(format!("<li>{}</li>", esc(insight)));
        }
        w.push("</ul>");
    }
    w.end_section();

    w.section("Strategic Recommendations");
    let recommendations = &report.strategic_recommendations;
    w.push(r#"<div class="plans">"#);
    w.list("good", "Keep Doing", &recommendations.keep_doing);
    w.list("review", "Fix or Review", &recommendations.fix_or_review);
    w.list("next", "Test or Explore", &recommendations.test_or_explore);
    w.push("</div>");
    w.end_section();

    actions(&mut w, "Want more leads next month?", options);
    w.finish(job, "Google Ads Lead Generation Report")
}

const REPORT_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --ink: #111827;
      --muted: #6b7280;
      --line: #e5e7eb;
      --panel: #f9fafb;
      --accent: #4f46e5;
      --blue: #2563eb;
      --good: #15803d;
      --review: #a16207;
      --bad: #dc2626;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: #f3f4f6;
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      line-height: 1.5;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 32px 18px 48px;
      background: #fff;
    }

    .hero {
      text-align: center;
      padding: 24px 0 32px;
    }

    .hero.blue {
      background: var(--blue);
      color: #fff;
      border-radius: 12px;
      padding: 48px 16px;
    }

    .hero h1 {
      margin: 0 0 8px;
      font-size: 2rem;
    }

    .hero p {
      margin: 4px 0;
    }

    .agency {
      font-size: 0.85rem;
      opacity: 0.7;
    }

    .quote {
      font-style: italic;
      color: var(--muted);
    }

    section {
      margin: 40px 0;
    }

    section h2 {
      font-size: 1.4rem;
      margin: 0 0 16px;
    }

    .summary {
      background: var(--panel);
      border-radius: 12px;
      padding: 20px;
    }

    .muted {
      color: var(--muted);
    }

    .notice {
      background: #fef3c7;
      border: 1px solid #fcd34d;
      border-radius: 10px;
      padding: 12px 16px;
      margin: 12px 0;
    }

    .notice.sample {
      background: #e0e7ff;
      border-color: #a5b4fc;
    }

    .tiles {
      display: grid;
      gap: 16px;
      margin-top: 20px;
    }

    .tiles.five {
      grid-template-columns: repeat(5, minmax(0, 1fr));
    }

    .tiles.six {
      grid-template-columns: repeat(3, minmax(0, 1fr));
    }

    .tile {
      display: grid;
      gap: 4px;
      text-align: center;
      padding: 16px;
      border: 1px solid var(--line);
      border-radius: 12px;
    }

    .tile .label {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .tile strong {
      font-size: 1.5rem;
    }

    .tile small {
      color: var(--muted);
      font-size: 0.7rem;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 20px;
    }

    .chart-card {
      margin: 0;
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 16px;
    }

    .chart-card h3,
    .chart-card p {
      margin: 0 0 4px;
    }

    .chart-card p {
      color: var(--muted);
      font-size: 0.85rem;
    }

    svg.chart {
      width: 100%;
      height: auto;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-axis {
      stroke: #9ca3af;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-point {
      fill: #fff;
      stroke-width: 2;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .card {
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 20px;
      margin-bottom: 16px;
    }

    .card h3 {
      margin: 0 0 8px;
    }

    .card-head {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(6, minmax(0, 1fr));
      gap: 12px;
      margin: 0;
    }

    .stats dt {
      color: var(--muted);
      font-size: 0.75rem;
    }

    .stats dd {
      margin: 0;
      font-weight: 600;
    }

    .reach,
    .bar {
      display: flex;
      height: 14px;
      background: var(--line);
      border-radius: 999px;
      overflow: hidden;
    }

    .captured {
      background: #3b82f6;
      color: #2563eb;
    }

    .budget {
      background: #facc15;
      color: var(--review);
    }

    .ranking {
      background: #f87171;
      color: var(--bad);
    }

    .reach-legend {
      display: flex;
      justify-content: space-between;
      margin-top: 8px;
      font-size: 0.85rem;
    }

    .reach-legend span {
      background: none;
    }

    .visibility {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 16px;
    }

    .meter {
      margin-top: 10px;
    }

    .meter-head {
      display: flex;
      justify-content: space-between;
      font-size: 0.85rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th {
      text-align: left;
      font-weight: 400;
      font-size: 0.8rem;
      color: var(--muted);
      padding-bottom: 12px;
    }

    td {
      padding: 12px 0;
      border-top: 1px solid var(--line);
    }

    tr.insight td {
      border-top: none;
      padding-top: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .badge {
      padding: 2px 10px;
      border-radius: 999px;
      font-size: 0.8rem;
    }

    .badge.excellent {
      background: #dcfce7;
      color: #166534;
    }

    .badge.warning {
      background: #fef9c3;
      color: #854d0e;
    }

    .plans {
      display: grid;
      grid-template-columns: repeat(3, minmax(0, 1fr));
      gap: 20px;
    }

    .plan {
      border-radius: 12px;
      padding: 20px;
    }

    .plan h3 {
      margin-top: 0;
    }

    .plan.good {
      background: #f0fdf4;
      color: var(--good);
    }

    .plan.review {
      background: #fefce8;
      color: var(--review);
    }

    .plan.next {
      background: #eff6ff;
      color: var(--blue);
    }

    .implications li.good {
      color: var(--good);
    }

    .implications li.review {
      color: var(--review);
    }

    .implications li.next {
      color: var(--blue);
    }

    .actions {
      text-align: center;
      margin-top: 48px;
    }

    .buttons {
      display: flex;
      justify-content: center;
      gap: 16px;
    }

    .button {
      border: none;
      border-radius: 10px;
      padding: 12px 24px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
      background: #4b5563;
      color: #fff;
    }

    .button.secondary {
      background: var(--good);
    }

    @media (max-width: 760px) {
      .tiles.five,
      .tiles.six,
      .charts,
      .plans,
      .visibility,
      .stats {
        grid-template-columns: repeat(2, minmax(0, 1fr));
      }
    }

    @media print {
      body {
        background: #fff;
      }

      main {
        padding: 0;
      }

      .pdf-exclude {
        display: none !important;
      }

      section,
      .chart-card,
      .card {
        break-inside: avoid;
      }
    }
  </style>
</head>
<body>
  <main>
{{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobStatus, Language, ReportGoal, WebhookPayload, WritingStyle};
    use crate::report::LeadCampaign;
    use crate::sample::{SAMPLE_NOTICE, sample_lead_report, sample_revenue_report};

    fn job(goal: ReportGoal, source: ReportSource) -> ReportJob {
        ReportJob {
            id: "abc".to_string(),
            goal,
            file_name: "export.xlsx".to_string(),
            status: JobStatus::Complete,
            progress: 100,
            retry_count: 0,
            message: (source == ReportSource::Sample).then(|| SAMPLE_NOTICE.to_string()),
            warnings: Vec::new(),
            date_range: None,
            created_at: String::new(),
            updated_at: String::new(),
            request: WebhookPayload {
                excel_data: Vec::new(),
                report_focus: goal.report_focus().to_string(),
                writing_style: WritingStyle::Professional,
                language: Language::Fr,
                timestamp: 0,
                report_id: "abc".to_string(),
            },
            report: None,
            source: Some(source),
        }
    }

    const OPTIONS: RenderOptions<'static> = RenderOptions {
        agency_name: "Acme Ads",
        pdf_url: None,
        for_pdf: false,
    };

    #[test]
    fn revenue_report_composes_summary_from_metrics() {
        let html = render_revenue_report(
            &job(ReportGoal::Roas, ReportSource::Sample),
            &sample_revenue_report(),
            &OPTIONS,
        );
        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains("€72,040 in tracked revenue from €10,100"));
        assert!(html.contains("&quot;Performance Max&quot; and &quot;Brand Search&quot;"));
        assert!(html.contains("Prepared by Acme Ads"));
        assert!(html.contains("No performance summary available"));
        assert!(html.contains(SAMPLE_NOTICE.split('.').next().unwrap()));
        assert!(html.contains("Generic Search missed 36%"));
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn webhook_text_is_escaped() {
        let mut report = sample_revenue_report();
        report.business_summary = "<script>alert(1)</script>".to_string();
        let html = render_revenue_report(&job(ReportGoal::Roas, ReportSource::Webhook), &report, &OPTIONS);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn lead_report_badges_follow_performance() {
        let mut report = sample_lead_report();
        report.top_campaigns.push(LeadCampaign {
            campaign_name: "Display".to_string(),
            performance: " green ".to_string(),
            ..LeadCampaign::default()
        });
        let html = render_lead_report(&job(ReportGoal::Cpa, ReportSource::Webhook), &report, &OPTIONS);
        assert_eq!(html.matches(r#"badge excellent"#).count(), 2);
        assert_eq!(html.matches(r#"badge warning"#).count(), 1);
        assert!(html.contains("Google Ads Lead Generation Report"));
        assert!(!html.contains("notice sample"));
    }

    #[test]
    fn pdf_render_drops_interactive_blocks() {
        let options = RenderOptions {
            pdf_url: Some("/reports/abc/pdf"),
            for_pdf: true,
            ..OPTIONS
        };
        let report = Report::Lead(sample_lead_report());
        let html = render_report(&job(ReportGoal::Cpa, ReportSource::Sample), &report, &options);
        assert!(!html.contains("Download as PDF"));
        assert!(!html.contains("notice sample"));
        assert_eq!(pdf_file_name(&report), "lead-generation-report.pdf");
    }

    #[test]
    fn pdf_link_replaces_print_dialog() {
        let options = RenderOptions {
            pdf_url: Some("/reports/abc/pdf"),
            ..OPTIONS
        };
        let html = render_report(
            &job(ReportGoal::Roas, ReportSource::Webhook),
            &Report::Revenue(sample_revenue_report()),
            &options,
        );
        assert!(html.contains(r#"href="/reports/abc/pdf""#));
        assert!(!html.contains("window.print()"));
    }
}
