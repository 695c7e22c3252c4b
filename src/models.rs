use crate::report::Report;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One spreadsheet data row keyed by the header cells.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportGoal {
    Roas,
    #[default]
    Cpa,
    Custom,
}

impl ReportGoal {
    pub const ALL: [ReportGoal; 3] = [ReportGoal::Roas, ReportGoal::Cpa, ReportGoal::Custom];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "roas" => Some(Self::Roas),
            "cpa" | "cpl" => Some(Self::Cpa),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roas => "roas",
            Self::Cpa => "cpa",
            Self::Custom => "custom",
        }
    }

    /// Value sent to the webhook as `reportFocus`.
    pub fn report_focus(self) -> &'static str {
        match self {
            Self::Roas => "roas",
            Self::Cpa => "cpl",
            Self::Custom => "custom",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Roas => "ROAS / Revenue Focused",
            Self::Cpa => "Leads / CPA Focused",
            Self::Custom => "Custom Metrics",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Roas => "Focus the report on return on ad spend, conversion value, and revenue",
            Self::Cpa => "Highlight cost-per-acquisition, lead volume, and funnel efficiency",
            Self::Custom => "Choose your own focus metrics manually",
        }
    }

    pub fn coming_soon(self) -> bool {
        matches!(self, Self::Custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    Casual,
    #[default]
    Professional,
    Technical,
}

impl WritingStyle {
    pub const ALL: [WritingStyle; 3] = [Self::Casual, Self::Professional, Self::Technical];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Some(Self::Casual),
            "professional" => Some(Self::Professional),
            "technical" => Some(Self::Technical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Professional => "professional",
            Self::Technical => "technical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Professional => "Professional",
            Self::Technical => "Technical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Self::En, Self::Fr];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

/// Body POSTed to the report webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub excel_data: Vec<Row>,
    pub report_focus: String,
    pub writing_style: WritingStyle,
    pub language: Language,
    pub timestamp: i64,
    pub report_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Generating,
    Polling,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Webhook,
    Callback,
    Sample,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportJob {
    pub id: String,
    pub goal: ReportGoal,
    pub file_name: String,
    pub status: JobStatus,
    pub progress: u8,
    pub retry_count: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    pub created_at: String,
    pub updated_at: String,
    pub request: WebhookPayload,
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub source: Option<ReportSource>,
}

impl ReportJob {
    pub fn is_ready(&self) -> bool {
        self.status == JobStatus::Complete && self.report.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub jobs: BTreeMap<String, ReportJob>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub request_id: String,
    pub goal: ReportGoal,
    pub status: JobStatus,
    pub progress: u8,
    pub retry_count: u32,
    pub max_retries: u32,
    pub ready: bool,
    pub source: Option<ReportSource>,
    pub message: Option<String>,
    pub warnings: Vec<String>,
    pub date_range: Option<DateRange>,
    pub row_count: usize,
    pub report_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ColumnsQuery {
    pub goal: Option<String>,
    pub metrics: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ColumnsResponse {
    pub goal: ReportGoal,
    pub columns: Vec<String>,
}
