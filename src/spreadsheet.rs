//! Spreadsheet intake: `.xlsx` bytes into flat row objects.
//!
//! Rows follow the usual sheet-to-JSON convention: the first row of the used
//! range names the columns, empty cells are left out of the row object and
//! rows without any value are dropped.

use crate::models::{DateRange, ReportGoal, Row};
use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fmt;
use std::io::Cursor;

#[derive(Debug)]
pub enum SpreadsheetError {
    UnsupportedFile(String),
    Unreadable(String),
    NoWorksheet,
    NoRows,
}

impl fmt::Display for SpreadsheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFile(name) => {
                write!(f, "Only .xlsx files are accepted (got {name:?})")
            }
            Self::Unreadable(err) => write!(f, "Error reading file: {err}"),
            Self::NoWorksheet => write!(f, "Error reading file: the workbook has no worksheet"),
            Self::NoRows => write!(f, "The first worksheet has no data rows"),
        }
    }
}

impl std::error::Error for SpreadsheetError {}

pub fn accepts_file_name(name: &str) -> bool {
    name.trim().to_ascii_lowercase().ends_with(".xlsx")
}

/// Reads the first worksheet of an `.xlsx` workbook.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<Row>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|err| SpreadsheetError::Unreadable(err.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)?
        .map_err(|err| SpreadsheetError::Unreadable(err.to_string()))?;

    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Err(SpreadsheetError::NoRows);
    };
    let headers = header_names(header_cells);

    let parsed: Vec<Row> = rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(name, cell)| cell_value(cell).map(|value| (name.clone(), value)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if parsed.is_empty() {
        return Err(SpreadsheetError::NoRows);
    }
    Ok(parsed)
}

fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(cells.len());

    for cell in cells {
        let base = match cell_value(cell) {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let base = if base.is_empty() { "__EMPTY".to_string() } else { base };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{base}_{suffix}");
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.is_empty() => None,
        Data::String(text) => Some(Value::String(text.clone())),
        Data::Int(value) => Some(Value::from(*value)),
        Data::Float(value) => float_value(*value),
        Data::Bool(value) => Some(Value::Bool(*value)),
        Data::DateTime(value) => float_value(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(Value::String(text.clone())),
        Data::Error(err) => Some(Value::String(err.to_string())),
    }
}

fn float_value(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Some(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number)
}

pub const ROAS_COLUMNS: &[&str] = &[
    "Date",
    "Campaign Name",
    "Cost (€)",
    "Conversions",
    "Conv. Value (€)",
    "Conv. Value / Cost",
    "Clicks",
    "Avg. CPC (€)",
    "CTR (%)",
    "Search Impression Share (%)",
    "Search Lost IS (Budget)",
    "Search Lost IS (Rank)",
];

pub const CPA_COLUMNS: &[&str] = &[
    "Date",
    "Campaign Name",
    "Cost (€)",
    "Conversions",
    "Cost / Conversion (€)",
    "Clicks",
    "Impressions",
    "CTR (%)",
    "Avg. CPC (€)",
    "Search Impression Share (%)",
    "Search Lost IS (Budget)",
    "Search Lost IS (Rank)",
    "Top Impression Share (%)",
];

pub struct Metric {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub struct MetricCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub metrics: &'static [Metric],
}

macro_rules! metric {
    ($id:literal, $label:literal, $description:literal) => {
        Metric {
            id: $id,
            label: $label,
            description: $description,
        }
    };
}

pub const METRIC_CATALOG: &[MetricCategory] = &[
    MetricCategory {
        id: "performance",
        title: "Performance",
        metrics: &[
            metric!("impressions", "Impressions", "Number of times your ad was shown"),
            metric!("clicks", "Clicks", "User engagements"),
            metric!("ctr", "CTR (%)", "Clicks ÷ Impressions"),
            metric!("avg_cpc", "Avg. CPC (€)", "Average cost per click"),
            metric!("avg_cpm", "Avg. CPM (€)", "Cost per 1,000 impressions"),
            metric!("cost", "Cost (€)", "Total spend"),
        ],
    },
    MetricCategory {
        id: "conversion",
        title: "Conversion & Efficiency",
        metrics: &[
            metric!("conversions", "Conversions", "Total conversions tracked"),
            metric!("cost_per_conv", "Cost / Conversion (€)", "Total cost ÷ Conversions"),
            metric!("conv_value", "Conv. Value (€)", "Revenue generated from conversions"),
            metric!("roas", "Conv. Value / Cost (ROAS)", "Return on ad spend"),
            metric!("value_per_click", "Conv. Value / Click", "Value per click"),
            metric!("value_per_conv", "Value / Conversion (€)", "Average value per conversion"),
        ],
    },
    MetricCategory {
        id: "competitive",
        title: "Competitive Metrics",
        metrics: &[
            metric!("search_impr_share", "Search Impression Share (%)", "Share of impressions received"),
            metric!("top_impr_share", "Top Impression Share (%)", "Share of top-position impressions"),
            metric!("abs_top_share", "Abs. Top Impression Share (%)", "Share of absolute #1 ad position"),
            metric!("lost_budget", "Search Lost IS (Budget)", "Impressions lost due to low budget"),
            metric!("lost_rank", "Search Lost IS (Rank)", "Impressions lost due to poor ad rank"),
        ],
    },
    MetricCategory {
        id: "audience",
        title: "Audience/Device/Network",
        metrics: &[
            metric!("device", "Device", "Desktop, mobile, tablet"),
            metric!("network", "Network", "Search, Display, YouTube, Partners"),
            metric!("campaign_type", "Campaign Type", "Search, PMAX, Display, Video"),
            metric!("ad_group", "Ad Group Name", "For granular reporting if needed"),
        ],
    },
    MetricCategory {
        id: "video",
        title: "Video / Engagement",
        metrics: &[
            metric!("interactions", "Interactions", "Used in video/display campaigns"),
            metric!("interaction_rate", "Interaction Rate (%)", "Engagement ÷ impressions"),
            metric!("video_views", "Video Views", "YouTube views if applicable"),
            metric!("view_rate", "View Rate (%)", "Video views ÷ impressions"),
        ],
    },
    MetricCategory {
        id: "metadata",
        title: "Campaign Metadata",
        metrics: &[
            metric!("campaign_name", "Campaign Name", "Name of the campaign"),
            metric!("date", "Date", "Daily tracking over time"),
            metric!("bid_strategy", "Bid Strategy Type", "e.g., Target CPA, Maximize Conv."),
            metric!("budget", "Budget (€)", "Daily budget for the campaign"),
        ],
    },
];

pub fn metric_label(id: &str) -> Option<&'static str> {
    METRIC_CATALOG
        .iter()
        .flat_map(|category| category.metrics.iter())
        .find(|metric| metric.id == id)
        .map(|metric| metric.label)
}

/// Columns the export should carry for the chosen focus.
pub fn required_columns(goal: ReportGoal, custom_metrics: &[String]) -> Vec<String> {
    match goal {
        ReportGoal::Roas => ROAS_COLUMNS.iter().map(|c| c.to_string()).collect(),
        ReportGoal::Cpa => CPA_COLUMNS.iter().map(|c| c.to_string()).collect(),
        ReportGoal::Custom => ["Date", "Campaign Name"]
            .into_iter()
            .map(str::to_string)
            .chain(
                custom_metrics
                    .iter()
                    .map(|id| metric_label(id).map(str::to_string).unwrap_or_else(|| id.clone())),
            )
            .collect(),
    }
}

pub fn missing_columns(rows: &[Row], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|column| !rows.iter().any(|row| row.contains_key(column.as_str())))
        .cloned()
        .collect()
}

/// First and last day found in the `Date` column.
pub fn detect_date_range(rows: &[Row]) -> Option<DateRange> {
    let dates: Vec<NaiveDate> = rows
        .iter()
        .filter_map(|row| {
            row.iter()
                .find(|(key, _)| is_date_column(key))
                .and_then(|(_, value)| parse_date(value))
        })
        .collect();

    let start = dates.iter().min()?;
    let end = dates.iter().max()?;
    Some(DateRange {
        start: start.to_string(),
        end: end.to_string(),
    })
}

fn is_date_column(key: &str) -> bool {
    let key = key.trim();
    key.eq_ignore_ascii_case("date") || key.eq_ignore_ascii_case("day")
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(serial) => {
            let serial = serial.as_f64()?;
            if !(1.0..=2_958_465.0).contains(&serial) {
                return None;
            }
            NaiveDate::from_ymd_opt(1899, 12, 30)
                .map(|epoch| epoch + Duration::days(serial.trunc() as i64))
        }
        Value::String(text) => {
            let text = text.trim();
            let text = text.split_whitespace().next().unwrap_or(text);
            ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%Y/%m/%d"]
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        }
        _ => None,
    }
}
