//! Report shapes returned by the webhook under `output`.
//!
//! Every field is optional on the wire. Numbers are accepted either as JSON
//! numbers or as numeric strings, since the narrative service does not always
//! keep its types straight.

use crate::models::ReportGoal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Revenue(RevenueReport),
    Lead(LeadReport),
}

#[derive(Debug)]
pub enum ShapeError {
    MissingOutput,
    Invalid(serde_json::Error),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOutput => write!(f, "webhook response has no `output` object"),
            Self::Invalid(err) => write!(f, "webhook response does not match the report shape: {err}"),
        }
    }
}

impl std::error::Error for ShapeError {}

impl Report {
    /// Shapes a webhook body into the report type for `goal`.
    pub fn from_webhook(goal: ReportGoal, body: Value) -> Result<Self, ShapeError> {
        let body = match body {
            Value::Array(mut items) if items.len() == 1 => items.remove(0),
            other => other,
        };
        let output = match body {
            Value::Object(mut map) => map.remove("output"),
            _ => None,
        };
        let output = match output {
            Some(output @ Value::Object(_)) => output,
            _ => return Err(ShapeError::MissingOutput),
        };

        match goal {
            ReportGoal::Cpa => serde_json::from_value(output).map(Report::Lead),
            ReportGoal::Roas | ReportGoal::Custom => {
                serde_json::from_value(output).map(Report::Revenue)
            }
        }
        .map_err(ShapeError::Invalid)
    }

    pub fn date_range(&self) -> &str {
        match self {
            Report::Revenue(report) => &report.date_range,
            Report::Lead(report) => &report.business_summary.date_range,
        }
    }
}

// ----- revenue / ROAS focus -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueReport {
    #[serde(deserialize_with = "null_default")]
    pub date_range: String,
    #[serde(deserialize_with = "null_default")]
    pub key_metrics: KeyMetrics,
    #[serde(deserialize_with = "null_default")]
    pub business_summary: String,
    #[serde(deserialize_with = "null_default")]
    pub campaigns: Vec<RevenueCampaign>,
    #[serde(rename = "visibility_campaign", deserialize_with = "null_default")]
    pub visibility_campaign: Vec<RevenueVisibility>,
    #[serde(deserialize_with = "null_default")]
    pub performance_summary: PerformanceSummary,
    #[serde(deserialize_with = "null_default")]
    pub action_plan: ActionPlan,
    #[serde(deserialize_with = "null_default")]
    pub daily_trends: Vec<DailyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyMetrics {
    #[serde(deserialize_with = "number")]
    pub total_ad_spend: f64,
    #[serde(deserialize_with = "number")]
    pub revenue_from_ads: f64,
    #[serde(deserialize_with = "number")]
    pub roas: f64,
    #[serde(deserialize_with = "number")]
    pub ad_engagement_rate: f64,
    #[serde(deserialize_with = "number")]
    pub cost_per_visitor: f64,
    #[serde(deserialize_with = "optional_number")]
    pub return_on_ad_spend: Option<f64>,
    #[serde(deserialize_with = "optional_number")]
    pub website_visitors: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueCampaign {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "number")]
    pub spend: f64,
    #[serde(deserialize_with = "number")]
    pub revenue: f64,
    #[serde(deserialize_with = "number")]
    pub roas: f64,
    #[serde(deserialize_with = "number")]
    pub clicks: f64,
    #[serde(deserialize_with = "number")]
    pub cost_per_visitor: f64,
    #[serde(deserialize_with = "number")]
    pub engagement_rate: f64,
    #[serde(deserialize_with = "null_default")]
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueVisibility {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "number")]
    pub reach_captured: f64,
    #[serde(deserialize_with = "number")]
    pub reach_missed_due_to_budget: f64,
    #[serde(deserialize_with = "number")]
    pub reach_missed_due_to_low_ranking: f64,
    #[serde(deserialize_with = "null_default")]
    pub insight: String,
}

impl RevenueVisibility {
    pub fn missed(&self) -> f64 {
        self.reach_missed_due_to_budget + self.reach_missed_due_to_low_ranking
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PerformanceSummary {
    #[serde(deserialize_with = "null_default")]
    pub allsummary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPlan {
    #[serde(deserialize_with = "null_default")]
    pub whats_working: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub needs_review: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyTrend {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "number")]
    pub roas: f64,
    #[serde(deserialize_with = "number")]
    pub revenue: f64,
    #[serde(deserialize_with = "number")]
    pub spend: f64,
    #[serde(deserialize_with = "number")]
    pub engagement_rate: f64,
    #[serde(deserialize_with = "number")]
    pub clicks: f64,
}

impl RevenueReport {
    /// Campaigns ordered by revenue, highest first.
    pub fn top_campaigns(&self, limit: usize) -> Vec<&RevenueCampaign> {
        let mut campaigns: Vec<&RevenueCampaign> = self.campaigns.iter().collect();
        campaigns.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
        campaigns.truncate(limit);
        campaigns
    }

    /// Each campaign's share of total revenue, in percent.
    pub fn revenue_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.campaigns.iter().map(|c| c.revenue.max(0.0)).sum();
        self.campaigns
            .iter()
            .map(|c| {
                let share = if total > 0.0 {
                    c.revenue.max(0.0) / total * 100.0
                } else {
                    0.0
                };
                (c.name.clone(), share)
            })
            .collect()
    }

    pub fn most_missed_visibility(&self) -> Option<&RevenueVisibility> {
        self.visibility_campaign
            .iter()
            .filter(|v| v.missed() > 0.0)
            .max_by(|a, b| a.missed().partial_cmp(&b.missed()).unwrap_or(Ordering::Equal))
    }
}

// ----- lead / CPA focus -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadReport {
    #[serde(deserialize_with = "null_default")]
    pub business_summary: LeadBusinessSummary,
    #[serde(deserialize_with = "null_default")]
    pub report_metrics: LeadMetrics,
    #[serde(deserialize_with = "null_default")]
    pub visualizations: LeadVisualizations,
    #[serde(deserialize_with = "null_default")]
    pub top_campaigns: Vec<LeadCampaign>,
    #[serde(deserialize_with = "null_default")]
    pub visibility: LeadVisibility,
    #[serde(deserialize_with = "null_default")]
    pub strategic_recommendations: StrategicRecommendations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadBusinessSummary {
    #[serde(deserialize_with = "null_default")]
    pub date_range: String,
    #[serde(deserialize_with = "null_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_default")]
    pub business_implications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadMetrics {
    #[serde(deserialize_with = "number")]
    pub total_ad_spend: f64,
    #[serde(deserialize_with = "number")]
    pub leads_generated: f64,
    #[serde(deserialize_with = "number")]
    pub cost_per_lead: f64,
    #[serde(deserialize_with = "number")]
    pub website_visitors: f64,
    #[serde(deserialize_with = "number")]
    pub cost_per_visitor: f64,
    #[serde(deserialize_with = "number")]
    pub site_lead_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadVisualizations {
    #[serde(deserialize_with = "null_default")]
    pub daily_data: Vec<LeadDailyPoint>,
    #[serde(deserialize_with = "null_default")]
    pub cost_per_lead_data: Vec<CostPerLeadPoint>,
    #[serde(deserialize_with = "null_default")]
    pub click_data: Vec<ClickPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LeadDailyPoint {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "number")]
    pub leads: f64,
    #[serde(deserialize_with = "number")]
    pub spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CostPerLeadPoint {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "number")]
    pub cpl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClickPoint {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "number")]
    pub clicks: f64,
    #[serde(deserialize_with = "number")]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadCampaign {
    #[serde(deserialize_with = "null_default")]
    pub campaign_name: String,
    #[serde(deserialize_with = "number")]
    pub spend: f64,
    #[serde(deserialize_with = "number")]
    pub leads: f64,
    #[serde(deserialize_with = "number")]
    pub cost_per_lead: f64,
    #[serde(deserialize_with = "number")]
    pub clicks: f64,
    #[serde(deserialize_with = "number")]
    pub site_lead_rate: f64,
    #[serde(deserialize_with = "null_default")]
    pub performance: String,
    #[serde(deserialize_with = "null_default")]
    pub insight: String,
}

impl LeadCampaign {
    pub fn is_excellent(&self) -> bool {
        self.performance.trim().eq_ignore_ascii_case("green")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LeadVisibility {
    #[serde(deserialize_with = "null_default")]
    pub campaigns: Vec<LeadVisibilityCampaign>,
    #[serde(deserialize_with = "null_default")]
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadVisibilityCampaign {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "number")]
    pub reach_captured: f64,
    #[serde(deserialize_with = "number")]
    pub reach_missed_budget: f64,
    #[serde(deserialize_with = "number")]
    pub reach_missed_ranking: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategicRecommendations {
    #[serde(deserialize_with = "null_default")]
    pub keep_doing: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub fix_or_review: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub test_or_explore: Vec<String>,
}

/// Reads `null` as the field's default, like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(optional_number(deserializer)?.unwrap_or(0.0))
}

fn optional_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .replace(['€', ','], "")
            .trim()
            .parse()
            .ok(),
        _ => None,
    })
}
