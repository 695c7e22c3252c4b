//! Bundled placeholder reports, shown when the webhook never answers.

use crate::models::ReportGoal;
use crate::report::{
    ActionPlan, ClickPoint, CostPerLeadPoint, DailyTrend, KeyMetrics, LeadBusinessSummary,
    LeadCampaign, LeadDailyPoint, LeadMetrics, LeadReport, LeadVisibility,
    LeadVisibilityCampaign, LeadVisualizations, PerformanceSummary, Report, RevenueCampaign,
    RevenueReport, RevenueVisibility, StrategicRecommendations,
};

pub const SAMPLE_NOTICE: &str =
    "Report generation took longer than expected. We've generated a sample report for you.";

const SAMPLE_DAYS: [&str; 7] = ["03/01", "03/05", "03/10", "03/15", "03/20", "03/25", "03/31"];

pub fn sample_report(goal: ReportGoal) -> Report {
    match goal {
        ReportGoal::Cpa => Report::Lead(sample_lead_report()),
        ReportGoal::Roas | ReportGoal::Custom => Report::Revenue(sample_revenue_report()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn sample_revenue_report() -> RevenueReport {
    // (revenue, spend, roas, clicks, engagement rate)
    let daily = [
        (2800.0, 500.0, 5.6, 450.0, 2.1),
        (3200.0, 550.0, 5.8, 480.0, 2.3),
        (3500.0, 600.0, 5.8, 520.0, 2.4),
        (3300.0, 580.0, 5.7, 490.0, 2.2),
        (3100.0, 540.0, 5.7, 470.0, 2.3),
        (3400.0, 570.0, 6.0, 510.0, 2.5),
        (3200.0, 550.0, 5.8, 485.0, 2.4),
    ];
    let daily_trends = SAMPLE_DAYS
        .iter()
        .zip(daily)
        .map(|(date, (revenue, spend, roas, clicks, engagement_rate))| DailyTrend {
            date: date.to_string(),
            roas,
            revenue,
            spend,
            engagement_rate,
            clicks,
        })
        .collect();

    // (name, spend, revenue, clicks, cost per click, engagement, captured, budget, rank)
    let rows = [
        ("Brand Search", 2130.0, 18760.0, 4211.0, 8.81, 4.21, 85.0, 8.0, 7.0),
        ("Performance Max", 4560.0, 44050.0, 9380.0, 6.72, 3.34, 75.0, 15.0, 10.0),
        ("Generic Search", 3410.0, 9230.0, 6102.0, 2.71, 2.15, 64.0, 12.0, 24.0),
    ];

    let campaigns: Vec<RevenueCampaign> = rows
        .iter()
        .map(|&(name, spend, revenue, clicks, cpc, engagement, ..)| RevenueCampaign {
            name: name.to_string(),
            spend,
            revenue,
            roas: revenue / spend,
            clicks,
            cost_per_visitor: cpc,
            engagement_rate: engagement,
            insight: String::new(),
        })
        .collect();
    let visibility_campaign = rows
        .iter()
        .map(|&(name, .., captured, budget, rank)| RevenueVisibility {
            name: name.to_string(),
            reach_captured: captured,
            reach_missed_due_to_budget: budget,
            reach_missed_due_to_low_ranking: rank,
            insight: String::new(),
        })
        .collect();

    let total_spend: f64 = campaigns.iter().map(|c| c.spend).sum();
    let total_revenue: f64 = campaigns.iter().map(|c| c.revenue).sum();
    let total_clicks: f64 = campaigns.iter().map(|c| c.clicks).sum();

    RevenueReport {
        date_range: "Sample period".to_string(),
        key_metrics: KeyMetrics {
            total_ad_spend: total_spend,
            revenue_from_ads: total_revenue,
            roas: total_revenue / total_spend,
            ad_engagement_rate: 0.0315,
            cost_per_visitor: total_spend / total_clicks,
            return_on_ad_spend: None,
            website_visitors: Some(total_clicks),
        },
        business_summary: String::new(),
        campaigns,
        visibility_campaign,
        performance_summary: PerformanceSummary::default(),
        action_plan: ActionPlan {
            whats_working: strings(&["Performance Max delivers the bulk of tracked revenue"]),
            needs_review: strings(&["Generic Search loses visibility to ad rank"]),
            next_steps: strings(&["Upload a fresh export to generate your own report"]),
        },
        daily_trends,
    }
}

pub fn sample_lead_report() -> LeadReport {
    // (leads, spend, clicks, click rate)
    let daily = [
        (12.0, 500.0, 450.0, 2.1),
        (14.0, 550.0, 480.0, 2.3),
        (17.0, 600.0, 520.0, 2.4),
        (15.0, 580.0, 490.0, 2.2),
        (13.0, 540.0, 470.0, 2.3),
        (18.0, 570.0, 510.0, 2.5),
        (16.0, 550.0, 485.0, 2.4),
    ];

    let mut visualizations = LeadVisualizations::default();
    for (date, (leads, spend, clicks, rate)) in SAMPLE_DAYS.iter().zip(daily) {
        visualizations.daily_data.push(LeadDailyPoint {
            date: date.to_string(),
            leads,
            spend,
        });
        visualizations.cost_per_lead_data.push(CostPerLeadPoint {
            date: date.to_string(),
            cpl: spend / leads,
        });
        visualizations.click_data.push(ClickPoint {
            date: date.to_string(),
            clicks,
            rate,
        });
    }

    let total_spend: f64 = daily.iter().map(|d| d.1).sum();
    let total_leads: f64 = daily.iter().map(|d| d.0).sum();
    let total_clicks: f64 = daily.iter().map(|d| d.2).sum();

    LeadReport {
        business_summary: LeadBusinessSummary {
            date_range: "Sample period".to_string(),
            summary: "This is sample data. Your own figures will appear here once the analysis completes."
                .to_string(),
            business_implications: Vec::new(),
        },
        report_metrics: LeadMetrics {
            total_ad_spend: total_spend,
            leads_generated: total_leads,
            cost_per_lead: total_spend / total_leads,
            website_visitors: total_clicks,
            cost_per_visitor: total_spend / total_clicks,
            site_lead_rate: total_leads / total_clicks * 100.0,
        },
        visualizations,
        top_campaigns: vec![
            LeadCampaign {
                campaign_name: "Brand Search".to_string(),
                spend: 1490.0,
                leads: 62.0,
                cost_per_lead: 1490.0 / 62.0,
                clicks: 1905.0,
                site_lead_rate: 62.0 / 1905.0,
                performance: "Green".to_string(),
                insight: String::new(),
            },
            LeadCampaign {
                campaign_name: "Generic Search".to_string(),
                spend: 2400.0,
                leads: 43.0,
                cost_per_lead: 2400.0 / 43.0,
                clicks: 1500.0,
                site_lead_rate: 43.0 / 1500.0,
                performance: "Yellow".to_string(),
                insight: String::new(),
            },
        ],
        visibility: LeadVisibility {
            campaigns: vec![
                LeadVisibilityCampaign {
                    name: "Brand Search".to_string(),
                    reach_captured: 85.0,
                    reach_missed_budget: 8.0,
                    reach_missed_ranking: 7.0,
                },
                LeadVisibilityCampaign {
                    name: "Generic Search".to_string(),
                    reach_captured: 64.0,
                    reach_missed_budget: 12.0,
                    reach_missed_ranking: 24.0,
                },
            ],
            insights: Vec::new(),
        },
        strategic_recommendations: StrategicRecommendations {
            keep_doing: strings(&["Keep brand coverage high"]),
            fix_or_review: strings(&["Review ad rank on generic keywords"]),
            test_or_explore: strings(&["Upload a fresh export to generate your own report"]),
        },
    }
}
