use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    client::HrApiClient,
    config::Config,
    error::PortalError,
    model::dashboard::{DashboardStats, TrendPoint},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatCard {
    #[schema(example = "Attendance Rate")]
    pub label: String,
    #[schema(example = "75%")]
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub cards: Vec<StatCard>,
    /// Oldest day first, as returned upstream
    pub trends: Vec<TrendPoint>,
}

fn stat_cards(stats: &DashboardStats) -> Vec<StatCard> {
    let card = |label: &str, value: String| StatCard {
        label: label.to_string(),
        value,
    };
    vec![
        card("Total Employees", stats.total_employees.to_string()),
        card("Present Today", stats.present_today.to_string()),
        card("Absent Today", stats.absent_today.to_string()),
        card("Attendance Rate", format!("{}%", stats.attendance_rate)),
    ]
}

/// Dashboard metrics
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Stat cards and attendance trend", body = DashboardResponse),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to load dashboard data"
        }))
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    client: web::Data<HrApiClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse, PortalError> {
    let (stats, trends) = futures::try_join!(
        client.dashboard_stats(),
        client.dashboard_trends(config.dashboard_trend_days)
    )
    .map_err(|e| PortalError::upstream("Failed to load dashboard data", e))?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        cards: stat_cards(&stats),
        trends,
    }))
}
