use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::{
    client::HrApiClient,
    error::PortalError,
    model::{
        attendance::{AttendanceRecord, AttendanceStatus},
        employee::Employee,
    },
    reconcile::{EmployeeAttendanceSummary, RosterEntry, resolve_daily_status, resolve_range_summary},
    utils::{
        dates::{date_or_today, format_date, optional_range},
        roster_cache::{RosterCache, RosterSnapshot},
    },
};

/// Records shown per employee card before collapsing into "+N more"
const RECORD_PREVIEW_LEN: usize = 6;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RosterQuery {
    /// Day to show, `YYYY-MM-DD`; defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "JD")]
    pub initials: String,
    pub status: AttendanceStatus,
}

impl From<&RosterEntry> for RosterRow {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            employee_id: entry.employee.employee_id.clone(),
            full_name: entry.employee.full_name.clone(),
            email: entry.employee.email.clone(),
            department: entry.employee.department.clone(),
            initials: entry.employee.initials(),
            status: entry.status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResponse {
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    pub roster: Vec<RosterRow>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    /// Defaults to today
    #[schema(example = "2024-01-01", format = "date")]
    pub date: Option<String>,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkResponse {
    #[schema(example = "Attendance marked successfully")]
    pub message: String,
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    /// Roster after the write; `null` if it could not be rebuilt
    pub roster: Option<Vec<RosterRow>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordsQuery {
    /// Inclusive start, only applied together with `end_date`
    pub start_date: Option<String>,
    /// Inclusive end, only applied together with `start_date`
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    #[serde(flatten)]
    pub summary: EmployeeAttendanceSummary,
    /// Blank when the employee is unknown
    pub initials: String,
    /// First records in encounter order
    pub preview: Vec<AttendanceRecord>,
    pub more_records: usize,
}

impl From<EmployeeAttendanceSummary> for SummaryCard {
    fn from(summary: EmployeeAttendanceSummary) -> Self {
        Self {
            initials: summary
                .employee
                .as_ref()
                .map(Employee::initials)
                .unwrap_or_default(),
            preview: summary.records.iter().take(RECORD_PREVIEW_LEN).cloned().collect(),
            more_records: summary.records.len().saturating_sub(RECORD_PREVIEW_LEN),
            summary,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    #[schema(example = "2024-01-01", format = "date", nullable = true)]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-31", format = "date", nullable = true)]
    pub end_date: Option<String>,
    pub summaries: Vec<SummaryCard>,
}

fn rows(roster: &RosterSnapshot) -> Vec<RosterRow> {
    roster.iter().map(RosterRow::from).collect()
}

/// Fetch employees and the day's records, reconcile, and store the snapshot.
async fn reconcile_roster(
    client: &HrApiClient,
    cache: &RosterCache,
    date: NaiveDate,
) -> Result<RosterSnapshot, PortalError> {
    let day = format_date(date);
    let (employees, records) =
        futures::try_join!(client.list_employees(), client.attendance_on(date))
            .map_err(|e| PortalError::upstream("Failed to load employees", e))?;

    let roster = resolve_daily_status(&employees, &records, &day);
    Ok(cache.replace(&day, roster).await)
}

/// Daily roster
#[utoipa::path(
    get,
    path = "/api/attendance/roster",
    params(RosterQuery),
    responses(
        (status = 200, description = "Employees with their status for the day", body = RosterResponse),
        (status = 400, description = "Invalid date", body = Object, example = json!({
            "message": "Invalid date '2024-13-01', expected YYYY-MM-DD"
        })),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to load employees"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_roster(
    client: web::Data<HrApiClient>,
    cache: web::Data<RosterCache>,
    query: web::Query<RosterQuery>,
) -> Result<HttpResponse, PortalError> {
    let date = date_or_today(query.date.as_deref())?;
    let day = format_date(date);

    let roster = match cache.snapshot(&day).await {
        Some(snapshot) => snapshot,
        None => reconcile_roster(&client, &cache, date).await?,
    };

    Ok(HttpResponse::Ok().json(RosterResponse {
        date: day,
        roster: rows(&roster),
    }))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance stored upstream", body = MarkResponse),
        (status = 400, description = "Invalid payload", body = Object, example = json!({
            "message": "status must be Present or Absent"
        })),
        (status = 502, description = "HR API rejected the write", body = Object, example = json!({
            "message": "Failed to mark attendance"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    client: web::Data<HrApiClient>,
    cache: web::Data<RosterCache>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, PortalError> {
    let payload = payload.into_inner();
    let employee_id = payload.employee_id.trim().to_string();
    if employee_id.is_empty() {
        return Err(PortalError::BadRequest("employeeId is required".to_string()));
    }
    if payload.status == AttendanceStatus::NotMarked {
        return Err(PortalError::BadRequest(
            "status must be Present or Absent".to_string(),
        ));
    }

    let date = date_or_today(payload.date.as_deref())?;
    let day = format_date(date);

    let record = AttendanceRecord {
        employee_id: employee_id.clone(),
        date: day.clone(),
        status: payload.status.to_string(),
    };
    client
        .mark_attendance(&record)
        .await
        .map_err(|e| PortalError::upstream("Failed to mark attendance", e))?;

    info!(employee_id = %employee_id, date = %day, status = %payload.status, "Attendance marked");

    let roster = match cache.apply_optimistic(&day, &employee_id, payload.status).await {
        Some(snapshot) => Some(snapshot),
        None => match reconcile_roster(&client, &cache, date).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, date = %day, "Roster not rebuilt after marking");
                None
            }
        },
    };

    Ok(HttpResponse::Ok().json(MarkResponse {
        message: "Attendance marked successfully".to_string(),
        date: day,
        roster: roster.as_ref().map(rows),
    }))
}

/// Attendance history grouped per employee
#[utoipa::path(
    get,
    path = "/api/attendance/records",
    params(RecordsQuery),
    responses(
        (status = 200, description = "One summary per employee with records", body = RecordsResponse),
        (status = 400, description = "Invalid range", body = Object, example = json!({
            "message": "start_date cannot be after end_date"
        })),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to load attendance records"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_records(
    client: web::Data<HrApiClient>,
    query: web::Query<RecordsQuery>,
) -> Result<HttpResponse, PortalError> {
    let range = optional_range(query.start_date.as_deref(), query.end_date.as_deref())?;

    let (records, employees) =
        futures::try_join!(client.attendance_between(range), client.list_employees())
            .map_err(|e| PortalError::upstream("Failed to load attendance records", e))?;

    let summaries = resolve_range_summary(&records, &employees);

    Ok(HttpResponse::Ok().json(RecordsResponse {
        start_date: range.map(|r| format_date(r.start)),
        end_date: range.map(|r| format_date(r.end)),
        summaries: summaries.into_iter().map(SummaryCard::from).collect(),
    }))
}
