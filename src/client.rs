//! HR API client.
//!
//! Async reqwest client for the upstream REST contract. Every call maps the
//! response straight into model types; reconciliation happens elsewhere.

use std::time::Duration;

use chrono::NaiveDate;
use derive_more::Display;
use serde::de::DeserializeOwned;

use crate::model::{
    attendance::AttendanceRecord,
    dashboard::{DashboardStats, TrendPoint},
    employee::{Employee, NewEmployee},
};

/// Date wire format shared with the HR API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error type for upstream calls.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Request never got a response
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
    /// Non-2xx status with the response body
    #[display(fmt = "HTTP {}: {}", _0, _1)]
    Http(u16, String),
    /// Body was not the expected JSON shape
    #[display(fmt = "Parse error: {}", _0)]
    Parse(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// `detail` message of a rejected request, when the HR API sent one.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Http(_, body) => serde_json::from_str::<serde_json::Value>(body)
                .ok()?
                .get("detail")?
                .as_str()
                .map(String::from),
            _ => None,
        }
    }
}

/// Inclusive date window for the attendance history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Clone)]
pub struct HrApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl HrApiClient {
    /// `base_url` is the HR server root; `/api` is appended after trimming
    /// trailing slashes.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("hr-portal/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/employees", &[]).await
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<(), ApiError> {
        let url = format!("{}/employees", self.api_base);
        let response = self
            .http
            .post(&url)
            .json(employee)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    /// `/employees/{employee_id}` with the id percent-encoded as one segment.
    fn employee_url(&self, employee_id: &str) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.api_base)
            .map_err(|e| ApiError::Network(format!("invalid HR API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("invalid HR API url: {}", self.api_base)))?
            .push("employees")
            .push(employee_id);
        Ok(url)
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), ApiError> {
        let url = self.employee_url(employee_id)?;
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    /// Records for exactly one day.
    pub async fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError> {
        let query = [("date_filter", date.format(DATE_FORMAT).to_string())];
        self.get_json("/attendance", &query).await
    }

    /// Records inside `range`, or the full history when no range is given.
    pub async fn attendance_between(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let query: Vec<(&str, String)> = match range {
            Some(r) => vec![
                ("start_date", r.start.format(DATE_FORMAT).to_string()),
                ("end_date", r.end.format(DATE_FORMAT).to_string()),
            ],
            None => Vec::new(),
        };
        self.get_json("/attendance", &query).await
    }

    /// Upserts one record; the server owns the (employeeId, date) key.
    pub async fn mark_attendance(&self, record: &AttendanceRecord) -> Result<(), ApiError> {
        let url = format!("{}/attendance", self.api_base);
        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats", &[]).await
    }

    pub async fn dashboard_trends(&self, days: u32) -> Result<Vec<TrendPoint>, ApiError> {
        self.get_json("/dashboard/trends", &[("days", days.to_string())])
            .await
    }

    // ── Internal helpers ────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Http(status.as_u16(), body));
    }
    Ok(response)
}
