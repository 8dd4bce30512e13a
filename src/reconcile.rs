//! Attendance reconciliation.
//!
//! Merges independently fetched employee and attendance collections into the
//! view models served by the attendance endpoints. Everything here is pure:
//! inputs are borrowed snapshots and every call builds fresh output, so the
//! same inputs always reconcile to the same result.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::Employee,
};

/// An employee annotated with their status for one day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub employee: Employee,
    pub status: AttendanceStatus,
}

/// All attendance of one employee over a queried range.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendanceSummary {
    pub employee_id: String,
    /// In the order the HR API returned them
    pub records: Vec<AttendanceRecord>,
    pub present_days: u32,
    pub absent_days: u32,
    /// `None` when the id matches no known employee
    pub employee: Option<Employee>,
}

impl EmployeeAttendanceSummary {
    fn new(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            records: Vec::new(),
            present_days: 0,
            absent_days: 0,
            employee: None,
        }
    }

    fn push(&mut self, record: &AttendanceRecord) {
        if record.is_present() {
            self.present_days += 1;
        } else {
            self.absent_days += 1;
        }
        self.records.push(record.clone());
    }
}

/// Annotates every employee with their status on `target_date`.
///
/// `records` must already be filtered to `target_date` by the HR API; the date
/// is only carried for logging. When several records share an employee id the
/// last one wins. Employees without a record are `NotMarked`.
pub fn resolve_daily_status(
    employees: &[Employee],
    records: &[AttendanceRecord],
    target_date: &str,
) -> Vec<RosterEntry> {
    let mut statuses: HashMap<&str, AttendanceStatus> = HashMap::with_capacity(records.len());
    for record in records {
        statuses.insert(record.employee_id.as_str(), record.resolved_status());
    }

    tracing::debug!(
        date = target_date,
        employees = employees.len(),
        records = records.len(),
        "Resolved daily roster"
    );

    employees
        .iter()
        .map(|employee| RosterEntry {
            employee: employee.clone(),
            status: statuses
                .get(employee.employee_id.as_str())
                .copied()
                .unwrap_or(AttendanceStatus::NotMarked),
        })
        .collect()
}

/// Groups range-filtered records into one summary per employee id.
///
/// Summaries come out in the order their employee id is first seen. Any status
/// other than `Present` is tallied as absent, including strings the HR API
/// should never send. Employees with no records in the range get no summary.
pub fn resolve_range_summary(
    records: &[AttendanceRecord],
    employees: &[Employee],
) -> Vec<EmployeeAttendanceSummary> {
    let mut groups: IndexMap<&str, EmployeeAttendanceSummary> = IndexMap::new();
    for record in records {
        groups
            .entry(record.employee_id.as_str())
            .or_insert_with(|| EmployeeAttendanceSummary::new(&record.employee_id))
            .push(record);
    }

    let details: HashMap<&str, &Employee> = employees
        .iter()
        .map(|e| (e.employee_id.as_str(), e))
        .collect();

    tracing::debug!(
        records = records.len(),
        summaries = groups.len(),
        "Resolved range summary"
    );

    groups
        .into_values()
        .map(|mut summary| {
            summary.employee = details.get(summary.employee_id.as_str()).map(|e| (*e).clone());
            summary
        })
        .collect()
}

/// Returns a copy of `roster` with `employee_id`'s status replaced.
///
/// Used to reflect an accepted write without re-fetching. `new_status` is not
/// checked here; the HR API already accepted it.
pub fn apply_status_update(
    roster: &[RosterEntry],
    employee_id: &str,
    new_status: AttendanceStatus,
) -> Vec<RosterEntry> {
    roster
        .iter()
        .map(|entry| {
            if entry.employee.employee_id == employee_id {
                RosterEntry {
                    employee: entry.employee.clone(),
                    status: new_status,
                }
            } else {
                entry.clone()
            }
        })
        .collect()
}
