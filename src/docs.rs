use crate::api::attendance::{
    MarkAttendance, MarkResponse, RecordsResponse, RosterResponse, RosterRow, SummaryCard,
};
use crate::api::dashboard::{DashboardResponse, StatCard};
use crate::api::employee::EmployeeListResponse;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::dashboard::{DashboardStats, TrendPoint};
use crate::model::employee::{Employee, NewEmployee};
use crate::reconcile::{EmployeeAttendanceSummary, RosterEntry};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Portal API",
        version = "1.0.0",
        description = r#"
## HR Portal

View endpoints for a small **human resources** front end. Every endpoint reads
from, or writes through to, the upstream HR REST API and returns ready-to-render
view models.

### Views
- **Dashboard**
  - Headcount, today's attendance and the recent attendance trend
- **Employees**
  - List, add and remove employees
- **Attendance**
  - Daily roster with each employee's status (`Present`, `Absent`, `Not Marked`)
  - Mark attendance for a day
  - History grouped per employee with present/absent totals

### Errors
Failures return `{"message": "..."}`; `502` means the HR API failed or
rejected the request.
"#,
    ),
    paths(
        crate::api::dashboard::get_dashboard,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::get_roster,
        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_records
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeListResponse,
            AttendanceRecord,
            AttendanceStatus,
            RosterEntry,
            RosterRow,
            RosterResponse,
            MarkAttendance,
            MarkResponse,
            EmployeeAttendanceSummary,
            SummaryCard,
            RecordsResponse,
            DashboardStats,
            TrendPoint,
            StatCard,
            DashboardResponse
        )
    ),
    tags(
        (name = "Dashboard", description = "Dashboard metrics"),
        (name = "Employee", description = "Employee roster management"),
        (name = "Attendance", description = "Daily attendance and history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_view_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/dashboard",
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/attendance",
            "/api/attendance/roster",
            "/api/attendance/records",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
