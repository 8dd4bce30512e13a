use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::null_as_default;

/// Attendance for one employee on one day.
///
/// `NotMarked` is never persisted: it is what an employee resolves to when the
/// HR API holds no record for the day.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Not Marked")]
    #[strum(serialize = "Not Marked")]
    NotMarked,
}

/// A stored attendance record as the HR API returns it.
///
/// `date` is an opaque `YYYY-MM-DD` key and `status` is kept as the raw wire
/// string; validating it is the server's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "EMP001",
        "date": "2024-01-01",
        "status": "Present"
    })
)]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[schema(example = "Present")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        matches!(self.status.parse::<AttendanceStatus>(), Ok(AttendanceStatus::Present))
    }

    /// Daily status carried by this record; unknown strings count as not marked.
    pub fn resolved_status(&self) -> AttendanceStatus {
        match self.status.parse::<AttendanceStatus>() {
            Ok(AttendanceStatus::Present) => AttendanceStatus::Present,
            Ok(AttendanceStatus::Absent) => AttendanceStatus::Absent,
            _ => AttendanceStatus::NotMarked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "EMP001".into(),
            date: "2024-01-01".into(),
            status: status.into(),
        }
    }

    #[test]
    fn not_marked_uses_spaced_wire_name() {
        assert_eq!(AttendanceStatus::NotMarked.to_string(), "Not Marked");
        assert_eq!(
            serde_json::to_value(AttendanceStatus::NotMarked).unwrap(),
            serde_json::json!("Not Marked")
        );
        let parsed: AttendanceStatus = serde_json::from_value(serde_json::json!("Absent")).unwrap();
        assert_eq!(parsed, AttendanceStatus::Absent);
    }

    #[test]
    fn unknown_wire_status_resolves_to_not_marked() {
        assert_eq!(record("Present").resolved_status(), AttendanceStatus::Present);
        assert_eq!(record("Absent").resolved_status(), AttendanceStatus::Absent);
        assert_eq!(record("Late").resolved_status(), AttendanceStatus::NotMarked);
        assert_eq!(record("present").resolved_status(), AttendanceStatus::NotMarked);
    }

    #[test]
    fn null_status_reads_as_not_marked() {
        let records: Vec<AttendanceRecord> = serde_json::from_value(serde_json::json!([
            {"employeeId": "E1", "date": "2024-01-01", "status": null}
        ]))
        .unwrap();
        assert_eq!(records[0].status, "");
        assert_eq!(records[0].resolved_status(), AttendanceStatus::NotMarked);
        assert!(!records[0].is_present());
    }

    #[test]
    fn only_exact_present_counts_as_present() {
        assert!(record("Present").is_present());
        assert!(!record("present").is_present());
        assert!(!record("Late").is_present());
    }
}
