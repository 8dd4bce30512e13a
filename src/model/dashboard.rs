use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[schema(example = 12)]
    #[serde(deserialize_with = "null_as_default")]
    pub total_employees: u64,
    #[schema(example = 9)]
    #[serde(deserialize_with = "null_as_default")]
    pub present_today: u64,
    #[schema(example = 2)]
    #[serde(deserialize_with = "null_as_default")]
    pub absent_today: u64,
    /// Percentage, as computed upstream
    #[schema(example = 75.0)]
    #[serde(deserialize_with = "null_as_default")]
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TrendPoint {
    #[schema(example = "2024-01-01", format = "date")]
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[schema(example = 9)]
    #[serde(deserialize_with = "null_as_default")]
    pub present: u64,
    #[schema(example = 2)]
    #[serde(deserialize_with = "null_as_default")]
    pub absent: u64,
}
