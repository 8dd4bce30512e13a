use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "EMP001",
        "fullName": "John Doe",
        "email": "john.doe@example.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Assigned by the HR API, never generated here
    #[schema(example = "EMP001")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,

    #[schema(example = "john.doe@example.com")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[schema(example = "Engineering")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
}

impl Employee {
    /// Upper-cased first letter of every word in the full name ("John Doe" -> "JD").
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Payload for creating an employee; the id is assigned upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[schema(example = "John Doe")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[schema(example = "john.doe@example.com", format = "email")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[schema(example = "Engineering")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, EnumIter)]
pub enum Department {
    #[strum(serialize = "HR")]
    Hr,
    Engineering,
    Sales,
    Marketing,
    Finance,
    Operations,
}
