use crate::{
    client::{ApiError, HrApiClient},
    error::PortalError,
    model::employee::{Department, Employee, NewEmployee},
    utils::roster_cache::RosterCache,
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 10)]
    pub total: usize,
    /// Options offered by the create form
    #[schema(example = json!(["HR", "Engineering", "Sales", "Marketing", "Finance", "Operations"]))]
    pub departments: Vec<String>,
}

/// Trims every field and checks the form is complete.
fn validate_new_employee(payload: NewEmployee) -> Result<NewEmployee, PortalError> {
    let employee = NewEmployee {
        full_name: payload.full_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        department: payload.department.trim().to_string(),
    };

    if employee.full_name.is_empty() || employee.email.is_empty() || employee.department.is_empty() {
        return Err(PortalError::BadRequest("Please fill in all fields".to_string()));
    }
    if !employee.email.contains('@') {
        return Err(PortalError::BadRequest("Please enter a valid email address".to_string()));
    }
    if Department::from_str(&employee.department).is_err() {
        return Err(PortalError::BadRequest(format!(
            "Unknown department '{}'",
            employee.department
        )));
    }

    Ok(employee)
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = EmployeeListResponse),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to load employees"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(client: web::Data<HrApiClient>) -> Result<HttpResponse, PortalError> {
    let employees = client
        .list_employees()
        .await
        .map_err(|e| PortalError::upstream("Failed to load employees", e))?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        data: employees,
        departments: Department::iter().map(|d| d.to_string()).collect(),
    }))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee added successfully"
        })),
        (status = 400, description = "Incomplete form or rejected by the HR API", body = Object, example = json!({
            "message": "Please fill in all fields"
        })),
        (status = 409, description = "Employee already exists", body = Object, example = json!({
            "message": "Employee with this email already exists"
        })),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to add employee"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    client: web::Data<HrApiClient>,
    cache: web::Data<RosterCache>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, PortalError> {
    let employee = validate_new_employee(payload.into_inner())?;

    if let Err(e) = client.create_employee(&employee).await {
        let message = e.detail().unwrap_or_else(|| "Failed to add employee".to_string());
        return Err(match e {
            ApiError::Http(409, _) => PortalError::Conflict(message),
            ApiError::Http(code, _) if (400..500).contains(&code) => {
                PortalError::BadRequest(message)
            }
            e => PortalError::upstream(&message, e),
        });
    }

    // rosters are keyed on the employee set
    cache.invalidate_all();
    info!(email = %employee.email, department = %employee.department, "Employee added");

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully"
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 502, description = "HR API unavailable", body = Object, example = json!({
            "message": "Failed to delete employee"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    client: web::Data<HrApiClient>,
    cache: web::Data<RosterCache>,
    path: web::Path<String>,
) -> Result<HttpResponse, PortalError> {
    let employee_id = path.into_inner();

    match client.delete_employee(&employee_id).await {
        Ok(()) => {}
        Err(ApiError::Http(404, _)) => {
            return Err(PortalError::NotFound("Employee not found".to_string()));
        }
        Err(e) => return Err(PortalError::upstream("Failed to delete employee", e)),
    }

    cache.invalidate_all();
    info!(employee_id = %employee_id, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::attendance::AttendanceStatus, reconcile::RosterEntry};
    use actix_web::{App, test as actix_test, web::Data};
    use httpmock::prelude::*;
    use serde_json::Value;
    use std::time::Duration;

    fn new_employee(name: &str, email: &str, department: &str) -> NewEmployee {
        NewEmployee {
            full_name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    #[test]
    fn incomplete_form_is_rejected() {
        let err = validate_new_employee(new_employee("Ann Lee", "  ", "HR")).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
    }

    #[test]
    fn unknown_department_is_rejected() {
        let err = validate_new_employee(new_employee("Ann Lee", "ann@example.com", "Legal"))
            .unwrap_err();
        assert!(err.to_string().contains("Legal"));
    }

    #[test]
    fn valid_form_is_trimmed() {
        let ok = validate_new_employee(new_employee(" Ann Lee ", "ann@example.com ", "Finance"))
            .unwrap();
        assert_eq!(ok.full_name, "Ann Lee");
        assert_eq!(ok.email, "ann@example.com");
    }

    async fn seeded_cache() -> Data<RosterCache> {
        let cache = RosterCache::new(16, Duration::from_secs(60));
        cache
            .replace(
                "2024-01-01",
                vec![RosterEntry {
                    employee: Employee {
                        employee_id: "E1".into(),
                        full_name: "Ann Lee".into(),
                        email: "ann@example.com".into(),
                        department: "HR".into(),
                    },
                    status: AttendanceStatus::Present,
                }],
            )
            .await;
        Data::new(cache)
    }

    macro_rules! service {
        ($server:expr, $cache:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(Data::new(
                        HrApiClient::new(&$server.base_url(), Duration::from_secs(5)).unwrap(),
                    ))
                    .app_data($cache.clone())
                    .route("/api/employees", web::get().to(list_employees))
                    .route("/api/employees", web::post().to(create_employee))
                    .route("/api/employees/{employee_id}", web::delete().to(delete_employee)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn list_includes_department_options() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/employees");
                then.status(200).json_body(serde_json::json!([
                    {"employeeId": "E1", "fullName": "Ann Lee", "email": "ann@example.com", "department": "HR"}
                ]));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::get().uri("/api/employees").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["fullName"], "Ann Lee");
        assert_eq!(body["departments"][0], "HR");
    }

    #[actix_web::test]
    async fn create_forwards_and_drops_rosters() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/employees").json_body(serde_json::json!({
                    "fullName": "Bo Park", "email": "bo@example.com", "department": "Sales"
                }));
                then.status(200).json_body(serde_json::json!({"employeeId": "E2"}));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(serde_json::json!({
                "fullName": "Bo Park", "email": "bo@example.com", "department": "Sales"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 201);
        create.assert_async().await;
        assert!(cache.snapshot("2024-01-01").await.is_none());
    }

    #[actix_web::test]
    async fn create_surfaces_upstream_detail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/employees");
                then.status(400)
                    .json_body(serde_json::json!({"detail": "Employee with this email already exists"}));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(serde_json::json!({
                "fullName": "Ann Lee", "email": "ann@example.com", "department": "HR"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "Employee with this email already exists");
        assert!(cache.snapshot("2024-01-01").await.is_some());
    }

    #[actix_web::test]
    async fn create_duplicate_is_409() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/employees");
                then.status(409)
                    .json_body(serde_json::json!({"detail": "Employee with this email already exists"}));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(serde_json::json!({
                "fullName": "Ann Lee", "email": "ann@example.com", "department": "HR"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "Employee with this email already exists");
    }

    #[actix_web::test]
    async fn create_upstream_outage_is_502() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/employees");
                then.status(500);
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(serde_json::json!({
                "fullName": "Ann Lee", "email": "ann@example.com", "department": "HR"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 502);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to add employee");
    }

    #[actix_web::test]
    async fn delete_unknown_employee_is_404() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/employees/E9");
                then.status(404).json_body(serde_json::json!({"detail": "Employee not found"}));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::delete().uri("/api/employees/E9").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        assert!(cache.snapshot("2024-01-01").await.is_some());
    }

    #[actix_web::test]
    async fn delete_drops_rosters() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/employees/E1");
                then.status(200).json_body(serde_json::json!({"message": "deleted"}));
            })
            .await;
        let cache = seeded_cache().await;
        let app = service!(server, cache);

        let req = actix_test::TestRequest::delete().uri("/api/employees/E1").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert!(cache.snapshot("2024-01-01").await.is_none());
    }
}
