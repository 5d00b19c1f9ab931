use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{CreateEmployeeCommand, EmployeeId, SalaryQuery, UpdateEmployeeCommand};
use super::repository::EmployeeRepository;
use super::service::EmployeeService;
use crate::error::AppError;

/// Router builder exposing the employee lifecycle and salary endpoints.
pub fn employee_router<R>(service: Arc<EmployeeService<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    Router::new()
        .route("/employee/createEmployee", post(create_handler::<R>))
        .route("/employee/updateEmployee", put(update_handler::<R>))
        .route(
            "/employee/deleteEmployee/:employee_id",
            delete(delete_handler::<R>),
        )
        .route(
            "/employee/calculateEmployeeSalary",
            post(salary_handler::<R>),
        )
        .route("/employee/getEmployee/:employee_id", get(get_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    axum::Json(command): axum::Json<CreateEmployeeCommand>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.create(command) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    axum::Json(command): axum::Json<UpdateEmployeeCommand>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.update(command) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let id = match parse_id(&employee_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.delete(&id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn salary_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    axum::Json(query): axum::Json<SalaryQuery>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.compute_salary(query) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let id = match parse_id(&employee_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.get(&id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

fn parse_id(raw: &str) -> Result<EmployeeId, Response> {
    raw.parse::<EmployeeId>().map_err(|err| {
        let payload = json!({
            "error": format!("'{raw}' is not a valid employee id ({err})"),
        });
        (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
    })
}
