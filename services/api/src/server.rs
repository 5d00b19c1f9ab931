use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_employee_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use employee_payroll::config::AppConfig;
use employee_payroll::employees::{EmployeeService, InMemoryEmployeeRepository};
use employee_payroll::error::AppError;
use employee_payroll::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryEmployeeRepository::default());
    let employee_service = Arc::new(EmployeeService::new(repository, config.payroll));

    let app = with_employee_routes(employee_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        validate_on_create = config.payroll.validate_on_create,
        persist_computed_salary = config.payroll.persist_computed_salary,
        "employee payroll service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
