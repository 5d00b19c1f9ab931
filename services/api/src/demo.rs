use chrono::{Local, NaiveDate};
use clap::Args;
use employee_payroll::config::PayrollPolicy;
use employee_payroll::employees::{
    CreateEmployeeCommand, EmployeeKindSelector, EmployeeRepository, EmployeeService,
    EmployeeSummary, InMemoryEmployeeRepository, SalaryQuery, UpdateEmployeeCommand,
};
use employee_payroll::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Begin date of the full-time employee (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// End date of the consultant contract (YYYY-MM-DD).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Monthly base salary of the full-time employee.
    #[arg(long, default_value_t = 2000.0)]
    pub(crate) monthly_salary: f64,
    /// Hourly rate of the consultant.
    #[arg(long, default_value_t = 85.0)]
    pub(crate) hourly_rate: f64,
    /// Bonus added to the full-time salary.
    #[arg(long, default_value_t = 1000.0)]
    pub(crate) bonus: f64,
    /// Daily tax deduction applied to the full-time salary.
    #[arg(long, default_value_t = 350.0)]
    pub(crate) tax_deduction: f64,
    /// Hours worked by the consultant during the period.
    #[arg(long, default_value_t = 140)]
    pub(crate) worked_hours: i32,
    /// Store each computed salary as the new base salary.
    #[arg(long)]
    pub(crate) persist_computed_salary: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        start_date,
        end_date,
        monthly_salary,
        hourly_rate,
        bonus,
        tax_deduction,
        worked_hours,
        persist_computed_salary,
    } = args;

    let policy = PayrollPolicy {
        persist_computed_salary,
        ..PayrollPolicy::default()
    };
    let repository = Arc::new(InMemoryEmployeeRepository::default());
    let service = EmployeeService::new(repository.clone(), policy);

    println!("Employee payroll demo");

    let full_time = service.create(CreateEmployeeCommand {
        name: "John Doe".to_string(),
        base_salary: monthly_salary,
        kind: None,
        start_date: Some(start_date.unwrap_or_else(|| Local::now().date_naive())),
        end_date: None,
    })?;
    render_employee("Full-time", &full_time);

    let consultant = service.create(CreateEmployeeCommand {
        name: "Jane Doe".to_string(),
        base_salary: hourly_rate,
        kind: Some(EmployeeKindSelector::Consultant),
        start_date: None,
        end_date,
    })?;
    render_employee("Consultant", &consultant);

    let full_time_salary = service.compute_salary(SalaryQuery {
        id: full_time.id,
        bonus: Some(bonus),
        tax_deduction: Some(tax_deduction),
        nb_worked_hours: None,
    })?;
    println!(
        "\nFull-time salary: ({:.2} - {:.2}) x 30 + {:.2} = {:.2}",
        monthly_salary, tax_deduction, bonus, full_time_salary.salary
    );

    match service.compute_salary(SalaryQuery {
        id: consultant.id,
        bonus: None,
        tax_deduction: None,
        nb_worked_hours: Some(worked_hours),
    }) {
        Ok(result) => println!(
            "Consultant salary: {:.2} x {} h = {:.2}",
            hourly_rate, worked_hours, result.salary
        ),
        Err(err) => println!("Consultant salary unavailable: {err}"),
    }

    if let Err(err) = service.update(UpdateEmployeeCommand {
        id: consultant.id,
        name: Some("Jane 2".to_string()),
        base_salary: None,
    }) {
        println!("\nRejected rename of consultant: {err}");
    }

    service.update(UpdateEmployeeCommand {
        id: consultant.id,
        name: None,
        base_salary: Some(hourly_rate + 5.0),
    })?;
    let refreshed = service.get(&consultant.id)?;
    println!(
        "Consultant rate raised to {:.2}/h",
        refreshed.base_salary
    );

    let stored = service.get(&full_time.id)?;
    if persist_computed_salary {
        println!(
            "Full-time base salary overwritten with computed value: {:.2}",
            stored.base_salary
        );
    } else {
        println!(
            "Full-time base salary unchanged after computation: {:.2}",
            stored.base_salary
        );
    }

    service.delete(&full_time.id)?;
    service.delete(&consultant.id)?;
    let remaining = [full_time.id, consultant.id]
        .iter()
        .filter(|id| matches!(repository.exists(id), Ok(true)))
        .count();
    println!("\nDeleted both employees ({remaining} remaining)");

    Ok(())
}

fn render_employee(label: &str, summary: &EmployeeSummary) {
    let dates = match (summary.start_date, summary.end_date) {
        (Some(start), _) => format!("since {start}"),
        (None, Some(end)) => format!("until {end}"),
        (None, None) => "open-ended".to_string(),
    };
    println!(
        "- {label} {} ({}) base {:.2}, {dates}",
        summary.name, summary.id, summary.base_salary
    );
}
