use employee_payroll_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("employee payroll error: {err}");
        std::process::exit(1);
    }
}
