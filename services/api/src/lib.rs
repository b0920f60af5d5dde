mod cli;
mod infra;
mod routes;
mod server;
mod snapshot;

use vaccination_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
