mod cli;
mod infra;
mod routes;
mod server;

use scholarstream::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
