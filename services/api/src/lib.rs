mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use visadesk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
