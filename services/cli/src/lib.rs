mod cli;
mod intake;

use autobot_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
