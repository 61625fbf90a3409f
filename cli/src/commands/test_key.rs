use refiner_core::commands::Command;
use refiner_core::error::AnalysisError;

use crate::context::AppContext;
use crate::error::CliError;

pub async fn run(ctx: &AppContext, key: Option<&str>, model: Option<String>) -> Result<(), CliError> {
    let settings = ctx.settings().await?;
    let api_key = match key {
        Some(key) => key.trim().to_string(),
        None => settings.require_api_key()?.to_string(),
    };
    if api_key.is_empty() {
        return Err(AnalysisError::MissingCredentials.into());
    }

    println!("Testing API key for {}...", settings.provider);
    ctx.handler()
        .handle(Command::TestApiKey { api_key, model })
        .await?;
    println!("API key is valid");
    Ok(())
}
