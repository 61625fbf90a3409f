use refiner_core::config::{default_model_for, validate_api_key};
use refiner_core::error::AnalysisError;
use refiner_llm_sdk::providers::Provider;
use tracing::warn;

use crate::cli::ConfigCommands;
use crate::context::AppContext;
use crate::display::mask_key;
use crate::error::CliError;

pub async fn run(ctx: &AppContext, action: &ConfigCommands) -> Result<(), CliError> {
    match action {
        ConfigCommands::Show => show(ctx).await,
        ConfigCommands::SetKey { key } => set_key(ctx, key).await,
        ConfigCommands::SetModel { model } => set_model(ctx, model).await,
        ConfigCommands::SetProvider { provider } => set_provider(ctx, provider).await,
    }
}

async fn show(ctx: &AppContext) -> Result<(), CliError> {
    let settings = ctx.settings().await?;

    println!("Provider:    {}", settings.provider);
    println!("Model:       {}", settings.model);
    println!(
        "API key:     {}",
        settings
            .api_key
            .as_deref()
            .map(mask_key)
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("State file:  {}", ctx.state_path.display());
    match &ctx.config_path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none)"),
    }
    Ok(())
}

async fn set_key(ctx: &AppContext, key: &str) -> Result<(), CliError> {
    let settings = ctx.settings().await?;
    validate_api_key(&settings.provider, key)?;
    ctx.state
        .set_api_key(key)
        .await
        .map_err(AnalysisError::from)?;
    println!("API key saved: {}", mask_key(key.trim()));
    Ok(())
}

async fn set_model(ctx: &AppContext, model: &str) -> Result<(), CliError> {
    let model = model.trim();
    if model.is_empty() {
        return Err(CliError::Command("Model cannot be empty".to_string()));
    }
    ctx.state
        .set_model(model)
        .await
        .map_err(AnalysisError::from)?;
    println!("Model set to {}", model);
    Ok(())
}

async fn set_provider(ctx: &AppContext, provider: &str) -> Result<(), CliError> {
    let provider =
        Provider::from_id(provider).map_err(|e| CliError::Command(e.to_string()))?;
    if !provider.is_available() {
        warn!(provider = %provider, "Provider is not available yet");
        println!(
            "Note: {} support is coming soon; analysis will fail until you switch back to Anthropic.",
            provider.display_name()
        );
    }

    let model = default_model_for(provider.id());
    ctx.state
        .set_provider(provider.id())
        .await
        .map_err(AnalysisError::from)?;
    ctx.state
        .set_model(model)
        .await
        .map_err(AnalysisError::from)?;
    println!("Provider set to {} (model {})", provider.display_name(), model);
    Ok(())
}
