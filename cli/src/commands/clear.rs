use crate::context::AppContext;
use crate::error::CliError;

pub async fn run(ctx: &AppContext) -> Result<(), CliError> {
    ctx.session().clear().await;
    println!("Session cleared.");
    Ok(())
}
