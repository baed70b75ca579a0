use teams_notify::cards::Card;
use teams_notify::config::Settings;
use teams_notify::error::Result;
use teams_notify::pipeline::PipelineContext;
use teams_notify::webhook::TeamsWebhook;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    run().await?;
    Ok(())
}

async fn run() -> Result<()> {
    let ctx = PipelineContext::from_env();

    // Validation happens before anything is built or sent; a missing
    // webhook aborts the run with no side effects.
    let settings = Settings::from_env().resolve(&ctx.build.branch, &ctx.build.status, |var| {
        std::env::var(var).ok()
    })?;

    let card = Card::build(&ctx, &settings, |var| std::env::var(var).ok());
    debug!(card = ?card, "generated card");

    info!(
        repo = %ctx.repo.slug,
        build = ctx.build.number,
        status = %settings.status,
        "sending build status card"
    );
    TeamsWebhook::new(&settings.webhook).send(&card).await?;
    info!("card delivered");

    Ok(())
}
