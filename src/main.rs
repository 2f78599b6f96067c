use anyhow::Context;
use leadmagnet::{config::get_or_init_config, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        leadmagnet::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        leadmagnet::init_dbg_tracing();
    }

    let config = get_or_init_config().clone();
    let app = App::build_from_config(config)
        .await
        .context("failed to build the app from the configuration")?;

    leadmagnet::serve(app).await.context("server error")?;

    Ok(())
}
