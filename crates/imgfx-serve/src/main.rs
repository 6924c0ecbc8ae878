use imgfx_serve::{
    config::{Args, ServeConfig},
    router, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    let config = ServeConfig::from(args);

    let state = AppState::new(&config)?;
    let app = router(state);

    let addr = config.addr();
    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://{addr}");
    match &config.output_dir {
        Some(dir) => log::info!("📁 Saving images under: {}", dir.display()),
        None => log::info!("📁 Saving images under the working directory"),
    }
    log::info!("🔧 Press Ctrl+C to stop the server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl+C: {e}");
    }
    log::info!("👋 Shutting down");
}
