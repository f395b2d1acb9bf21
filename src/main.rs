use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod model;
mod routing;
mod server;
mod store;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config::Config::path_from_args(std::env::args().skip(1));
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Worker count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let store = store::MemoryStore::load(&cfg.data.path)?;
    let state = Arc::new(config::AppState::new(
        cfg,
        Arc::new(store),
        Arc::new(view::HtmlRenderer),
    ));

    let listener = server::create_listener(addr, state.config.server.backlog)?;
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(server::Shutdown::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await?;

    logger::write_info("[Shutdown] Complete");
    Ok(())
}
