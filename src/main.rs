use notes_client::{api::NotesApi, client::NotesClient, config, repl};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded notes client config");
    tracing::info!("Configured server: {:?}", cfg.server);

    // Client setup
    let api = NotesApi::new(&cfg.server, cfg.request_timeout);
    let mut client = NotesClient::new(api);

    // Initial fetch, then the command loop
    match client.load().await {
        Ok(count) => tracing::info!("Loaded {} notes from {}", count, cfg.server.rest_url()),
        Err(e) => tracing::error!("Failed to load notes: {e}"),
    }

    repl::run(&mut client)
        .await
        .expect("failed to read terminal input");
}
