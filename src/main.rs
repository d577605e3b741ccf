use notekeep::config::AppConfig;
use notekeep::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up the remote-service secrets.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Missing configuration is the only fatal startup condition.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("fatal: {err}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(&config);
    let app = notekeep::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("notekeep listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
