//! crm-company-search: company lookup widget
//!
//! This is the main entry point for the application.

use anyhow::Result;
use crm_company_search::{
    config::{self, ConfigLoader, Configuration, Settings},
    display::TableSink,
    network::HttpClient,
    search::SearchClient,
    session::{SearchOutcome, SearchSession},
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
        print_usage();
        return Ok(());
    }
    if matches!(args.first().map(String::as_str), Some("-V" | "--version")) {
        println!("crm-company-search {}", crm_company_search::VERSION);
        return Ok(());
    }

    // Load configuration
    let settings_file = config::settings_path();
    let settings = config::load_settings(settings_file.as_deref())?;
    init_logging(&settings);
    info!("Starting crm-company-search v{}", crm_company_search::VERSION);
    match settings_file {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    // Read host variables once the host has had time to settle
    let variables = Arc::new(config::host_variables(&settings));
    let runtime_config = ConfigLoader::new(&*variables)
        .with_names(settings.host.variable_names.clone())
        .load_deferred(Duration::from_millis(settings.host.startup_delay_ms))
        .await;

    // Initialize HTTP client
    let http = HttpClient::with_settings(&settings.outgoing)?;
    let client = SearchClient::new(http, settings.crm.clone());
    info!("HTTP client initialized");

    match args.first().map(String::as_str) {
        None | Some("serve") => serve(settings, client, runtime_config, variables).await,
        Some("search") => {
            let term = args[1..].join(" ");
            search_once(client, runtime_config, &term).await
        }
        Some("test") => {
            let body = client
                .test_connection(&runtime_config)
                .await
                .map_err(|e| anyhow::anyhow!("Connection test failed: {}", e))?;
            println!("Connection OK via {}", runtime_config.transport_mode);
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(anyhow::anyhow!("Unknown command: {}", other))
        }
    }
}

fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Serve the widget over HTTP
async fn serve(
    settings: Settings,
    client: SearchClient,
    runtime_config: Configuration,
    variables: Arc<config::LayeredVariables>,
) -> Result<()> {
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(settings, client, runtime_config, variables)?;
    info!("Application state initialized");

    let app = create_router(state);

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run one search and print the table to stdout
async fn search_once(client: SearchClient, runtime_config: Configuration, term: &str) -> Result<()> {
    let sink = Arc::new(TableSink::new(std::io::stdout()));
    let session = SearchSession::new(runtime_config, Arc::new(client), sink);

    match session.submit_search(term).await {
        SearchOutcome::Failed(err) => Err(anyhow::anyhow!("Search failed: {}", err)),
        _ => Ok(()),
    }
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
crm-company-search v{}
Look up CRM companies by name

USAGE:
    crm-company-search [COMMAND]

COMMANDS:
    serve            Serve the search widget over HTTP (default)
    search <TERM>    Run one search and print the results table
    test             Check that the configured transport answers

ENVIRONMENT VARIABLES:
    CRM_SEARCH_SETTINGS_PATH    Path to settings.yml
    CRM_SEARCH_DEBUG            Enable debug logging (true/false)
    CRM_SEARCH_PORT             Server port
    CRM_SEARCH_BIND_ADDRESS     Bind address
    CRM_SEARCH_API_URL          CRM companies endpoint
    CRM_SEARCH_REQUEST_TIMEOUT  Request timeout in seconds
    HubSpotAPIToken             Access token (host variable)
    HubSpotBackendURL           Relay base URL (host variable)
    HubSpotCORSOption           Transport mode: direct or backend (host variable)
"#,
        crm_company_search::VERSION
    );
}
