use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use catalogrec_api::RestApi;
use catalogrec_core::Tier;
use catalogrec_storage::{import_seed_file, LmdbCatalog, RecommenderService};

/// Product recommender over tiered catalog tables
#[derive(Parser, Debug)]
#[command(name = "catalogrec")]
#[command(about = "A content-similarity product recommender", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Tier loaded at startup (star, mainstream, highend, flagship)
    #[arg(long, default_value = "mainstream")]
    tier: Tier,

    /// JSON file whose tiers replace the stored catalog tables before startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting catalogrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let catalog = Arc::new(LmdbCatalog::open(args.data_dir.join("lmdb"))?);
    info!("Catalog store opened");

    if let Some(seed) = &args.seed {
        let rows = import_seed_file(&catalog, seed)?;
        info!("Imported {} rows from {:?}", rows, seed);
    }

    let service = Arc::new(RecommenderService::new(catalog, args.tier)?);
    info!("Active tier: {}", service.current_tier());

    let service_http = service.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(service_http, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("catalogrec started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
