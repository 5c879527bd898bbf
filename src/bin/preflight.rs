use stayfinder::infra::geocoding::{Geocoder, MapboxGeocoder};
use stayfinder::infra::telemetry::init_tracing;
use stayfinder::{Config, MarketStore, PgStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--check-geocoder]\n\
         \n\
         Reads env vars (or .env):\n\
           DATABASE_URL        required here, the server itself can run without it\n\
           BIND_ADDR, CURRENCY, CORS_ORIGIN\n\
           MAPBOX_TOKEN, PAYMENT_CAPTURE_URL (optional collaborators)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let check_geocoder = args.iter().any(|a| a == "--check-geocoder");

    let config = Config::from_env()?;
    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  CURRENCY={}", config.currency);
    println!(
        "  CORS_ORIGIN={}",
        config.cors_origin.as_deref().unwrap_or("* (any)")
    );
    println!(
        "  MAPBOX_TOKEN={}",
        if config.mapbox_token.is_some() { "set" } else { "unset (maps disabled)" }
    );
    println!(
        "  PAYMENT_CAPTURE_URL={}",
        config
            .payment_capture_url
            .as_deref()
            .unwrap_or("unset (payments auto-approved)")
    );
    println!(
        "  GEMINI_API_KEY={} (model {})",
        if config.gemini_api_key.is_some() { "set" } else { "unset (assistant disabled)" },
        config.gemini_model
    );

    // Store reachability + schema
    let url = config.require_database_url()?;
    let store = PgStore::connect(url).await?;
    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Postgres ping failed: {}", e))?;
    println!("  Postgres reachable, schema ensured.");

    if check_geocoder {
        let token = config
            .mapbox_token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--check-geocoder needs MAPBOX_TOKEN"))?;
        let coords = MapboxGeocoder::new(token).locate("Goa").await?;
        println!("  Geocoder OK (Goa -> {:.4}, {:.4}).", coords.lat, coords.lng);
    }

    println!("> Preflight OK.");
    Ok(())
}
