use anyhow::Context;
use stayfinder::infra::telemetry::init_tracing;
use stayfinder::storage::seed::demo_listings;
use stayfinder::storage::ListingStore;
use stayfinder::{Config, PgStore};
use uuid::Uuid;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin seed -- [--host <uuid>]\n\
         \n\
         Inserts the demo listings into DATABASE_URL. Without --host a new\n\
         host id is generated and printed.\n"
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
    let host_id = match args.iter().position(|a| a == "--host") {
        Some(i) => {
            let raw = args.get(i + 1).unwrap_or_else(|| usage_and_exit());
            raw.parse::<Uuid>()
                .with_context(|| format!("--host must be a uuid, got '{}'", raw))?
        }
        None => Uuid::new_v4(),
    };

    let config = Config::from_env()?;
    let store = PgStore::connect(config.require_database_url()?).await?;

    let listings = demo_listings(host_id);
    for listing in &listings {
        store
            .insert_listing(listing)
            .await
            .map_err(|e| anyhow::anyhow!("inserting '{}' failed: {}", listing.title, e))?;
    }

    tracing::info!(count = listings.len(), %host_id, "demo listings seeded");
    println!("> Seeded {} listings for host {}", listings.len(), host_id);
    Ok(())
}
