use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hawkr-cli")]
#[command(about = "Hawkr command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the menu-text extractor over a file and print the parsed items.
    Extract {
        /// Path to a text file holding raw OCR output.
        file: PathBuf,
        /// Insert the extracted items for this vendor instead of just printing.
        #[arg(long)]
        vendor_id: Option<String>,
    },
    /// Seed demo vendors and menus into the database.
    Seed,
    /// Deactivate expired deals once, outside the server's schedule.
    SweepDeals,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { file, vendor_id } => extract(file, vendor_id).await,
        Commands::Seed => seed().await,
        Commands::SweepDeals => sweep_deals().await,
    }
}

async fn extract(file: PathBuf, vendor_id: Option<String>) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&file)?;
    let items = hawkr_ocr::extract_items(&raw);
    println!("{}", serde_json::to_string_pretty(&items)?);

    let Some(vendor_id) = vendor_id else {
        return Ok(());
    };

    let pool = hawkr_db::connect_pool_from_env().await?;
    let new_items: Vec<hawkr_db::NewMenuItem> = items
        .into_iter()
        .map(|c| hawkr_db::NewMenuItem {
            id: c.id,
            name: c.name,
            description: None,
            price: c.price,
        })
        .collect();
    let inserted = hawkr_db::insert_menu_items(&pool, &vendor_id, &new_items).await?;
    println!("inserted {inserted} menu items for {vendor_id}");
    Ok(())
}

async fn seed() -> anyhow::Result<()> {
    let pool = hawkr_db::connect_pool_from_env().await?;
    hawkr_db::run_migrations(&pool).await?;
    let count = hawkr_db::seed::seed_demo_data(&pool).await?;
    println!("seeded {count} demo vendors");
    Ok(())
}

async fn sweep_deals() -> anyhow::Result<()> {
    let pool = hawkr_db::connect_pool_from_env().await?;
    let count = hawkr_db::deactivate_expired_deals(&pool).await?;
    println!("deactivated {count} expired deals");
    Ok(())
}
