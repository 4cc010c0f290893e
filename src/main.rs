// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

use cat_adoption::{AppConfig, CatStore, Resource};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = env::args().collect();
    let config = AppConfig::load().context("Failed to load configuration")?;

    if args.len() > 1 && args[1] == "list" {
        // Plain listing mode
        run_list(config).await?;
    } else {
        // UI mode (default)
        run_ui_mode(config).await?;
    }

    Ok(())
}

async fn run_list(config: AppConfig) -> Result<()> {
    let mut store = CatStore::new(config.source());
    store.load().await;

    match store.state() {
        Resource::Success(cats) => {
            println!("🐱 {} cats in the catalog\n", cats.len());
            for (i, cat) in cats.iter().enumerate() {
                let status = if cat.adopted { "adopted" } else { "available" };
                println!("{:>3}. {:<20} {:<10} ({})", i + 1, cat.name, status, cat.avatar);
            }
            Ok(())
        }
        Resource::Error(message) => {
            eprintln!("❌ Could not load the cats: {}", message);
            std::process::exit(1);
        }
        Resource::Loading => anyhow::bail!("the catalog is still loading"),
    }
}

#[cfg(feature = "tui")]
async fn run_ui_mode(config: AppConfig) -> Result<()> {
    let store = CatStore::new(config.source());

    let mut app = ui::App::new(store);
    // the terminal loop blocks on input
    tokio::task::block_in_place(|| ui::run_ui(&mut app))?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_config: AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or list the cats with: cargo run -- list");
    std::process::exit(1);
}
