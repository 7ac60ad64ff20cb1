//! Las Torres CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a catalog product, or any product by title and price
//! lt-cli cart add croissant
//! lt-cli cart add --title "Tarta de Santiago" --price "12,50€"
//!
//! # Inspect and check out
//! lt-cli cart show
//! lt-cli cart checkout
//!
//! # Browse the catalog
//! lt-cli catalog list --category bolleria
//!
//! # Send the contact form
//! lt-cli contact send -n "Ana" -e ana@correo.es -m "¿Abrís el domingo?"
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, set, clear, render and check out
//! - `catalog` - List products and show product details
//! - `contact` - Submit the contact form
//!
//! Configuration comes from `LAS_TORRES_*` environment variables (see
//! `las_torres_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use las_torres_storefront::{AppState, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "lt-cli")]
#[command(author, version, about = "Las Torres bakery storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Contact the shop
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Catalog product id (or explicit id when --title is given)
        id: Option<String>,

        /// Product title, for products not in the catalog
        #[arg(short, long)]
        title: Option<String>,

        /// Unit price as a number or label (e.g. "12,50€")
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },
    /// Set a product's quantity (0 removes it)
    Set {
        /// Product id
        id: String,

        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Print the cart drawer HTML fragments
    Render,
    /// Print the WhatsApp order link
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered by category
    List {
        /// Category to show (`all` for everything)
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Show a product's details
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum ContactAction {
    /// Submit the contact form
    Send {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Your email address
        #[arg(short, long)]
        email: String,

        /// Message for the shop
        #[arg(short, long)]
        message: String,
    },
    /// Print the WhatsApp link for a custom order
    Encargo,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "las_torres_core=info,las_torres_storefront=info,lt_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::open(config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id, title, price } => {
                commands::cart::add(&mut state, id.as_deref(), title.as_deref(), price.as_deref())?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id),
            CartAction::Set { id, quantity } => commands::cart::set(&mut state, &id, quantity)?,
            CartAction::Clear => commands::cart::clear(&mut state),
            CartAction::Render => commands::cart::render(&state)?,
            CartAction::Checkout => commands::cart::checkout(&state)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => commands::catalog::list(&state, &category),
            CatalogAction::Show { id } => commands::catalog::show(&state, &id)?,
        },
        Commands::Contact { action } => match action {
            ContactAction::Send {
                name,
                email,
                message,
            } => commands::contact::send(&state, name, email, message).await?,
            ContactAction::Encargo => commands::contact::custom_order(&state),
        },
    }
    Ok(())
}
