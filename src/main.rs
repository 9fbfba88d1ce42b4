//! Longbox storefront CLI

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use longbox::{
    cart::Cart,
    catalog::Catalog,
    fixtures,
    pricing::ShippingPolicy,
    receipt::OrderSummary,
    store::{CartStore, FileSlot},
};

/// Demo catalog bundled with the binary.
const DEFAULT_CATALOG: &str = include_str!("../fixtures/catalog.yml");

#[derive(Debug, Parser)]
#[command(name = "longbox", about = "Longbox storefront cart CLI", long_about = None)]
struct Cli {
    /// Path of the cart slot file
    #[arg(long, env = "LONGBOX_CART_PATH", default_value = "longbox-cart.json")]
    cart_path: PathBuf,

    /// Catalog fixture path; the bundled demo catalog is used when omitted
    #[arg(long, env = "LONGBOX_CATALOG_PATH")]
    catalog_path: Option<PathBuf>,

    #[command(flatten)]
    shipping: ShippingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ShippingArgs {
    /// Flat shipping rate in minor units
    #[arg(long, env = "LONGBOX_SHIPPING_FLAT_MINOR", default_value_t = ShippingPolicy::default().flat_rate_minor)]
    flat_rate_minor: i64,

    /// Subtotal in minor units at which shipping becomes free
    #[arg(long, env = "LONGBOX_FREE_SHIPPING_MINOR", default_value_t = ShippingPolicy::default().free_threshold_minor)]
    free_threshold_minor: i64,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add one unit of a catalog product to the cart
    Add(AddArgs),
    /// Remove a line from the cart
    Remove(LineArgs),
    /// Set an absolute quantity for a line (zero removes it)
    SetQuantity(SetQuantityArgs),
    /// Empty the cart
    Clear,
    /// Print the checkout summary
    Show,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Catalog sku to add
    #[arg(long)]
    sku: String,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Cart line id (catalog sku)
    #[arg(long)]
    id: String,
}

#[derive(Debug, Args)]
struct SetQuantityArgs {
    /// Cart line id (catalog sku)
    #[arg(long)]
    id: String,

    /// New absolute quantity
    #[arg(long)]
    quantity: i64,
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run(cli: Cli) -> Result<(), String> {
    let catalog = load_catalog(cli.catalog_path.as_deref())?;

    let policy = ShippingPolicy {
        flat_rate_minor: cli.shipping.flat_rate_minor,
        free_threshold_minor: cli.shipping.free_threshold_minor,
    };

    let slot = FileSlot::new(cli.cart_path);
    let mut store = CartStore::hydrate(slot, catalog.currency(), policy);

    match cli.command {
        Commands::Add(args) => add(&mut store, &catalog, &args.sku),
        Commands::Remove(args) => {
            store.remove_item(&args.id);
            Ok(())
        }
        Commands::SetQuantity(args) => {
            store.update_quantity(&args.id, args.quantity);
            Ok(())
        }
        Commands::Clear => {
            store.clear();
            Ok(())
        }
        Commands::Show => show(store.cart()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog<'static>, String> {
    let yaml = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|error| format!("failed to read catalog {}: {error}", path.display()))?,
        None => DEFAULT_CATALOG.to_string(),
    };

    fixtures::load_catalog(&yaml).map_err(|error| format!("failed to load catalog: {error}"))
}

fn add(
    store: &mut CartStore<'static, FileSlot>,
    catalog: &Catalog<'static>,
    sku: &str,
) -> Result<(), String> {
    let product = catalog
        .by_sku(sku)
        .ok_or_else(|| format!("unknown sku: {sku}"))?;

    store
        .add_item(product.details())
        .map_err(|error| format!("failed to add {sku}: {error}"))?;

    println!("added {} ({})", sku, product.name);

    Ok(())
}

fn show(cart: &Cart<'_>) -> Result<(), String> {
    let summary = OrderSummary::from_cart(cart);
    let stdout = io::stdout();

    summary
        .write_to(stdout.lock())
        .map_err(|error| format!("failed to render summary: {error}"))
}
