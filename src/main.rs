use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use neoncart::dom::{target_in_rows, PageBindings};
use neoncart::page::{CartPage, PageSnapshot};
use neoncart::pricing::{cart_count, cart_total};
use neoncart::rendering::UiEvent;
use neoncart::storage::FileStorage;
use neoncart::{CartConfig, CartStore, ProductRef};

#[derive(Parser, Debug)]
#[command(name = "neoncart", version, about = "NeonShop cart CLI")]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = ".neoncart/storage.json",
        help = "Storage file holding the cart"
    )]
    store: PathBuf,
    #[arg(long, global = true, help = "JSON config file (defaults apply when omitted)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(short, long, global = true, help = "Log cart operations to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the cart lines, item count and total
    Show,
    /// Add one unit of a product
    Add {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Set a line's quantity (clamped to 1..=99)
    SetQty { id: String, qty: String },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
    /// Render a page's badge and cart table from its markup
    Render { page: PathBuf },
    /// Click the first element matching a selector, then render
    Click { page: PathBuf, selector: String },
    /// Change a quantity input matching a selector to a value, then render
    Change {
        page: PathBuf,
        selector: String,
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "neoncart=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CartConfig> {
    match path {
        Some(p) => {
            CartConfig::load_from(p).with_context(|| format!("loading config {}", p.display()))
        }
        None => Ok(CartConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    let storage = FileStorage::new(&cli.store);

    match cli.command {
        Commands::Show => {
            let store = CartStore::new(storage, &config);
            print_cart(&store, &config, cli.json)?;
        }
        Commands::Add { id, name, price } => {
            let mut store = CartStore::new(storage, &config);
            store.add_to_cart(&ProductRef { id, name, price });
            print_cart(&store, &config, cli.json)?;
        }
        Commands::SetQty { id, qty } => {
            let mut store = CartStore::new(storage, &config);
            store.set_qty(&id, qty.as_str());
            print_cart(&store, &config, cli.json)?;
        }
        Commands::Remove { id } => {
            let mut store = CartStore::new(storage, &config);
            store.remove_item(&id);
            print_cart(&store, &config, cli.json)?;
        }
        Commands::Clear => {
            let mut store = CartStore::new(storage, &config);
            store.clear();
            print_cart(&store, &config, cli.json)?;
        }
        Commands::Render { page } => {
            let (_, cart_page) = open_page(&page, storage, &config)?;
            print_page(&cart_page.snapshot(), cli.json)?;
        }
        Commands::Click { page, selector } => {
            let (bindings, mut cart_page) = open_page(&page, storage, &config)?;
            // Add-to-cart triggers live in the page; quantity controls in the rendered rows.
            let target = match bindings.target(&selector) {
                Ok(t) => t,
                Err(_) => target_in_rows(rendered_rows(&cart_page), &selector)?,
            };
            if !cart_page.dispatch(&UiEvent::Click(target)) {
                log::warn!("click on {} did nothing", selector);
            }
            print_page(&cart_page.snapshot(), cli.json)?;
        }
        Commands::Change {
            page,
            selector,
            value,
        } => {
            let (_, mut cart_page) = open_page(&page, storage, &config)?;
            let target = target_in_rows(rendered_rows(&cart_page), &selector)?.with_value(value);
            if !cart_page.dispatch(&UiEvent::Change(target)) {
                log::warn!("change on {} did nothing", selector);
            }
            print_page(&cart_page.snapshot(), cli.json)?;
        }
    }
    Ok(())
}

fn open_page(
    path: &Path,
    storage: FileStorage,
    config: &CartConfig,
) -> anyhow::Result<(PageBindings, CartPage<FileStorage>)> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("reading page {}", path.display()))?;
    let bindings = PageBindings::parse(&html, config)?;
    let mut page = CartPage::new(storage, config, bindings.outline());
    page.load();
    Ok((bindings, page))
}

fn rendered_rows<S: neoncart::storage::Storage>(page: &CartPage<S>) -> &str {
    page.table_view().map(|v| v.rows_html()).unwrap_or_default()
}

fn print_cart(
    store: &CartStore<FileStorage>,
    config: &CartConfig,
    json: bool,
) -> anyhow::Result<()> {
    let cart = store.get_cart();
    let count = cart_count(&cart);
    let total = cart_total(&cart);
    if json {
        let out = serde_json::json!({
            "lines": cart,
            "count": count,
            "total": total,
            "total_text": config.currency.format(total),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("{}", config.messages.empty_cart);
    }
    for line in &cart {
        println!(
            "{:<12} {:<30} {:>4} × {}",
            line.id,
            line.name,
            line.qty,
            config.currency.format(line.price)
        );
    }
    println!("items: {}  total: {}", count, config.currency.format(total));
    Ok(())
}

fn print_page(snapshot: &PageSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }
    match &snapshot.badge {
        Some(b) => println!("badge: {} ({})", b.text, b.aria_label),
        None => println!("badge: (none)"),
    }
    match &snapshot.table {
        Some(t) => {
            println!("table: layout={} mode={}", t.layout, t.mode);
            println!("{}", t.rows_html);
            println!("total: {}", t.total);
        }
        None => println!("table: (none)"),
    }
    Ok(())
}
