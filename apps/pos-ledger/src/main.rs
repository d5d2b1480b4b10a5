#![cfg_attr(test, allow(clippy::unwrap_used))]

//! POS Ledger Binary
//!
//! Command line front end over the menu catalog and checkout ledger.
//!
//! # Usage
//!
//! ```bash
//! pos-ledger menu add Coffee 50 --image ~/Pictures/coffee.png
//! pos-ledger menu list
//! pos-ledger checkout Coffee=2 Tea
//! pos-ledger ledger
//! pos-ledger inventory --date 2026-01-19
//! ```
//!
//! # Environment Variables
//!
//! - `POS_CONFIG`: Config file path (default: `config.yaml` if present)
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use pos_ledger::config::{Config, load_config};
use pos_ledger::domain::shared::{Quantity, parse_ledger_date};
use pos_ledger::telemetry::init_tracing;
use pos_ledger::{
    Cart, CheckoutUseCase, DailyInventory, FsImageAssetStore, LedgerEntry, ManageMenuUseCase,
    MenuCatalogRepository, MenuItem, Money, OrderLedgerRepository, SqliteMenuCatalogStore,
    SqliteOrderLedgerStore, StoreOptions, ViewInventoryUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "pos-ledger",
    about = "Menu catalog and checkout ledger",
    version,
    disable_help_subcommand = true
)]
struct Cli {
    /// Config file (YAML).
    #[arg(long, global = true, value_name = "PATH", env = "POS_CONFIG")]
    config: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage menu items.
    #[command(subcommand)]
    Menu(MenuCommand),

    /// Record an order: each argument is `NAME` or `NAME=QTY`.
    Checkout {
        #[arg(required = true, value_name = "NAME[=QTY]", value_parser = parse_order_line)]
        lines: Vec<OrderLine>,
    },

    /// Show every ledger row, newest first.
    Ledger,

    /// Show the rows created on one day with their total.
    Inventory {
        /// Day to report (default: today).
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
enum MenuCommand {
    /// List menu items.
    List,

    /// Add a menu item.
    Add {
        name: String,
        price: String,
        /// Picture to copy into the asset directory.
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Remove every menu item with this exact name.
    Remove { name: String },
}

#[derive(Debug, Clone)]
struct OrderLine {
    name: String,
    quantity: Quantity,
}

fn parse_order_line(s: &str) -> Result<OrderLine, String> {
    let (name, quantity) = match s.rsplit_once('=') {
        Some((name, qty)) => {
            let qty: u32 = qty
                .trim()
                .parse()
                .map_err(|_| format!("invalid quantity in '{s}'"))?;
            (name, Quantity::new(qty).map_err(|e| e.to_string())?)
        }
        None => (s, Quantity::ONE),
    };
    if name.trim().is_empty() {
        return Err("item name cannot be empty".to_string());
    }
    Ok(OrderLine {
        name: name.to_string(),
        quantity,
    })
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_ledger_date(s).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Wired stores for one invocation.
struct App {
    catalog: Arc<SqliteMenuCatalogStore>,
    ledger: Arc<SqliteOrderLedgerStore>,
    assets: Arc<FsImageAssetStore>,
    symbol: String,
    json: bool,
}

impl App {
    async fn open(config: &Config, json: bool) -> Result<Self> {
        let options = StoreOptions::from(&config.persistence);

        let catalog =
            SqliteMenuCatalogStore::open(Path::new(&config.persistence.menu_db_path), options)
                .await
                .context("opening menu database")?;
        catalog.init_schema().await?;

        let ledger =
            SqliteOrderLedgerStore::open(Path::new(&config.persistence.orders_db_path), options)
                .await
                .context("opening inventory database")?;
        ledger.init_schema().await?;

        Ok(Self {
            catalog: Arc::new(catalog),
            ledger: Arc::new(ledger),
            assets: Arc::new(FsImageAssetStore::from(&config.assets)),
            symbol: config.display.currency_symbol.clone(),
            json,
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.with_symbol(&self.symbol)
    }

    /// Print `value` as JSON, or run `human` for the table form.
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }

    async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Menu(menu) => self.menu(menu).await,
            Command::Checkout { lines } => self.checkout(&lines).await,
            Command::Ledger => {
                let entries = self.ledger.list_all().await?;
                self.emit(&entries, || self.print_ledger(&entries))
            }
            Command::Inventory { date } => {
                let view = ViewInventoryUseCase::new(Arc::new(self.ledger.reader()));
                let report = match date {
                    Some(date) => view.for_date(date).await?,
                    None => view.today().await?,
                };
                self.emit(&report, || self.print_inventory(&report))
            }
        }
    }

    async fn menu(&self, command: MenuCommand) -> Result<()> {
        let menu = ManageMenuUseCase::new(Arc::clone(&self.catalog), Arc::clone(&self.assets));
        match command {
            MenuCommand::List => {
                let items = menu.load_menu().await?;
                self.emit(&items, || self.print_menu(&items))?;
            }
            MenuCommand::Add { name, price, image } => {
                let item = menu.add_item(&name, &price, image.as_deref()).await?;
                self.emit(&item, || {
                    println!("{} added to menu at {}", item.name, self.money(item.price));
                })?;
            }
            MenuCommand::Remove { name } => {
                let removed = menu.remove_item(&name).await?;
                if removed == 0 {
                    bail!("{name} not found in menu");
                }
                self.emit(&serde_json::json!({ "name": name, "removed": removed }), || {
                    println!("{name} removed from menu");
                })?;
            }
        }
        Ok(())
    }

    async fn checkout(&self, lines: &[OrderLine]) -> Result<()> {
        let items = self.catalog.list_items().await?;
        let mut cart = Cart::new();
        for line in lines {
            let Some(item) = items.iter().find(|i| i.name.as_str() == line.name) else {
                bail!("{} not found in menu", line.name);
            };
            cart.add_quantity(item, line.quantity)?;
        }

        let receipt = CheckoutUseCase::new(Arc::clone(&self.ledger))
            .checkout(&mut cart)
            .await?;

        self.emit(&receipt, || {
            for line in &receipt.lines {
                println!(
                    "{:<24} x{:<4} {:>12}",
                    line.item_name(),
                    line.quantity(),
                    self.money(line.line_total())
                );
            }
            println!("{:<30} {:>12}", "Total", self.money(receipt.total));
            println!("Order checked out at {}", receipt.at);
        })
    }

    fn print_menu(&self, items: &[MenuItem]) {
        if items.is_empty() {
            println!("Menu is empty");
            return;
        }
        for item in items {
            println!(
                "{:>4}  {:<24} {:>12}  {}",
                item.id,
                item.name,
                self.money(item.price),
                item.image_path.as_deref().unwrap_or("-")
            );
        }
    }

    fn print_ledger(&self, entries: &[LedgerEntry]) {
        if entries.is_empty() {
            println!("No orders recorded");
            return;
        }
        for entry in entries {
            println!(
                "{:>4}  {:<24} x{:<4} {:>12} {:>12}  {}",
                entry.id,
                entry.item_name,
                entry.quantity,
                self.money(entry.price),
                self.money(entry.total),
                entry.date
            );
        }
    }

    fn print_inventory(&self, report: &DailyInventory) {
        println!("Inventory for {}", report.date);
        for row in &report.rows {
            println!(
                "{:>4}  {:<24} x{:<4} {:>12}",
                row.id,
                row.item_name,
                row.quantity,
                self.money(row.total)
            );
        }
        println!("Total Amount: {}", self.money(report.total_amount));
    }
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.observability.logging);
    tracing::debug!(
        menu_db = %config.persistence.menu_db_path,
        orders_db = %config.persistence.orders_db_path,
        assets = %config.assets.dir,
        "Configuration loaded"
    );

    let app = App::open(&config, cli.json).await?;
    app.run(cli.command).await
}
