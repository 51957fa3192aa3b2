use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{
    Catalog, CatalogLoader, CatalogState, Currency, EngineError, SheetFormat, validate_menu_data,
};
use order::{Cart, OrderFile};
use settings::{Settings, SettingsArgs};

mod error;
mod order;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(about = "Plan catering menus, price packages and export them as PDF")]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a menu JSON file and list every problem found.
    Validate(CatalogArgs),
    /// Convert a menu spreadsheet (`.xlsx` or `.csv`) into menu JSON.
    Import(ImportArgs),
    /// Price an order and print the breakdown.
    Quote(OrderArgs),
    /// Render an order as a PDF menu.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Menu JSON file.
    #[arg(long, default_value = "data/menu.json")]
    catalog: PathBuf,
    /// How many times a failed catalog load is retried.
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Workbook or CSV file with `name,category,type,price,description` rows.
    sheet: PathBuf,
    /// Prefix of the generated item ids.
    #[arg(long, default_value = "item")]
    prefix: String,
    /// Write the menu JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OrderArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Order JSON file.
    order: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    order: OrderArgs,
    /// Date printed in the footer and the file name (defaults to today).
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print the text of every page instead of writing a PDF.
    #[arg(long)]
    preview: bool,
    /// Export even when customer details are missing or malformed.
    #[arg(long)]
    allow_incomplete: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::load(cli.settings)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "menu_planner={level},engine={level},export={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Validate(args) => validate(&args).await?,
        Command::Import(args) => import(&args).await?,
        Command::Quote(args) => quote(&settings, &args).await?,
        Command::Export(args) => export(&settings, &args).await?,
    }

    Ok(())
}

/// Loads the catalog through the loader state machine, retrying failed
/// attempts up to `retries` times.
async fn load_catalog(path: &Path, retries: u32) -> error::Result<Catalog> {
    let mut loader = CatalogLoader::new();
    loop {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => loader.finish(Catalog::from_json(&raw))?,
            Err(err) => loader.fail(format!("{}: {err}", path.display()))?,
        };
        if !matches!(loader.state(), CatalogState::Error(_)) || loader.attempts() > retries {
            break;
        }
        tracing::warn!(attempt = loader.attempts(), "retrying catalog load");
        loader.retry()?;
    }
    Ok(loader.into_catalog()?)
}

async fn load_order(path: &Path) -> error::Result<OrderFile> {
    let raw = tokio::fs::read_to_string(path).await?;
    OrderFile::from_json(&raw)
}

async fn validate(args: &CatalogArgs) -> error::Result<()> {
    let raw = tokio::fs::read_to_string(&args.catalog).await?;
    let report = validate_menu_data(&serde_json::from_str(&raw)?);
    if !report.is_valid() {
        for message in &report.errors {
            println!("error: {message}");
        }
        return Err(EngineError::InvalidCatalog(report.errors).into());
    }
    println!(
        "{}: {} categories, {} items",
        args.catalog.display(),
        report.categories.len(),
        report.items.len()
    );
    Ok(())
}

async fn import(args: &ImportArgs) -> error::Result<()> {
    let format = SheetFormat::from_path(&args.sheet)
        .ok_or_else(|| error::AppError::UnsupportedSheet(args.sheet.clone()))?;
    let raw = tokio::fs::read(&args.sheet).await?;
    let catalog = match format {
        SheetFormat::Csv => engine::import_csv(raw.as_slice(), &args.prefix)?,
        SheetFormat::Xlsx => engine::import_xlsx(Cursor::new(raw), &args.prefix)?,
    };
    let json = serde_json::to_string_pretty(&catalog)?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            tracing::info!(path = %path.display(), items = catalog.items().len(), "menu written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn quote(settings: &Settings, args: &OrderArgs) -> error::Result<()> {
    let catalog = load_catalog(&args.catalog.catalog, args.catalog.retries).await?;
    let order = load_order(&args.order).await?;
    let cart = order.replay(&catalog, settings.limits())?;
    let currency = settings.currency;

    let doc = cart.document(settings.business.clone(), &catalog);
    for section in &doc.sections {
        println!("{}", section.title);
        for line in &section.lines {
            let marker = if line.is_add_on() {
                format!("  [add-on x{}]", line.add_on_quantity)
            } else {
                String::new()
            };
            println!(
                "  {:>3} x {:<36} {:>14} {:>14}{marker}",
                line.quantity,
                line.name,
                line.unit_price.format(currency),
                line.line_total().format(currency)
            );
        }
    }

    if let Cart::Limited(store) = &cart {
        println!();
        for usage in store.category_usage() {
            let name = usage.name.as_deref().unwrap_or(&usage.category_id);
            println!(
                "{name}: {}/{} included, {} add-on",
                usage.base, usage.limit, usage.add_on
            );
        }
        println!("Package: {}", store.total_price().format(currency));
        println!("Add-ons: {}", store.total_add_on_price().format(currency));
    }
    print_total(doc.item_count(), cart.grand_total(), currency);
    Ok(())
}

fn print_total(items: u64, total: engine::MoneyCents, currency: Currency) {
    println!("Items: {items}  Total: {}", total.format(currency));
}

async fn export(settings: &Settings, args: &ExportArgs) -> error::Result<()> {
    let catalog = load_catalog(&args.order.catalog.catalog, args.order.catalog.retries).await?;
    let order = load_order(&args.order.order).await?;

    if let Some(customer) = &order.customer {
        let issues = customer.issues();
        if !issues.is_empty() {
            if !args.allow_incomplete {
                return Err(error::AppError::IncompleteCustomer(issues));
            }
            tracing::warn!(?issues, "exporting with incomplete customer details");
        }
    }

    let cart = order.replay(&catalog, settings.limits())?;
    if cart.is_empty() {
        tracing::warn!("order has no items, exporting an empty menu");
    }
    let mut doc = cart
        .document(settings.business.clone(), &catalog)
        .currency(settings.currency)
        .terms(settings.terms());
    if let Some(customer) = order.customer {
        doc = doc.customer(customer);
    }
    if let Some(date) = args.date {
        doc = doc.generated_on(date);
    }

    if args.preview {
        for (index, page) in export::preview(&doc).iter().enumerate() {
            println!("--- page {} ---", index + 1);
            for text in page {
                println!("{text}");
            }
        }
        return Ok(());
    }

    let output_dir = settings.output_dir.clone();
    let path = tokio::task::spawn_blocking(move || export::write_pdf(&doc, &output_dir))
        .await
        .map_err(std::io::Error::other)??;
    println!("{}", path.display());
    Ok(())
}
