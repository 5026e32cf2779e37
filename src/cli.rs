use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::orders::OrderOutput;
use crate::commands::settings::SettingsUpdate;
use crate::commands::{categories, orders, products, settings};
use crate::desk::Desk;
use crate::models::{Product, QuantityKind};
use crate::prompt::TerminalPrompter;

#[derive(Parser)]
#[command(
    name = "order-sheet",
    about = "Build restaurant order sheets and keep a history of past orders",
    version
)]
pub struct Cli {
    #[arg(long, short = 'c', value_name = "PATH", help = "Path to the configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Storage database to use")]
    pub db: Option<PathBuf>,

    #[arg(long, short = 'y', help = "Answer yes to every confirmation")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Manage categories")]
    Category(CategoryCommand),

    #[command(subcommand, about = "Manage products and quantities")]
    Product(ProductCommand),

    #[command(about = "Finalize the current order")]
    Order {
        #[arg(value_enum)]
        output: OutputArg,

        #[arg(long, help = "Establishment name; asked interactively when omitted")]
        name: Option<String>,

        #[arg(long, default_value = ".", help = "Directory downloads are written to")]
        out: PathBuf,
    },

    #[command(subcommand, about = "Browse and reuse past orders")]
    History(HistoryCommand),

    #[command(subcommand, about = "Show or change settings")]
    Settings(SettingsCommand),

    #[command(about = "Export categories, products and settings as JSON")]
    Export { file: Option<PathBuf> },

    #[command(about = "Import a JSON export")]
    Import { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Print,
    Download,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Box,
    Bottle,
}

impl From<KindArg> for QuantityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Box => QuantityKind::Box,
            KindArg::Bottle => QuantityKind::Bottle,
        }
    }
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    List,
    Add { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
    Select { name: String },
}

#[derive(Subcommand)]
pub enum ProductCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        name: String,
        #[arg(long, help = "Category to add to; defaults to the selected one")]
        category: Option<String>,
    },
    Rename { id: String, name: String },
    Delete { id: String },
    Adjust {
        id: String,
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    Reset,
    ClearAll,
    Favorite { id: String },
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    List,
    Show { id: String },
    Rename { id: String, name: String },
    Delete { id: String },
    Reorder { id: String },
    Favorite { id: String },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,
    DarkMode,
    Set {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
    },
}

fn print_product(product: &Product) {
    println!(
        "{}  {} [{}]  box: {}  bottle: {}",
        product.id, product.name, product.category, product.box_quantity, product.bottle_quantity
    );
}

pub fn execute(desk: &mut Desk, command: Commands, assume_yes: bool) -> anyhow::Result<()> {
    let mut prompter = TerminalPrompter {
        assume_yes,
        preset_text: None,
    };

    match command {
        Commands::Category(cmd) => match cmd {
            CategoryCommand::List => {
                let selected = desk.store.state().selected_category.clone();
                for category in categories::get_categories(desk) {
                    let marker = if category.name == selected { "*" } else { " " };
                    println!("{} {}  {}", marker, category.id, category.name);
                }
            }
            CategoryCommand::Add { name } => {
                let category = categories::create_category(desk, &name)?;
                println!("{}", category.id);
            }
            CategoryCommand::Rename { id, name } => {
                categories::rename_category(desk, &id, &name)?;
            }
            CategoryCommand::Delete { id } => {
                categories::delete_category(desk, &mut prompter, &id)?;
            }
            CategoryCommand::Select { name } => {
                categories::select_category(desk, &name)?;
            }
        },
        Commands::Product(cmd) => match cmd {
            ProductCommand::List { search } => {
                let list = match search {
                    Some(query) => products::search_products(desk, &query),
                    None => products::get_products(desk),
                };
                list.iter().for_each(print_product);
            }
            ProductCommand::Add { name, category } => {
                if let Some(category) = category {
                    categories::select_category(desk, &category)?;
                }
                let product = products::create_product(desk, &name)?;
                println!("{}", product.id);
            }
            ProductCommand::Rename { id, name } => {
                products::rename_product(desk, &id, &name)?;
            }
            ProductCommand::Delete { id } => {
                products::delete_product(desk, &mut prompter, &id)?;
            }
            ProductCommand::Adjust { id, kind, delta } => {
                let product = products::adjust_quantity(desk, &id, kind.into(), delta)?;
                print_product(&product);
            }
            ProductCommand::Reset => {
                products::reset_quantities(desk, &mut prompter);
            }
            ProductCommand::ClearAll => {
                products::delete_everything(desk, &mut prompter);
            }
            ProductCommand::Favorite { id } => {
                let on = products::toggle_favorite(desk, &id);
                println!("{}", if on { "added to favorites" } else { "removed from favorites" });
            }
        },
        Commands::Order { output, name, out } => {
            prompter.preset_text = name;
            let output = match output {
                OutputArg::Print => OrderOutput::Print,
                OutputArg::Download => OrderOutput::Download,
            };

            let finalized = orders::finalize_order(desk, &mut prompter, output, |output, sheet| {
                match output {
                    OrderOutput::Print => print!("{}", sheet.render_text()),
                    OrderOutput::Download => {
                        let path = out.join(sheet.file_name());
                        std::fs::write(&path, sheet.render_text())?;
                        println!("{}", path.display());
                    }
                }
                Ok(())
            })?;

            if finalized.is_none() {
                println!("Order cancelled");
            }
        }
        Commands::History(cmd) => match cmd {
            HistoryCommand::List => {
                println!("Next order: #{}", desk.history.order_number());
                for entry in orders::get_history(desk) {
                    println!(
                        "{}  {}  {}  ({} products)",
                        entry.id,
                        entry.date,
                        entry.establishment_name,
                        entry.products.len()
                    );
                }
            }
            HistoryCommand::Show { id } => {
                let entry = orders::get_history_entry(desk, &id)?;
                println!("{} - {}", entry.establishment_name, entry.date);
                entry.products.iter().for_each(print_product);
            }
            HistoryCommand::Rename { id, name } => {
                orders::rename_history_entry(desk, &id, &name)?;
            }
            HistoryCommand::Delete { id } => {
                orders::delete_history_entry(desk, &mut prompter, &id)?;
            }
            HistoryCommand::Reorder { id } => {
                if let Some(summary) = orders::reorder_from_history(desk, &mut prompter, &id)? {
                    println!(
                        "updated {}, created {} products and {} categories",
                        summary.updated, summary.created_products, summary.created_categories
                    );
                }
            }
            HistoryCommand::Favorite { id } => {
                orders::get_history_entry(desk, &id)?;
                let on = products::toggle_favorite(desk, &id);
                println!("{}", if on { "added to favorites" } else { "removed from favorites" });
            }
        },
        Commands::Settings(cmd) => match cmd {
            SettingsCommand::Show => {
                println!("{}", serde_json::to_string_pretty(&settings::get_settings(desk))?);
            }
            SettingsCommand::DarkMode => {
                let on = settings::toggle_dark_mode(desk);
                println!("dark mode {}", if on { "on" } else { "off" });
            }
            SettingsCommand::Set {
                language,
                currency,
                notifications,
            } => {
                let updated = settings::update_settings(
                    desk,
                    SettingsUpdate {
                        language,
                        currency,
                        notifications,
                    },
                );
                println!("{}", serde_json::to_string_pretty(&updated)?);
            }
        },
        Commands::Export { file } => {
            let data = settings::export_data(desk)?;
            match file {
                Some(path) => std::fs::write(&path, data)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{}", data),
            }
        }
        Commands::Import { file } => {
            let data = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            if !settings::import_data(desk, &data) {
                anyhow::bail!("{} is not a valid export", file.display());
            }
        }
    }

    Ok(())
}
