//! Storehive CLI - migrations, store provisioning and theme management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! sh-cli migrate
//!
//! # Provision a store (slug is normalized at creation)
//! sh-cli store create --slug my-shop --name "My Shop" --owner 42
//!
//! # Soft-deactivate a store
//! sh-cli store deactivate --slug my-shop
//!
//! # Add a product
//! sh-cli product add --slug my-shop --name "Tote bag" --price 24.50
//!
//! # Validate and apply a theme
//! sh-cli theme validate theme.json
//! sh-cli theme set --slug my-shop --file theme.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;
use commands::product::AddProduct;

#[derive(Parser)]
#[command(name = "sh-cli")]
#[command(author, version, about = "Storehive CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Manage store products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Validate and apply store themes
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create a new store with the default theme
    Create {
        /// Requested slug (normalized to lower-case, hyphenated)
        #[arg(short, long)]
        slug: String,

        /// Store display name
        #[arg(short, long)]
        name: String,

        /// Owning account ID
        #[arg(short, long)]
        owner: i32,
    },
    /// Hide a store from the storefront
    Deactivate {
        /// Exact store slug
        #[arg(short, long)]
        slug: String,
    },
    /// Make a deactivated store visible again
    Activate {
        /// Exact store slug
        #[arg(short, long)]
        slug: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a published product to a store
    Add {
        /// Exact store slug
        #[arg(short, long)]
        slug: String,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price, e.g. 19.99
        #[arg(short, long)]
        price: String,

        /// ISO currency code
        #[arg(short, long, default_value = "USD")]
        currency: String,

        /// Product description; blank lines separate paragraphs
        #[arg(short, long)]
        description: Option<String>,

        /// Image URL (repeatable; the first is the featured image)
        #[arg(short, long = "image")]
        images: Vec<String>,

        /// Highlight in featured blocks
        #[arg(short, long)]
        featured: bool,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Check a theme file without writing it
    Validate {
        /// Theme JSON file
        file: PathBuf,

        /// Accept blocks of types this release cannot render
        #[arg(long)]
        allow_unknown: bool,
    },
    /// Validate a theme file and store it on a store
    Set {
        /// Exact store slug
        #[arg(short, long)]
        slug: String,

        /// Theme JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Accept blocks of types this release cannot render
        #[arg(long)]
        allow_unknown: bool,
    },
    /// Print the theme a store renders with
    Show {
        /// Exact store slug
        #[arg(short, long)]
        slug: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Store { action } => match action {
            StoreAction::Create { slug, name, owner } => {
                commands::store::create(&slug, &name, owner).await?;
            }
            StoreAction::Deactivate { slug } => commands::store::set_active(&slug, false).await?,
            StoreAction::Activate { slug } => commands::store::set_active(&slug, true).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::Add {
                slug,
                name,
                price,
                currency,
                description,
                images,
                featured,
            } => {
                commands::product::add(AddProduct {
                    slug,
                    name,
                    price,
                    currency,
                    description,
                    images,
                    featured,
                })
                .await?;
            }
        },
        Commands::Theme { action } => match action {
            ThemeAction::Validate {
                file,
                allow_unknown,
            } => commands::theme::validate(&file, allow_unknown)?,
            ThemeAction::Set {
                slug,
                file,
                allow_unknown,
            } => commands::theme::set(&slug, &file, allow_unknown).await?,
            ThemeAction::Show { slug } => commands::theme::show(&slug).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_theme_set() {
        let cli = Cli::try_parse_from([
            "sh-cli",
            "theme",
            "set",
            "--slug",
            "my-shop",
            "--file",
            "theme.json",
            "--allow-unknown",
        ])
        .unwrap();

        let Commands::Theme {
            action:
                ThemeAction::Set {
                    slug,
                    file,
                    allow_unknown,
                },
        } = cli.command
        else {
            panic!("expected theme set");
        };
        assert_eq!(slug, "my-shop");
        assert_eq!(file, PathBuf::from("theme.json"));
        assert!(allow_unknown);
    }

    #[test]
    fn test_parse_product_add_repeated_images() {
        let cli = Cli::try_parse_from([
            "sh-cli", "product", "add", "-s", "my-shop", "-n", "Tote", "-p", "9.99", "-i",
            "a.jpg", "-i", "b.jpg",
        ])
        .unwrap();

        let Commands::Product {
            action: ProductAction::Add {
                images, currency, ..
            },
        } = cli.command
        else {
            panic!("expected product add");
        };
        assert_eq!(images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(currency, "USD");
    }
}
