//! sunstar-admin - operator CLI for the product catalog
//!
//! ```bash
//! sunstar-admin list
//! sunstar-admin create --name "Brake Pads" --description Ceramic --price '$75' --category 2
//! sunstar-admin update <id> --price '$80' --image pads.png
//! sunstar-admin delete <id> --yes
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use sunstar_client::catalog::{AutoConfirm, CatalogManager, OperatorPrompt, StdioPrompt};
use sunstar_client::gallery::category_name;
use sunstar_client::upload::{ImageFile, UploadStatus};
use sunstar_client::{ClientConfig, ImageUploader, NetworkHttpClient, SiteApi, logger};

#[derive(Parser, Debug)]
#[command(name = "sunstar-admin")]
#[command(about = "Manage the Sun Star product catalog")]
#[command(version)]
struct Cli {
    /// Backend root URL
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    /// Require an image before a product can be saved
    #[arg(long, env = "IMAGE_REQUIRED")]
    image_required: Option<bool>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog products
    List,
    /// Add a product
    Create(ProductArgs),
    /// Edit an existing product; omitted fields keep their values
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Upload an image and print its URL
    Upload { path: PathBuf },
    /// List product categories
    Categories,
    /// Show site statistics
    Stats,
}

#[derive(Args, Debug, Default)]
struct ProductArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Category id
    #[arg(long)]
    category: Option<String>,
    /// Image file to upload for the product
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long)]
    featured: Option<bool>,
    #[arg(long)]
    available: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger_with_level(Some(&cli.log_level), false);

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.backend_url {
        config = ClientConfig {
            base_url: url.trim_end_matches('/').to_string(),
            ..config
        };
    }
    if let Some(required) = cli.image_required {
        config = config.with_image_required(required);
    }

    let http = config
        .build_http_client()
        .context("Failed to create HTTP client")?;
    let api = SiteApi::new(http);
    tracing::debug!("Using backend {}", api.base_url());

    match cli.command {
        Command::Delete { id, yes: true } => {
            let catalog = CatalogManager::new(api, AutoConfirm, &config);
            delete(catalog, &id).await
        }
        command => run(command, api, &config).await,
    }
}

async fn run(
    command: Command,
    api: SiteApi<NetworkHttpClient>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let categories = api.product_categories().await.unwrap_or_default();
            let mut catalog = CatalogManager::new(api, StdioPrompt, config);
            let products = catalog.list_products().await;
            if let Some(err) = catalog.last_error() {
                bail!("Failed to load products: {}", err);
            }
            for p in &products {
                println!(
                    "{}\t{}\t{}\t{}{}",
                    p.id,
                    p.name,
                    p.price,
                    category_name(&categories, &p.category_id),
                    if p.is_featured { "\t*" } else { "" }
                );
            }
            println!("{} product(s)", products.len());
        }
        Command::Create(fields) => {
            let mut catalog = CatalogManager::new(api, StdioPrompt, config);
            catalog.start_create();
            apply(&mut catalog, fields).await?;
            let product = catalog.submit().await?;
            println!("{}", product.id);
        }
        Command::Update { id, fields } => {
            let mut catalog = CatalogManager::new(api, StdioPrompt, config);
            catalog.list_products().await;
            let Some(product) = catalog.find(&id) else {
                bail!("No product with id {}", id);
            };
            catalog.start_edit(&product);
            apply(&mut catalog, fields).await?;
            catalog.submit().await?;
        }
        Command::Delete { id, .. } => {
            let catalog = CatalogManager::new(api, StdioPrompt, config);
            delete(catalog, &id).await?;
        }
        Command::Upload { path } => {
            let file = ImageFile::from_path(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let (status, mut rx) = tokio::sync::watch::channel(UploadStatus::idle());
            let watcher = tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let s = *rx.borrow();
                    eprint!("\rUploading... {:>3}%", s.progress);
                    if !s.uploading {
                        break;
                    }
                }
                eprintln!();
            });
            let url = ImageUploader::from_config(config)
                .upload(&api, &file, &status)
                .await;
            drop(status);
            let _ = watcher.await;
            println!("{}", url?);
        }
        Command::Categories => {
            for c in api.product_categories().await? {
                println!("{}\t{}", c.id, c.name);
            }
        }
        Command::Stats => {
            let stats = api.stats().await?;
            println!("Total inquiries:    {}", stats.total_inquiries);
            println!("New inquiries:      {}", stats.new_inquiries);
            println!("Testimonials:       {}", stats.total_testimonials);
            println!("Product categories: {}", stats.product_categories);
        }
    }
    Ok(())
}

async fn delete<P: OperatorPrompt>(
    mut catalog: CatalogManager<NetworkHttpClient, P>,
    id: &str,
) -> anyhow::Result<()> {
    if !catalog.delete_product(id).await? {
        println!("Cancelled");
    }
    Ok(())
}

/// Copy CLI fields into the open draft, uploading the image first
async fn apply<P: OperatorPrompt>(
    catalog: &mut CatalogManager<NetworkHttpClient, P>,
    fields: ProductArgs,
) -> anyhow::Result<()> {
    if let Some(id) = fields.category {
        let categories = catalog.api().product_categories().await?;
        let Some(category) = categories.iter().find(|c| c.id == id) else {
            bail!("Unknown category {}", id);
        };
        catalog.select_category(category);
    }

    let draft = catalog.draft_mut();
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(price) = fields.price {
        draft.price = price;
    }
    if let Some(featured) = fields.featured {
        draft.is_featured = featured;
    }
    if let Some(available) = fields.available {
        draft.is_available = available;
    }

    if let Some(path) = fields.image {
        let file = ImageFile::from_path(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        catalog.upload_draft_image(&file).await?;
    }

    let missing = catalog.missing_fields();
    if !missing.is_empty() {
        bail!("Missing required fields: {}", missing.join(", "));
    }
    Ok(())
}
