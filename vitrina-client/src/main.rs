use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use vitrina_client::{ClientConfig, CloudinaryUploader, HttpClient, HttpDocumentStore};
use vitrina_core::{
    AdminView, CatalogEngine, CatalogRepository, CheckoutLinkComposer, Config, ImageFile,
    PanelContent, ProductCard, SharedSecretGate, StorefrontRender, StorefrontView, UploadProfile,
    init_logger_with_file,
};

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(about = "Product catalog storefront and admin")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the public storefront
    Catalog {
        #[arg(long)]
        search: Option<String>,
        /// Category panel to expand
        #[arg(long)]
        open: Option<String>,
    },
    /// Manage products and categories (requires login)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Start an admin session
    Login { user: String, password: String },
    /// End the admin session
    Logout,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Paginated product list
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    AddCategory { name: String },
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Create a product, or update one with --id
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, conflicts_with = "image_file")]
        image: Option<String>,
        #[arg(long)]
        image_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref().and_then(|p| p.to_str()),
    );

    let result = run(cli, &config).await;
    if let Err(e) = &result {
        tracing::error!("vitrina failed: {:#}", e);
    }
    result
}

async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command {
        Command::Login { user, password } => {
            let record = SharedSecretGate::from_config(config).login(&user, &password)?;
            println!("Logged in as {} until {}", record.user, record.expires_at);
        }
        Command::Logout => {
            SharedSecretGate::from_config(config).logout()?;
            println!("Logged out");
        }
        Command::Catalog { search, open } => {
            let checkout = CheckoutLinkComposer::new(config.tenant.merchant.clone());
            let mut view = StorefrontView::new(build_engine(config)?, checkout)
                .with_priority_category(config.tenant.priority_category.clone());
            // A failed load is logged by the view and renders empty
            let _ = view.load().await;
            if let Some(term) = search {
                view.set_search(term);
            }
            if let Some(category) = open {
                view.toggle_category(&category);
            }
            print_storefront(&view.render());
        }
        Command::Admin { command } => {
            let gate = SharedSecretGate::from_config(config);
            let mut view = AdminView::open(build_engine(config)?, &gate)
                .context("run `vitrina login` first")?;
            view.load().await?;
            run_admin(&mut view, command).await?;
        }
    }
    Ok(())
}

fn build_engine(config: &Config) -> anyhow::Result<Arc<CatalogEngine>> {
    let store = HttpDocumentStore::new(HttpClient::new(&ClientConfig::store(config))?);
    let uploader = CloudinaryUploader::new(HttpClient::new(&ClientConfig::upload(config))?);
    let repo = CatalogRepository::for_tenant(Arc::new(store), &config.tenant);
    let profile = UploadProfile::new(
        config.tenant.upload_preset.clone(),
        config.tenant.upload_folder.clone(),
    );
    Ok(Arc::new(
        CatalogEngine::new(repo).with_uploader(Arc::new(uploader), profile),
    ))
}

async fn run_admin(view: &mut AdminView, command: AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::List {
            search,
            category,
            page,
        } => {
            view.set_search(search);
            view.set_filter_category(category);
            while view.page() < page && view.next_page() {}
            print_admin_page(view);
        }
        AdminCommand::AddCategory { name } => {
            view.set_new_category(name);
            let added = view.add_category().await?;
            println!("{added:?}");
        }
        AdminCommand::Delete { id, yes } => {
            let confirm = move |prompt: &str| {
                if !yes {
                    println!("{prompt} Pass --yes to confirm.");
                }
                yes
            };
            match view.delete(&id, &confirm).await? {
                Some(outcome) if outcome.existed => println!("Deleted {}", outcome.id),
                Some(outcome) => println!("{} was already gone", outcome.id),
                None => {}
            }
        }
        AdminCommand::Save {
            id,
            name,
            description,
            price,
            category,
            image,
            image_file,
        } => {
            if let Some(id) = &id
                && !view.edit(id)
            {
                bail!("product {id} not found");
            }

            let form = view.form_mut();
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if price.is_some() {
                form.price = price;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(image) = image {
                form.image = image;
            }
            if let Some(path) = image_file {
                let file = ImageFile::from_path(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                view.set_image_file(Some(file));
            }

            let outcome = view.submit().await?;
            println!("{:?} {}", outcome.kind, outcome.id);
            if !outcome.refreshed {
                println!("Saved, but the catalog could not be reloaded");
            }
        }
    }
    Ok(())
}

fn print_card(card: &ProductCard, indent: &str) {
    println!("{indent}{} {} - {}", card.name, card.price, card.description);
    println!("{indent}  image: {}", card.image_url);
    println!("{indent}  buy:   {}", card.checkout_url);
}

fn print_storefront(render: &StorefrontRender) {
    match render {
        StorefrontRender::Loading => println!("Cargando productos..."),
        StorefrontRender::NoResults => println!("No se encontraron productos."),
        StorefrontRender::SearchResults(cards) => {
            for card in cards {
                print_card(card, "");
            }
        }
        StorefrontRender::Groups(panels) => {
            for panel in panels {
                let marker = if panel.expanded { "▾" } else { "▸" };
                println!("{marker} {}", panel.category);
                match &panel.content {
                    PanelContent::Collapsed => {}
                    PanelContent::Empty => println!("    No hay productos para esta marca."),
                    PanelContent::Items(cards) => {
                        for card in cards {
                            print_card(card, "    ");
                        }
                    }
                }
            }
        }
    }
}

fn print_admin_page(view: &AdminView) {
    let page_view = view.page_view();
    for product in &page_view.page.data {
        println!(
            "{:<24} {:<28} {:<16} {}",
            product.id,
            product.name,
            product.category,
            product.display_price()
        );
    }
    if page_view.show_pagination {
        println!(
            "page {}/{} (prev: {}, next: {})",
            page_view.page.page,
            page_view.page.total_pages,
            page_view.page.has_prev(),
            page_view.page.has_next()
        );
    }
    println!("{} products", page_view.page.total);
}
