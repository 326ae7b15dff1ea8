//! CaPhe CLI - staff tools for the café admin backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (session persists for 24 hours)
//! caphe login -e admin@caphe.coffee -p 's3cret!'
//!
//! # Browse collections with client-side filtering
//! caphe products list --search "cà phê" --category "Cà phê" --page 1
//! caphe customers list --status active
//! caphe orders --search "gói premium"
//!
//! # Mutations
//! caphe products create -n "Cà phê sữa đá" -d "Cà phê phin với sữa đặc" \
//!     --price 45,000 --category 1 --image ./ca-phe-sua.jpg
//! caphe plans toggle 2
//!
//! # Statistics
//! caphe stats overview
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - session management
//! - `customers` / `products` / `categories` / `plans` / `orders` - CRUD
//! - `stats` - aggregate statistics
//!
//! Pass `--demo` to run against the seeded offline data store instead of
//! the remote backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "caphe")]
#[command(author, version, about = "CaPhe admin CLI tools")]
struct Cli {
    /// Use the seeded offline demo data instead of the remote backend
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a staff member
    Login {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Staff password
        #[arg(short, long)]
        password: String,
    },
    /// Destroy the local session
    Logout,
    /// Show the current session
    Whoami,
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List product categories
    Categories,
    /// Manage subscription plans
    Plans {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// List orders
    Orders {
        /// Filter by customer or package name (diacritic-insensitive)
        #[arg(long, default_value = "")]
        search: String,

        /// Filter by status (`pending`, `completed`, `cancelled`)
        #[arg(long)]
        status: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Aggregate statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers
    List {
        /// Filter by name or email (diacritic-insensitive)
        #[arg(long, default_value = "")]
        search: String,

        /// Filter by status (`active` or `inactive`)
        #[arg(long)]
        status: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Create a customer
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, default_value = "")]
        phone: String,
    },
    /// Update a customer
    Update {
        /// Customer id
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        /// Mark the account inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a customer
    Delete {
        /// Customer id
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Filter by name (diacritic-insensitive)
        #[arg(long, default_value = "")]
        search: String,

        /// Filter by category id or name
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Create a product (multipart upload)
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Price in VNĐ; separators accepted (`45,000`)
        #[arg(long)]
        price: String,

        /// Category id or name
        #[arg(long)]
        category: String,

        /// Image file (jpg/png/webp, max 5MB)
        #[arg(long)]
        image: std::path::PathBuf,
    },
    /// Update a product (multipart upload)
    Update {
        /// Product id
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Price in VNĐ; separators accepted (`45,000`)
        #[arg(long)]
        price: String,

        /// Category id or name
        #[arg(long)]
        category: String,

        /// Replacement image; omit to keep the current one
        #[arg(long)]
        image: Option<std::path::PathBuf>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// List plans
    List,
    /// Show one plan
    Get {
        /// Plan id
        id: i64,
    },
    /// Create a plan
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Product the plan is tied to
        #[arg(long)]
        product_id: i64,

        /// Price in VNĐ; separators accepted (`300,000`)
        #[arg(long)]
        price: String,

        #[arg(long)]
        duration_days: i64,

        #[arg(long)]
        daily_quota: i64,

        #[arg(long)]
        max_per_visit: i64,

        /// Create the plan already active
        #[arg(long)]
        active: bool,
    },
    /// Update a plan (only the given fields change)
    Update {
        /// Plan id
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Price in VNĐ; separators accepted
        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        duration_days: Option<i64>,

        #[arg(long)]
        daily_quota: Option<i64>,

        #[arg(long)]
        max_per_visit: Option<i64>,
    },
    /// Delete a plan
    Delete {
        /// Plan id
        id: i64,
    },
    /// Flip a plan's active flag
    Toggle {
        /// Plan id
        id: i64,
    },
    /// Deactivate a plan
    Deactivate {
        /// Plan id
        id: i64,
    },
}

#[derive(Subcommand)]
enum StatsAction {
    /// Headline numbers (customers, revenue, pending orders)
    Overview,
    /// Revenue bucketed by month
    Revenue,
    /// Payment-method distribution
    Payments,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let demo = cli.demo;
    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&email, &password).await?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami()?,
        Commands::Customers { action } => match action {
            CustomerAction::List {
                search,
                status,
                page,
                page_size,
            } => commands::customers::list(demo, &search, status.as_deref(), page, page_size).await?,
            CustomerAction::Create { name, email, phone } => {
                commands::customers::create(demo, &name, &email, &phone).await?;
            }
            CustomerAction::Update {
                id,
                name,
                email,
                phone,
                inactive,
            } => commands::customers::update(demo, &id, &name, &email, &phone, inactive).await?,
            CustomerAction::Delete { id } => commands::customers::delete(demo, &id).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                page,
                page_size,
            } => {
                commands::products::list(&search, category.as_deref(), page, page_size).await?;
            }
            ProductAction::Create {
                name,
                description,
                price,
                category,
                image,
            } => {
                commands::products::create(&name, &description, &price, &category, &image).await?;
            }
            ProductAction::Update {
                id,
                name,
                description,
                price,
                category,
                image,
            } => {
                commands::products::update(
                    id,
                    &name,
                    &description,
                    &price,
                    &category,
                    image.as_deref(),
                )
                .await?;
            }
            ProductAction::Delete { id } => commands::products::delete(id).await?,
        },
        Commands::Categories => commands::categories::list().await?,
        Commands::Plans { action } => match action {
            PlanAction::List => commands::plans::list().await?,
            PlanAction::Get { id } => commands::plans::get(id).await?,
            PlanAction::Create {
                name,
                description,
                product_id,
                price,
                duration_days,
                daily_quota,
                max_per_visit,
                active,
            } => {
                commands::plans::create(
                    &name,
                    &description,
                    product_id,
                    &price,
                    duration_days,
                    daily_quota,
                    max_per_visit,
                    active,
                )
                .await?;
            }
            PlanAction::Update {
                id,
                name,
                description,
                price,
                duration_days,
                daily_quota,
                max_per_visit,
            } => {
                commands::plans::update(
                    id,
                    name,
                    description,
                    price.as_deref(),
                    duration_days,
                    daily_quota,
                    max_per_visit,
                )
                .await?;
            }
            PlanAction::Delete { id } => commands::plans::delete(id).await?,
            PlanAction::Toggle { id } => commands::plans::toggle(id).await?,
            PlanAction::Deactivate { id } => commands::plans::deactivate(id).await?,
        },
        Commands::Orders {
            search,
            status,
            page,
            page_size,
        } => commands::orders::list(demo, &search, status.as_deref(), page, page_size).await?,
        Commands::Stats { action } => match action {
            StatsAction::Overview => commands::stats::overview(demo).await?,
            StatsAction::Revenue => commands::stats::revenue(demo).await?,
            StatsAction::Payments => commands::stats::payments(demo).await?,
        },
    }
    Ok(())
}
