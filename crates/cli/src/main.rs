use anyhow::Context;
use bookstore_app::Site;
use bookstore_db::{BookField, BookFilter};
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Run and maintain the bookstore catalog site
#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about)]
struct Cli {
    /// Config environment to load (overrides BOOKSTORE_ENV)
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the site until Ctrl+C (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Print the catalog, newest first
    Books {
        /// Only books in this exact category
        #[arg(long, conflicts_with = "search")]
        category: Option<String>,
        /// Case-insensitive match on title, author or category
        #[arg(long)]
        search: Option<String>,
        /// Print at most this many books
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the distinct categories
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.env {
        Some(environment) => {
            let config_dir = std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config");
            Settings::load_from(&config_dir, environment)
        }
        None => Settings::load(),
    }
    .with_context(|| "failed to load bookstore settings")?;

    bookstore_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => bookstore_app::run(&settings).await,
        Command::Migrate => {
            let site = Site::open(&settings).await?;
            let applied = site.migrate().await?;
            site.store.close().await;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Books {
            category,
            search,
            limit,
        } => {
            let site = Site::open(&settings).await?;
            let filter = category
                .map(BookFilter::Category)
                .or(search.map(BookFilter::Search));

            let books = match filter {
                Some(filter) => site.store.find_where(&filter, limit).await?,
                None => {
                    let mut books = site.store.find_all().await?;
                    if let Some(limit) = limit {
                        books.truncate(limit);
                    }
                    books
                }
            };
            site.store.close().await;

            if books.is_empty() {
                println!("no books");
            }
            for book in books {
                println!(
                    "{}\t{}\t{}\t{}\t{:.2}\t{}",
                    book.id, book.title, book.author, book.category, book.price, book.stock
                );
            }
            Ok(())
        }
        Command::Categories => {
            let site = Site::open(&settings).await?;
            let categories = site.store.distinct(BookField::Category).await?;
            site.store.close().await;

            if categories.is_empty() {
                println!("no categories");
            }
            for category in categories {
                println!("{category}");
            }
            Ok(())
        }
    }
}
