use anyhow::Context;
use clap::{Parser, Subcommand};
use nestquest::app::{AppContext, ListingBoard, SearchBar, SubscribeForm, VisitScheduler};
use nestquest::notify::{self, Toasts};
use nestquest::session::on_auth_callback;
use nestquest::{Config, FilterField, FilterSpec, Property, UserProfile};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nestquest")]
#[command(about = "Browse, filter and book property listings")]
struct Cli {
    /// Act as this logged-in user
    #[arg(long, global = true)]
    email: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show listings, optionally filtered
    List {
        #[arg(long, default_value = "")]
        price_min: String,
        #[arg(long, default_value = "")]
        price_max: String,
        /// Minimum number of bedrooms
        #[arg(long, default_value = "")]
        bedrooms: String,
        /// house, apartment, condo or townhouse
        #[arg(long = "type", default_value = "")]
        property_type: String,
        /// "for sale" or "for rent"
        #[arg(long, default_value = "")]
        status: String,
        /// Let the gateway apply the filters
        #[arg(long)]
        server_side: bool,
        /// Write the shown listings to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Show one listing
    Show { id: i64 },
    /// List the logged-in user's favorites
    Favorites,
    /// Add or remove a listing from favorites
    Favorite { property_id: i64 },
    /// Subscribe to new-listing alerts
    Subscribe { email: String },
    /// Book a visit
    Visit {
        property_id: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long = "contact")]
        contact_email: Option<String>,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Search listings by keyword
    Search { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "nestquest=info".into()))
        .init();

    let cli = Cli::parse();

    info!("🏠 NestQuest");
    info!("============");

    let config = Config::from_env().context("Invalid configuration")?;
    let (ctx, mut toasts) = AppContext::from_config(&config).context("Failed to set up gateway")?;

    if let Some(email) = &cli.email {
        on_auth_callback(&ctx.session, Some(UserProfile::new(email.as_str())));
    }

    let result = run(cli.command, ctx).await;
    print_toasts(&mut toasts);
    result
}

async fn run(command: Command, ctx: AppContext) -> anyhow::Result<()> {
    match command {
        Command::List {
            price_min,
            price_max,
            bedrooms,
            property_type,
            status,
            server_side,
            export,
        } => {
            let mut board = ListingBoard::new(ctx);
            board.set_filter(FilterField::PriceMin, price_min);
            board.set_filter(FilterField::PriceMax, price_max);
            board.set_filter(FilterField::Bedrooms, bedrooms);
            board.set_filter(FilterField::PropertyType, property_type);
            board.set_filter(FilterField::Status, status);
            let spec = checked_filters(&board)?;
            if !spec.is_empty() {
                info!("🔍 Filtering by {:?}", spec);
            }

            if server_side {
                board.load_server_filtered().await;
            } else {
                board.load().await;
            }

            info!("✅ {} of {} properties match", board.filtered().len(), board.properties().len());
            if board.filtered().is_empty() {
                println!("No properties found matching your search criteria.");
            }
            for (i, property) in board.filtered().iter().enumerate() {
                print_property(i + 1, property, board.is_favorite(property.id));
            }

            if let Some(path) = export {
                let json = serde_json::to_string_pretty(board.filtered())?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("💾 Saved {} properties to {}", board.filtered().len(), path.display());
            }
        }
        Command::Show { id } => {
            let mut board = ListingBoard::new(ctx);
            board.load().await;
            if let Some(property) = board.property_details(id).await {
                print_property(1, &property, board.is_favorite(id));
                println!("   Image: {}", property.image);
                if !property.description.is_empty() {
                    println!("   {}", property.description);
                }
            }
        }
        Command::Favorites => {
            let mut board = ListingBoard::new(ctx);
            if board.signed_in_email("see your favorites").is_none() {
                return Ok(());
            }
            board.load().await;
            if board.favorites().is_empty() {
                println!("No favorites saved yet.");
            }
            for favorite in board.favorites() {
                let title = board
                    .properties()
                    .iter()
                    .find(|p| p.id == favorite.property_id)
                    .map_or("(not on this page)", |p| p.title.as_str());
                println!("♥ {} (property {})", title, favorite.property_id);
            }
        }
        Command::Favorite { property_id } => {
            let mut board = ListingBoard::new(ctx);
            board.load().await;
            board.toggle_favorite(property_id).await;
        }
        Command::Subscribe { email } => {
            let mut form = SubscribeForm::new(ctx);
            form.submit(&email).await;
        }
        Command::Visit {
            property_id,
            date,
            time,
            contact_email,
            phone,
        } => {
            let mut board = ListingBoard::new(ctx.clone());
            board.load().await;
            let Some(property) = board.property_details(property_id).await else {
                return Ok(());
            };

            let mut scheduler = VisitScheduler::open(ctx, &property);
            scheduler.form.date = date;
            scheduler.form.time = time;
            scheduler.form.phone = phone;
            if let Some(email) = contact_email {
                scheduler.form.email = email;
            }
            info!("📅 Booking a visit to {}", scheduler.property_title());
            scheduler.submit().await;
        }
        Command::Search { query } => {
            let mut board = ListingBoard::new(ctx.clone());
            board.load().await;
            let search = SearchBar::new(ctx);
            if let Some(hits) = search.submit(&query, board.properties()) {
                for (i, property) in hits.iter().enumerate() {
                    print_property(i + 1, property, board.is_favorite(property.id));
                }
            }
        }
    }

    Ok(())
}

/// Filters typed on the command line, refusing text no listing can match
fn checked_filters(board: &ListingBoard) -> anyhow::Result<&FilterSpec> {
    board.filter_form().to_spec().context("Invalid filter")?;
    Ok(board.filter_spec())
}

fn print_property(n: usize, property: &Property, favorite: bool) {
    let heart = if favorite { " ♥" } else { "" };
    println!("{}. {} ({}){}", n, property.title, property.display_price(), heart);
    println!(
        "   {} | {} beds, {} baths, {} sq ft",
        property.status, property.bedrooms, property.bathrooms, property.area
    );
    println!("   {} ({})", property.address, property.property_type);
    println!("   ID: {}", property.id);
    println!();
}

fn print_toasts(toasts: &mut Toasts) {
    for notification in notify::drain(toasts) {
        println!("{}", notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestquest::gateway::MemoryGateway;
    use nestquest::PropertyType;
    use std::sync::Arc;

    fn board() -> ListingBoard {
        let (ctx, _toasts) = AppContext::new(Arc::new(MemoryGateway::with_sample_listings()), 20);
        ListingBoard::new(ctx)
    }

    #[test]
    fn misspelled_type_stops_the_listing() {
        let mut board = board();
        board.set_filter(FilterField::PropertyType, "House");

        let err = checked_filters(&board).unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter");
    }

    #[test]
    fn valid_filters_pass_through() {
        let mut board = board();
        board.set_filter(FilterField::PropertyType, "house");
        board.set_filter(FilterField::Bedrooms, "3");

        let spec = checked_filters(&board).unwrap();
        assert_eq!(spec.property_type, Some(PropertyType::House));
        assert_eq!(spec.bedrooms, Some(3));
    }
}
