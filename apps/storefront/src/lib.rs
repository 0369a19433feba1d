//! # Foodie Storefront Library
//!
//! Command-line consumer of the cart facade.
//!
//! ## Module Organization
//! ```text
//! foodie_storefront/
//! ├── lib.rs          ◄─── You are here (CLI parsing & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState: config + catalog + session
//! │   ├── config.rs   ◄─── StorefrontConfig (defaults, TOML, env)
//! │   └── catalog.rs  ◄─── Restaurants and menus
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command output type
//! │   ├── catalog.rs  ◄─── restaurants, menu
//! │   ├── cart.rs     ◄─── add, set, remove, clear, show
//! │   └── order.rs    ◄─── checkout, place, order show/advance/cancel
//! ├── render.rs       ◄─── Plain-text output
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! ## One Invocation
//! ```text
//! parse args ──► init tracing ──► load config ──► open cart (file store)
//!     ──► run command ──► print notices + cart ──► exit
//! ```
//! The cart file is rewritten after every change, so the next invocation
//! picks up where this one left off.

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use foodie_core::KeyValueStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{cart, catalog, order, Output, PlaceOrderRequest};
use error::{AppError, AppResult};
use state::{AppState, StorefrontConfig};

// =============================================================================
// CLI Definition
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "foodie-storefront",
    version,
    about = "Browse restaurants and manage your Foodie cart",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: platform config dir/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the cart file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List restaurants
    Restaurants,
    /// Show a restaurant's menu
    Menu { restaurant: String },
    /// Add one of a dish to the cart
    Add { menu_item: String },
    /// Remove a dish from the cart
    Remove { menu_item: String },
    /// Set a dish's quantity (0 removes it)
    Set {
        menu_item: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart
    Show,
    /// Price the cart and check the minimum order
    Checkout,
    /// Place the order and empty the cart
    Place {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "Home")]
        label: String,
        #[arg(long)]
        line1: String,
        #[arg(long)]
        line2: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        pincode: String,
    },
    /// Show or move the last placed order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum OrderAction {
    /// Show the last order
    Show,
    /// Move the last order to its next status
    Advance,
    /// Cancel the last order
    Cancel,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs the storefront CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.json;
    match execute(cli) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> AppResult<String> {
    let mut config = StorefrontConfig::load(cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    info!("Starting Foodie storefront");
    let mut state = AppState::open(config)?;
    let output = dispatch(&mut state, cli.command)?;

    if cli.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
    } else {
        Ok(render::render(&output, &state.config))
    }
}

/// Runs one command against the state.
pub fn dispatch<S: KeyValueStore>(state: &mut AppState<S>, command: Command) -> AppResult<Output> {
    debug!(?command, "Dispatching command");

    let output = match command {
        Command::Restaurants => Output::Restaurants(catalog::list_restaurants(state)),
        Command::Menu { restaurant } => Output::Menu(catalog::get_menu(state, &restaurant)?),
        Command::Add { menu_item } => Output::Cart(cart::add_to_cart(state, &menu_item)?),
        Command::Remove { menu_item } => Output::Cart(cart::remove_from_cart(state, &menu_item)),
        Command::Set {
            menu_item,
            quantity,
        } => Output::Cart(cart::update_cart_item(state, &menu_item, quantity)),
        Command::Clear => Output::Cart(cart::clear_cart(state)),
        Command::Show => Output::Cart(cart::show_cart(state)),
        Command::Checkout => Output::Checkout(order::checkout(state)),
        Command::Place {
            user,
            label,
            line1,
            line2,
            city,
            state: region,
            pincode,
        } => {
            if user.trim().is_empty() {
                return Err(AppError::validation("user is required"));
            }
            let request = PlaceOrderRequest {
                user_id: user,
                label,
                address_line1: line1,
                address_line2: line2,
                city,
                state: region,
                pincode,
            };
            Output::Order(order::place_order(state, &request)?)
        }
        Command::Order { action } => Output::Order(match action {
            OrderAction::Show => order::show_order(state)?,
            OrderAction::Advance => order::advance_order(state)?,
            OrderAction::Cancel => order::cancel_order(state)?,
        }),
    };

    Ok(output)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=foodie=trace` - Show trace for foodie crates only
/// - Default: INFO, DEBUG for foodie crates
///
/// Logs go to stderr so command output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foodie=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodie_store::FileStore;
    use crate::state::Catalog;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("foodie-storefront").chain(args.iter().copied()))
            .unwrap()
    }

    fn file_state(dir: &TempDir) -> AppState<FileStore> {
        let mut config = StorefrontConfig::default();
        config.data_dir = Some(dir.path().to_path_buf());
        AppState::open(config).unwrap()
    }

    #[test]
    fn test_parses_subcommands() {
        assert!(matches!(parse(&["show"]).command, Command::Show));
        assert!(matches!(
            parse(&["set", "m3", "-1"]).command,
            Command::Set { quantity: -1, .. }
        ));
        assert!(parse(&["--json", "add", "m1"]).json);
        assert!(Cli::try_parse_from(["foodie-storefront", "place", "--user", "u1"]).is_err());
    }

    #[test]
    fn test_cart_survives_between_invocations() {
        let dir = TempDir::new().unwrap();

        let mut first = file_state(&dir);
        dispatch(&mut first, parse(&["add", "m8"]).command).unwrap();
        dispatch(&mut first, parse(&["set", "m8", "2"]).command).unwrap();
        drop(first);

        let mut second = file_state(&dir);
        let Output::Cart(cart) = dispatch(&mut second, parse(&["show"]).command).unwrap() else {
            panic!("show returns the cart");
        };

        assert_eq!(cart.totals.total_items, 2);
        assert_eq!(cart.restaurant_name.as_deref(), Some("Pizza Paradise"));
    }

    #[test]
    fn test_place_from_command_line() {
        let dir = TempDir::new().unwrap();
        let mut state = file_state(&dir);
        dispatch(&mut state, parse(&["add", "m4"]).command).unwrap();

        let output = dispatch(
            &mut state,
            parse(&[
                "place", "--user", "u1", "--line1", "12 MG Road", "--city", "Bengaluru",
                "--state", "Karnataka", "--pincode", "560001",
            ])
            .command,
        )
        .unwrap();

        assert!(matches!(output, Output::Order(_)));
        assert!(state.session.cart().is_empty());
    }

    #[test]
    fn test_order_commands_across_invocations() {
        let dir = TempDir::new().unwrap();
        {
            let mut state = file_state(&dir);
            dispatch(&mut state, parse(&["add", "m4"]).command).unwrap();
            dispatch(
                &mut state,
                parse(&[
                    "place", "--user", "u1", "--line1", "12 MG Road", "--city", "Bengaluru",
                    "--state", "Karnataka", "--pincode", "560001",
                ])
                .command,
            )
            .unwrap();
        }

        let mut state = file_state(&dir);
        let Output::Order(response) =
            dispatch(&mut state, parse(&["order", "advance"]).command).unwrap()
        else {
            panic!("order advance returns the order");
        };
        assert_eq!(response.order.status, foodie_core::OrderStatus::Confirmed);

        dispatch(&mut state, parse(&["order", "cancel"]).command).unwrap();
        let err = dispatch(&mut state, parse(&["order", "cancel"]).command).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_json_output_shape() {
        let mut state = AppState::with_store(
            StorefrontConfig::default(),
            Catalog::builtin(),
            foodie_core::MemoryStore::new(),
        );
        let output = dispatch(&mut state, parse(&["add", "m1"]).command).unwrap();

        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["totals"]["subtotal"], 32000);
        assert_eq!(json["notices"][0]["type"], "itemAdded");
        assert_eq!(json["items"][0]["menuItem"]["name"], "Butter Chicken");
    }
}
