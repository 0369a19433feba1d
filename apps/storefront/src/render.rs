//! # Text Output
//!
//! Plain-text rendering of command output. `--json` bypasses this module.

use std::fmt::Write;

use chrono::Local;
use foodie_core::{Notice, NoticeLevel, Rejection};

use crate::commands::{CartResponse, CheckoutResponse, MenuResponse, OrderResponse, Output};
use crate::state::StorefrontConfig;

/// Renders command output for a terminal.
pub fn render(output: &Output, config: &StorefrontConfig) -> String {
    let mut out = String::new();

    match output {
        Output::Restaurants(restaurants) => {
            for r in restaurants {
                let _ = writeln!(
                    out,
                    "{:>3}  {:<24} {:<28} ★{:.1}  {:<10} min {}{}",
                    r.id,
                    r.name,
                    r.cuisine.join(", "),
                    r.rating,
                    r.delivery_time,
                    config.format_currency(r.min_order),
                    if r.is_open { "" } else { "  (closed)" },
                );
            }
        }
        Output::Menu(menu) => render_menu(&mut out, menu, config),
        Output::Cart(cart) => render_cart(&mut out, cart, config),
        Output::Checkout(checkout) => render_checkout(&mut out, checkout, config),
        Output::Order(order) => render_order(&mut out, order, config),
    }

    out
}

fn render_notices(out: &mut String, notices: &[Notice], config: &StorefrontConfig) {
    for notice in notices {
        let marker = match notice.level() {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "i",
            NoticeLevel::Error => "✗",
        };
        let _ = writeln!(out, "{} {}", marker, notice_text(notice, config));
    }
}

/// Notice text with amounts in the configured currency.
fn notice_text(notice: &Notice, config: &StorefrontConfig) -> String {
    match notice {
        Notice::Rejected {
            reason: Rejection::BelowMinimumOrder { minimum, shortfall },
        } => format!(
            "Minimum order amount is {}. Add {} more to proceed.",
            config.format_currency(*minimum),
            config.format_currency(*shortfall)
        ),
        other => other.to_string(),
    }
}

fn render_menu(out: &mut String, menu: &MenuResponse, config: &StorefrontConfig) {
    let _ = writeln!(
        out,
        "{} ({}){}",
        menu.restaurant.name,
        menu.restaurant.delivery_time,
        if menu.restaurant.is_open { "" } else { " - closed" }
    );

    for item in &menu.items {
        let mut tags = Vec::new();
        if item.is_best_seller() {
            tags.push("best seller");
        }
        if item.is_popular() {
            tags.push("popular");
        }

        let _ = writeln!(
            out,
            "  {:<4} {} {:<24} {:>10}  {}",
            item.id,
            if item.is_veg { "●" } else { "▲" },
            item.name,
            config.format_currency(item.price),
            tags.join(", "),
        );
    }
}

fn render_cart(out: &mut String, cart: &CartResponse, config: &StorefrontConfig) {
    render_notices(out, &cart.notices, config);

    let Some(restaurant) = &cart.restaurant_name else {
        out.push_str("Your cart is empty\n");
        return;
    };

    let _ = writeln!(out, "Cart from {} ({} items)", restaurant, cart.totals.total_items);
    for line in &cart.items {
        let _ = writeln!(
            out,
            "  {:<4} {:<24} x{:<3} {:>10}",
            line.menu_item.id,
            line.menu_item.name,
            line.quantity,
            config.format_currency(line.line_total()),
        );
    }
    let _ = writeln!(out, "  Subtotal {:>38}", config.format_currency(cart.totals.subtotal));
}

fn render_checkout(out: &mut String, checkout: &CheckoutResponse, config: &StorefrontConfig) {
    render_notices(out, &checkout.notices, config);

    let s = &checkout.summary;
    let _ = writeln!(out, "Subtotal      {:>12}", config.format_currency(s.subtotal));
    let _ = writeln!(out, "Delivery fee  {:>12}", config.format_currency(s.delivery_fee));
    let _ = writeln!(out, "Taxes         {:>12}", config.format_currency(s.tax));
    let _ = writeln!(out, "Total         {:>12}", config.format_currency(s.total));

    if !s.restaurant_open {
        out.push_str("Restaurant is currently closed\n");
    }
    if checkout.can_place_order {
        out.push_str("Ready to place order\n");
    }
}

fn render_order(out: &mut String, response: &OrderResponse, config: &StorefrontConfig) {
    render_notices(out, &response.notices, config);

    let order = &response.order;
    let _ = writeln!(out, "Order {} from {}", order.id, order.restaurant_name);
    let _ = writeln!(out, "  Status     {}", order.status);
    let _ = writeln!(out, "  Total      {}", config.format_currency(order.total_amount));
    let _ = writeln!(
        out,
        "  Arriving   {}",
        order.estimated_delivery.with_timezone(&Local).format("%H:%M")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, clear_cart};
    use crate::commands::order::checkout;
    use crate::state::{AppState, Catalog};
    use foodie_core::MemoryStore;

    fn state() -> AppState<MemoryStore> {
        AppState::with_store(
            StorefrontConfig::default(),
            Catalog::builtin(),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_render_cart_with_notice() {
        let mut state = state();
        let response = add_to_cart(&mut state, "m1").unwrap();

        let text = render(&Output::Cart(response), &state.config);

        assert!(text.starts_with("✓ Butter Chicken added to cart"));
        assert!(text.contains("Cart from The Spice Garden (1 items)"));
        assert!(text.contains("₹320.00"));
    }

    #[test]
    fn test_render_empty_cart() {
        let mut state = state();
        let response = clear_cart(&mut state);

        let text = render(&Output::Cart(response), &state.config);

        assert!(text.contains("Cart cleared"));
        assert!(text.ends_with("Your cart is empty\n"));
    }

    #[test]
    fn test_shortfall_notice_uses_configured_symbol() {
        let mut config = StorefrontConfig::default();
        config.currency_symbol = "$".to_string();
        let mut state = AppState::with_store(config, Catalog::builtin(), MemoryStore::new());
        add_to_cart(&mut state, "m3").unwrap();

        let response = checkout(&mut state);
        let text = render(&Output::Checkout(response), &state.config);

        assert!(text.contains("Minimum order amount is $150.00. Add $90.00 more to proceed."));
        assert!(!text.contains('₹'));
    }

    #[test]
    fn test_render_restaurants_marks_closed() {
        let state = state();
        let output = Output::Restaurants(state.catalog.restaurants.clone());

        let text = render(&output, &state.config);

        assert!(text.lines().any(|l| l.contains("Mediterranean Delights") && l.ends_with("(closed)")));
    }
}
