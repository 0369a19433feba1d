//! # Foodie Storefront Entry Point
//!
//! ```text
//! $ foodie-storefront menu 1
//! $ foodie-storefront add m1
//! $ foodie-storefront set m3 2
//! $ foodie-storefront checkout
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    foodie_storefront::run()
}
