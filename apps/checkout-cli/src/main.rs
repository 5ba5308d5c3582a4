//! # Checkout CLI Entry Point
//!
//! ```text
//! $ checkout-cli +1 +1 +3 -3
//! Electro World
//!
//! ID  Name                 Available  Price     Qty  Total
//! 1   Wireless Headphones  5          200.00$   2    400.00$   [+] [-]
//! ...
//! Total: 400.00$
//! ```
//!
//! The actual work lives in lib.rs so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    checkout_cli::run().await
}
