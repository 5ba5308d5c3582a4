//! # Command Line
//!
//! ```text
//! checkout-cli [--products PATH] [--json] [ACTION...]
//!
//!   ACTION   +ID  order one more unit of product ID
//!            -ID  take one unit of product ID off the order
//! ```
//!
//! Actions are applied left to right after the catalog has loaded.

use std::path::PathBuf;

use checkout_core::ProductId;
use clap::Parser;

use crate::error::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(
    name = "checkout-cli",
    about = "Order products from a catalog and print the checkout table",
    version
)]
pub struct Args {
    /// Product JSON file (overrides CHECKOUT_PRODUCTS_PATH)
    #[arg(long, value_name = "PATH")]
    pub products: Option<PathBuf>,

    /// Print the checkout view as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Quantity changes: +ID or -ID
    #[arg(value_name = "ACTION", allow_hyphen_values = true)]
    pub actions: Vec<String>,
}

impl Args {
    /// Parses every action, failing on the first malformed one.
    pub fn parsed_actions(&self) -> AppResult<Vec<Action>> {
        self.actions.iter().map(|a| Action::parse(a)).collect()
    }
}

/// One quantity change requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Increment(ProductId),
    Decrement(ProductId),
}

impl Action {
    /// Parses `+ID` or `-ID`. The id is everything after the sign.
    pub fn parse(text: &str) -> AppResult<Action> {
        let invalid = || AppError::InvalidAction(text.to_string());

        let mut chars = text.chars();
        let sign = chars.next().ok_or_else(invalid)?;
        let id = chars.as_str().trim();
        if id.is_empty() {
            return Err(invalid());
        }

        match sign {
            '+' => Ok(Action::Increment(ProductId::new(id))),
            '-' => Ok(Action::Decrement(ProductId::new(id))),
            _ => Err(invalid()),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        match self {
            Action::Increment(id) | Action::Decrement(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(Action::parse("+1").unwrap(), Action::Increment(ProductId::new("1")));
        assert_eq!(Action::parse("-42").unwrap(), Action::Decrement(ProductId::new("42")));
        assert_eq!(
            Action::parse("+usb-c").unwrap().product_id(),
            &ProductId::new("usb-c")
        );
    }

    #[test]
    fn test_parse_action_rejects_malformed() {
        for bad in ["", "+", "-", "+  ", "1", "*1", "é1"] {
            assert!(
                matches!(Action::parse(bad), Err(AppError::InvalidAction(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["checkout-cli", "--products", "p.json", "+1", "+1", "-2"]).unwrap();
        assert_eq!(args.products, Some(PathBuf::from("p.json")));
        assert!(!args.json);
        assert_eq!(
            args.parsed_actions().unwrap(),
            vec![
                Action::Increment(ProductId::new("1")),
                Action::Increment(ProductId::new("1")),
                Action::Decrement(ProductId::new("2")),
            ]
        );
    }

    #[test]
    fn test_args_after_separator() {
        let args = Args::try_parse_from(["checkout-cli", "--json", "--", "-3"]).unwrap();
        assert!(args.json);
        assert_eq!(args.parsed_actions().unwrap(), vec![Action::Decrement(ProductId::new("3"))]);
    }

    #[test]
    fn test_args_bad_action() {
        let args = Args::try_parse_from(["checkout-cli", "+1", "x2"]).unwrap();
        assert!(matches!(args.parsed_actions(), Err(AppError::InvalidAction(s)) if s == "x2"));
    }
}
