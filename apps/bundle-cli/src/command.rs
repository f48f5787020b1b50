//! # Commands
//!
//! One line of input is one user interaction.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input line            UI equivalent                 Engine call        │
//! │  ──────────            ─────────────                 ───────────        │
//! │  toggle <id>           "Add to Bundle" card button   toggle             │
//! │  add <id> [qty]        (programmatic add)            add                │
//! │  remove <id>           "×" on a selected row         remove             │
//! │  inc <id>              "+" on a selected row         change_quantity +1 │
//! │  dec <id>              "−" on a selected row         change_quantity −1 │
//! │  qty <id> <delta>      (bulk adjust)                 change_quantity    │
//! │  show                  re-render                     snapshot           │
//! │  checkout              "Proceed to Checkout" button  checkout           │
//! │  help / quit                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use bundle_core::ProductId;

use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
Commands:
  toggle <id>        add or remove a product
  add <id> [qty]     add a quantity (default 1)
  remove <id>        remove a product
  inc <id>           increase quantity by one
  dec <id>           decrease quantity by one
  qty <id> <delta>   change quantity by delta
  show               show the bundle
  checkout           proceed to checkout
  help               show this help
  quit               exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(ProductId),
    Add(ProductId, u32),
    Remove(ProductId),
    ChangeQuantity(ProductId, i64),
    Show,
    Checkout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| AppError::UnknownCommand(String::new()))?
            .to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let command = match verb.as_str() {
            "toggle" => Command::Toggle(product_arg(&verb, &args)?),
            "add" => {
                let quantity = match args.get(1) {
                    Some(raw) => parse_number::<u32>(&verb, "quantity", raw)?,
                    None => 1,
                };
                Command::Add(product_arg(&verb, &args)?, quantity)
            }
            "remove" | "rm" => Command::Remove(product_arg(&verb, &args)?),
            "inc" | "+" => Command::ChangeQuantity(product_arg(&verb, &args)?, 1),
            "dec" | "-" => Command::ChangeQuantity(product_arg(&verb, &args)?, -1),
            "qty" => {
                let raw = args
                    .get(1)
                    .ok_or_else(|| AppError::invalid_argument(&verb, "missing delta"))?;
                Command::ChangeQuantity(
                    product_arg(&verb, &args)?,
                    parse_number::<i64>(&verb, "delta", raw)?,
                )
            }
            "show" => Command::Show,
            "checkout" => Command::Checkout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(AppError::UnknownCommand(verb)),
        };

        Ok(command)
    }
}

fn product_arg(verb: &str, args: &[&str]) -> AppResult<ProductId> {
    let raw = args
        .first()
        .ok_or_else(|| AppError::invalid_argument(verb, "missing product id"))?;
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    parse_number::<u32>(verb, "product id", raw).map(ProductId::new)
}

fn parse_number<T: FromStr>(verb: &str, what: &str, raw: &str) -> AppResult<T> {
    raw.parse::<T>()
        .map_err(|_| AppError::invalid_argument(verb, format!("{} '{}' is not a number", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> AppResult<Command> {
        line.parse()
    }

    #[test]
    fn test_parse_mutations() {
        let id = ProductId::new(3);
        assert_eq!(parse("toggle 3").unwrap(), Command::Toggle(id));
        assert_eq!(parse("TOGGLE #3").unwrap(), Command::Toggle(id));
        assert_eq!(parse("add 3").unwrap(), Command::Add(id, 1));
        assert_eq!(parse("add 3 4").unwrap(), Command::Add(id, 4));
        assert_eq!(parse("remove 3").unwrap(), Command::Remove(id));
        assert_eq!(parse("inc 3").unwrap(), Command::ChangeQuantity(id, 1));
        assert_eq!(parse("dec 3").unwrap(), Command::ChangeQuantity(id, -1));
        assert_eq!(parse("qty 3 -5").unwrap(), Command::ChangeQuantity(id, -5));
    }

    #[test]
    fn test_parse_queries() {
        assert_eq!(parse("show").unwrap(), Command::Show);
        assert_eq!(parse("checkout").unwrap(), Command::Checkout);
        assert_eq!(parse("  help ").unwrap(), Command::Help);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("fly 1"), Err(AppError::UnknownCommand(v)) if v == "fly"));
        assert!(matches!(parse("toggle"), Err(AppError::InvalidArgument { .. })));
        assert!(matches!(parse("toggle abc"), Err(AppError::InvalidArgument { .. })));
        assert!(matches!(parse("add 1 -2"), Err(AppError::InvalidArgument { .. })));
        assert!(matches!(parse("qty 1"), Err(AppError::InvalidArgument { .. })));
    }
}
