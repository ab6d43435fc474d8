//! # Commands
//!
//! One line of input becomes one [`Command`], which is run against the
//! session by [`execute`].
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Command Flow                                       │
//! │                                                                         │
//! │  "add usb hub 3"                                                       │
//! │        │                                                                │
//! │        ▼  Command::from_str                                            │
//! │  Command::Add { name: "usb hub", quantity: 3 }                         │
//! │        │                                                                │
//! │        ▼  execute(&mut session, command)                               │
//! │  session.add_to_cart("usb hub", 3)                                     │
//! │        │                                                                │
//! │        ├── Ok  ──► Reply::Message("Added 3 USB Hub to the cart. ...")  │
//! │        └── Err ──► Reply::Message("Not enough quantity ...")           │
//! │                    (cart unchanged, loop continues)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::str::FromStr;

use shopcart_core::validation::parse_quantity;
use shopcart_core::{DiscountKind, DiscountOutcome, Session};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Usage text printed by `help` and at startup.
pub const HELP: &str = "\
Commands:
  products                            list available products
  add <product> <quantity>            add a product to the cart
  update <product> <quantity>         set the quantity of a cart line
  remove <product>                    remove a product from the cart
  cart                                show the cart and the total bill
  eligible                            list buy one get one free products
  discount <percentage|bogo>          apply a discount
  change-discount <percentage|bogo>   change the discount
  help                                show this text
  exit                                leave";

// =============================================================================
// Command
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Add { name: String, quantity: u32 },
    Update { name: String, quantity: u32 },
    Remove { name: String },
    Cart,
    Eligible,
    Discount(DiscountKind),
    ChangeDiscount(DiscountKind),
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| CliError::InvalidCommand("empty input".into()))?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        match verb.as_str() {
            "products" | "list" => no_args(&verb, &args, Command::Products),
            "add" => {
                let (name, quantity) = name_and_quantity(&verb, &args)?;
                Ok(Command::Add { name, quantity })
            }
            "update" => {
                let (name, quantity) = name_and_quantity(&verb, &args)?;
                Ok(Command::Update { name, quantity })
            }
            "remove" => {
                if args.is_empty() {
                    return Err(CliError::InvalidCommand("usage: remove <product>".into()));
                }
                Ok(Command::Remove {
                    name: args.join(" "),
                })
            }
            "cart" => no_args(&verb, &args, Command::Cart),
            "eligible" => no_args(&verb, &args, Command::Eligible),
            "discount" => Ok(Command::Discount(discount_kind(&verb, &args)?)),
            "change-discount" => Ok(Command::ChangeDiscount(discount_kind(&verb, &args)?)),
            "help" | "?" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(CliError::InvalidCommand(format!("unknown command '{}'", other))),
        }
    }
}

fn no_args(verb: &str, args: &[&str], command: Command) -> CliResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CliError::InvalidCommand(format!("{} takes no arguments", verb)))
    }
}

/// Product names may contain spaces, so the quantity is the last word.
fn name_and_quantity(verb: &str, args: &[&str]) -> CliResult<(String, u32)> {
    match args.split_last() {
        Some((quantity, name)) if !name.is_empty() => {
            Ok((name.join(" "), parse_quantity(quantity)?))
        }
        _ => Err(CliError::InvalidCommand(format!(
            "usage: {} <product> <quantity>",
            verb
        ))),
    }
}

fn discount_kind(verb: &str, args: &[&str]) -> CliResult<DiscountKind> {
    match args {
        [kind] => Ok(kind.parse()?),
        _ => Err(CliError::InvalidCommand(format!(
            "usage: {} <percentage|bogo>",
            verb
        ))),
    }
}

// =============================================================================
// Execution
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and read the next command.
    Message(String),
    /// Leave the loop.
    Exit,
}

/// Runs one command. Refusals become messages; the session is unchanged
/// when a command is refused.
pub fn execute(session: &mut Session, command: Command) -> Reply {
    match run(session, command) {
        Ok(reply) => reply,
        Err(e) => {
            info!(error = %e, "Command refused");
            Reply::Message(e.to_string())
        }
    }
}

fn run(session: &mut Session, command: Command) -> CliResult<Reply> {
    let text = match command {
        Command::Products => {
            debug!("products command");
            list_products(session)
        }
        Command::Add { name, quantity } => {
            debug!(product = %name, quantity, "add command");
            let item = session.add_to_cart(&name, quantity)?;
            format!(
                "Added {} {} to the cart. You now have {}.",
                quantity,
                item.product().name(),
                item.quantity()
            )
        }
        Command::Update { name, quantity } => {
            debug!(product = %name, quantity, "update command");
            let item = session.update_quantity(&name, quantity)?;
            format!(
                "Updated {} to a quantity of {}.",
                item.product().name(),
                item.quantity()
            )
        }
        Command::Remove { name } => {
            debug!(product = %name, "remove command");
            match session.remove_from_cart(&name) {
                Some(item) => format!("Removed {} from the cart.", item.product().name()),
                None => format!("{} was not in the cart.", name),
            }
        }
        Command::Cart => {
            debug!("cart command");
            session.cart_report().to_string()
        }
        Command::Eligible => {
            debug!("eligible command");
            session.eligible_report().to_string()
        }
        Command::Discount(kind) => {
            debug!(%kind, "discount command");
            describe_outcome(session.apply_discount(kind)?)
        }
        Command::ChangeDiscount(kind) => {
            debug!(%kind, "change-discount command");
            describe_outcome(session.change_discount(kind)?)
        }
        Command::Help => HELP.to_string(),
        Command::Exit => {
            debug!("exit command");
            return Ok(Reply::Exit);
        }
    };

    Ok(Reply::Message(text))
}

fn list_products(session: &Session) -> String {
    let mut out = String::from("Available Products:");
    for product in session.products() {
        let _ = write!(out, "\n{}", product);
    }
    out
}

fn describe_outcome(outcome: DiscountOutcome) -> String {
    info!(outcome = ?outcome, kind = %outcome.strategy().kind(), "Discount set");
    match outcome {
        DiscountOutcome::Applied(strategy) => {
            format!("Discount applied successfully: {}.", strategy)
        }
        DiscountOutcome::Changed(strategy) => {
            format!("Discount type changed successfully: {}.", strategy)
        }
        DiscountOutcome::FellBackToPercentage(strategy) => format!(
            "No products eligible for Buy One Get One Free Discount. Applied {} instead.",
            strategy
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::{Catalog, Money, Percentage};

    fn message(session: &mut Session, line: &str) -> String {
        let command: Command = line.parse().unwrap();
        match execute(session, command) {
            Reply::Message(text) => text,
            Reply::Exit => panic!("unexpected exit for {line}"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("products".parse::<Command>().unwrap(), Command::Products);
        assert_eq!("  CART ".parse::<Command>().unwrap(), Command::Cart);
        assert_eq!(
            "add Laptop 3".parse::<Command>().unwrap(),
            Command::Add {
                name: "Laptop".to_string(),
                quantity: 3
            }
        );
        assert_eq!(
            "update usb   hub 2".parse::<Command>().unwrap(),
            Command::Update {
                name: "usb hub".to_string(),
                quantity: 2
            }
        );
        assert_eq!(
            "remove Noise Cancelling Headphones".parse::<Command>().unwrap(),
            Command::Remove {
                name: "Noise Cancelling Headphones".to_string()
            }
        );
        assert_eq!(
            "discount bogo".parse::<Command>().unwrap(),
            Command::Discount(DiscountKind::BuyOneGetOneFree)
        );
        assert_eq!(
            "change-discount percentage".parse::<Command>().unwrap(),
            Command::ChangeDiscount(DiscountKind::Percentage)
        );
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "fly".parse::<Command>(),
            Err(CliError::InvalidCommand(_))
        ));
        assert!(matches!(
            "add Laptop".parse::<Command>(),
            Err(CliError::InvalidCommand(_))
        ));
        assert!(matches!(
            "add Laptop many".parse::<Command>(),
            Err(CliError::Validation(_))
        ));
        assert!(matches!(
            "add 3".parse::<Command>(),
            Err(CliError::InvalidCommand(_))
        ));
        assert!(matches!(
            "add Laptop 0".parse::<Command>(),
            Err(CliError::Validation(_))
        ));
        assert!(matches!(
            "update Laptop -2".parse::<Command>(),
            Err(CliError::Validation(_))
        ));
        assert!(matches!(
            "discount half".parse::<Command>(),
            Err(CliError::Validation(_))
        ));
        assert!(matches!(
            "cart now".parse::<Command>(),
            Err(CliError::InvalidCommand(_))
        ));
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_add_and_show_cart() {
        let mut session = Session::demo();
        assert_eq!(
            message(&mut session, "add headphones 4"),
            "Added 4 Headphones to the cart. You now have 4."
        );
        assert_eq!(
            message(&mut session, "add Laptop 2"),
            "Added 2 Laptop to the cart. You now have 2."
        );

        let report = message(&mut session, "cart");
        assert!(report.contains("You have 4 Headphones, 2 Laptop in your cart."));
        assert!(report.contains("Your total bill is $2200.00."));
    }

    #[test]
    fn test_refusals_are_reported() {
        let mut session = Session::new(Catalog::demo(0), Percentage::from_whole(5));
        assert_eq!(
            message(&mut session, "add Phone 1"),
            "Invalid product name: Phone"
        );
        assert_eq!(
            message(&mut session, "add Laptop 1"),
            "Not enough quantity available for Laptop. Available quantity: 0"
        );
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_only_needs_some_stock() {
        let mut session = Session::demo();
        assert_eq!(
            message(&mut session, "add Laptop 11"),
            "Added 11 Laptop to the cart. You now have 11."
        );
        assert_eq!(session.cart().item("Laptop").unwrap().quantity(), 11);
    }

    #[test]
    fn test_update_and_remove() {
        let mut session = Session::demo();
        message(&mut session, "add Laptop 3");

        assert_eq!(
            message(&mut session, "update laptop 5"),
            "Updated Laptop to a quantity of 5."
        );
        assert_eq!(
            message(&mut session, "remove LAPTOP"),
            "Removed Laptop from the cart."
        );
        assert_eq!(
            message(&mut session, "remove Laptop"),
            "Laptop was not in the cart."
        );
    }

    #[test]
    fn test_discount_flow() {
        let mut session = Session::demo();
        message(&mut session, "add Laptop 2");

        assert_eq!(
            message(&mut session, "discount percentage"),
            "Discount applied successfully: 5% off."
        );
        assert_eq!(session.total(), Money::from_major(1900));

        assert_eq!(
            message(&mut session, "discount bogo"),
            "Discount is already applied. Use change-discount to switch it."
        );
        assert_eq!(
            message(&mut session, "change-discount bogo"),
            "Discount type changed successfully: buy one get one free."
        );
        assert_eq!(
            message(&mut session, "change-discount percentage"),
            "Cannot change discount type. Buy One Get One Free discount is already applied."
        );
    }

    #[test]
    fn test_change_discount_fallback() {
        let mut session = Session::new(Catalog::demo(10), Percentage::from_whole(5));
        assert_eq!(
            message(&mut session, "change-discount bogo"),
            "No products eligible for Buy One Get One Free Discount. Applied 5% off instead."
        );
    }

    #[test]
    fn test_change_discount_fallback_when_discount_active() {
        let mut session = Session::new(Catalog::demo(10), Percentage::from_whole(5));
        message(&mut session, "discount percentage");

        assert_eq!(
            message(&mut session, "change-discount bogo"),
            "No products eligible for Buy One Get One Free Discount. \
             Discount is already applied. Use change-discount to switch it."
        );
    }

    #[test]
    fn test_products_and_eligible() {
        let mut session = Session::demo();
        let listing = message(&mut session, "products");
        assert!(listing.starts_with("Available Products:\n"));
        assert!(listing.contains("{name: \"Headphones\", price: $50.00, available true}"));

        let eligible = message(&mut session, "eligible");
        assert!(eligible.contains("Laptop"));
        assert!(!eligible.contains("Headphones"));
    }

    #[test]
    fn test_exit() {
        let mut session = Session::demo();
        assert_eq!(execute(&mut session, Command::Exit), Reply::Exit);
    }
}
