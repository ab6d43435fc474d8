//! # shopcart-cli: Console Driver
//!
//! Reads one command per line from stdin, runs it against a single
//! [`Session`] and prints the result on stdout.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      shopcart startup                                   │
//! │                                                                         │
//! │  1. parse_args()        --config <path>, --print-config, --help        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. init_tracing()      RUST_LOG or "warn,shopcart=info", to stderr    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. CartConfig::load()  defaults → shopcart.toml → SHOPCART_* env      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  4. build_session()     catalog + buy one get one registry             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  5. run_session()       prompt → parse → execute → print, until exit   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so they never interleave with reports on stdout.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use shopcart_core::Session;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{execute, Command, Reply};
pub use config::CartConfig;
pub use error::{CliError, CliResult};

const USAGE: &str = "\
Usage: shopcart [OPTIONS]

Options:
  -c, --config <PATH>  Config file (default: platform config dir/shopcart.toml)
      --print-config   Print the effective configuration and exit
  -h, --help           Show this help message";

// =============================================================================
// Arguments
// =============================================================================

/// Parsed process arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub print_config: bool,
    pub help: bool,
}

/// Parses arguments, not including the program name.
pub fn parse_args<I>(args: I) -> CliResult<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("{} needs a path\n\n{}", arg, USAGE)))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--print-config" => parsed.print_config = true,
            "--help" | "-h" => parsed.help = true,
            other => {
                return Err(CliError::Usage(format!(
                    "unknown argument '{}'\n\n{}",
                    other, USAGE
                )))
            }
        }
    }

    Ok(parsed)
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs the program. Errors returned here are startup failures.
pub fn run<I>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = String>,
{
    let args = parse_args(args)?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let config_path = args.config.clone().or_else(CartConfig::default_config_path);
    let config = CartConfig::load(args.config)?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut session = config.build_session()?;
    info!(
        session_id = %session.id(),
        config_path = ?config_path,
        products = session.products().len(),
        "Starting shopcart session"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())
}

/// The interactive loop. Returns when the input ends or on `exit`.
pub fn run_session<R, W>(session: &mut Session, mut input: R, mut output: W) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", commands::HELP)?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match trimmed.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(input = %trimmed, error = %e, "Rejected input");
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        match execute(session, command) {
            Reply::Message(text) => writeln!(output, "{}", text)?,
            Reply::Exit => {
                writeln!(output, "Exiting the program. Thank you!")?;
                break;
            }
        }
    }

    info!(
        session_id = %session.id(),
        started_at = %session.cart().created_at(),
        total = %session.total(),
        "Session ended"
    );
    Ok(())
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,shopcart=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn transcript(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        run_session(session, Cursor::new(input.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), Args::default());

        let parsed = parse_args(args(&["-c", "/tmp/cart.toml", "--print-config"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/cart.toml")));
        assert!(parsed.print_config);
        assert!(!parsed.help);

        assert!(parse_args(args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(
            parse_args(args(&["--config"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(args(&["--verbose"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_session_transcript() {
        let mut session = Session::demo();
        let out = transcript(
            &mut session,
            "add laptop 4\nadd Headphones 4\n\ndiscount bogo\ncart\nexit\nadd Laptop 1\n",
        );

        assert!(out.starts_with("Commands:"));
        assert!(out.contains("Discount applied successfully: buy one get one free."));
        assert!(out.contains("Cart Items: You have 4 Headphones, 4 Laptop in your cart."));
        assert!(out.contains("Total Bill: Your total bill is $2200.00."));
        assert!(out.contains("Exiting the program. Thank you!"));

        // Nothing after exit is read
        assert_eq!(session.cart().item("Laptop").unwrap().quantity(), 4);
    }

    #[test]
    fn test_bad_input_keeps_looping() {
        let mut session = Session::demo();
        let out = transcript(&mut session, "dance\nadd Laptop zero\nadd Laptop 1\n");

        assert!(out.contains("Invalid command: unknown command 'dance'."));
        assert!(out.contains("Invalid input: quantity has invalid format"));
        assert!(out.contains("Added 1 Laptop to the cart."));
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let mut session = Session::demo();
        let out = transcript(&mut session, "");
        assert!(!out.contains("Exiting"));
        assert!(session.cart().is_empty());
    }
}
