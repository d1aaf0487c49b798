// SendForge CLI - headless send-flow operations

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};

use sendforge_cli::exit_codes::{
    EXIT_BAD_AMOUNT, EXIT_ERROR, EXIT_INVALID_ADDRESS, EXIT_NO_PRICE, EXIT_SUCCESS, EXIT_USAGE,
};
use sendforge_cli::session::SendSession;
use sendforge_config::Settings;
use sendforge_core::{ChainFamily, Field};
use sendforge_engine::address::{AddressCheck, InteractionIntent};
use sendforge_engine::input::KeyInput;
use sendforge_engine::state::AuthorityMode;
use sendforge_engine::{amount, display};
use sendforge_feed::FeedClient;

#[derive(Parser)]
#[command(name = "sforge")]
#[command(about = "SendForge send flow (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Amount is fiat; derive the asset side
    Fiat,
    /// Amount is asset units; derive the fiat side
    Asset,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between fiat and asset units
    #[command(after_help = "\
Examples:
  sforge quote 100 --chain eth --price 2250.50
  sforge quote 0.5 --from asset --chain btc
  sforge quote 25 --chain sol --endpoint http://localhost:8787")]
    Quote {
        /// Amount text, exactly as it would be typed into the field
        amount: String,

        /// Which side the amount is on
        #[arg(long, value_enum, default_value = "fiat")]
        from: Direction,

        /// Chain family (ethereum/solana/bitcoin, or a ticker)
        #[arg(long)]
        chain: Option<String>,

        /// Price override; skips the feed entirely
        #[arg(long)]
        price: Option<f64>,

        /// Feed endpoint override
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Show the gas/fee estimate for a chain
    Gas {
        /// Chain family (ethereum/solana/bitcoin, or a ticker)
        chain: String,

        /// Feed endpoint override
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Structurally validate a recipient address
    CheckAddress {
        address: String,

        /// Chain family the address should belong to
        #[arg(long)]
        chain: String,

        /// Emit the check as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive send-flow session
    Repl {
        /// Chain family to start with (defaults to settings)
        #[arg(long)]
        chain: Option<String>,

        /// Fixed price; skips the feed (offline mode)
        #[arg(long)]
        price: Option<f64>,

        /// Feed endpoint override
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load();

    let code = match cli.command {
        Commands::Quote { amount, from, chain, price, endpoint } => {
            cmd_quote(&settings, &amount, from, chain.as_deref(), price, endpoint.as_deref())
        }
        Commands::Gas { chain, endpoint } => cmd_gas(&settings, &chain, endpoint.as_deref()),
        Commands::CheckAddress { address, chain, json } => {
            cmd_check_address(&address, &chain, json)
        }
        Commands::Repl { chain, price, endpoint } => {
            cmd_repl(&settings, chain.as_deref(), price, endpoint.as_deref())
        }
    };
    ExitCode::from(code)
}

fn resolve_chain(settings: &Settings, arg: Option<&str>) -> Result<ChainFamily, u8> {
    match arg {
        Some(name) => ChainFamily::parse(name).ok_or_else(|| {
            eprintln!("Unknown chain '{}'. Options: ethereum, solana, bitcoin", name);
            EXIT_USAGE
        }),
        None => settings.default_chain.ok_or_else(|| {
            eprintln!("No chain given and no send.defaultChain configured");
            EXIT_USAGE
        }),
    }
}

fn feed_client(settings: &Settings, endpoint: Option<&str>) -> FeedClient {
    let base = endpoint.unwrap_or(&settings.feed_endpoint);
    FeedClient::new(base, Duration::from_secs(settings.feed_timeout_secs))
}

fn resolve_price(
    settings: &Settings,
    chain: ChainFamily,
    price: Option<f64>,
    endpoint: Option<&str>,
) -> Result<f64, u8> {
    if let Some(p) = price {
        return Ok(p);
    }
    match feed_client(settings, endpoint).fetch_asset_price_usd(chain.native_symbol()) {
        Some(p) => Ok(p),
        None => {
            eprintln!("No price available for {} (feed unreachable?)", chain.native_symbol());
            Err(EXIT_NO_PRICE)
        }
    }
}

fn cmd_quote(
    settings: &Settings,
    amount_text: &str,
    from: Direction,
    chain_arg: Option<&str>,
    price_arg: Option<f64>,
    endpoint: Option<&str>,
) -> u8 {
    let chain = match resolve_chain(settings, chain_arg) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let price = match resolve_price(settings, chain, price_arg, endpoint) {
        Ok(p) => p,
        Err(code) => return code,
    };

    match from {
        Direction::Fiat => {
            match amount::derive_from_fiat(amount_text, price, Some(chain)) {
                Some(asset) => {
                    println!(
                        "{} {} = {} {}",
                        display::format_fiat(amount::parse(amount_text).unwrap_or(0.0)),
                        settings.fiat_currency,
                        display::format_amount(asset),
                        chain.native_symbol()
                    );
                    EXIT_SUCCESS
                }
                None => {
                    eprintln!("Cannot convert '{}' at price {}", amount_text, price);
                    EXIT_BAD_AMOUNT
                }
            }
        }
        Direction::Asset => {
            match amount::derive_from_asset(amount_text, price) {
                Some(fiat) => {
                    println!(
                        "{} {} = {} {}",
                        display::format_amount(amount::parse(amount_text).unwrap_or(0.0)),
                        chain.native_symbol(),
                        display::format_fiat(fiat),
                        settings.fiat_currency
                    );
                    EXIT_SUCCESS
                }
                None => {
                    eprintln!("Cannot convert '{}' at price {}", amount_text, price);
                    EXIT_BAD_AMOUNT
                }
            }
        }
    }
}

fn cmd_gas(settings: &Settings, chain_arg: &str, endpoint: Option<&str>) -> u8 {
    let chain = match resolve_chain(settings, Some(chain_arg)) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match feed_client(settings, endpoint).fetch_gas_estimate(chain) {
        Some(estimate) => {
            println!("{}: {} {}", chain, estimate.price, estimate.unit);
            EXIT_SUCCESS
        }
        None => {
            eprintln!("No gas estimate available for {}", chain);
            EXIT_NO_PRICE
        }
    }
}

fn cmd_check_address(address: &str, chain_arg: &str, json: bool) -> u8 {
    let chain = match ChainFamily::parse(chain_arg) {
        Some(c) => c,
        None => {
            eprintln!("Unknown chain '{}'", chain_arg);
            return EXIT_USAGE;
        }
    };
    let check = AddressCheck::evaluate(address, Some(chain), Some(chain.native_symbol()));
    if json {
        let body = serde_json::json!({
            "present": check.present,
            "structurally_valid": check.structurally_valid,
            "chain_supported": check.chain_supported,
            "chain_asset_match": check.chain_asset_match,
        });
        println!("{}", body);
    } else {
        println!("present:            {}", check.present);
        println!("structurally_valid: {}", check.structurally_valid);
        println!("chain_supported:    {}", check.chain_supported);
        println!("chain_asset_match:  {}", check.chain_asset_match);
    }
    if check.structurally_valid {
        EXIT_SUCCESS
    } else {
        EXIT_INVALID_ADDRESS
    }
}

const REPL_HELP: &str = "\
Commands:
  address <addr>     set the recipient address
  chain <name>       select chain family (ethereum/solana/bitcoin)
  mode fiat|asset    set which field is authoritative
  toggle             toggle authority
  fiat <text>        type into the fiat field
  asset <text>       type into the asset field
  key <field> <k>    single key: a char, backspace, delete (clears), enter, paste
  focus fiat|asset   focus a field (click)
  blur               blur both fields
  price <n>          inject a price snapshot (offline)
  fetch              fetch the price from the feed
  show               print the session state
  reset              back to the neutral entry state
  help               this text
  quit               exit";

fn cmd_repl(
    settings: &Settings,
    chain_arg: Option<&str>,
    price: Option<f64>,
    endpoint: Option<&str>,
) -> u8 {
    let mut session = SendSession::new(settings);
    if let Some(name) = chain_arg {
        match ChainFamily::parse(name) {
            Some(chain) => session.select_chain(chain),
            None => {
                eprintln!("Unknown chain '{}'", name);
                return EXIT_USAGE;
            }
        }
    }
    let feed = feed_client(settings, endpoint);
    if let Some(p) = price {
        session.set_price(p);
    } else {
        session.refresh_price(&feed);
    }

    println!("SendForge send flow. 'help' for commands.");
    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        print!("> ");
        if out.flush().is_err() {
            return EXIT_ERROR;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return EXIT_SUCCESS, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("stdin error: {}", e);
                return EXIT_ERROR;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match command {
            "quit" | "exit" => return EXIT_SUCCESS,
            "help" => println!("{}", REPL_HELP),
            "show" => println!("{}", session.render()),
            "reset" => session.reset(),
            "address" => session.set_address(rest),
            "chain" => match ChainFamily::parse(rest) {
                Some(chain) => session.select_chain(chain),
                None => eprintln!("Unknown chain '{}'", rest),
            },
            "mode" => match rest {
                "fiat" => session.set_mode(AuthorityMode::Fiat),
                "asset" => session.set_mode(AuthorityMode::Asset),
                _ => eprintln!("mode fiat|asset"),
            },
            "toggle" => session.toggle_mode(),
            "fiat" => session.type_text(Field::Fiat, rest, Instant::now()),
            "asset" => session.type_text(Field::Asset, rest, Instant::now()),
            "key" => repl_key(&mut session, rest),
            "focus" => {
                let field = match rest {
                    "fiat" => Some(Field::Fiat),
                    "asset" => Some(Field::Asset),
                    _ => None,
                };
                match field {
                    Some(f) => {
                        session.focus(f, InteractionIntent::Click);
                    }
                    None => eprintln!("focus fiat|asset"),
                }
            }
            "blur" => session.blur(),
            "price" => match rest.parse::<f64>() {
                Ok(p) => session.set_price(p),
                Err(_) => eprintln!("price <number>"),
            },
            "fetch" => session.refresh_price(&feed),
            _ => eprintln!("Unknown command '{}'. Try 'help'.", command),
        }
        for notice in session.drain_notices() {
            println!("! {}", notice);
        }
    }
}

fn repl_key(session: &mut SendSession, rest: &str) {
    let (field_name, key_name) = match rest.split_once(' ') {
        Some((f, k)) => (f, k.trim()),
        None => {
            eprintln!("key <fiat|asset> <k>");
            return;
        }
    };
    let field = match field_name {
        "fiat" => Field::Fiat,
        "asset" => Field::Asset,
        _ => {
            eprintln!("key <fiat|asset> <k>");
            return;
        }
    };
    let key = match key_name {
        "backspace" => KeyInput::Backspace,
        "delete" => KeyInput::Delete,
        "enter" => KeyInput::Enter,
        "paste" => KeyInput::Paste,
        "copy" => KeyInput::Copy,
        "tab" => KeyInput::Tab,
        k if k.chars().count() == 1 => {
            let Some(c) = k.chars().next() else { return };
            KeyInput::Char(c)
        }
        _ => {
            eprintln!("Unknown key '{}'", key_name);
            return;
        }
    };
    session.press_key(field, key, Instant::now());
}
