use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use rackfinder::constraints::RawFilters;
use rackfinder::gate::AdmissionGate;
use rackfinder::service::{self, ApiResponse};
use rackfinder::word_store::WordStore;

/// Package version plus the git revision captured at build time.
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Rackfinder word-matching query tool
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Path to the wordlist file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_wordlist.txt")
    )]
    wordlist: String,

    /// Rack tiles: letters a-z, '?' for a blank (e.g. "crate?")
    #[arg(short, long, default_value = "")]
    rack: String,

    /// Only words starting with this prefix
    #[arg(long, default_value = "")]
    start: String,

    /// Only words ending with this suffix
    #[arg(long, default_value = "")]
    end: String,

    /// Only words containing this substring
    #[arg(long, default_value = "")]
    contains: String,

    /// Pin a 1-based position (repeatable; paired with --letter by order)
    #[arg(long = "pos")]
    positions: Vec<usize>,

    /// Letter for the matching --pos (repeatable)
    #[arg(long = "letter")]
    letters: Vec<String>,

    /// Maximum number of concurrently admitted searches
    #[arg(long, default_value_t = AdmissionGate::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

/// Entry point of the Rackfinder CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("RACKFINDER_DEBUG").is_ok();
    rackfinder::log::init_logger(debug_enabled);

    log::info!("Starting rackfinder");

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            // Print the error to stderr, with detailed formatting if it's ours
            if let Some(finder_err) = e.downcast_ref::<rackfinder::errors::FinderError>() {
                eprintln!("Error: {}", finder_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Core application logic for the Rackfinder CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the shared word store (first use populates it from disk).
/// 3. Run the request through the admission gate and the engine.
/// 4. Print the JSON response on stdout.
/// 5. Print performance metrics (timings, counts) on stderr.
///
/// Every outcome is answered with a JSON payload on stdout, error payloads
/// included; the exit code reflects which kind it was. Errors that prevent
/// even a payload (bad JSON encoding) bubble up to [`main`].
fn try_main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let raw = RawFilters {
        rack: cli.rack,
        starts_with: cli.start,
        ends_with: cli.end,
        contains: cli.contains,
        positions: cli.positions,
        letters: cli.letters,
    };
    let gate = AdmissionGate::new(cli.capacity);

    // 1. Load the dictionary (a no-op on every call after the first)
    let t_load = Instant::now();
    let store = match WordStore::shared(&cli.wordlist) {
        Ok(store) => store,
        Err(e) => {
            // Scripted callers read the JSON interface, so the failure is
            // reported there too before bubbling up.
            println!("{}", serde_json::to_string(&ApiResponse::from_error(&e))?);
            return Err(e.into());
        }
    };
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Answer the request
    let t_search = Instant::now();
    let response = service::handle_request(store, &gate, &raw);
    let search_secs = t_search.elapsed().as_secs_f64();

    // 3. JSON response on stdout
    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    // 4. Diagnostics on stderr
    match &response {
        ApiResponse::Success { results } => {
            let total: usize = results.values().map(Vec::len).sum();
            eprintln!(
                "Loaded {} entries in {load_secs:.3}s; matched {total} words in {} length groups in {search_secs:.3}s.",
                store.count(),
                results.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        ApiResponse::Failure { error } => {
            eprintln!("Request failed: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}
