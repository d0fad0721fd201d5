//! Command-line entry point for the resume exporter.
//!
//! Usage:
//!
//! ```text
//! resume-export        # automatic bypass
//! resume-export 2      # manual bypass
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use resume_export::export::{self, Mode};

// ============================================================================
// Constants
// ============================================================================

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "resume_export=info";

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        return ExitCode::SUCCESS;
    }
    if let Some(flag) = args.iter().skip(1).find(|a| a.starts_with('-')) {
        eprintln!("Unknown option: {flag}");
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    println!("Choose bypass method:");
    println!("1. Automatic bypass (default)");
    println!("2. Manual bypass (recommended for Cloudflare)");

    let mode = Mode::from_arg(args.get(1).map(String::as_str));

    match export::run(mode).await {
        Ok(()) => {
            println!("{} completed", mode.label());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n[ERROR] {e}");
            if e.is_blocked() {
                print_blocked_tips();
            }
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Initializes tracing with `RUST_LOG` or the default filter.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();
}

/// Prints invocation help.
fn print_usage(program: &str) {
    println!("Usage: {program} [MODE]");
    println!();
    println!("Modes:");
    println!("  1    Automatic bypass (default)");
    println!("  2    Manual bypass (recommended for Cloudflare)");
    println!();
    println!("Environment:");
    println!("  CHROME     Path to the Chromium binary");
    println!("  RUST_LOG   Log filter (default: {DEFAULT_LOG_FILTER})");
}

/// Recovery advice printed when bot protection is the suspected cause.
fn print_blocked_tips() {
    eprintln!();
    eprintln!("Cloudflare Protection Tips:");
    eprintln!("1. Try running the script multiple times");
    eprintln!("2. Use a VPN or different IP address");
    eprintln!("3. Wait a few minutes between attempts");
    eprintln!("4. The browser window will stay open - you can manually solve any challenges");
}
