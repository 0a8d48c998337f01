//! Look up localized text from the command line.
//!
//! Usage:
//!   lang-lookup <language> <key.path>   # Print the text for a dotted key path
//!   lang-lookup <language> --dump       # Print every key path and its text
//!   lang-lookup --list                  # Print available languages
//!
//! Optional environment variables:
//! - I18N_PATH (defaults to i18n)
//! - I18N_DEFAULT_LANGUAGE (defaults to ru)
//! - RUST_LOG

use anyhow::{bail, Context, Result};
use lang_lookup::config::Config;
use lang_lookup::i18n::{LanguageRegistry, Lookup};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lang_lookup=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || matches!(args[1].as_str(), "--help" | "-h" | "help") {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let registry = LanguageRegistry::load(&config.i18n_path)
        .with_context(|| format!("Failed to load languages from {}", config.i18n_path))?
        .with_default_language(config.default_language.as_str());

    if !registry.is_available(registry.default_language()) {
        bail!(
            "Default language \"{}\" has no {}/{}.json",
            registry.default_language(),
            config.i18n_path,
            registry.default_language()
        );
    }

    run(&registry, &args[1..])
}

/// Dispatch one command against a loaded registry.
fn run(registry: &LanguageRegistry, args: &[String]) -> Result<()> {
    if args[0] == "--list" {
        for code in registry.available() {
            println!("{}", code);
        }
        return Ok(());
    }

    let language = registry.language(Some(args[0].as_str()));
    match args.get(1).map(String::as_str) {
        Some("--dump") => {
            info!("Dumping language \"{}\"", language.code());
            for (path, text) in language.dictionary().leaves() {
                println!("{} = {}", path.join("."), text);
            }
        }
        Some(path) => match language.path(path) {
            Lookup::Node(section) => {
                for key in section.keys() {
                    println!("{}", key);
                }
            }
            lookup => println!("{}", lookup),
        },
        None => {
            print_usage();
            bail!("Missing key path");
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Usage:");
    println!("  lang-lookup <language> <key.path>   Print the text for a dotted key path");
    println!("  lang-lookup <language> --dump       Print every key path and its text");
    println!("  lang-lookup --list                  Print available languages");
}
