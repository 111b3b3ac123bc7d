//! QuickLook - Main entry point
//!
//! Parses the command line, loads configuration, sets up logging and either
//! runs the TUI or one of the headless commands.

use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use quicklook::app::{self, App};
use quicklook::cli::{Cli, Commands};
use quicklook::config_file::QuicklookConfig;
use quicklook::error::{QuicklookError, Result};
use quicklook::gateway::{Gateway, HttpGateway, SizeQuery};
use quicklook::logic::cascade::{
    Event, ProductCard, SessionState, MAX_VOLUME_SIZE, MIN_VOLUME_SIZE,
};
use quicklook::logic::sizes::{best_match, size_suffix, sort_by_rank};
use quicklook::report::{instance_summary, summary_lines, volume_summary, ProductSummary};

/// Initialize tracing.
///
/// The TUI owns stdout and stderr, so its logs go to `log_file` or nowhere.
/// Headless commands log to stderr. `RUST_LOG` overrides the `info` default.
fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if tui => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::sink)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Config file (or defaults) with command line overrides applied
fn load_config(cli: &Cli) -> Result<QuicklookConfig> {
    let mut config = match &cli.config {
        Some(path) => QuicklookConfig::load_from_file(path)
            .map_err(|e| QuicklookError::config(format!("{e:#}")))?,
        None => QuicklookConfig::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    config
        .validate()
        .map_err(|e| QuicklookError::config(format!("{e:#}")))?;
    Ok(config)
}

fn build_gateway(config: &QuicklookConfig) -> Result<Arc<dyn Gateway>> {
    let gateway = HttpGateway::new(
        &config.endpoint,
        &config.sizes_path,
        config.request_timeout(),
    )?;
    Ok(Arc::new(gateway))
}

/// Main application entry point
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.log_file.as_deref(), tui)?;
    info!("QuickLook starting up");
    debug!("CLI arguments: {:?}", cli);

    match &cli.command {
        Some(Commands::Validate { config }) => {
            info!("Validating configuration file: {:?}", config);
            let loaded = QuicklookConfig::load_from_file(config).and_then(|c| {
                c.validate()?;
                Ok(c)
            });
            match loaded {
                Ok(_) => println!("✓ Configuration file is valid: {}", config.display()),
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::InitConfig { path }) => {
            QuicklookConfig::default()
                .save_to_file(path)
                .map_err(|e| QuicklookError::config(format!("{e:#}")))?;
            println!("✓ Wrote default configuration to {}", path.display());
        }
        Some(Commands::Lookup {
            region,
            instance_type,
            op,
            volume_type,
            volume_size,
        }) => {
            let config = load_config(&cli)?;
            let gateway = build_gateway(&config)?;
            let mut session = SessionState::new(config.to_session_defaults());
            let selection = &mut session.selection;
            if let Some(region) = region {
                selection.region = region.clone();
            }
            selection.size = instance_type.clone();
            selection.operation = match op {
                Some(op) => op.clone(),
                None => operation_for_platform(gateway.as_ref(), &config.default_platform)?,
            };
            if let Some(volume_type) = volume_type {
                selection.volume_type = volume_type.clone();
            }
            if let Some(size) = *volume_size {
                if !(MIN_VOLUME_SIZE..=MAX_VOLUME_SIZE).contains(&size) {
                    return Err(QuicklookError::validation(format!(
                        "Volume size must be between {MIN_VOLUME_SIZE} and {MAX_VOLUME_SIZE} GiB"
                    ))
                    .into());
                }
                session.apply(Event::VolumeSizeChanged(size));
            }
            if !run_lookup(gateway.as_ref(), &mut session) {
                error!("Lookup returned no price");
                std::process::exit(1);
            }
        }
        Some(Commands::Sizes {
            region,
            arch,
            family,
            previous,
        }) => {
            let config = load_config(&cli)?;
            let gateway = build_gateway(&config)?;
            let query = SizeQuery {
                region: region.clone().unwrap_or(config.default_region.clone()),
                architecture: arch.unwrap_or(config.default_architecture),
                family: family.clone(),
            };
            print_sizes(gateway.as_ref(), &query, previous.as_deref())?;
        }
        None | Some(Commands::Tui) => {
            let config = load_config(&cli)?;
            info!("Launching TUI against {}", config.endpoint);
            run_tui(&config)?;
        }
    }

    Ok(())
}

/// Run the interactive client
fn run_tui(config: &QuicklookConfig) -> Result<()> {
    debug!("Initializing terminal for TUI mode");
    let gateway = build_gateway(config)?;

    enable_raw_mode()
        .map_err(|e| QuicklookError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        QuicklookError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| QuicklookError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            let mut app = App::new(gateway, config.to_session_defaults(), &config.endpoint);
            app.run(&mut terminal)
                .map_err(|e| QuicklookError::terminal(e.to_string()))
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}

/// Operation code of the first operation for `platform`
fn operation_for_platform(gateway: &dyn Gateway, platform: &str) -> Result<String> {
    gateway
        .operations()?
        .into_iter()
        .find(|o| o.platform == platform)
        .map(|o| o.operation)
        .ok_or_else(|| {
            QuicklookError::validation(format!(
                "No operation for platform {platform:?}; pass --op"
            ))
        })
}

/// Run both lookups synchronously and print each card.
///
/// Returns false when neither card came back priced.
fn run_lookup(gateway: &dyn Gateway, session: &mut SessionState) -> bool {
    let effects = session.apply(Event::QuickLookRequested);
    if effects.is_empty() {
        eprintln!("✗ Nothing to look up");
        return false;
    }
    for effect in effects {
        let event = app::execute(gateway, effect);
        session.apply(event);
    }

    let instance = session
        .instance
        .product
        .as_ref()
        .map(|p| instance_summary(p, None));
    print_card("Instance", &session.instance, instance.as_ref());
    println!();
    let volume = session.volume.product.as_ref().map(volume_summary);
    print_card("EBS Volume", &session.volume, volume.as_ref());

    session.any_priced()
}

fn print_card(
    title: &str,
    card: &ProductCard,
    summary: Option<&ProductSummary>,
) {
    if let Some(feedback) = &card.feedback {
        eprintln!("✗ {title}: {feedback}");
    }
    if let Some(summary) = summary {
        for line in summary_lines(title, summary) {
            println!("{line}");
        }
    }
}

/// Print rank-sorted sizes, marking the one a family switch would select
fn print_sizes(gateway: &dyn Gateway, query: &SizeQuery, previous: Option<&str>) -> Result<()> {
    let mut sizes = gateway.sizes(query)?;
    if sizes.is_empty() {
        println!(
            "\"{}\" is not supported in {} for {}.",
            query.family, query.region, query.architecture
        );
        return Ok(());
    }
    sort_by_rank(&mut sizes);

    let carried = previous.and_then(size_suffix);
    let best = best_match(&sizes, carried);
    for size in &sizes {
        let marker = match best {
            Some((chosen, rule)) if chosen.instance_type == size.instance_type => {
                format!("  <- {rule:?}")
            }
            _ => String::new(),
        };
        println!("{}{}", size.instance_type, marker);
    }
    Ok(())
}
