use clap::Parser;
use owo_colors::{OwoColorize, Style};
use repeat_core::error::CoreError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod timezone;
mod views;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, falling back to defaults");
        config::Config::default()
    });

    let tz = match timezone::validate_timezone(&config.timezone) {
        Ok(tz) => tz,
        Err(e) => {
            handle_error(e.into());
            std::process::exit(1);
        }
    };

    let ctx = commands::Context {
        today: timezone::today_in(tz),
        format: cli.format.unwrap_or(config.output),
    };
    debug!(timezone = %tz, today = %ctx.today, format = ?ctx.format, "resolved context");

    let result = match cli.command {
        cli::Commands::Next(command) => commands::next::show_next(command, &ctx),
        cli::Commands::Done(command) => commands::done::complete_task(command, &ctx),
        cli::Commands::Schedule(command) => commands::schedule::schedule_task(command, &ctx),
        cli::Commands::Check(command) => commands::check::check_rule(command, &ctx),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::InvalidRule(s)) => {
            eprintln!("{} Invalid rule: {}", "Error:".style(error_style), s);
            eprintln!("Rules look like 'd3', 'y', 'w1,3' or 'm15,-1 2,8'.");
        }
        Some(CoreError::InvalidRuleParameter(s)) => {
            eprintln!(
                "{} Invalid rule parameter: {}",
                "Error:".style(error_style),
                s.yellow()
            );
        }
        Some(CoreError::InvalidDate(s)) => {
            eprintln!("{} Invalid date: {}", "Error:".style(error_style), s);
            eprintln!("Dates look like '20240131', '31.01.2024' or 'tomorrow'.");
        }
        _ => eprintln!("{} {}", "Error:".style(error_style), err),
    }
}
