mod ci;
mod commands;
mod core;
mod manifest;
mod release;

use clap::{Parser, Subcommand};
use core::error::{ZonError, print_error};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Extract name/version from build.zig.zon and check for an existing release tag
#[derive(Parser)]
#[command(name = "zon-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Manifest to read (default: build.zig.zon, or `manifest` in zon-release.toml)
  #[arg(long, global = true)]
  manifest: Option<PathBuf>,

  /// Configuration file (default: zon-release.toml discovery)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Output results in JSON format
  #[arg(long, global = true)]
  json: bool,

  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Read `.name` and `.version` from the manifest and export them
  Extract,

  /// Export name/version, then print the version unless it is already tagged
  Check {
    /// Repository to look tags up in, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,
    /// Hosting API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
    /// API token (private repositories, rate limits)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Commit being released
    #[arg(long, env = "SHA")]
    sha: Option<String>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr; stdout is reserved for command output.
/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
  let default_level = match verbose {
    0 => "zon_release=warn",
    1 => "zon_release=debug",
    _ => "zon_release=trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false),
    )
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match core::context::RunContext::build(&root, cli.config.as_deref(), cli.manifest.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Extract => commands::run_extract(&ctx, cli.json),
    Commands::Check {
      repo,
      api_url,
      token,
      sha,
    } => commands::run_check(
      &ctx,
      commands::CheckArgs {
        repo,
        api_url,
        token,
        sha,
      },
      cli.json,
    ),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ZonError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
