use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modgen_platform::Target;

mod cmd;
mod output;

use output::OutputFormat;

/// modgen - generate ordered install scripts from module definitions
#[derive(Parser)]
#[command(name = "modgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate install scripts for a target OS
  Generate {
    /// Target operating system (debian, arch, fedora, macos)
    #[arg(short, long, value_parser = parse_target)]
    target: Target,

    /// Directory to search for module files
    #[arg(short, long, default_value = "./")]
    path: PathBuf,

    /// Module to include (repeatable; default: all modules for the target)
    #[arg(short, long = "module")]
    modules: Vec<String>,

    /// Directory to write scripts and staged files into
    #[arg(short, long, default_value = "./build/")]
    output: PathBuf,

    /// Also pack the output directory into <NAME>.tar.gz
    #[arg(long, value_name = "NAME")]
    tar: Option<String>,
  },

  /// List discovered modules
  List {
    /// Directory to search for module files
    #[arg(short, long, default_value = "./")]
    path: PathBuf,

    /// Only show modules supporting this target
    #[arg(short, long, value_parser = parse_target)]
    target: Option<Target>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// Show the supported targets and their package commands
  Targets {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },
}

fn parse_target(s: &str) -> Result<Target, String> {
  s.parse().map_err(|e: modgen_platform::PlatformError| e.to_string())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Generate {
      target,
      path,
      modules,
      output,
      tar,
    } => cmd::cmd_generate(target, &path, &modules, &output, tar.as_deref()),
    Commands::List { path, target, format } => cmd::cmd_list(&path, target, format),
    Commands::Targets { format } => cmd::cmd_targets(format),
  };

  if let Err(err) = result {
    output::print_error(&format!("{err:#}"));
    std::process::exit(1);
  }
}
