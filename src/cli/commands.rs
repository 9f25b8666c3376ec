use crate::path::{compile, PathPattern};
use crate::runtime_config::RouterConfig;
use crate::server::sanitize_path;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for routewerk
#[derive(Parser, Debug)]
#[command(name = "routewerk")]
#[command(about = "Path pattern tools for the routewerk router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Pattern and compile options shared by `compile` and `match`
#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// Path template, e.g. `/users/:id(\d+)`
    pub pattern: String,

    /// Treat `/a` and `/a/` as different paths
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Match every path starting with the template
    #[arg(long, default_value_t = false)]
    pub prefix: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PatternArgs {
    fn compile(&self) -> Result<PathPattern> {
        compile(&self.pattern, self.strict, self.prefix)
            .with_context(|| format!("Failed to compile pattern {}", self.pattern))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the matcher a pattern compiles to
    Compile {
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// Match a path against a pattern and print the extracted parameters
    Match {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Request path; sanitized the same way dispatch does
        path: String,
    },
    /// Print the effective router configuration
    Config {
        /// TOML config file; the environment is used when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CompileReport<'a> {
    pattern: &'a str,
    matcher: String,
    regex: Option<&'a str>,
    params: Vec<&'a str>,
}

impl<'a> CompileReport<'a> {
    fn new(pattern: &'a PathPattern) -> Self {
        Self {
            pattern: pattern.source(),
            matcher: pattern.matcher().kind().to_string(),
            regex: pattern.matcher().regex().map(|regex| regex.as_str()),
            params: pattern.param_names().iter().map(|name| name.as_ref()).collect(),
        }
    }
}

#[derive(Serialize)]
struct ParamReport {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    pattern: &'a str,
    path: String,
    matched: bool,
    params: Vec<ParamReport>,
}

/// Run a parsed command, writing its output to `out`
///
/// Returns `Ok(false)` when `match` finds no match, so the binary can exit
/// with a failure status.
///
/// # Errors
///
/// Returns an error if the pattern does not compile, the config file cannot
/// be read, or writing to `out` fails.
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    match &cli.command {
        Commands::Compile { pattern } => {
            let compiled = pattern.compile()?;
            let report = CompileReport::new(&compiled);
            match pattern.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
                OutputFormat::Text => {
                    writeln!(out, "pattern: {}", report.pattern)?;
                    writeln!(out, "matcher: {}", report.matcher)?;
                    if let Some(regex) = report.regex {
                        writeln!(out, "regex:   {regex}")?;
                    }
                    writeln!(out, "params:  {}", report.params.join(", "))?;
                }
            }
            Ok(true)
        }
        Commands::Match { pattern, path } => {
            let compiled = pattern.compile()?;
            let path = sanitize_path(path);
            let matched = compiled.is_match(&path);
            let params = compiled
                .extract_params(&path)
                .into_iter()
                .map(|(name, value)| ParamReport {
                    name: name.to_string(),
                    value,
                })
                .collect();
            let report = MatchReport {
                pattern: compiled.source(),
                path,
                matched,
                params,
            };
            match pattern.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
                OutputFormat::Text if !report.matched => {
                    writeln!(out, "no match: {} {}", report.pattern, report.path)?;
                }
                OutputFormat::Text => {
                    writeln!(out, "match: {} {}", report.pattern, report.path)?;
                    for param in &report.params {
                        writeln!(out, "  {} = {}", param.name, param.value)?;
                    }
                }
            }
            Ok(matched)
        }
        Commands::Config { file } => {
            let config = match file {
                Some(path) => RouterConfig::load(path)?,
                None => RouterConfig::from_env(),
            };
            let rendered = toml::to_string(&config).context("Failed to render configuration")?;
            write!(out, "{rendered}")?;
            Ok(true)
        }
    }
}
