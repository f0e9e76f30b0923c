//! # yardlex CLI
//!
//! Tokenizes a source file with a TOML rule catalog and prints the tokens,
//! or the postfix order when `--postfix` is given.

use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yardlex::config::{build_info, RuntimeConfig};
use yardlex::pipeline::{self, PipelineError};
use yardlex::{diagnostics, logging, source, ExpressionToken, RuleCatalog, Token};
use yardlex::{log_error, log_info};

#[derive(Parser)]
#[command(name = "yardlex")]
#[command(version, about = "Rule-driven tokenizer and shunting-yard reducer", long_about = None)]
struct Args {
    /// TOML rule catalog
    rules: PathBuf,

    /// Source file to tokenize
    source: PathBuf,

    /// Print the postfix order instead of the token stream
    #[arg(long)]
    postfix: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Runtime preferences (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RuntimeConfig::default(),
    };

    if let Err(e) = logging::init_global_logging_with_preferences(config.logging.clone()) {
        eprintln!("warning: {}", e);
    }
    log_info!("yardlex starting",
        "build" => build_info::source_info(),
        "rules" => args.rules.display(),
        "source" => args.source.display()
    );

    match run(&args, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!(e.error_code(), "yardlex failed", "error" => e);
            eprint!("{}", describe(&args.source, &e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &RuntimeConfig) -> Result<String, PipelineError> {
    let rules = RuleCatalog::load(&args.rules)?.compile()?;

    if args.postfix {
        let postfix = pipeline::postfix_file(&args.source, &rules, config)?;
        Ok(if args.json {
            to_json(&postfix)
        } else {
            render_postfix(&postfix)
        })
    } else {
        let tokens = pipeline::tokenize_file(&args.source, &rules, config)?;
        Ok(if args.json {
            to_json(&tokens)
        } else {
            render_tokens(&tokens)
        })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{:<12} {:<16} {:<12} {:?}",
                token.span().to_string(),
                token.rule().name(),
                token.kind().as_str(),
                token.text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_postfix(postfix: &[ExpressionToken]) -> String {
    postfix
        .iter()
        .map(ExpressionToken::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Error text for the terminal; syntax errors get a caret diagnostic
fn describe(source_path: &Path, error: &PipelineError) -> String {
    let Some(syntax) = error.as_syntax() else {
        return format!("error[{}]: {}\n", error.error_code(), error);
    };

    let wanted = syntax.line().map_or(0, |line| line + 1);
    let lines: Vec<String> = match source::open_lines(source_path) {
        Ok(lines) => lines.checked().0.take(wanted).collect(),
        Err(_) => Vec::new(),
    };

    format!(
        "{}  = in {}\n",
        diagnostics::render(&lines, syntax),
        source_path.display()
    )
}
