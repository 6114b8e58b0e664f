//! Sanitas CLI
//!
//! Sanitizes HTML from a file, an argument or stdin and writes the result to
//! stdout. Also a debugging aid for policies: `--events` shows what survives
//! filtering and `--dump-policy` prints the rules in effect.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sanitas::formatter::RawHtmlFormatter;
use sanitas::{Config, Event, FormatterRegistry, LexicalError, Sanitizer};
use sanitas_common::warning;
use sanitas_html::tokenize;
use serde_json::Value;

/// Sanitas: sanitize untrusted HTML
#[derive(Parser, Debug)]
#[command(name = "sanitas")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Sanitize a file with the default rich text policy
    sanitas description.html

    # Sanitize inline HTML
    sanitas --html '<a href="javascript:alert(1)">x</a>'

    # Read from stdin with a custom policy
    cat post.html | sanitas --policy policy.json

    # Show the filtered event stream
    sanitas --events --html '<b><i>unclosed'

    # Print the rules in effect as JSON
    sanitas --dump-policy
"#)]
struct Cli {
    /// HTML file to sanitize (stdin if omitted or `-`)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Sanitize this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Formatter to use (overrides the configuration file)
    #[arg(short, long, value_name = "NAME")]
    formatter: Option<String>,

    /// JSON configuration file: `{ "formatter": ..., "options": ... }`
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON policy file (raw-html formatter only)
    #[arg(short, long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Print the filtered event stream instead of HTML (raw-html formatter only)
    #[arg(short, long)]
    events: bool,

    /// List registered formatters and exit
    #[arg(long)]
    list_formatters: bool,

    /// Print the policy in effect and exit (raw-html formatter only)
    #[arg(long)]
    dump_policy: bool,

    /// Suppress parse warnings on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        warning::set_enabled(false);
    }

    let registry = FormatterRegistry::with_builtin();

    if cli.list_formatters {
        list_formatters(&registry)?;
        return Ok(());
    }

    let config = load_config(&cli)?;

    if cli.dump_policy {
        let formatter = raw_html_formatter(&config, "--dump-policy")?;
        println!("{}", formatter.policy().to_json_pretty()?);
        return Ok(());
    }

    if cli.events {
        let formatter = raw_html_formatter(&config, "--events")?;
        return print_events(&read_input(&cli)?, &formatter);
    }

    let markup = read_input(&cli)?;

    let formatter = config.build_formatter(&registry)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    formatter
        .translate(&markup, &mut out)
        .with_context(|| format!("{} formatter failed", formatter.name()))?;
    writeln!(out)?;
    Ok(())
}

/// Configuration from `--config`, with `--formatter` and `--policy` applied on top
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(name) = &cli.formatter {
        config.formatter.clone_from(name);
    }

    if let Some(path) = &cli.policy {
        require_raw_html(&config, "--policy")?;
        let policy = read_json(path)?;
        if config.options.is_null() {
            config.options = Value::Object(serde_json::Map::new());
        }
        let Some(options) = config.options.as_object_mut() else {
            anyhow::bail!("formatter options must be a JSON object to add a policy");
        };
        let _ = options.insert("policy".to_string(), policy);
    }

    Ok(config)
}

/// Fail unless `config` selects the raw-html formatter, the only one with a
/// policy
fn require_raw_html(config: &Config, flag: &str) -> Result<()> {
    if config.formatter != RawHtmlFormatter::NAME {
        anyhow::bail!(
            "{flag} needs the {} formatter, but {} is selected",
            RawHtmlFormatter::NAME,
            config.formatter
        );
    }
    Ok(())
}

fn raw_html_formatter(config: &Config, flag: &str) -> Result<RawHtmlFormatter> {
    require_raw_html(config, flag)?;
    Ok(RawHtmlFormatter::from_options(&config.options)?)
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Markup from `--html`, FILE or stdin
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }

    let bytes = match &cli.path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        _ => {
            let mut bytes = Vec::new();
            let _ = io::stdin()
                .read_to_end(&mut bytes)
                .context("cannot read stdin")?;
            bytes
        }
    };

    String::from_utf8(bytes).map_err(|e| {
        LexicalError::InvalidEncoding {
            valid_up_to: e.utf8_error().valid_up_to(),
        }
        .into()
    })
}

fn list_formatters(registry: &FormatterRegistry) -> Result<()> {
    for name in registry.names() {
        let formatter = registry.create(name, &Value::Null)?;
        let mode = formatter.code_mirror_mode().unwrap_or("plain textarea");
        println!(
            "{} {} {}",
            format!("{name:<10}").bold(),
            formatter.display_name(),
            format!("({mode})").dimmed()
        );
    }
    Ok(())
}

/// Print each event that survives filtering, then the parse issues
fn print_events(markup: &str, formatter: &RawHtmlFormatter) -> Result<()> {
    let mut tokenizer = tokenize(markup);
    let mut events = Vec::new();
    Sanitizer::new(formatter.policy())
        .with_max_depth(formatter.limits().max_nesting_depth)
        .run(tokenizer.by_ref(), &mut events)?;

    println!("=== Events ===");
    for event in &events {
        match event {
            Event::OpenTag { .. } => println!("{}", event.green()),
            Event::CloseTag { .. } => println!("{}", event.cyan()),
            Event::Text(_) | Event::Comment(_) => println!("{event}"),
            Event::EndOfInput => println!("{}", event.dimmed()),
        }
    }

    if !tokenizer.issues().is_empty() {
        println!("\n=== Parse Issues ===");
        for issue in tokenizer.issues() {
            println!("  - {} at byte {}", issue.kind.yellow(), issue.position);
        }
        if tokenizer.dropped_issues() > 0 {
            println!("  ... and {} more", tokenizer.dropped_issues());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sanitas::MarkupFormatter;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sanitas").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_policy_flag_needs_raw_html_formatter() {
        // Fails before the policy file is read, so it need not exist.
        let error = load_config(&cli(&["--formatter", "escaped", "--policy", "policy.json"]))
            .expect_err("escaped has no policy");
        assert_eq!(
            error.to_string(),
            "--policy needs the raw-html formatter, but escaped is selected"
        );
    }

    #[test]
    fn test_events_and_dump_policy_need_raw_html_formatter() {
        let config = load_config(&cli(&["--formatter", "escaped", "--events"]))
            .expect("no files involved");
        for flag in ["--events", "--dump-policy"] {
            let error = raw_html_formatter(&config, flag).expect_err("escaped has no policy");
            assert!(error.to_string().starts_with(flag), "{error}");
        }
    }

    #[test]
    fn test_default_formatter_has_a_policy() {
        let config = load_config(&cli(&["--dump-policy"])).expect("no files involved");
        let formatter = raw_html_formatter(&config, "--dump-policy").expect("raw-html is default");
        assert_eq!(formatter.name(), RawHtmlFormatter::NAME);
    }
}
