use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use encoding_rs::{Encoding, UTF_8};
use tracing_subscriber::EnvFilter;

use extlinks::config::{ExtLinksConfig, SiteConfig};
use extlinks::{ExtLinks, ExtLinksResult};

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
const LOG_ENV_VAR: &str = "EXTLINKS_LOG";
const STDIN_TARGET: &str = "-";

#[derive(Parser, Debug)]
#[command(
    name = "extlinks",
    version,
    about = "Adds attributes to external links in an HTML fragment"
)]
struct Cli {
    /// HTML file to process, "-" reads from stdin
    #[arg(default_value = STDIN_TARGET)]
    target: String,

    /// Site config file (TOML) with an [extlinks] section
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Attribute to add to external links, as name=value (repeatable)
    #[arg(short = 'a', long = "attr", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Leave links containing this substring alone (repeatable)
    #[arg(short = 'x', long)]
    exclude: Vec<String>,

    /// Leave links matching this regular expression alone (repeatable)
    #[arg(short = 'X', long = "exclude-pattern")]
    exclude_patterns: Vec<String>,

    /// Match attribute names without regard to case
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Character encoding of the input, also used for the output
    #[arg(short = 'E', long)]
    encoding: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print link statistics to stderr
    #[arg(short = 's', long)]
    stats: bool,
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

fn print_error_message(text: &str) {
    eprintln!("{}{}{}", ANSI_COLOR_RED, text, ANSI_COLOR_RESET);
}

fn build_config(cli: &Cli) -> ExtLinksResult<ExtLinksConfig> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::from_file(path)?.extlinks()?,
        None => ExtLinksConfig::default(),
    };

    if !cli.attributes.is_empty() {
        let attributes = config.attributes.get_or_insert_with(Default::default);
        for (name, value) in &cli.attributes {
            attributes.insert(name.as_str(), value.as_str());
        }
    }
    config.exclude.extend(cli.exclude.iter().cloned());
    config
        .exclude_patterns
        .extend(cli.exclude_patterns.iter().cloned());
    if cli.ignore_case {
        config.case_insensitive_attributes = true;
    }

    Ok(config)
}

fn read_input(target: &str) -> io::Result<Vec<u8>> {
    if target == STDIN_TARGET {
        let mut data: Vec<u8> = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(target)
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let encoding: &'static Encoding = match &cli.encoding {
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => encoding,
            None => {
                print_error_message(&format!("Unknown encoding: {}", label));
                process::exit(1);
            }
        },
        None => UTF_8,
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            print_error_message(&format!("Error: {}", error));
            process::exit(1);
        }
    };

    let extlinks = match ExtLinks::new(&config) {
        Ok(extlinks) => extlinks,
        Err(error) => {
            print_error_message(&format!("Error: {}", error));
            process::exit(1);
        }
    };

    let data = match read_input(&cli.target) {
        Ok(data) => data,
        Err(error) => {
            print_error_message(&format!("Could not read {}: {}", cli.target, error));
            process::exit(1);
        }
    };

    let (content, _, _) = encoding.decode(&data);
    let (output, report) = extlinks.rewrite_with_report(&content);
    let (output_data, _, _) = encoding.encode(&output);

    let written = match &cli.output {
        Some(path) => fs::write(path, &output_data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output_data).and_then(|_| stdout.flush())
        }
    };
    if let Err(error) = written {
        print_error_message(&format!("Could not write output: {}", error));
        process::exit(1);
    }

    if cli.stats {
        eprintln!(
            "anchors: {}, local: {}, excluded: {}, rewritten: {}, attributes set: {}",
            report.anchors, report.local, report.excluded, report.rewritten, report.attributes_set
        );
    }
}
