//! Command-line front end for tintex.
//!
//! Usage:
//!   tintex convert `<input>` [-o `<output>`]           - Color every block of an intermediate document
//!   tintex snippet --code `<text>` | --file `<path>`   - Color one snippet into the cache
//!   tintex style `<name>`                              - Print the macro definitions of a style

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tintex_config::Config;
use tintex_engine::io::{Encoding, read_source};
use tintex_engine::style::{self, wrap_style};
use tintex_engine::{ContentCache, Converter, Extractor, OptionSet, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "tintex")]
#[command(version, about = "Colored code snippets for TeX documents")]
struct Cli {
    /// Config file to use instead of ~/.config/tintex/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct CacheArgs {
    /// Directory for rendered artifacts
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Render everything again, overwriting cached artifacts
    #[arg(long)]
    no_cache: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Color every tagged block of an intermediate document
    Convert {
        /// Intermediate document with tagged blocks
        input: PathBuf,

        /// Where to write the macro definitions (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document-level options, e.g. "lang=python,linenos"
        #[arg(long, default_value = "")]
        options: String,

        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Color a single snippet and print the typesetter callback
    Snippet {
        /// Source text of the snippet
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        code: Option<String>,

        /// File holding the source text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Snippet options, e.g. "lang=c,escapeinside=!$"
        #[arg(long, default_value = "")]
        options: String,

        /// Typeset inline instead of as a display block
        #[arg(long)]
        inline: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Print the macro definitions of a color style
    Style {
        /// Style name, e.g. "default" or "bw"
        name: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let clean = match cli.command {
        Command::Convert {
            input,
            output,
            options,
            cache,
        } => run_convert(&config, &input, output.as_deref(), &options, &cache)?,
        Command::Snippet {
            code,
            file,
            options,
            inline,
            cache,
        } => {
            let callback = run_snippet(&config, code, file.as_deref(), &options, inline, &cache)?;
            println!("<<<<<?TEX:{callback}>>>>>");
            true
        }
        Command::Style { name } => {
            let Some(style) = style::lookup(&name) else {
                let known: Vec<&str> = style::names().collect();
                bail!("Unknown style '{name}' (available: {})", known.join(", "));
            };
            print!("{}", wrap_style(style));
            true
        }
    };

    if !clean {
        process::exit(1);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            let config_path = Config::config_path();
            log::debug!("Config path: {}", config_path.display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Config defaults first, then the command-line option string.
fn baseline_options(config: &Config, overrides: &str) -> OptionSet {
    let pairs = config.default_pairs();
    OptionSet::default()
        .with_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
        .with_overrides(overrides)
}

fn open_cache(config: &Config, args: &CacheArgs) -> ContentCache {
    let dir = args
        .cache_dir
        .clone()
        .unwrap_or_else(|| config.cache_dir.clone());
    ContentCache::new(dir, config.cache && !args.no_cache)
}

/// Returns whether the document converted without diagnostics.
fn run_convert(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
    options: &str,
    cache: &CacheArgs,
) -> Result<bool> {
    let document = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let base_dir = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let converter = Converter::new(
        baseline_options(config, options),
        Extractor::new(config.tag.clone()),
        open_cache(config, cache),
        base_dir,
    );
    let report = converter.convert(&document);

    for diagnostic in &report.diagnostics {
        log::error!("{}: {diagnostic}", input.display());
    }
    log::info!(
        "{} blocks rendered, {} reused from {}",
        report.rendered,
        report.reused,
        converter.cache().dir().display()
    );

    match output {
        Some(path) => std::fs::write(path, &report.output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", report.output),
    }

    Ok(report.is_clean())
}

/// Returns the typesetter callback for the rendered snippet.
fn run_snippet(
    config: &Config,
    code: Option<String>,
    file: Option<&Path>,
    options: &str,
    inline: bool,
    cache: &CacheArgs,
) -> Result<String> {
    let mode = if inline {
        OutputMode::Inline
    } else {
        OutputMode::Display
    };
    let options = baseline_options(config, options).with_mode(mode);

    let text = match (code, file) {
        (Some(code), _) => code,
        (None, Some(path)) => read_source(path, Encoding::from_label(&options.encoding)?)?,
        (None, None) => bail!("Either --code or --file is required"),
    };

    let base_dir = file
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let converter = Converter::new(
        options.clone(),
        Extractor::new(config.tag.clone()),
        open_cache(config, cache),
        base_dir,
    );
    let outcome = converter.snippet(&text, &options)?;
    log::debug!("Shown line numbers: {:?}", outcome.shown_numbers);

    Ok(outcome.callback())
}
