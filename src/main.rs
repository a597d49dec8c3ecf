use clap::{Parser, Subcommand};
use nikki::{config, generate, markup, output, scan, types};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "nikki")]
#[command(about = "Turn a folder of markdown notes into one vertical-writing page")]
#[command(long_about = "\
Turn a folder of markdown notes into one vertical-writing page

Every .md file in the source directory becomes a block of vertical text.
Blocks are ordered by file name and read right to left; the page opens at
the first document and scrolls horizontally.

Source structure:

  docs/
  ├── config.toml        # Optional site config
  ├── 001.md             # Rightmost block
  ├── 002.md
  └── 003-rainy-day.md   # Leftmost block

Supported markup: # headings, **bold**, *italic*, `code`, ``` fences,
> quotes, - and 1. list items. Lines are joined into paragraphs without
spaces; a blank line starts a new paragraph.

Run 'nikki gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing the markdown documents
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "index.html", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".nikki-temp", global = true)]
    temp_dir: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the source directory into a manifest
    Scan,
    /// Render the page from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate the source directory without writing anything
    Check,
    /// Print the HTML for a single markdown file
    Convert {
        /// Markdown file to convert
        file: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest = generate::load_manifest(&cli.temp_dir.join("manifest.json"))?;
            generate::write_page(&manifest, &cli.output)?;
            output::print_generate_output(&manifest, &cli.output);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!();
            println!("==> Stage 2: Generating {}", cli.output.display());
            generate::generate(&manifest_path, &cli.output)?;
            output::print_generate_output(&manifest, &cli.output);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Convert { file } => {
            let text = types::normalize_newlines(&std::fs::read_to_string(&file)?);
            println!("{}", markup::transform(&text));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix with `convert` or
/// `gen-config` output. `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Write the scan manifest as pretty JSON and return its path.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
