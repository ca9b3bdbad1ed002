use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use storefront::process::{OutputManifest, ProcessEvent};
use storefront::{config, generate, output, process, scan};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that run the process stage.
#[derive(clap::Args, Clone)]
struct DraftArgs {
    /// Render posts marked `draft: true`
    #[arg(long)]
    drafts: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Static site generator for small-business websites")]
#[command(long_about = "\
Static site generator for small-business websites

Business data lives in JSON files, team bios and blog posts in markdown
with YAML frontmatter. Everything is validated before a single page is
written.

Content structure:

  content/
  ├── config.toml                  # Business identity, SEO, hours, build settings
  ├── assets/                      # Copied verbatim to the output root
  ├── data/
  │   ├── homepage.json            # Hero, features, stats, testimonials, FAQ
  │   ├── pages.json               # Listing titles, taxonomy templates
  │   ├── services.json            # Optional
  │   └── locations.json           # Optional
  ├── team/
  │   └── jane-doe.md              # Team member (id: jane-doe)
  └── blog/
      ├── hello-world.md           # Post (id: hello-world)
      └── 2024/
          └── launch-day.mdx       # Post (id: 2024/launch-day)

Post authors refer to team member ids. Drafts are skipped unless --drafts
is passed or blog.include_drafts is set.

Run 'storefront gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate manifests
    #[arg(long, default_value = ".storefront-temp", global = true)]
    temp_dir: PathBuf,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate content and write the scan manifest
    Scan,
    /// Render markdown, reading times and related posts
    Process(DraftArgs),
    /// Produce the final HTML site, feed and sitemap
    Generate,
    /// Run the full pipeline: scan → process → generate
    Build(DraftArgs),
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storefront={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(source = %cli.source.display(), output = %cli.output.display(), "starting");

    let scan_manifest_path = cli.temp_dir.join("manifest.json");
    let processed_dir = cli.temp_dir.join("processed");
    let processed_manifest_path = processed_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_json(&scan_manifest_path, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Process(args) => {
            let result = run_process(&scan_manifest_path, args.drafts)?;
            write_json(&processed_manifest_path, &result)?;
        }
        Command::Generate => {
            let report = generate::generate(&processed_manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build(args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_json(&scan_manifest_path, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Processing content");
            let result = run_process(&scan_manifest_path, args.drafts)?;
            write_json(&processed_manifest_path, &result)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&processed_manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the process stage with a printer thread streaming progress lines.
fn run_process(
    scan_manifest_path: &Path,
    include_drafts: bool,
) -> Result<OutputManifest, Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel::<ProcessEvent>();
    let printer: JoinHandle<()> = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(scan_manifest_path, include_drafts, Some(tx))?;
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    Ok(result)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
