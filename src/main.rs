use biascript::{config, generate, output, post::PostReport, scan};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "biascript")]
#[command(about = "Translator and static site builder for BIAScript blog posts")]
#[command(long_about = "\
Translator and static site builder for BIAScript blog posts

Posts are plain text files named <id>-script.txt, kept next to their images.
The first three lines are the title, date, and card description; the fourth is
ignored; the rest is the BIAScript body.

Content structure:

  content/
  ├── config.toml                      # Site config (optional)
  ├── instructions/
  │   ├── schedule_info.txt            # Agenda status (homepage banner)
  │   └── feedbacks.txt                # Testimonials: quote / author blocks
  └── data/
      ├── posts-blog/
      │   └── 1-blog/
      │       ├── 1-script.txt         # Post script
      │       ├── 1-thumbnail-blog.webp
      │       └── 01.webp              # Body images
      └── posts-portfolio/
          └── 1-portfolio/
              ├── 1-info.txt           # Title / subtitle / post id
              └── 1-thumbnail-portfolio.webp

Post ids 'index', 'blog' and 'portfolio' are rejected: those pages are
generated by the site itself.

Body tags:
  <title>..</title>         heading
  <txt>..</txt>             paragraph
  <carousel>a, b, c</carousel>   image carousel
  <img>a</img>, <img>a, b</img>  single or side-by-side images
  <link=label>URL</link>, <link>URL</link>

Run 'biascript gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML fragment for one BIAScript body file
    Translate {
        /// File containing BIAScript markup
        file: PathBuf,
        /// Asset base path prefixed to image filenames
        #[arg(long, default_value = ".")]
        assets: String,
    },
    /// Parse every post and print what its body renders to
    Check {
        /// Print the inventory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the whole site into the output directory
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Translate { file, assets } => {
            let site_config = config::load_config(&cli.source)?;
            let markup = std::fs::read_to_string(&file)?;
            let html = generate::render_fragment(&markup, &assets, site_config.markup.img_tag);
            println!("{}", html);
        }
        Command::Check { json } => {
            if !json {
                println!("==> Checking {}", cli.source.display());
            }
            let manifest = scan::scan(&cli.source)?;
            init_thread_pool(&manifest.config.processing);
            let img_tag = manifest.config.markup.img_tag;
            let reports: Vec<PostReport> = manifest
                .posts
                .par_iter()
                .map(|post| post.inspect(img_tag))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                output::print_scan_output(&manifest);
                println!();
                output::print_check_output(&reports);
                println!("==> Content is valid");
            }
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Generating HTML \u{2192} {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let summary = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
