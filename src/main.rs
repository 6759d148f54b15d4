use clap::{Parser, Subcommand};
use site_upkeep::config::{self, UpkeepConfig};
use site_upkeep::imaging::{CompressionLevel, RustBackend};
use site_upkeep::{compress, extract, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-upkeep")]
#[command(about = "Maintenance jobs for a personal site")]
#[command(long_about = "\
Maintenance jobs for a personal site

  compress   Re-encode every <root>/<dir>/main.png as main-min.png
  extract    Append front-matter records from <source>/*.mdx to the JSON index

Defaults come from site-upkeep.toml in the working directory, if present.
Run 'site-upkeep gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress main.png thumbnails into main-min.png siblings
    Compress {
        /// Directory whose subdirectories hold thumbnails
        #[arg(long)]
        root: Option<PathBuf>,
        /// PNG compression effort, 0-9
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
        level: Option<u8>,
    },
    /// Append front-matter records to the JSON index
    Extract {
        /// Directory holding the documents
        #[arg(long)]
        source: Option<PathBuf>,
        /// JSON index file to append to
        #[arg(long)]
        index: Option<PathBuf>,
    },
    /// Show what compress and extract would do, without writing anything
    Check,
    /// Print a stock site-upkeep.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compress { root, level } => {
            let mut config = load(&cli.config)?;
            if let Some(root) = root {
                config.compress.root = root;
            }
            if let Some(level) = level {
                config.compress.level = level;
            }
            let c = &config.compress;
            println!("==> Compressing thumbnails in {}", c.root.display());
            let report = compress::compress(
                &RustBackend::new(),
                &c.root,
                &c.source_name,
                CompressionLevel::new(c.level),
            )?;
            output::print_compress_output(&report, &c.root);
        }
        Command::Extract { source, index } => {
            let mut config = load(&cli.config)?;
            if let Some(source) = source {
                config.extract.source_dir = source;
            }
            if let Some(index) = index {
                config.extract.index = index;
            }
            let e = &config.extract;
            println!("==> Extracting metadata from {}", e.source_dir.display());
            let report = extract::extract(e)?;
            output::print_extract_output(&report, &e.index);
        }
        Command::Check => {
            let config = load(&cli.config)?;
            let scan = compress::scan_thumbnails(&config.compress.root, &config.compress.source_name)?;
            let records = extract::collect_records(&config.extract)?;
            extract::load_index(&config.extract.index)?;
            output::print_check_output(&scan, &config.compress.root, &records);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load(path: &std::path::Path) -> Result<UpkeepConfig, config::ConfigError> {
    let config = config::load_config(path)?;
    log::debug!("resolved config: {:?}", config);
    Ok(config)
}
