use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use photoprint_core::paper::{MAX_DPI, MIN_PREVIEW_HEIGHT, MIN_PREVIEW_WIDTH};
use photoprint_core::{LayoutMode, OrientationPolicy, PaperSize, PrintQuality};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod print;

#[derive(Parser)]
#[command(name = "photoprint", about = "Preview and print photos on photo paper", version)]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file to use instead of the per-user one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the print canvas and where the photo goes on it, as JSON
    Layout {
        /// Photo file (JPEG or PNG)
        image: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Render the on-screen preview for a widget of the given size
    Preview {
        /// Photo file (JPEG or PNG)
        image: PathBuf,

        /// Output file (.png or .jpg)
        #[arg(short, long)]
        output: PathBuf,

        /// Preview widget width in pixels
        #[arg(long, default_value_t = MIN_PREVIEW_WIDTH)]
        width: u32,

        /// Preview widget height in pixels
        #[arg(long, default_value_t = MIN_PREVIEW_HEIGHT)]
        height: u32,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Render the full-resolution print raster to a file
    Render {
        /// Photo file (JPEG or PNG)
        image: PathBuf,

        /// Output file (.png or .jpg)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Send a photo to the printer
    Print {
        /// Photo file (JPEG or PNG)
        image: PathBuf,

        /// Printer name (remembered for next time)
        #[arg(short = 'd', long)]
        printer: Option<String>,

        /// Number of copies
        #[arg(short = 'n', long, default_value = "1")]
        copies: u32,

        /// Show the spooler command instead of running it
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        job: JobArgs,
    },

    /// List the printers the spooler accepts jobs for
    Printers,

    /// Inspect or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the saved settings as JSON
    Show,
    /// Change one setting: mode, printer, paper, dpi, quality or policy
    Set { key: String, value: String },
    /// Print the settings file location
    Path,
}

/// Per-job overrides; anything omitted comes from the saved settings.
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Fill the paper (cropping) or fit the whole photo (white borders)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Paper size in inches, e.g. 4x6 or 5x7
    #[arg(long)]
    pub paper: Option<PaperSize>,

    /// Print resolution in dots per inch
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI)))]
    pub dpi: Option<u32>,

    /// Print quality (resampling filter and JPEG quality)
    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,

    /// Keep the paper portrait and turn the photo, or turn the paper
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Fill,
    Fit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum QualityArg {
    Draft,
    Normal,
    High,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    RotateImage,
    FollowImage,
}

impl From<ModeArg> for LayoutMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fill => Self::Fill,
            ModeArg::Fit => Self::Fit,
        }
    }
}

impl From<QualityArg> for PrintQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Draft => Self::Draft,
            QualityArg::Normal => Self::Normal,
            QualityArg::High => Self::High,
        }
    }
}

impl From<PolicyArg> for OrientationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RotateImage => Self::RotateImage,
            PolicyArg::FollowImage => Self::FollowImage,
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = config::ConfigStore::open(cli.config)?;

    match cli.command {
        Commands::Layout { image, job } => commands::layout(&mut store, &image, &job),
        Commands::Preview {
            image,
            output,
            width,
            height,
            job,
        } => commands::preview(&mut store, &image, &output, (width, height), &job),
        Commands::Render { image, output, job } => {
            commands::render(&mut store, &image, &output, &job)
        }
        Commands::Print {
            image,
            printer,
            copies,
            dry_run,
            job,
        } => commands::print(&mut store, &image, printer, copies, dry_run, &job),
        Commands::Printers => commands::printers(&store),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&store),
            ConfigAction::Set { key, value } => commands::config_set(&mut store, &key, &value),
            ConfigAction::Path => {
                println!("{}", store.path().display());
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_overrides() {
        let cli = Cli::try_parse_from([
            "photoprint", "-vv", "render", "in.jpg", "-o", "out.png", "--mode", "fit", "--paper",
            "5x7", "--dpi", "600", "--policy", "follow-image",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Render { job, output, .. } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(output, PathBuf::from("out.png"));
        assert!(matches!(job.mode, Some(ModeArg::Fit)));
        assert_eq!(job.paper, Some("5x7".parse().unwrap()));
        assert_eq!(job.dpi, Some(600));
        assert!(matches!(job.policy, Some(PolicyArg::FollowImage)));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(Cli::try_parse_from(["photoprint", "layout", "a.jpg", "--dpi", "0"]).is_err());
        assert!(Cli::try_parse_from(["photoprint", "layout", "a.jpg", "--dpi", "2401"]).is_err());
        assert!(Cli::try_parse_from(["photoprint", "layout", "a.jpg", "--dpi", "2400"]).is_ok());
        assert!(Cli::try_parse_from(["photoprint", "layout", "a.jpg", "--paper", "big"]).is_err());
        assert!(Cli::try_parse_from(["photoprint", "layout", "a.jpg", "--mode", "zoom"]).is_err());
    }

    #[test]
    fn test_parse_printers() {
        let cli = Cli::try_parse_from(["photoprint", "printers"]).unwrap();
        assert!(matches!(cli.command, Commands::Printers));
    }

    #[test]
    fn test_preview_defaults_to_minimum_widget() {
        let cli = Cli::try_parse_from(["photoprint", "preview", "a.jpg", "-o", "p.png"]).unwrap();
        let Commands::Preview { width, height, .. } = cli.command else {
            panic!("expected preview");
        };
        assert_eq!((width, height), (600, 400));
    }
}
