use crate::commits::output::Format;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locmap")]
#[command(about = "Commit history explorer for repository line-count tables")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "LOCMAP_DATA", default_value = "loc.csv", help = "Path to the line table CSV")]
    pub data: PathBuf,

    #[arg(long, env = "LOCMAP_COMMIT_URL", help = "Base URL commit ids are appended to")]
    pub commit_url: Option<String>,

    #[arg(long, help = "Fail on the first malformed row instead of skipping it", default_value_t = false)]
    pub strict: bool,
}

#[derive(Args, Clone, Default)]
pub struct CutoffArgs {
    #[arg(long, conflicts_with = "progress", help = "Only commits at or before this date (RFC3339, YYYY-MM-DD[THH:MM], or '2 weeks ago')")]
    pub until: Option<String>,

    #[arg(long, help = "Time slider position 0-100 between the first and last commit")]
    pub progress: Option<f64>,
}

#[derive(Args, Clone)]
pub struct BrushArgs {
    #[arg(long, requires_all = ["y0", "x1", "y1"], allow_negative_numbers = true)]
    pub x0: Option<f64>,
    #[arg(long, requires_all = ["x0", "x1", "y1"], allow_negative_numbers = true)]
    pub y0: Option<f64>,
    #[arg(long, requires_all = ["x0", "y0", "y1"], allow_negative_numbers = true)]
    pub x1: Option<f64>,
    #[arg(long, requires_all = ["x0", "y0", "x1"], allow_negative_numbers = true)]
    pub y1: Option<f64>,

    #[arg(long, conflicts_with_all = ["x0", "y0", "x1", "y1"], help = "Brush the whole plot. With a cutoff, later commits landing in the right margin are included")]
    pub all: bool,

    #[arg(long, default_value_t = 1000.0, help = "Plot width in brush coordinates")]
    pub width: f64,

    #[arg(long, default_value_t = 600.0, help = "Plot height in brush coordinates")]
    pub height: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics of the line table
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Commits in time order, optionally up to a cutoff
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[clap(flatten)]
        cutoff: CutoffArgs,
    },
    /// Commits inside a brush rectangle over the time/hour plot
    Select {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[clap(flatten)]
        cutoff: CutoffArgs,

        #[clap(flatten)]
        brush: BrushArgs,
    },
    /// Lines per file type for the brushed commits
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[clap(flatten)]
        cutoff: CutoffArgs,

        #[clap(flatten)]
        brush: BrushArgs,
    },
    /// Files ranked by line count
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, default_value_t = 50, help = "Maximum number of files to list")]
        limit: usize,
    },
    /// Search the project metadata and group it by year
    Projects {
        #[arg(long, default_value = "lib/projects.json", help = "Project metadata JSON")]
        file: PathBuf,

        #[arg(long, short, help = "Case-insensitive search over all fields")]
        query: Option<String>,

        #[arg(long, help = "Only list projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Only consider the first N projects")]
        latest: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Interactive scatterplot explorer
    #[command(alias = "tui", alias = "ui")]
    Explore {
        #[arg(long, help = "Use one color for every commit")]
        no_color_by_type: bool,

        #[arg(long, help = "Disable the time slider")]
        no_time_slider: bool,

        #[arg(long, help = "Scrolling the commit list moves the time slider")]
        scroll_drives_time: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Explore { .. })
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json } => crate::stats::exec(self.common, json),
            Commands::Commits { json, ndjson, cutoff } => {
                crate::commits::exec::exec_commits(self.common, cutoff, Format::from_flags(json, ndjson))
            }
            Commands::Select { json, ndjson, cutoff, brush } => {
                crate::commits::exec::exec_select(self.common, cutoff, brush, Format::from_flags(json, ndjson))
            }
            Commands::Breakdown { json, ndjson, cutoff, brush } => {
                crate::commits::exec::exec_breakdown(self.common, cutoff, brush, Format::from_flags(json, ndjson))
            }
            Commands::Files { json, limit } => crate::stats::exec_files(self.common, json, limit),
            Commands::Projects { file, query, year, latest, json } => {
                crate::projects::exec(file, query, year, latest, json)
            }
            Commands::Explore { no_color_by_type, no_time_slider, scroll_drives_time } => {
                let config = crate::state::ExploreConfig {
                    color_by_type: !no_color_by_type,
                    time_slider: !no_time_slider,
                    scroll_drives_time,
                    ..Default::default()
                };
                crate::tui::run(&self.common, config)
            }
        }
    }
}
