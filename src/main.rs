//! LinksTrack CLI entry point
//!
//! Loads a link file and prints the drawing primitives of one or more
//! genomic windows.

use clap::{Parser, Subcommand, ValueEnum};
use links_track::config::parse_auto_float;
use links_track::formats::is_link_file;
use links_track::render::RecordingSurface;
use links_track::{
    CompactLevel, LineStyle, LinksTrack, LinksType, Orientation, Region, TrackConfig,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, ValueEnum)]
enum LinksTypeArg {
    Arcs,
    Triangles,
    Loops,
}

impl From<LinksTypeArg> for LinksType {
    fn from(arg: LinksTypeArg) -> Self {
        match arg {
            LinksTypeArg::Arcs => LinksType::Arcs,
            LinksTypeArg::Triangles => LinksType::Triangles,
            LinksTypeArg::Loops => LinksType::Loops,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LineStyleArg {
    Solid,
    Dashed,
    Dotted,
    Dashdot,
}

impl From<LineStyleArg> for LineStyle {
    fn from(arg: LineStyleArg) -> Self {
        match arg {
            LineStyleArg::Solid => LineStyle::Solid,
            LineStyleArg::Dashed => LineStyle::Dashed,
            LineStyleArg::Dotted => LineStyle::Dotted,
            LineStyleArg::Dashdot => LineStyle::DashDot,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CompactLevelArg {
    /// Height proportional to the distance
    #[value(name = "0")]
    Proportional,
    /// Height proportional to the square root of the distance
    #[value(name = "1")]
    SquareRoot,
    /// Same height for all distances
    #[value(name = "2")]
    Constant,
}

impl From<CompactLevelArg> for CompactLevel {
    fn from(arg: CompactLevelArg) -> Self {
        match arg {
            CompactLevelArg::Proportional => CompactLevel::Proportional,
            CompactLevelArg::SquareRoot => CompactLevel::SquareRoot,
            CompactLevelArg::Constant => CompactLevel::Constant,
        }
    }
}

#[derive(Parser)]
#[command(name = "links-track")]
#[command(about = "Render genomic interaction links as arcs, triangles or loops")]
#[command(version)]
#[command(author = "LinksTrack Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Track options shared by the subcommands
#[derive(clap::Args)]
struct TrackArgs {
    /// Shape drawn for each link
    #[arg(long = "links-type", default_value = "arcs")]
    links_type: LinksTypeArg,
    /// Line width; derived from the score when omitted
    #[arg(long = "line-width")]
    line_width: Option<f64>,
    #[arg(long = "line-style", default_value = "solid")]
    line_style: LineStyleArg,
    /// Color name or colormap name (e.g. RdYlGn)
    #[arg(long, default_value = "blue")]
    color: String,
    #[arg(long, default_value = "0.8")]
    alpha: f64,
    /// Colormap minimum, or 'auto'
    #[arg(long = "min-value", default_value = "auto")]
    min_value: String,
    /// Colormap maximum, or 'auto'
    #[arg(long = "max-value", default_value = "auto")]
    max_value: String,
    /// Upper y limit in bp, or 'auto'
    #[arg(long, default_value = "auto")]
    ylim: String,
    #[arg(long = "compact-arcs-level", default_value = "0")]
    compact_arcs_level: CompactLevelArg,
    /// Key links on the middle of each locus instead of the full span
    #[arg(long = "use-middle")]
    use_middle: bool,
    /// Draw the track upside down
    #[arg(long)]
    inverted: bool,
}

impl TrackArgs {
    fn to_config(&self) -> anyhow::Result<TrackConfig> {
        let config = TrackConfig {
            links_type: self.links_type.into(),
            line_width: self.line_width,
            line_style: self.line_style.into(),
            color: self.color.clone(),
            alpha: self.alpha,
            min_value: parse_auto_float("min_value", &self.min_value)?,
            max_value: parse_auto_float("max_value", &self.max_value)?,
            ylim: parse_auto_float("ylim", &self.ylim)?,
            compact_arcs_level: self.compact_arcs_level.into(),
            use_middle: self.use_middle,
            orientation: if self.inverted {
                Orientation::Inverted
            } else {
                Orientation::Normal
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the drawing primitives of one or more regions
    Plot {
        /// Input link file (.links, .arcs, .bedpe, optionally gzip/bzip2 compressed)
        input: PathBuf,
        /// Regions to render, as chrom:start-end
        #[arg(short = 'r', long = "region", required = true)]
        regions: Vec<Region>,
        /// Load only the chromosomes of the requested regions
        #[arg(long = "restrict")]
        restrict: bool,
        #[command(flatten)]
        track: TrackArgs,
    },
    /// Summarize a link file
    Stats {
        /// Input link file
        input: PathBuf,
        #[arg(long = "use-middle")]
        use_middle: bool,
    },
}

fn load_track(
    input: &PathBuf,
    config: TrackConfig,
    regions: Option<&[Region]>,
) -> anyhow::Result<LinksTrack> {
    let start = Instant::now();
    eprintln!("Loading link file: {:?}", input);
    if !is_link_file(input) {
        log::warn!("{:?} does not have a link file ending", input);
    }

    let track = LinksTrack::from_path(input, config, regions)
        .map_err(|e| anyhow::anyhow!("Failed to load link file: {}", e))?;

    eprintln!(
        "Link file loaded in {:.2}s ({} links)",
        start.elapsed().as_secs_f64(),
        track.index().total_intervals()
    );
    Ok(track)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            input,
            regions,
            restrict,
            track,
        } => {
            let config = track.to_config()?;
            let track = load_track(&input, config, restrict.then_some(regions.as_slice()))?;

            // The index is read-only, so windows render independently
            let rendered: Vec<(String, RecordingSurface)> = regions
                .par_iter()
                .map(|region| {
                    let mut surface = RecordingSurface::new();
                    let summary = track.plot_region(&mut surface, region);
                    log::info!("{}: {} links drawn", region, summary.links_drawn);
                    (region.to_string(), surface)
                })
                .collect();

            let mut colorbar = RecordingSurface::new();
            track.plot_colorbar(&mut colorbar);
            print!("{}", colorbar.to_tsv());

            for (region, surface) in rendered {
                println!("# {}", region);
                print!("{}", surface.to_tsv());
            }
        }

        Commands::Stats { input, use_middle } => {
            let config = TrackConfig {
                use_middle,
                ..TrackConfig::default()
            };
            let track = load_track(&input, config, None)?;
            let stats = track.parse_stats();
            let scores = track.scores();

            let mut chroms: Vec<&str> = track.index().chroms().collect();
            chroms.sort_unstable();

            eprintln!("\n=== Link File Statistics ===");
            eprintln!("Lines read:      {}", stats.lines);
            eprintln!("Header lines:    {}", stats.headers);
            eprintln!("Links indexed:   {}", stats.links);
            eprintln!("Cross-chrom:     {}", stats.cross_chrom);
            eprintln!("Missing scores:  {}", stats.missing_scores);
            eprintln!("Invalid scores:  {}", stats.invalid_scores);
            match (scores.has_score, scores.min_score(), scores.max_score()) {
                (true, Some(min), Some(max)) => eprintln!("Score range:     {} - {}", min, max),
                _ => eprintln!("Score range:     n/a"),
            }
            for chrom in chroms {
                println!("{}\t{}", chrom, track.index().interval_count(chrom));
            }
        }
    }

    Ok(())
}
