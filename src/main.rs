//! meetseg CLI - Unsupervised Meeting Topic Segmentation
//!
//! Command-line interface for segmenting and inspecting meeting transcripts.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use meetseg::segmentation::prune;
use meetseg::{
    build_segmenter, evaluate_meeting, render_transcript, Algorithm, Config, EmbeddingSource,
    Meeting, MeetingLoader, OpenAiEmbeddings, PrecomputedEmbeddings, Result, SegmentError,
    Segmentation,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the embeddings API key.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Parser)]
#[command(name = "meetseg")]
#[command(author = "meetseg Contributors")]
#[command(version)]
#[command(about = "Unsupervised topic segmentation of meeting transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a meeting and score it against its reference
    Segment {
        /// Meeting file (JSON, one meeting or an array)
        #[arg(short, long)]
        input: PathBuf,

        /// Index of the meeting within the file
        #[arg(short, long, default_value = "0")]
        mid: usize,

        /// Algorithm (embedding, hyperdimensional, random, equidistant)
        #[arg(short, long, default_value = "hyperdimensional")]
        algorithm: Algorithm,

        /// Number of segments (default: pruned reference segment count)
        #[arg(short)]
        k: Option<usize>,

        /// Seed for the random baseline and the item memory
        #[arg(short, long)]
        seed: Option<u64>,

        /// Utterances on each side of a gap
        #[arg(short, long)]
        window: Option<usize>,

        /// Minimum segment length for pruning
        #[arg(long)]
        min_segment: Option<usize>,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Precomputed embeddings (JSON object text -> vector) instead of the API
        #[arg(short, long)]
        embeddings: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Print the transcript split at the pruned predicted boundaries
        #[arg(short, long)]
        transcript: bool,
    },

    /// Show a meeting split at its reference boundaries
    View {
        /// Meeting file (JSON, one meeting or an array)
        #[arg(short, long)]
        input: PathBuf,

        /// Index of the meeting within the file
        #[arg(short, long, default_value = "0")]
        mid: usize,

        /// Minimum segment length for pruning (0 shows the reference as annotated)
        #[arg(long, default_value = "0")]
        min_segment: usize,
    },

    /// List the meetings in a file
    List {
        /// Meeting file (JSON, one meeting or an array)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Segment {
            input,
            mid,
            algorithm,
            k,
            seed,
            window,
            min_segment,
            config,
            embeddings,
            json,
            transcript,
        } => segment_meeting(SegmentArgs {
            input,
            mid,
            algorithm,
            k,
            seed,
            window,
            min_segment,
            config,
            embeddings,
            json,
            transcript,
        }),

        Commands::View {
            input,
            mid,
            min_segment,
        } => view_meeting(input, mid, min_segment),

        Commands::List { input } => list_meetings(input),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

struct SegmentArgs {
    input: PathBuf,
    mid: usize,
    algorithm: Algorithm,
    k: Option<usize>,
    seed: Option<u64>,
    window: Option<usize>,
    min_segment: Option<usize>,
    config: Option<PathBuf>,
    embeddings: Option<PathBuf>,
    json: bool,
    transcript: bool,
}

fn segment_meeting(args: SegmentArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    // Flags override the file
    if let Some(window) = args.window {
        config.signal.window = window;
    }
    if let Some(min_segment) = args.min_segment {
        config.pruning.min_segment_length = min_segment;
    }
    if let Some(seed) = args.seed {
        config.hdc.seed = seed;
    }
    config.validate()?;

    let meeting = MeetingLoader::new().load_one(&args.input, args.mid)?;

    let source = if args.algorithm == Algorithm::Embedding {
        Some(embedding_source(args.embeddings.as_deref(), &mut config)?)
    } else {
        None
    };
    let segmenter = build_segmenter(args.algorithm, &config, config.hdc.seed, source)?;

    let pb = spinner(format!(
        "Segmenting {} ({} utterances) with {}...",
        meeting.id,
        meeting.len(),
        args.algorithm
    ))?;
    let report = evaluate_meeting(&meeting, &segmenter, args.k, &config);
    pb.finish_and_clear();
    let report = report?;

    if args.json {
        let out = serde_json::to_string_pretty(&report)?;
        println!("{}", out);
    } else {
        println!("{}", report.summary());
    }

    if args.transcript {
        let segmentation = Segmentation::new(report.pruned_predicted.clone(), meeting.len())?;
        println!();
        print!("{}", render_transcript(&meeting, &segmentation)?);
    }

    Ok(())
}

fn embedding_source(
    precomputed: Option<&Path>,
    config: &mut Config,
) -> Result<Box<dyn EmbeddingSource>> {
    if let Some(path) = precomputed {
        return Ok(Box::new(PrecomputedEmbeddings::from_json_file(path)?));
    }

    if config.embeddings.api_key.is_none() {
        config.embeddings.api_key = std::env::var(API_KEY_VAR).ok();
    }
    if config.embeddings.api_key.is_none() {
        return Err(SegmentError::Config(format!(
            "{} is not set; pass --embeddings for offline vectors",
            API_KEY_VAR
        )));
    }
    Ok(Box::new(OpenAiEmbeddings::new(&config.embeddings)?))
}

fn view_meeting(input: PathBuf, mid: usize, min_segment: usize) -> Result<()> {
    let meeting = MeetingLoader::new().load_one(&input, mid)?;
    meeting.validate()?;

    let reference = Segmentation::new(meeting.reference.clone(), meeting.len())?;
    let shown = if min_segment > 0 {
        prune(&reference, min_segment)
    } else {
        reference.clone()
    };

    print_header(&meeting, &reference, &shown);
    print!("{}", render_transcript(&meeting, &shown)?);
    Ok(())
}

fn print_header(meeting: &Meeting, reference: &Segmentation, shown: &Segmentation) {
    println!("Meeting:     {}", meeting.id);
    println!("Utterances:  {}", meeting.len());
    println!("Reference:   {:?}", reference.boundaries());
    if shown != reference {
        println!("Pruned:      {:?}", shown.boundaries());
    }
    println!("Segments:    {:?}", shown.segment_lengths());
    println!();
}

fn list_meetings(input: PathBuf) -> Result<()> {
    let meetings = MeetingLoader::new().load(&input)?;
    for (mid, meeting) in meetings.iter().enumerate() {
        println!(
            "{:>4}  {:<12} {:>5} utterances  {:>3} reference segments",
            mid,
            meeting.id,
            meeting.len(),
            meeting.reference_k()
        );
    }
    Ok(())
}

fn spinner(message: String) -> Result<ProgressBar> {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .map_err(|e| SegmentError::Config(format!("progress template: {}", e)))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
