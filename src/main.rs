use anyhow::{Context, Result};
use clap::Clap;
use log::{debug, error, info};
use rust_htslib::bam;
use std::path::PathBuf;

use methylpat::io::{create_output, decode_alignments, merge_mates, open_input};
use methylpat::utils::add_commas;
use methylpat::MergeConfig;

#[derive(Clap)]
#[clap(version = "0.1.0", about = "Methylation patterns of paired-end reads")]
struct Opts {
    /// Increase log verbosity (-v debug, -vv trace).
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,
    #[clap(subcommand)]
    cmd: SubCommand,
}

#[derive(Clap)]
enum SubCommand {
    /// Restore reference aligned sequences of mapped reads.
    Decode(Decode),
    /// Merge methylation patterns of read mates into one record per fragment.
    Merge(Merge),
}

#[derive(Clap)]
struct Decode {
    /// Input mapped reads (BAM/SAM/CRAM). Reads stdin if omitted.
    #[clap(parse(from_os_str))]
    input: Option<PathBuf>,
    /// Output file (`.gz` to compress). Writes stdout if omitted.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Clap)]
struct Merge {
    /// Pattern lines as name, chrom, start and pattern, mates adjacent.
    /// Reads stdin if omitted.
    #[clap(parse(from_os_str))]
    input: Option<PathBuf>,
    /// Output file (`.gz` to compress). Writes stdout if omitted.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Rejects merges producing longer intervals.
    #[clap(long, default_value = "300")]
    max_merged_pattern_length: usize,
    /// Drops patterns with fewer informative CpG sites.
    #[clap(long, default_value = "1")]
    min_cpg: usize,
}

fn main() {
    let opts: Opts = Opts::parse();

    let level = match opts.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let result = match opts.cmd {
        SubCommand::Decode(decode) => run_decode(decode),
        SubCommand::Merge(merge) => run_merge(merge),
    };

    if let Err(e) = result {
        error!("Failed! {:#}", e);
        std::process::exit(1);
    }
}

fn run_decode(opts: Decode) -> Result<()> {
    // Create a reader to input file.
    let mut bam = match &opts.input {
        Some(path) => bam::Reader::from_path(path)
            .with_context(|| format!("cannot open {}", path.display()))?,
        None => bam::Reader::from_stdin().context("cannot read stdin")?,
    };
    let mut writer = create_output(opts.output.as_deref()).context("cannot create output")?;

    let stats = decode_alignments(&mut bam, &mut writer)?;

    info!(
        "Decoded {} of {} reads",
        add_commas(stats.decoded),
        add_commas(stats.total)
    );
    Ok(())
}

fn run_merge(opts: Merge) -> Result<()> {
    let config = MergeConfig {
        max_merged_pattern_length: opts.max_merged_pattern_length,
        min_cpg: opts.min_cpg,
    };
    debug!(
        "max merged pattern length: {}, min CpGs: {}",
        config.max_merged_pattern_length, config.min_cpg
    );

    let reader = open_input(opts.input.as_deref()).context("cannot open input")?;
    let mut writer = create_output(opts.output.as_deref()).context("cannot create output")?;

    let stats = merge_mates(reader, &mut writer, &config)?;

    info!(
        "Fragments: {} (paired: {}), patterns written: {}, filtered: {}, invalid pairings skipped: {}",
        add_commas(stats.fragments),
        add_commas(stats.pairs),
        add_commas(stats.written),
        add_commas(stats.filtered),
        add_commas(stats.skipped)
    );
    Ok(())
}
