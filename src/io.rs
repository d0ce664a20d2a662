use anyhow::Context;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use rust_htslib::{bam, bam::Read};

use crate::cigar::adjust_sequence;
use crate::error::ErrorKind;
use crate::merge::{merge_paired, MergeConfig};
use crate::pattern::PatternRecord;
use crate::{are_paired, line_to_tokens};

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Opens `path` for reading, or stdin when no path is given.
/// Files ending in `.gz` are decompressed.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if is_gzip(path) => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        }
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Creates `path` for writing, or stdout when no path is given.
/// Files ending in `.gz` are compressed.
pub fn create_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) if is_gzip(path) => {
            let file = File::create(path)?;
            Ok(Box::new(GzEncoder::new(
                BufWriter::new(file),
                Compression::default(),
            )))
        }
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

pub fn write_pattern<W: Write + ?Sized>(writer: &mut W, record: &PatternRecord) -> io::Result<()> {
    writeln!(writer, "{}", record)
}

#[derive(Debug, Default, PartialEq)]
pub struct DecodeStats {
    pub total: u64,
    pub decoded: u64,
}

/// Writes `qname`, `chrom`, 1-based `pos` and the reference aligned
/// sequence of every mapped read.
pub fn decode_alignments<W: Write + ?Sized>(
    bam: &mut bam::Reader,
    writer: &mut W,
) -> anyhow::Result<DecodeStats> {
    let header = bam.header().clone();
    let mut stats = DecodeStats::default();

    let mut record = bam::Record::new();
    while let Some(result) = bam.read(&mut record) {
        result?;
        stats.total += 1;

        let qname = String::from_utf8_lossy(record.qname()).into_owned();

        // Unmapped reads have nothing to align.
        if record.is_unmapped() || record.cigar_len() == 0 {
            debug!("skipping unmapped read {}", qname);
            continue;
        }

        let cigar = record.cigar().to_vec();
        let aligned = adjust_sequence(&record.seq().as_bytes(), &cigar)
            .with_context(|| format!("read {} with CIGAR {}", qname, record.cigar()))?;

        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            qname,
            String::from_utf8_lossy(header.tid2name(record.tid() as u32)),
            record.pos() + 1,
            String::from_utf8_lossy(&aligned)
        )?;
        stats.decoded += 1;
    }
    writer.flush()?;

    Ok(stats)
}

#[derive(Debug, Default, PartialEq)]
pub struct MergeStats {
    pub fragments: u64,
    pub pairs: u64,
    pub written: u64,
    pub filtered: u64,
    pub skipped: u64,
}

fn read_record(tokens: &[&str]) -> anyhow::Result<Option<PatternRecord>> {
    let record = PatternRecord::from_tokens(&tokens[1..])
        .with_context(|| format!("read {}", tokens[0]))?;
    Ok(record.into_stripped())
}

/// Reads pattern lines (`name`, `chrom`, `start`, `pattern`) with mates on
/// adjacent lines and writes one merged record per fragment.
/// Invalid pairings are logged and skipped, any other error stops the run.
pub fn merge_mates<R: BufRead, W: Write + ?Sized>(
    reader: R,
    writer: &mut W,
    config: &MergeConfig,
) -> anyhow::Result<MergeStats> {
    let mut stats = MergeStats::default();

    let mut lines = reader.lines();
    let mut pending: Option<String> = None;
    loop {
        let line_1 = match pending.take() {
            Some(line) => line,
            None => match lines.next() {
                Some(line) => line?,
                None => break,
            },
        };
        let tokens_1 = line_to_tokens(&line_1);
        if tokens_1.is_empty() {
            continue;
        }
        stats.fragments += 1;

        // Look ahead one line: a mate shares the read name, anything else
        // starts the next fragment.
        let line_2 = lines.next().transpose()?;
        let paired = match &line_2 {
            Some(line) => are_paired(&tokens_1, &line_to_tokens(line)),
            None => false,
        };

        let record_1 = read_record(&tokens_1)?;
        let record_2 = if paired {
            stats.pairs += 1;
            match &line_2 {
                Some(line) => read_record(&line_to_tokens(line))?,
                None => None,
            }
        } else {
            pending = line_2;
            None
        };

        match merge_paired(record_1, record_2, config) {
            Ok(Some(record)) if record.informative_sites() < config.min_cpg => {
                debug!(
                    "read {} has {} CpGs, fewer than {}",
                    tokens_1[0],
                    record.informative_sites(),
                    config.min_cpg
                );
                stats.filtered += 1;
            }
            Ok(Some(record)) => {
                write_pattern(writer, &record)?;
                stats.written += 1;
            }
            Ok(None) => {
                debug!("read {} has no informative CpG", tokens_1[0]);
                stats.filtered += 1;
            }
            Err(e) if e.kind() == ErrorKind::PairingGeometry => {
                warn!("skipping read {}: {}", tokens_1[0], e);
                stats.skipped += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("read {}", tokens_1[0])),
        }
    }
    writer.flush()?;

    Ok(stats)
}
