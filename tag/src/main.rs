//! Chooses one reading per token for sentences read from stdin.
//!
//! Each input line holds a token and its candidate readings separated by tabs,
//! e.g., `나는\t나/npp+는/jxc\t나/npp+는/jxt`. A blank line ends a sentence.
use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use hmmtag::errors::TaggerError;
use hmmtag::tagger::worker::Worker;
use hmmtag::{Eojeol, Model, SentenceCandidates, Tagger};

use clap::Parser;

#[derive(Clone, Debug)]
enum OutputMode {
    Simple,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "simple" => Ok(Self::Simple),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "tag", about = "Disambiguates morphological candidates")]
struct Args {
    /// Compiled model (in zstd).
    #[clap(short = 'i', long, conflicts_with_all = ["base_dir", "config"])]
    model: Option<PathBuf>,

    /// Directory the config file and the table paths are relative to.
    #[clap(short = 'd', long, requires = "config")]
    base_dir: Option<PathBuf>,

    /// Config file naming the tables (pwt.pos, ptt.pos, ptt.wp).
    #[clap(short = 'c', long, requires = "base_dir")]
    config: Option<PathBuf>,

    /// Output mode. Choices are simple and detail.
    #[clap(short = 'O', long, default_value = "simple")]
    output_mode: OutputMode,

    /// Maximum number of tokens per sentence, plus one.
    #[clap(long)]
    max_positions: Option<usize>,

    /// Maximum number of candidate readings per sentence, plus one.
    #[clap(long)]
    max_nodes: Option<usize>,
}

fn parse_line(line: &str, sent: &mut SentenceCandidates) -> Result<(), TaggerError> {
    let mut cols = line.split('\t');
    let surface = cols.next().unwrap_or_default();
    let readings = cols
        .filter(|c| !c.is_empty())
        .map(Eojeol::from_str)
        .collect::<Result<Vec<_>, _>>()?;
    sent.push_token(surface, readings);
    Ok(())
}

fn write_result<W>(worker: &Worker, mode: &OutputMode, out: &mut W) -> std::io::Result<()>
where
    W: Write,
{
    for t in worker.token_iter() {
        match mode {
            OutputMode::Simple => writeln!(out, "{}\t{}", t.surface(), t.eojeol())?,
            OutputMode::Detail => writeln!(
                out,
                "{}\t{}\tcandidate={}\tphrase={}\temission={:.4}\taccumulated={:.4}",
                t.surface(),
                t.eojeol(),
                t.candidate(),
                t.phrase_tag(),
                t.emission(),
                t.accumulated(),
            )?,
        }
    }
    out.write_all(b"EOS\n")
}

/// Tags every blank-line separated sentence of `input`, writing the results
/// to `out`. A sentence that cannot be read or tagged is reported on stderr
/// and written as a bare `EOS`.
fn tag_lines<R, W>(
    worker: &mut Worker,
    mode: &OutputMode,
    input: R,
    out: &mut W,
    flush: bool,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut sentence_id = 0;
    let mut sent = SentenceCandidates::new(0, sentence_id, false);
    let mut parse_error = None;
    let mut lines = input.lines();
    loop {
        let line = lines.next().transpose()?;
        match line.as_deref() {
            Some(line) if !line.is_empty() => {
                if parse_error.is_none() {
                    if let Err(e) = parse_line(line, &mut sent) {
                        parse_error = Some(format!("{line:?}: {e}"));
                    }
                }
                continue;
            }
            _ => {}
        }

        if !sent.is_empty() || parse_error.is_some() {
            if let Some(e) = parse_error.take() {
                eprintln!("Failed to read sentence {sentence_id}: {e}");
                out.write_all(b"EOS\n")?;
            } else {
                if line.is_none() {
                    sent.set_end_of_document(true);
                }
                worker.reset_sentence(sent);
                match worker.tag() {
                    Ok(()) => write_result(worker, mode, out)?,
                    Err(e) => {
                        eprintln!("Failed to tag sentence {sentence_id}: {e}");
                        out.write_all(b"EOS\n")?;
                    }
                }
            }
            if flush {
                out.flush()?;
            }
            sentence_id += 1;
        }
        if line.is_none() {
            break;
        }
        sent = SentenceCandidates::new(0, sentence_id, false);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the model...");
    let model = match (&args.model, &args.base_dir, &args.config) {
        (Some(path), _, _) => Model::from_zstd(path)?,
        (None, Some(base_dir), Some(config)) => Model::from_config(base_dir, config)?,
        _ => return Err("Either --model or both --base-dir and --config must be specified".into()),
    };

    let mut tagger = Tagger::new(model);
    if let Some(n) = args.max_positions {
        tagger = tagger.max_positions(n);
    }
    if let Some(n) = args.max_nodes {
        tagger = tagger.max_nodes(n);
    }
    let mut worker = tagger.new_worker();

    eprintln!("Ready to tag");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    tag_lines(
        &mut worker,
        &args.output_mode,
        std::io::stdin().lock(),
        &mut out,
        is_tty,
    )?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker() -> Worker {
        let pwt_pos = "나/npp -1.0\n는/jxc -1.0\n가/pvg -1.0\n";
        let ptt_pos = "npp -2.0\njxc -3.0\npvg -2.0\nbnk -1.0\n";
        let ptt_wp = "N -1.0\nJ -1.0\nP -1.0\n";
        let model =
            Model::from_readers(pwt_pos.as_bytes(), ptt_pos.as_bytes(), ptt_wp.as_bytes()).unwrap();
        Tagger::new(model).new_worker()
    }

    fn run(input: &str) -> String {
        let mut worker = worker();
        let mut out = vec![];
        tag_lines(
            &mut worker,
            &OutputMode::Simple,
            input.as_bytes(),
            &mut out,
            false,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_one_reading_per_token() {
        let out = run("나\t나/npp\n는\t는/jxc\n\n가\t가/pvg\n");
        assert_eq!(out, "나\t나/npp\n는\t는/jxc\nEOS\n가\t가/pvg\nEOS\n");
    }

    #[test]
    fn test_unreadable_reading_fails_the_sentence() {
        let out = run("나\t나/npp\n는\t는/jxc\t는\n가\t가/pvg\n\n가\t가/pvg\n");
        assert_eq!(out, "EOS\n가\t가/pvg\nEOS\n");
    }

    #[test]
    fn test_token_without_readings_fails_the_sentence() {
        let out = run("나\t나/npp\n는\n");
        assert_eq!(out, "EOS\n");
    }
}
