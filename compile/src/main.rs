use std::fs::File;
use std::io;
use std::path::PathBuf;

use hmmtag::Model;
use hmmtag::errors::TaggerError;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    about = "A program to compile the statistics tables into a model file."
)]
struct Args {
    /// Directory the config file and the table paths are relative to.
    #[clap(short = 'd', long)]
    base_dir: PathBuf,

    /// Config file naming the tables (pwt.pos, ptt.pos, ptt.wp).
    #[clap(short = 'c', long)]
    config: PathBuf,

    /// File to which the compiled model is output (in zstd).
    #[clap(short = 'o', long)]
    model_out: PathBuf,

    /// Compression level of zstd.
    #[clap(short = 'l', long, default_value = "19")]
    level: i32,
}

#[derive(Debug, thiserror::Error)]
enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Model compilation failed: {0}")]
    Tagger(#[from] TaggerError),
}

fn main() -> Result<(), CompileError> {
    let args = Args::parse();

    eprintln!("Loading the statistics tables...");
    let model = Model::from_config(&args.base_dir, &args.config)?;
    eprintln!(
        "Loaded {} lexical, {} tag and {} phrase entries",
        model.pwt_pos().len(),
        model.ptt_pos().len(),
        model.ptt_wp().len(),
    );

    eprintln!("Writing the model...");
    let file = File::create(&args.model_out)?;
    let mut encoder = zstd::Encoder::new(file, args.level)?;
    model.write(&mut encoder)?;
    encoder.finish()?;

    eprintln!("Successfully compiled the model to {}", args.model_out.display());
    Ok(())
}
