use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use rusty_sttc::error::SttcError;
use rusty_sttc::io::PairInput;

#[derive(Parser, Debug)]
#[command(about = "Compute the spike time tiling coefficient between two spike trains")]
struct Args {
    /// The JSON file holding the recording window and the two spike trains
    #[arg(short, long)]
    input: String,
    /// The coincidence tolerance (in seconds), overrides the one in the input file
    #[arg(long)]
    dt: Option<f64>,
    /// The start of the recording, overrides the one in the input file
    #[arg(long)]
    start: Option<f64>,
    /// The end of the recording, overrides the one in the input file
    #[arg(long)]
    end: Option<f64>,
    /// The log level, must be one of: off, error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// The file to write logs to, instead of the standard error
    #[arg(long)]
    log_file: Option<String>,
}

fn init_logging(args: &Args) -> Result<(), SttcError> {
    let level = args
        .log_level
        .parse::<LevelFilter>()
        .map_err(|e| SttcError::InvalidParameter(e.to_string()))?;
    let encoder = Box::new(PatternEncoder::new("{l} - {m}\n"));

    let appender: Box<dyn Append> = match &args.log_file {
        Some(path) => Box::new(
            FileAppender::builder()
                .encoder(encoder)
                .build(path)
                .map_err(|e| SttcError::IOError(e.to_string()))?,
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .encoder(encoder)
                .target(Target::Stderr)
                .build(),
        ),
    };

    let config = Config::builder()
        .appender(Appender::builder().build("main", appender))
        .build(Root::builder().appender("main").build(level))
        .map_err(|e| SttcError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| SttcError::IOError(e.to_string()))?;
    Ok(())
}

fn main() -> Result<(), SttcError> {
    let args = Args::parse();
    init_logging(&args)?;
    log::info!("{:?}", args);

    let input = PairInput::load_from(&args.input)?;
    log::info!(
        "Loaded {} and {} spikes from {}",
        input.train_a.len(),
        input.train_b.len(),
        args.input
    );

    let sttc = input.resolve(args.dt, args.start, args.end)?;
    let coefficient = sttc.measure(&input.train_a, &input.train_b)?;
    if coefficient.is_nan() {
        log::warn!("The coefficient is undefined (empty spike train or degenerate tiling)");
    }

    println!("{}", coefficient);
    Ok(())
}
