use clap::Parser;
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

mod challenges;
mod error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Advent of Code 2021 solutions", long_about = None)]
struct Cli {
    /// Challenge Day
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Challenge number within the day
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    challenge: u8,

    /// Puzzle input, reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn read_input(&self) -> error::Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)?),
            _ => {
                let mut input = String::new();
                io::stdin().lock().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let answer = cli
        .read_input()
        .and_then(|input| challenges::run(cli.day, cli.challenge, &input));
    match answer {
        Ok(answer) => {
            println!("Day {}, challenge {}: {}", cli.day, cli.challenge, answer);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
