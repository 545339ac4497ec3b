use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fillsheet::{C_FILE_DEFAULT, FillSheet, FillSheetError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about = "Fill product descriptions in a catalog workbook.")]
struct Args {
    /// Workbook to fill in place.
    #[arg(long, default_value = C_FILE_DEFAULT)]
    file: PathBuf,

    /// Rows to process, as `START:END`; either side may be empty.
    #[arg(long)]
    rows: Option<String>,

    /// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write boilerplate into the secondary description column.
    Half,
    /// Generate full descriptions in the primary column.
    Full,
    /// Run the Half-Fill pass, then the Full-Fill pass.
    Both,
    /// Print row count, resolved range and seed column.
    Info,
}

fn init_tracing(verbose: u8) {
    let c_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| c_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), FillSheetError> {
    let fill_sheet = FillSheet::new(&args.file, args.rows.as_deref())?;
    match args.command {
        Command::Half => println!("{}", fill_sheet.half_fill()?),
        Command::Full => println!("{}", fill_sheet.full_fill()?),
        Command::Both => {
            println!("{}", fill_sheet.half_fill()?);
            println!("{}", fill_sheet.full_fill()?);
        }
        Command::Info => {
            let rows = fill_sheet.rows();
            let columns = fill_sheet.columns();
            println!("file: {}", fill_sheet.file().display());
            println!("rows: {}", fill_sheet.max_rows());
            println!("range: {}:{}", rows.start(), rows.end());
            println!("seed: {}", fill_sheet.seed());
            println!(
                "columns: manufacturer={} product={} colour={} description1={} description2={}",
                columns.manufacturer,
                columns.product,
                columns.colour,
                columns.description1,
                columns.description2
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
