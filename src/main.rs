use std::{fs::File, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};

use iot_fridge::{
    Config, LedgerEventFlag, Workflow,
    dlq::LogDLQ,
    domain::{Error, Sensor, SensorStore},
    engine::Engine,
    ingestion::CsvReader,
    logging,
    output_repository::CsvOutput,
    sensor::{self, InMemorySensorStore, SqliteSensorStore, TemperatureSensor},
};

#[derive(Debug, Parser)]
#[command(name = "iot_fridge", about = "IoT fridge stock, escrow and restock simulator")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Apply a CSV file of fridge commands and print the final state as CSV.
    Run {
        /// CSV with a `command,flavor` header.
        commands: PathBuf,
        /// JSON file overriding prices, bond, bounty and starting state.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Read the simulated sensors periodically and print the latest readings as JSON.
    Sensors {
        /// Seconds between readings.
        #[arg(long, default_value_t = 5)]
        pause: u64,
        /// Number of reading rounds. 0 only prints what `--db` already holds.
        /// -1 runs until interrupted and never prints the JSON; pair it with
        /// `--db` and read the stored readings back in a later run.
        #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
        iters: i64,
        /// How many of the latest readings to print.
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Print only this sensor's readings, labelled with its name.
        #[arg(long)]
        sensor: Option<String>,
        /// SQLite file to keep readings in. Without it readings live in memory.
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init()?;
    let cli = Cli::parse();

    match cli.command {
        Cmd::Run { commands, config } => run(commands, config).await?,
        Cmd::Sensors {
            pause,
            iters,
            count,
            sensor,
            db,
        } => {
            let opts = SensorOpts {
                pause: Duration::from_secs(pause),
                iterations: iterations(iters)?,
                count,
                sensor,
            };
            match db {
                Some(path) => sensors(SqliteSensorStore::connect(&path).await?, opts).await?,
                None => sensors(InMemorySensorStore::default(), opts).await?,
            }
        }
    }

    Ok(())
}

async fn run(commands: PathBuf, config: Option<PathBuf>) -> Result<(), Error> {
    let config = match config {
        Some(path) => Config::from_path(&path)?,
        None => Config::default(),
    };
    let file = File::open(&commands)?;

    // Set up the components
    let ingestion = CsvReader::new(file);
    let workflow = Workflow::new(&config, LedgerEventFlag::new());
    tracing::info!(contents = ?workflow.contents(), "fridge initial stock loaded");

    let mut engine = Engine::new(ingestion, CsvOutput::stdout(), LogDLQ::default(), workflow);
    let summary = engine.process().await;
    tracing::info!(applied = summary.applied, rejected = summary.rejected, "commands processed");

    engine.flush()
}

struct SensorOpts {
    pause: Duration,
    iterations: Option<u32>,
    count: usize,
    sensor: Option<String>,
}

fn iterations(iters: i64) -> Result<Option<u32>, Error> {
    match iters {
        -1 => Ok(None),
        n => u32::try_from(n).map(Some).map_err(|_| {
            Error::Config(format!("--iters must be -1 or a non-negative count, got {}", n))
        }),
    }
}

async fn sensors<S: SensorStore>(mut store: S, opts: SensorOpts) -> Result<(), Error> {
    let mut sensors: Vec<Box<dyn Sensor + Send>> = vec![
        Box::new(TemperatureSensor::new("thermometer 1")),
        Box::new(TemperatureSensor::new("thermometer 2")),
    ];

    if opts.iterations != Some(0) {
        tracing::info!(pause = ?opts.pause, iterations = ?opts.iterations, "starting sensor acquisition");
        sensor::acquire(&mut sensors, &mut store, opts.pause, opts.iterations).await?;
    }

    let payload = sensor::latest_payload(&store, opts.sensor.as_deref(), opts.count).await?;
    let json = serde_json::to_string(&payload)
        .map_err(|e| Error::Output(format!("could not encode readings: {}", e)))?;
    println!("{}", json);

    Ok(())
}
