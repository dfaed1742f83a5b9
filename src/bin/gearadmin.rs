//! gearadmin CLI
//!
//! Command-line interface for the job server admin protocol.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gearadmin::{AdminClient, AdminError, Config, StatusMap, WorkerInfo};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code when `maxqueue`/`shutdown` got a reply other than `OK`
const EXIT_NOT_OK: u8 = 2;

/// gearadmin CLI
#[derive(Parser, Debug)]
#[command(name = "gearadmin")]
#[command(about = "Query and control a Gearman job server over its admin port")]
#[command(version)]
struct Args {
    /// Server hostname
    #[arg(short = 'H', long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "4730")]
    port: u16,

    /// Connect/read timeout in seconds
    #[arg(short, long, default_value = "1")]
    timeout: f64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Registered functions with queue, running and worker counts
    Status,

    /// Server version
    Version,

    /// Connected workers and their functions
    Workers,

    /// Set the maximum queue size of a function
    MaxQueue {
        /// Function name
        function: String,

        /// Maximum size; omit for the server default, negative for unlimited
        #[arg(allow_negative_numbers = true)]
        size: Option<i64>,
    },

    /// Shut the server down
    Shutdown {
        /// Let existing connections finish
        #[arg(short, long)]
        graceful: bool,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gearadmin=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, AdminError> {
    let config = Config::builder()
        .hostname(&args.host)
        .port(args.port)
        .timeout_secs(args.timeout)
        .build()?;

    tracing::debug!("gearadmin v{} -> {}", gearadmin::VERSION, config.address());

    let client = AdminClient::new(config);

    match &args.command {
        Commands::Status => {
            let status = client.status()?.into_result()?;
            print_status(&status, args.json);
        }
        Commands::Version => {
            let version = client.version()?.into_result()?;
            print_value(&version, args.json, |v| v.clone());
        }
        Commands::Workers => {
            let workers = client.workers()?.into_result()?;
            print_workers(&workers, args.json);
        }
        Commands::MaxQueue { function, size } => {
            let ok = client.max_queue(function, *size)?.into_result()?;
            return Ok(report_ok(ok, args.json));
        }
        Commands::Shutdown { graceful } => {
            let ok = client.shutdown(*graceful)?.into_result()?;
            return Ok(report_ok(ok, args.json));
        }
    }

    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// Output
// =============================================================================

fn print_status(status: &StatusMap, json: bool) {
    print_value(status, json, |status| {
        status
            .values()
            .map(|row| {
                format!(
                    "{}\t{}\t{}\t{}",
                    row.function, row.in_queue, row.jobs_running, row.capable_workers
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
}

fn print_workers(workers: &[WorkerInfo], json: bool) {
    print_value(&workers, json, |workers| {
        workers
            .iter()
            .map(|w| {
                format!(
                    "{} {} {} : {}",
                    w.file_descriptor, w.host, w.job_handle, w.functions
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
}

fn report_ok(ok: bool, json: bool) -> ExitCode {
    print_value(&ok, json, |ok| (if *ok { "OK" } else { "NOT OK" }).to_string());
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_OK)
    }
}

fn print_value<T: Serialize>(value: &T, json: bool, text: impl Fn(&T) -> String) {
    if json {
        match serde_json::to_string_pretty(value) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => tracing::error!("Failed to render JSON: {}", e),
        }
    } else {
        let rendered = text(value);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
}
