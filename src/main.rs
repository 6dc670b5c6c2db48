#[macro_use]
extern crate log;

mod cli;
mod logging;

use std::process;
use std::sync::Arc;

use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Command};
use kreassign::cluster_status::{KafkaClusterClient, ReassignmentFile};
use kreassign::reassignment::{Orchestrator, ReassignmentError, ReassignmentResult};

#[tokio::main]
async fn main() {
    let cli = parse_cli_and_init_logging();

    let shutdown_token = build_shutdown_token();

    let code = match run(cli, shutdown_token).await {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            error!("{e}");
            exit_code_for(&e)
        },
    };

    process::exit(code);
}

fn parse_cli_and_init_logging() -> Cli {
    // Parse command line input and initialize logging
    let cli = Cli::parse_and_validate();
    logging::init(cli.verbosity_level());

    trace!("Created:\n{:#?}", cli);

    cli
}

fn build_shutdown_token() -> CancellationToken {
    let shutdown_token = CancellationToken::new();

    // Setup shutdown signal handler:
    // when it's time to shutdown, cancel the token shared with the rest of the system.
    //
    // NOTE: This handler will be listening on its own dedicated thread.
    let handler_token = shutdown_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Shutting down...");
        handler_token.cancel();
    }) {
        error!("Failed to register signal handler: {e}");
    }

    shutdown_token
}

async fn run(cli: Cli, shutdown_token: CancellationToken) -> ReassignmentResult<()> {
    let client =
        Arc::new(KafkaClusterClient::new(&cli.build_client_config(), cli.metadata_timeout())?);

    match cli.command {
        Command::Plan {
            topic,
            replication_factor,
            output,
        } => {
            let file = Arc::new(ReassignmentFile::new(output, client.clone()));
            let orchestrator = Orchestrator::new(client.clone(), client, file.clone(), file.clone());

            let plan = orchestrator.update_replication_factor(&topic, replication_factor).await?;
            for (partition, replicas) in plan.iter() {
                println!("{topic}:{partition} -> {replicas:?}");
            }
            println!("Reassignment plan written to '{}'", file.path().display());
        },
        Command::Status {
            topic,
            plan,
            wait,
            interval,
        } => {
            let file = Arc::new(ReassignmentFile::new(plan, client.clone()));
            let orchestrator = Orchestrator::new(client.clone(), client, file.clone(), file);

            if wait {
                orchestrator
                    .await_replication_factor_updated(
                        &topic,
                        Duration::from_secs(interval),
                        shutdown_token,
                    )
                    .await?;
                println!("Reassignment of '{topic}' is complete");
            } else if orchestrator.is_replication_factor_updating(&topic).await? {
                println!("Reassignment of '{topic}' is in progress");
            } else {
                println!("Reassignment of '{topic}' is complete");
            }
        },
    }

    Ok(())
}

fn exit_code_for(e: &ReassignmentError) -> i32 {
    match e {
        _ if e.is_retryable() => exit_code::TEMPORARY_FAILURE,
        ReassignmentError::Planning(_) => exit_code::DATA_ERROR,
        _ => exit_code::FAILURE,
    }
}
