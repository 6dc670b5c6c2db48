use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use rdkafka::ClientConfig;
use tokio::time::Duration;

use kreassign::constants::{DEFAULT_METADATA_TIMEOUT_SECS, DEFAULT_STATUS_POLL_INTERVAL_SECS};

/// Command Line Interface, defined via the declarative,
/// `derive` based functionality of the `clap` crate.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("logging_flags")
        .required(false)
        .multiple(false)
        .args(["verbose", "quiet"]),
))]
pub struct Cli {
    // ------------------------------------------------------------------ Admin Client configuration
    /// Initial Kafka Brokers to connect to (format: 'HOST:PORT,...').
    ///
    /// Equivalent to '--kafka-conf=bootstrap.servers:host:port,...'.
    #[arg(short, long = "brokers", value_name = "BOOTSTRAP_BROKERS")]
    pub bootstrap_brokers: Option<String>,

    /// Client identifier used by the internal Kafka (Admin) Client.
    ///
    /// Equivalent to '--kafka-conf=client.id:my-client-id'.
    #[arg(long = "client-id", value_name = "CLIENT_ID", default_value = env!("CARGO_PKG_NAME"))]
    pub client_id: String,

    /// Additional configuration used by the internal Kafka (Admin) Client (format: 'CONF_KEY:CONF_VAL').
    ///
    /// To set multiple configurations keys, use this argument multiple times.
    /// See: https://github.com/edenhill/librdkafka/blob/master/CONFIGURATION.md.
    #[arg(
        long = "kafka-conf",
        value_name = "CONF_KEY:CONF_VAL",
        value_parser = kv_clap_value_parser,
        verbatim_doc_comment
    )]
    pub kafka_config: Vec<KVPair>,

    /// How long to wait for cluster metadata, in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", default_value = DEFAULT_METADATA_TIMEOUT_SECS)]
    pub metadata_timeout: u64,

    /// Verbose logging.
    ///
    /// * none    = 'WARN'
    /// * '-v'    = 'INFO'
    /// * '-vv'   = 'DEBUG'
    /// * '-vvv'  = 'TRACE'
    ///
    /// Alternatively, set environment variable 'KREASSIGN_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub verbose: u8,

    /// Quiet logging.
    ///
    /// * none    = 'WARN'
    /// * '-q'    = 'ERROR'
    /// * '-qq'   = 'OFF'
    ///
    /// Alternatively, set environment variable 'KREASSIGN_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a new replication factor for a Topic, and write the reassignment JSON.
    ///
    /// The file can then be executed with 'kafka-reassign-partitions.sh --execute'.
    #[command(verbatim_doc_comment)]
    Plan {
        /// Topic to change the replication factor of.
        #[arg(short, long)]
        topic: String,

        /// Replication factor the Topic should have.
        #[arg(short = 'r', long = "replication-factor", value_parser = clap::value_parser!(i32).range(1..))]
        replication_factor: i32,

        /// Where to write the reassignment JSON.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Check if the reassignment described by a reassignment JSON is still in progress.
    Status {
        /// Topic being reassigned.
        #[arg(short, long)]
        topic: String,

        /// Reassignment JSON, as written by the 'plan' command.
        #[arg(short, long, value_name = "FILE")]
        plan: PathBuf,

        /// Keep checking until the reassignment is complete.
        #[arg(short, long)]
        wait: bool,

        /// How often to check, in seconds, when waiting.
        #[arg(
            long,
            value_name = "SECONDS",
            default_value = DEFAULT_STATUS_POLL_INTERVAL_SECS,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval: u64,
    },
}

impl Cli {
    pub fn parse_and_validate() -> Self {
        let cli = Self::parse();

        let has_bootstrap_conf = cli.kafka_config.iter().any(|(k, _)| k == "bootstrap.servers");
        if cli.bootstrap_brokers.is_none() && !has_bootstrap_conf {
            use clap::CommandFactory;
            Self::command()
                .error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "Kafka Brokers to connect to are required: use '--brokers' or '--kafka-conf=bootstrap.servers:...'",
                )
                .exit();
        }

        cli
    }

    pub fn verbosity_level(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout)
    }

    pub fn build_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config.set("client.id", self.client_id.clone());
        if let Some(brokers) = &self.bootstrap_brokers {
            config.set("bootstrap.servers", brokers.clone());
        }
        for cfg in &self.kafka_config {
            config.set(cfg.0.clone(), cfg.1.clone());
        }

        trace!("Created:\n{:#?}", config);
        config
    }
}

/// A simple (key,value) pair of `String`s, useful to be parsed from arguments via [`kv_clap_value_parser`].
pub type KVPair = (String, String);

/// To be used as [`clap::value_parser`] function to create [`KVPair`] values.
fn kv_clap_value_parser(kv: &str) -> Result<KVPair, String> {
    let (k, v) = match kv.split_once(':') {
        None => {
            return Err("Should have 'K:V' format".to_string());
        },
        Some((k, v)) => (k, v),
    };

    Ok((k.to_string(), v.to_string()))
}

#[cfg(test)]
mod test {
    use clap::{CommandFactory, Parser};

    use super::{kv_clap_value_parser, Cli, Command};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_plan() {
        let cli = Cli::try_parse_from([
            "kreassign",
            "--brokers",
            "localhost:9092",
            "--kafka-conf",
            "security.protocol:SASL_SSL",
            "-vv",
            "plan",
            "--topic",
            "orders",
            "-r",
            "3",
            "--output",
            "plan.json",
        ])
        .unwrap();

        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.kafka_config, vec![("security.protocol".to_string(), "SASL_SSL".to_string())]);
        assert!(matches!(
            cli.command,
            Command::Plan { ref topic, replication_factor: 3, .. } if topic == "orders"
        ));

        let config = cli.build_client_config();
        assert_eq!(config.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(config.get("client.id"), Some("kreassign"));
        assert_eq!(config.get("security.protocol"), Some("SASL_SSL"));
    }

    #[test]
    fn reject_replication_factor_below_one() {
        let res = Cli::try_parse_from([
            "kreassign", "-b", "k:9092", "plan", "-t", "orders", "-r", "0", "-o", "plan.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from([
            "kreassign", "-q", "status", "-t", "orders", "-p", "plan.json", "--wait",
        ])
        .unwrap();

        assert_eq!(cli.verbosity_level(), -1);
        assert!(matches!(cli.command, Command::Status { wait: true, interval: 5, .. }));
    }

    #[test]
    fn reject_zero_status_interval() {
        let res = Cli::try_parse_from([
            "kreassign", "-b", "k:9092", "status", "-t", "orders", "-p", "plan.json", "--wait", "--interval", "0",
        ]);
        assert!(res.is_err());

        let cli = Cli::try_parse_from([
            "kreassign", "-b", "k:9092", "status", "-t", "orders", "-p", "plan.json", "--interval", "1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Status { interval: 1, .. }));
    }

    #[test]
    fn kv_pairs() {
        assert_eq!(kv_clap_value_parser("a:b:c"), Ok(("a".to_string(), "b:c".to_string())));
        assert!(kv_clap_value_parser("no-separator").is_err());
    }
}
