//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! `avremote` command line remote
//!
//! Prints one line per invocation, `[<address>] <label> <value>`, on stdout.
//! Logs go to stderr.
//!
//! | Exit | Meaning             |
//! |------|---------------------|
//! | 0    | success             |
//! | 2    | invalid input       |
//! | 3    | connection failed   |
//! | 4    | send failed         |
//! | 5    | no reply            |
//! | 130  | interrupted         |

mod args;
mod prompt;

use crate::args::{Cli, Command};
use crate::prompt::Prompter;
use avremote_client::{AvrClient, ClientConfig, ClientError};
use avremote_protocol::{Category, Reading};
use clap::Parser;
use std::error::Error as _;
use std::io::IsTerminal;
use std::net::Ipv4Addr;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Exit status for a user interrupt.
const EXIT_INTERRUPTED: u8 = 130;

/// Failure of one invocation
#[derive(Debug, Error)]
pub enum CliError {
    /// Unusable connection parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Terminal I/O failed while prompting
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// The receiver session failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Ctrl-C
    #[error("interrupted")]
    Interrupted,
}

impl CliError {
    /// Process exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidInput(_) => 2,
            CliError::Io(_) => 1,
            CliError::Client(err) => u8::try_from(err.exit_code()).unwrap_or(1),
            CliError::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        tokio::select! {
            result = run(&cli) => result,
            _ = tokio::signal::ctrl_c() => Err(CliError::Interrupted),
        }
    });
    // A pending terminal read must not hold the process open.
    runtime.shutdown_background();

    match result {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<String, CliError> {
    let interactive = std::io::stdin().is_terminal();
    let mut prompter = Prompter::new(tokio::io::stdin(), interactive);
    let address = prompter.address(cli.address.as_deref()).await?;
    let port = prompter.port(&cli.port).await?;

    let config = client_config(cli, address, port);
    let request = Command::request(cli.command.as_ref());
    debug!("Executing {:?} against {}", request, config.address());
    let response = AvrClient::new(config).execute(&request).await?;
    Ok(result_line(address, &response.reading()))
}

/// Session settings from the command line.
///
/// Every query gets `--timeout` per read and `--attempts` sends, so the overall
/// wait for one reply is their product.
fn client_config(cli: &Cli, address: Ipv4Addr, port: u16) -> ClientConfig {
    let timeout = Duration::from_secs(cli.timeout.max(1));
    let sends = u32::try_from(cli.attempts.max(1)).unwrap_or(u32::MAX);
    ClientConfig::new(address.to_string(), port)
        .with_connect_timeout(timeout)
        .with_read_timeout(timeout)
        .with_max_attempts(cli.attempts)
        .with_response_timeout(timeout.saturating_mul(sends))
        .with_category_gating(Category::Mode, !cli.ungated_mode)
}

fn result_line(address: Ipv4Addr, reading: &Reading) -> String {
    format!("[{address}] {reading}")
}

fn init_logging(debug: u8) {
    let filter = match debug {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &CliError) {
    if matches!(err, CliError::Interrupted) {
        eprintln!();
        eprintln!("Interrupted");
        return;
    }
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    eprintln!("Error: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use avremote_client::TransportError;
    use avremote_protocol::StatusPayload;

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::InvalidInput(String::new()).exit_code(), 2);
        assert_eq!(CliError::Interrupted.exit_code(), 130);
        let err = CliError::from(ClientError::ReceiveFailed {
            address: "10.0.0.5:23".to_string(),
            query: "PW?".to_string(),
            source: TransportError::Closed,
        });
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.to_string(), "no reply to PW? from 10.0.0.5:23");
    }

    #[test]
    fn response_wait_covers_every_send() {
        let cli = Cli::try_parse_from(["avremote", "--timeout", "2", "--attempts", "4"]).unwrap();
        let config = client_config(&cli, Ipv4Addr::new(10, 0, 0, 5), 23);
        assert_eq!(config.address(), "10.0.0.5:23");
        assert_eq!(config.read_timeout, Duration::from_secs(2));
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.response_timeout, Duration::from_secs(8));
    }

    #[test]
    fn zero_sends_still_waits_one_timeout() {
        let cli = Cli::try_parse_from(["avremote", "--timeout", "3", "--attempts", "0"]).unwrap();
        let config = client_config(&cli, Ipv4Addr::LOCALHOST, 2323);
        assert_eq!(config.response_timeout, Duration::from_secs(3));
    }

    #[test]
    fn result_line_prefixes_the_address() {
        let power = Reading::format(Category::Power, &StatusPayload::new("PWON"));
        assert_eq!(
            result_line(Ipv4Addr::new(10, 0, 0, 5), &power),
            "[10.0.0.5] Power State: ON"
        );
        let volume = Reading::format(Category::Volume, &StatusPayload::new("MV425"));
        assert_eq!(
            result_line(Ipv4Addr::new(192, 168, 1, 20), &volume),
            format!("[192.168.1.20] {volume}")
        );
    }
}
