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

//! Connection parameter validation and interactive prompting

use crate::CliError;
use std::io::Write;
use std::net::Ipv4Addr;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::debug;

/// Parses a dotted-quad IPv4 address.
pub fn parse_address(input: &str) -> Option<Ipv4Addr> {
    input.trim().parse().ok()
}

/// Parses a port in `1..=65535`.
pub fn parse_port(input: &str) -> Option<u16> {
    input.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

/// Fills in connection parameters, asking on the terminal when allowed.
pub struct Prompter<R> {
    lines: Lines<BufReader<R>>,
    interactive: bool,
}

impl<R: AsyncRead + Unpin> Prompter<R> {
    /// Reads answers from `input`. Without `interactive` nothing is asked.
    pub fn new(input: R, interactive: bool) -> Self {
        Self {
            lines: BufReader::new(input).lines(),
            interactive,
        }
    }

    /// Validated address, from `given` or the terminal.
    pub async fn address(&mut self, given: Option<&str>) -> Result<Ipv4Addr, CliError> {
        if let Some(address) = given.and_then(parse_address) {
            return Ok(address);
        }
        if let Some(given) = given {
            debug!("Unusable address {:?}", given);
        }
        if !self.interactive {
            return Err(CliError::InvalidInput(match given {
                Some(given) => format!("invalid IPv4 address: {given}"),
                None => "no receiver address given (use --address)".to_string(),
            }));
        }
        self.ask("Enter IP Address: ", parse_address).await
    }

    /// Validated port, from `given` or the terminal.
    pub async fn port(&mut self, given: &str) -> Result<u16, CliError> {
        if let Some(port) = parse_port(given) {
            return Ok(port);
        }
        if !self.interactive {
            return Err(CliError::InvalidInput(format!("invalid port: {given}")));
        }
        self.ask("Enter Port: ", parse_port).await
    }

    async fn ask<T>(&mut self, question: &str, parse: fn(&str) -> Option<T>) -> Result<T, CliError> {
        loop {
            eprint!("{question}");
            std::io::stderr().flush()?;
            let Some(answer) = self.lines.next_line().await? else {
                return Err(CliError::InvalidInput(format!(
                    "no answer to \"{}\"",
                    question.trim_end()
                )));
            };
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!("Rejected answer {:?}", answer);
        }
    }
}
