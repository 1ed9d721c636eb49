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

//! Correlating sent codes with the lines that answer them
//!
//! The receiver tags nothing: replies are recognised by prefix alone, and
//! unrelated status lines may arrive at any time. The matcher owns the line
//! demultiplexer so that lines split across reads, or several lines in one
//! read, are each seen exactly once.

use crate::transport::Transport;
use crate::{ClientConfig, ClientError, Result, TransportError, TransportResult};
use avremote_codec::LineDemux;
use avremote_protocol::{Category, CommandCode, ReplyFilter, StatusPayload};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Sends codes and waits for their replies over a [`Transport`].
pub struct ResponseMatcher<T> {
    transport: T,
    address: String,
    demux: LineDemux,
    pending: VecDeque<String>,
    read_timeout: Duration,
    response_timeout: Duration,
    drain_timeout: Duration,
    max_attempts: usize,
}

impl<T: Transport> ResponseMatcher<T> {
    /// Wraps a connected transport.
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            address: config.address(),
            demux: LineDemux::new(),
            pending: VecDeque::new(),
            read_timeout: config.read_timeout,
            response_timeout: config.response_timeout,
            drain_timeout: config.drain_timeout,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Transmits `code` once.
    pub async fn send(&mut self, code: &CommandCode) -> Result<()> {
        debug!("Sending {}", code);
        self.transport
            .send_line(code.as_str())
            .await
            .map_err(|source| ClientError::SendFailed {
                address: self.address.clone(),
                code: code.to_string(),
                source,
            })
    }

    /// Sends `query` and returns the first line accepted by `filter`.
    ///
    /// Lines that do not qualify are discarded. When a read stays quiet the
    /// query is sent again, up to the configured attempt count. The whole wait is
    /// bounded by the response timeout.
    pub async fn await_status(
        &mut self,
        query: &CommandCode,
        filter: &ReplyFilter,
    ) -> Result<StatusPayload> {
        let deadline = Instant::now() + self.response_timeout;
        let mut attempts = 0;
        loop {
            self.send(query).await?;
            attempts += 1;
            match self.wait_for(filter, deadline).await {
                Ok(payload) => return Ok(payload),
                Err(TransportError::Timeout(waited))
                    if attempts < self.max_attempts && Instant::now() < deadline =>
                {
                    debug!(
                        "No {} reply after {:?}, asking again ({}/{})",
                        filter.prefix(),
                        waited,
                        attempts + 1,
                        self.max_attempts
                    );
                }
                Err(source) => {
                    return Err(ClientError::ReceiveFailed {
                        address: self.address.clone(),
                        query: query.to_string(),
                        source,
                    });
                }
            }
        }
    }

    /// Queries the current state of `category`.
    pub async fn query(&mut self, category: Category) -> Result<StatusPayload> {
        let query = CommandCode::from_static(category.status_query());
        self.await_status(&query, &ReplyFilter::for_category(category))
            .await
    }

    /// Reads one more line without sending anything.
    ///
    /// Returns `None` if nothing complete arrives within the drain timeout.
    pub async fn receive_only(&mut self) -> Result<Option<String>> {
        let deadline = Instant::now() + self.drain_timeout;
        match self.next_line(deadline).await {
            Ok(line) => Ok(Some(line)),
            Err(TransportError::Timeout(_)) => Ok(None),
            Err(source) => Err(ClientError::ReceiveFailed {
                address: self.address.clone(),
                query: "(unsolicited)".to_string(),
                source,
            }),
        }
    }

    /// Sends an arbitrary code and returns the first reply with its prefix.
    ///
    /// Query codes are repeated like [`await_status`](Self::await_status). Other
    /// codes are sent exactly once, so a quiet receiver fails the exchange
    /// rather than repeating a state change.
    pub async fn exchange(&mut self, code: &CommandCode) -> Result<StatusPayload> {
        let filter = ReplyFilter::for_code(code);
        if code.is_query() {
            return self.await_status(code, &filter).await;
        }
        self.send(code).await?;
        let deadline = Instant::now() + self.response_timeout;
        self.wait_for(&filter, deadline)
            .await
            .map_err(|source| ClientError::ReceiveFailed {
                address: self.address.clone(),
                query: code.to_string(),
                source,
            })
    }

    /// Returns a line taken by [`receive_only`](Self::receive_only) so that the
    /// next wait sees it first.
    pub(crate) fn requeue(&mut self, line: String) {
        self.pending.push_front(line);
    }

    /// Drops lines received but not yet consumed.
    ///
    /// Called after a state change is sent, so that a late duplicate of the
    /// earlier state cannot pass as its confirmation.
    pub fn discard_pending(&mut self) -> usize {
        let stale = self.pending.len();
        for line in self.pending.drain(..) {
            debug!("Discarding stale {:?}", line);
        }
        stale
    }

    /// Closes the underlying transport.
    pub async fn shutdown(&mut self) -> TransportResult<()> {
        self.pending.clear();
        self.demux.clear();
        self.transport.shutdown().await
    }

    /// Borrows the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Waits for one attempt's worth of reads for a qualifying line.
    async fn wait_for(
        &mut self,
        filter: &ReplyFilter,
        deadline: Instant,
    ) -> TransportResult<StatusPayload> {
        let read_deadline = deadline.min(Instant::now() + self.read_timeout);
        loop {
            let line = self.next_line(read_deadline).await?;
            if filter.accepts(&line) {
                trace!("Matched {:?} for {}", line, filter.prefix());
                return Ok(StatusPayload::new(line));
            }
            debug!("Discarding {:?} while waiting for {}", line, filter.prefix());
        }
    }

    async fn next_line(&mut self, deadline: Instant) -> TransportResult<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Ok(line);
            }
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() {
                return Err(TransportError::Timeout(wait));
            }
            let chunk = self.transport.read_chunk(wait).await?;
            self.absorb(&chunk);
        }
    }

    fn absorb(&mut self, chunk: &[u8]) {
        let lines = self.demux.feed(chunk);
        self.pending.extend(lines);
    }
}
