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

//! In-memory receiver for unit tests

use crate::transport::Transport;
use crate::{TransportError, TransportResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::time::Duration;

/// Simulated receiver that answers scripted codes and records every send.
///
/// Each sent code is compared with the head of the script; on a match the
/// scripted bytes become readable. Unscripted codes get no answer, so reads
/// time out exactly as a silent device would.
#[derive(Debug)]
pub(crate) struct ScriptedReceiver {
    script: VecDeque<(String, Vec<u8>)>,
    outgoing: VecDeque<u8>,
    sent: Vec<String>,
    failing: Option<String>,
    chunk_size: usize,
    closing: bool,
    shut_down: bool,
}

impl ScriptedReceiver {
    pub(crate) fn new() -> Self {
        Self {
            script: VecDeque::new(),
            outgoing: VecDeque::new(),
            sent: Vec::new(),
            failing: None,
            chunk_size: 64,
            closing: false,
            shut_down: false,
        }
    }

    pub(crate) fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Answers the next `code` with `data`.
    pub(crate) fn reply(mut self, code: &str, data: &str) -> Self {
        self.script
            .push_back((code.to_string(), data.as_bytes().to_vec()));
        self
    }

    /// Makes `data` readable before anything is sent.
    pub(crate) fn unsolicited(mut self, data: &str) -> Self {
        self.outgoing.extend(data.as_bytes());
        self
    }

    /// Fails the write of `code`.
    pub(crate) fn failing_send(mut self, code: &str) -> Self {
        self.failing = Some(code.to_string());
        self
    }

    /// Reports end of stream once all readable bytes are consumed.
    pub(crate) fn closing(mut self) -> Self {
        self.closing = true;
        self
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.clone()
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

#[async_trait]
impl Transport for ScriptedReceiver {
    async fn send_line(&mut self, code: &str) -> TransportResult<()> {
        if self.shut_down || self.failing.as_deref() == Some(code) {
            return Err(TransportError::Closed);
        }
        self.sent.push(code.to_string());
        if self.script.front().is_some_and(|(expected, _)| expected == code) {
            if let Some((_, data)) = self.script.pop_front() {
                self.outgoing.extend(data);
            }
        }
        Ok(())
    }

    async fn read_chunk(&mut self, wait: Duration) -> TransportResult<Bytes> {
        if self.shut_down {
            return Err(TransportError::Closed);
        }
        if !self.outgoing.is_empty() {
            let take = self.chunk_size.min(self.outgoing.len());
            let chunk: Vec<u8> = self.outgoing.drain(..take).collect();
            return Ok(Bytes::from(chunk));
        }
        if self.closing {
            return Err(TransportError::Closed);
        }
        tokio::time::sleep(wait).await;
        Err(TransportError::Timeout(wait))
    }

    async fn shutdown(&mut self) -> TransportResult<()> {
        self.shut_down = true;
        Ok(())
    }
}
