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

use crate::codec::LineCodec;
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::warn;

/// Stateful line accumulator for chunked reads.
///
/// Every call to [`feed`](LineDemux::feed) appends raw bytes and returns all
/// lines completed by them, oldest first. Bytes after the last terminator are
/// retained until a later chunk completes them.
#[derive(Debug, Default)]
pub struct LineDemux {
    codec: LineCodec,
    buffer: BytesMut,
    discarded: usize,
}

impl LineDemux {
    /// Creates an empty demultiplexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty demultiplexer around a preconfigured codec.
    #[must_use]
    pub fn with_codec(codec: LineCodec) -> Self {
        Self {
            codec,
            buffer: BytesMut::new(),
            discarded: 0,
        }
    }

    /// Appends `bytes` and returns every complete line now available.
    ///
    /// A line longer than the codec's limit is dropped with a warning and
    /// counted in [`discarded`](LineDemux::discarded); decoding carries on
    /// with the bytes after it, so no complete line is lost.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut lines = Vec::new();
        loop {
            match self.codec.decode(&mut self.buffer) {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => return lines,
                Err(err) => {
                    self.discarded += 1;
                    warn!("Discarding unreadable line: {}", err);
                }
            }
        }
    }

    /// Number of lines dropped as unreadable so far.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Bytes received after the last terminator.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns `true` if no partial line is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops any buffered partial line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.codec = LineCodec::with_max_length(self.codec.max_length());
    }
}
