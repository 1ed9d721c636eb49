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

use crate::consts::{LINE_FEED, MAX_LINE_LENGTH, TERMINATOR};
use crate::result::CodecError;
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Carriage-return delimited line codec.
///
/// Decodes a byte stream into one `String` per `\r`-terminated line and encodes
/// command codes by appending the terminator. Empty lines (a bare `\r`, or a
/// `\r\n` pair split across lines) are skipped.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Maximum accepted line length, excluding the terminator.
    max_length: usize,
    /// Offset into the buffer already scanned for a terminator.
    next_index: usize,
}

impl LineCodec {
    /// Creates a codec with the default [`MAX_LINE_LENGTH`] limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    /// Creates a codec that rejects lines longer than `max_length` bytes.
    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
        }
    }

    /// Returns the configured maximum line length.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn discard(&mut self, src: &mut BytesMut) -> CodecError {
        let length = src.len();
        src.clear();
        self.next_index = 0;
        CodecError::LineTooLong {
            length,
            max: self.max_length,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_line_feeds(mut bytes: &[u8]) -> &[u8] {
    while let [LINE_FEED, rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., LINE_FEED] = bytes {
        bytes = rest;
    }
    bytes
}

fn to_text(bytes: &[u8]) -> String {
    if bytes.is_ascii() {
        bytes.iter().map(|b| char::from(*b)).collect()
    } else {
        warn!("Received non-ASCII line: {:02X?}", bytes);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = CodecError;

    /// Splits the next complete line off the front of `src`.
    ///
    /// Returns `Ok(None)` when no terminator is buffered yet; the partial line
    /// stays in `src` and scanning resumes where it left off on the next call.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        loop {
            let scan_from = self.next_index.min(src.len());
            let Some(offset) = src[scan_from..].iter().position(|b| *b == TERMINATOR) else {
                if src.len() > self.max_length {
                    return Err(self.discard(src));
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let end = scan_from + offset;
            self.next_index = 0;
            if end > self.max_length {
                src.advance(end + 1);
                return Err(CodecError::LineTooLong {
                    length: end,
                    max: self.max_length,
                });
            }

            let frame = src.split_to(end + 1);
            let line = trim_line_feeds(&frame[..end]);
            if line.is_empty() {
                continue;
            }
            let line = to_text(line);
            trace!("Decoded line {:?}", line);
            return Ok(Some(line));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if !src.is_empty() {
            trace!("Dropping {} unterminated bytes at end of stream", src.len());
            src.clear();
            self.next_index = 0;
        }
        Ok(None)
    }
}

impl Encoder<&str> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.bytes().any(|b| b.is_ascii_control()) {
            return Err(CodecError::InvalidCode {
                code: item.to_string(),
            });
        }
        dst.reserve(item.len() + 1);
        dst.put_slice(item.as_bytes());
        dst.put_u8(TERMINATOR);
        Ok(())
    }
}

impl Encoder<String> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(item.as_str(), dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(codec: &mut LineCodec, buffer: &mut BytesMut) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = codec.decode(buffer).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn decodes_batched_lines_in_order() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::from("MV425\rMVMAX 60\rZMON\r");
        assert_eq!(
            decode_all(&mut codec, &mut buffer),
            vec!["MV425", "MVMAX 60", "ZMON"]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn keeps_partial_tail() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::from("SIBT\rSID");
        assert_eq!(decode_all(&mut codec, &mut buffer), vec!["SIBT"]);
        assert_eq!(&buffer[..], b"SID");

        buffer.extend_from_slice(b"VD\r");
        assert_eq!(decode_all(&mut codec, &mut buffer), vec!["SIDVD"]);
    }

    #[test]
    fn skips_empty_lines_and_line_feeds() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::from("\r\nPWON\r\n\r");
        assert_eq!(decode_all(&mut codec, &mut buffer), vec!["PWON"]);
    }

    #[test]
    fn rejects_overlong_partial_line() {
        let mut codec = LineCodec::with_max_length(8);
        let mut buffer = BytesMut::from("ABCDEFGHIJKL");
        let err = codec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, CodecError::LineTooLong { length: 12, max: 8 }));
        assert!(buffer.is_empty());

        buffer.extend_from_slice(b"MUON\r");
        assert_eq!(codec.decode(&mut buffer).unwrap(), Some("MUON".to_string()));
    }

    #[test]
    fn rejects_overlong_terminated_line_and_resumes() {
        let mut codec = LineCodec::with_max_length(4);
        let mut buffer = BytesMut::from("MSDOLBY\rMUON\r");
        assert!(codec.decode(&mut buffer).is_err());
        assert_eq!(codec.decode(&mut buffer).unwrap(), Some("MUON".to_string()));
    }

    #[test]
    fn eof_drops_partial_line() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::from("PWON\rPWST");
        assert_eq!(codec.decode_eof(&mut buffer).unwrap(), Some("PWON".to_string()));
        assert_eq!(codec.decode_eof(&mut buffer).unwrap(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn encode_rejects_embedded_terminator() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::new();
        assert!(codec.encode("PWON\r", &mut buffer).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    #[tracing_test::traced_test]
    fn non_ascii_line_is_decoded_lossily() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::from(&b"SI\xE9\r"[..]);
        assert_eq!(decode_all(&mut codec, &mut buffer), vec!["SI\u{FFFD}"]);
        assert!(logs_contain("non-ASCII"));
    }

    #[test]
    fn encode_owned_string() {
        let mut codec = LineCodec::new();
        let mut buffer = BytesMut::new();
        codec.encode(String::from("MV42"), &mut buffer).unwrap();
        assert_eq!(&buffer[..], b"MV42\r");
    }
}
