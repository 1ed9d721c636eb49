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

//! Integration tests for the receiver line codec

use avremote_codec::{LineCodec, LineDemux};
use futures::{SinkExt, StreamExt};
use proptest::prelude::*;
use tokio_util::codec::{FramedRead, FramedWrite};

// ============================================================================
// Framed Stream Tests
// ============================================================================

#[tokio::test]
async fn framed_read_yields_lines_in_arrival_order() {
    let input: &[u8] = b"PWON\rMV425\rMVMAX 60\rSIUSB/IPOD\r";
    let lines: Vec<String> = FramedRead::new(input, LineCodec::new())
        .map(|line| line.unwrap())
        .collect()
        .await;
    assert_eq!(lines, vec!["PWON", "MV425", "MVMAX 60", "SIUSB/IPOD"]);
}

#[tokio::test]
async fn framed_read_drops_unterminated_tail_at_eof() {
    let input: &[u8] = b"MUON\rMUOF";
    let lines: Vec<String> = FramedRead::new(input, LineCodec::new())
        .map(|line| line.unwrap())
        .collect()
        .await;
    assert_eq!(lines, vec!["MUON"]);
}

#[tokio::test]
async fn framed_write_appends_terminator() {
    let mut output = Vec::new();
    {
        let mut sink = FramedWrite::new(&mut output, LineCodec::new());
        sink.send("PW?").await.unwrap();
        sink.send("MV05").await.unwrap();
    }
    assert_eq!(output, b"PW?\rMV05\r");
}

// ============================================================================
// Demultiplexer Tests
// ============================================================================

#[test]
fn demux_batched_status_echo_and_notice() {
    let mut demux = LineDemux::new();
    let lines = demux.feed(b"SIBT\rZMON\rPSFRONT SPA\r");
    assert_eq!(lines, vec!["SIBT", "ZMON", "PSFRONT SPA"]);
}

#[test]
fn demux_recovers_from_garbage() {
    let mut demux = LineDemux::with_codec(LineCodec::with_max_length(16));
    assert!(demux.feed(&[b'X'; 32]).is_empty());
    assert_eq!(demux.discarded(), 1);
    assert_eq!(demux.feed(b"PWSTANDBY\r"), vec!["PWSTANDBY"]);
}

// ============================================================================
// Property Tests
// ============================================================================

fn line_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9?/ ]{1,24}"
}

proptest! {
    #[test]
    fn chunk_boundaries_do_not_change_lines(
        lines in prop::collection::vec(line_strategy(), 1..8),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut stream = Vec::new();
        for line in &lines {
            stream.extend_from_slice(line.as_bytes());
            stream.push(b'\r');
        }

        let mut offsets: Vec<usize> = cuts.iter().map(|cut| cut.index(stream.len())).collect();
        offsets.push(0);
        offsets.push(stream.len());
        offsets.sort_unstable();
        offsets.dedup();

        let mut demux = LineDemux::new();
        let mut decoded = Vec::new();
        for window in offsets.windows(2) {
            decoded.extend(demux.feed(&stream[window[0]..window[1]]));
        }

        prop_assert_eq!(decoded, lines);
        prop_assert!(demux.is_empty());
    }
}
