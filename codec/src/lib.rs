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

//! # AV Receiver Line Codec
//!
//! The receiver control protocol is a stream of ASCII lines, each terminated by a
//! single carriage return (`\r`). Replies carry no framing beyond the terminator and
//! the device happily packs several lines into one TCP segment, or splits one line
//! across two segments.
//!
//! This crate provides two views of the same framing rules:
//!
//! - [`LineCodec`] implements [`Decoder`] and [`Encoder`] from `tokio_util::codec`
//!   so it can sit under a `FramedRead`/`FramedWrite`.
//! - [`LineDemux`] is a stand-alone accumulator for callers that read raw chunks
//!   themselves: [`LineDemux::feed`] returns every complete line in arrival order
//!   and keeps any unterminated tail for the next call.
//!
//! ## Usage Example
//!
//! ```rust
//! use avremote_codec::LineDemux;
//!
//! let mut demux = LineDemux::new();
//! let lines = demux.feed(b"MV42\rMVMAX 60\rPW");
//! assert_eq!(lines, vec!["MV42".to_string(), "MVMAX 60".to_string()]);
//!
//! let lines = demux.feed(b"ON\r");
//! assert_eq!(lines, vec!["PWON".to_string()]);
//! ```
//!
//! [`Decoder`]: tokio_util::codec::Decoder
//! [`Encoder`]: tokio_util::codec::Encoder

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod codec;
mod consts;
mod demux;
mod result;

pub use self::codec::LineCodec;
pub use self::consts::{LINE_FEED, MAX_LINE_LENGTH, TERMINATOR};
pub use self::demux::LineDemux;
pub use self::result::{CodecError, CodecResult};
