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

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur while framing receiver lines.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An I/O error occurred on the underlying stream.
    ///
    /// Required by `tokio_util::codec`, which funnels stream errors through the
    /// codec's error type.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No terminator arrived within the configured maximum line length.
    ///
    /// The buffered bytes are discarded when this is returned, so the codec is
    /// ready to resynchronise on the next terminator.
    #[error("line of {length} bytes exceeds the {max} byte limit")]
    LineTooLong {
        /// Number of bytes buffered without a terminator
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// An outgoing code contained a byte that would break framing.
    #[error("code {code:?} contains a control character")]
    InvalidCode {
        /// The rejected code
        code: String,
    },
}
