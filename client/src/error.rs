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

//! Client error types

use avremote_codec::CodecError;
use avremote_protocol::ProtocolError;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type for transport operations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Low level socket failure
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error from the underlying TCP stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Nothing happened within the allowed time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Receiver closed the connection
    #[error("connection closed by receiver")]
    Closed,

    /// Outgoing line could not be framed
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl TransportError {
    /// Check if the error is a timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Failure of a single control invocation
///
/// Every variant is terminal for the invocation. A receiver in standby is not
/// an error: gated commands return the power reading instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Socket could not reach the receiver
    #[error("could not connect to {address}")]
    ConnectFailed {
        /// `host:port` that was dialled
        address: String,
        /// Underlying failure
        #[source]
        source: TransportError,
    },

    /// Writing a command failed after the connection was established
    #[error("failed to send {code} to {address}")]
    SendFailed {
        /// `host:port` of the receiver
        address: String,
        /// Code being transmitted
        code: String,
        /// Underlying failure
        #[source]
        source: TransportError,
    },

    /// No qualifying reply arrived
    #[error("no reply to {query} from {address}")]
    ReceiveFailed {
        /// `host:port` of the receiver
        address: String,
        /// Code whose reply was awaited
        query: String,
        /// Underlying failure
        #[source]
        source: TransportError,
    },

    /// The request itself was invalid
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Check if the error is a connection failure
    #[must_use]
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, ClientError::ConnectFailed { .. })
    }

    /// Check if the error is a transmission failure
    #[must_use]
    pub fn is_send_failure(&self) -> bool {
        matches!(self, ClientError::SendFailed { .. })
    }

    /// Check if the error is a receive failure
    #[must_use]
    pub fn is_receive_failure(&self) -> bool {
        matches!(self, ClientError::ReceiveFailed { .. })
    }

    /// Process exit status for this failure
    ///
    /// `2` invalid input, `3` connect, `4` send, `5` receive.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Protocol(_) => 2,
            ClientError::ConnectFailed { .. } => 3,
            ClientError::SendFailed { .. } => 4,
            ClientError::ReceiveFailed { .. } => 5,
        }
    }
}
