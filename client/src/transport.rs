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

//! Socket ownership and raw line I/O

use crate::{ClientConfig, TransportError, TransportResult};
use async_trait::async_trait;
use avremote_codec::LineCodec;
use bytes::Bytes;
use futures::SinkExt;
use std::net::{Shutdown, SocketAddr};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info, trace};

/// Raw line transport to the receiver
///
/// Implementations never retry internally; every call is one attempt.
#[async_trait]
pub trait Transport: Send {
    /// Writes `code` followed by the line terminator.
    async fn send_line(&mut self, code: &str) -> TransportResult<()>;

    /// Performs one read of at most the configured chunk size.
    ///
    /// Returns [`TransportError::Timeout`] if nothing arrives within `wait` and
    /// [`TransportError::Closed`] at end of stream.
    async fn read_chunk(&mut self, wait: Duration) -> TransportResult<Bytes>;

    /// Shuts down both directions and releases the socket.
    async fn shutdown(&mut self) -> TransportResult<()>;
}

/// TCP transport
///
/// The socket is shut down and closed when [`shutdown`](Transport::shutdown) is
/// called, or when the transport is dropped on an early exit path.
pub struct TcpTransport {
    peer: SocketAddr,
    stream: Option<FramedWrite<TcpStream, LineCodec>>,
    chunk: Vec<u8>,
}

impl TcpTransport {
    /// Opens a connection, bounded by the configured connect timeout.
    pub async fn connect(config: &ClientConfig) -> TransportResult<Self> {
        let address = config.address();
        debug!("Connecting to {}", address);
        let stream = timeout(config.connect_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| TransportError::Timeout(config.connect_timeout))??;
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr()?;
        info!("Connected to {}", peer);
        Ok(Self {
            peer,
            stream: Some(FramedWrite::new(stream, LineCodec::new())),
            chunk: vec![0; config.chunk_size.max(1)],
        })
    }

    /// Address of the connected receiver.
    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn stream(&mut self) -> TransportResult<&mut FramedWrite<TcpStream, LineCodec>> {
        self.stream.as_mut().ok_or(TransportError::Closed)
    }

    fn close_stream(stream: FramedWrite<TcpStream, LineCodec>) -> std::io::Result<()> {
        let stream = stream.into_inner().into_std()?;
        stream.shutdown(Shutdown::Both)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send_line(&mut self, code: &str) -> TransportResult<()> {
        trace!("-> {:?}", code);
        self.stream()?.send(code).await?;
        Ok(())
    }

    async fn read_chunk(&mut self, wait: Duration) -> TransportResult<Bytes> {
        let Self { stream, chunk, .. } = self;
        let socket = stream.as_mut().ok_or(TransportError::Closed)?.get_mut();
        let read = timeout(wait, socket.read(chunk))
            .await
            .map_err(|_| TransportError::Timeout(wait))??;
        if read == 0 {
            return Err(TransportError::Closed);
        }
        trace!("<- {:?}", String::from_utf8_lossy(&chunk[..read]));
        Ok(Bytes::copy_from_slice(&chunk[..read]))
    }

    async fn shutdown(&mut self) -> TransportResult<()> {
        let Some(stream) = self.stream.take() else {
            return Ok(());
        };
        Self::close_stream(stream)?;
        info!("Disconnected from {}", self.peer);
        Ok(())
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            match Self::close_stream(stream) {
                Ok(()) => debug!("Closed connection to {} on drop", self.peer),
                Err(err) => debug!("Shutdown of {} on drop failed: {}", self.peer, err),
            }
        }
    }
}
