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

//! Session lifecycle: connect, run one request, close

use crate::matcher::ResponseMatcher;
use crate::resolver::{Outcome, Resolver};
use crate::transport::{TcpTransport, Transport};
use crate::{ClientConfig, ClientError, Result};
use avremote_protocol::{Action, Category, CommandCode, Reading, StatusPayload};
use tracing::{debug, info, warn};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connected and active
    Connected,
    /// Socket shut down
    Closed,
}

/// One unit of work for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Resolve a logical action through the gate and toggle rules
    Control {
        /// Target category
        category: Category,
        /// Requested action
        action: Action,
    },
    /// Send a literal code and report the first reply sharing its prefix
    Passthrough(CommandCode),
}

impl Request {
    /// Control request.
    #[must_use]
    pub fn control(category: Category, action: Action) -> Self {
        Request::Control { category, action }
    }

    /// Passthrough request.
    #[must_use]
    pub fn passthrough(code: CommandCode) -> Self {
        Request::Passthrough(code)
    }
}

/// Final result of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Resolved control request
    Control(Outcome),
    /// Raw reply to a passthrough code
    Passthrough(StatusPayload),
}

impl Response {
    /// Display form of the response.
    #[must_use]
    pub fn reading(&self) -> Reading {
        match self {
            Response::Control(outcome) => outcome.reading(),
            Response::Passthrough(payload) => Reading::raw(payload),
        }
    }

    /// Final status line as received.
    #[must_use]
    pub fn payload(&self) -> &StatusPayload {
        match self {
            Response::Control(outcome) => &outcome.payload,
            Response::Passthrough(payload) => payload,
        }
    }
}

/// A connected session, live for one request.
pub struct Session<T: Transport> {
    matcher: ResponseMatcher<T>,
    resolver: Resolver,
    state: ConnectionState,
}

impl<T: Transport> Session<T> {
    /// Wraps an already connected transport.
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            matcher: ResponseMatcher::new(transport, config),
            resolver: Resolver::new(config.gating),
            state: ConnectionState::Connected,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Runs a request to completion.
    pub async fn execute(&mut self, request: &Request) -> Result<Response> {
        match request {
            Request::Control { category, action } => {
                self.control(*category, action).await.map(Response::Control)
            }
            Request::Passthrough(code) => self.passthrough(code).await.map(Response::Passthrough),
        }
    }

    /// Resolves `action` for `category`.
    pub async fn control(&mut self, category: Category, action: &Action) -> Result<Outcome> {
        debug!("Resolving {} {}", category, action);
        self.resolver
            .resolve(&mut self.matcher, category, action)
            .await
    }

    /// Sends `code` verbatim, without gating or toggle logic.
    pub async fn passthrough(&mut self, code: &CommandCode) -> Result<StatusPayload> {
        debug!("Passing through {}", code);
        self.matcher.exchange(code).await
    }

    /// Shuts the socket down. Failures are logged, never returned.
    pub async fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        if let Err(err) = self.matcher.shutdown().await {
            warn!("Error shutting down connection: {}", err);
        }
        self.state = ConnectionState::Closed;
    }

    /// Borrows the transport.
    pub fn transport(&self) -> &T {
        self.matcher.transport()
    }
}

/// Receiver control client
///
/// Each [`execute`](AvrClient::execute) opens its own connection and closes it
/// before returning, whether the request succeeded or not.
#[derive(Debug, Clone)]
pub struct AvrClient {
    config: ClientConfig,
}

impl AvrClient {
    /// Create a new client with the given configuration
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Get the client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Opens a session over TCP.
    pub async fn connect(&self) -> Result<Session<TcpTransport>> {
        let transport = TcpTransport::connect(&self.config)
            .await
            .map_err(|source| ClientError::ConnectFailed {
                address: self.config.address(),
                source,
            })?;
        Ok(Session::new(transport, &self.config))
    }

    /// Connects, runs `request` and closes the connection.
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        let mut session = self.connect().await?;
        let result = session.execute(request).await;
        session.close().await;
        match &result {
            Ok(response) => info!("{} answered {}", self.config.address(), response.payload()),
            Err(err) => debug!("Request to {} failed: {}", self.config.address(), err),
        }
        result
    }
}
