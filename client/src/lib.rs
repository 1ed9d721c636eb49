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

//! # AV Receiver Control Client
//!
//! Command/response negotiation over the receiver's line protocol: one TCP
//! connection per request, status replies matched by prefix, toggles resolved
//! against the observed state, and commands suppressed while the receiver is
//! in standby.
//!
//! ## Features
//!
//! - **Prefix Matching** - Unrelated status lines are skipped, `MVMAX` is never an answer
//! - **Bounded Waits** - Quiet receivers are re-queried a fixed number of times
//! - **Power Gating** - Volume, mute, source and mode report power instead when off
//! - **Idempotent** - A command matching the observed state is not sent again
//! - **Scoped Sockets** - The connection is shut down on every exit path
//!
//! ## Quick Start
//!
//! ```no_run
//! use avremote_client::{AvrClient, ClientConfig, Request};
//! use avremote_protocol::{Action, Category};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AvrClient::new(ClientConfig::new("10.0.0.5", 23));
//!     let action = Action::parse(Category::Power, "toggle")?;
//!     let response = client.execute(&Request::control(Category::Power, action)).await?;
//!     println!("{}", response.reading());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Transports
//!
//! [`Session`] runs over anything implementing [`Transport`], which is how the
//! negotiation logic is driven without a socket.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod client;
mod config;
mod error;
mod matcher;
mod resolver;
#[cfg(test)]
mod testing;
mod transport;

pub use client::{AvrClient, ConnectionState, Request, Response, Session};
pub use config::ClientConfig;
pub use error::{ClientError, Result, TransportError, TransportResult};
pub use matcher::ResponseMatcher;
pub use resolver::{Outcome, Phase, Resolver};
pub use transport::{TcpTransport, Transport};
