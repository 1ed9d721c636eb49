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

//! # AV Receiver Control Protocol
//!
//! Rule tables and pure decision helpers for the receiver's line protocol.
//! Nothing in this crate performs I/O.
//!
//! ## Wire Format
//!
//! Commands and replies are ASCII lines terminated by `\r`. Every code starts
//! with a two-letter category prefix:
//!
//! | Category | Prefix | Status query | Example command |
//! |----------|--------|--------------|-----------------|
//! | power    | `PW`   | `PW?`        | `PWON`          |
//! | volume   | `MV`   | `MV?`        | `MV42`, `MVUP`  |
//! | mute     | `MU`   | `MU?`        | `MUON`          |
//! | source   | `SI`   | `SI?`        | `SIBT`          |
//! | mode     | `MS`   | `MS?`        | `MSSTEREO`      |
//!
//! Replies echo the prefix followed by the current value. There is no
//! request/response correlation: a reply is recognised purely by prefix, with
//! the `MVMAX` announcement excluded (see [`ReplyFilter`]).
//!
//! ## Example
//!
//! ```rust
//! use avremote_protocol::{Action, Category, Reading, StatusPayload};
//!
//! let action = Action::parse(Category::Volume, "42").unwrap();
//! let code = action.fixed_code(Category::Volume).unwrap().unwrap();
//! assert_eq!(code.as_str(), "MV42");
//!
//! let reading = Reading::format(Category::Volume, &StatusPayload::new("MV425"));
//! assert_eq!(reading.to_string(), "Volume Level: 42.5");
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod action;
mod category;
mod error;
mod format;
mod gating;
mod payload;

pub use self::action::{Action, CommandCode, VolumeLevel};
pub use self::category::{
    Category, CategoryRules, MAX_VOLUME_PREFIX, POWER_ON, POWER_STANDBY, STANDBY, TogglePair,
};
pub use self::error::{ProtocolError, ProtocolResult};
pub use self::format::{RESPONSE_LABEL, Reading};
pub use self::gating::GatingPolicy;
pub use self::payload::{ReplyFilter, StatusPayload};
