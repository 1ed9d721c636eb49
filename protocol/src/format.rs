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

//! Human readable rendering of status replies

use crate::category::STANDBY;
use crate::{Category, StatusPayload};
use std::fmt;

/// Label used for raw passthrough replies.
pub const RESPONSE_LABEL: &str = "Response:";

/// Formatted result: a display label and a display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Label such as `Power State:`.
    pub label: &'static str,
    /// Display value such as `ON` or `42.5`.
    pub value: String,
}

impl Reading {
    /// Formats `payload` as the answer to a `requested` category command.
    ///
    /// A standby value is always labelled as a power reading, since it means
    /// the command was gated and the power state came back instead.
    #[must_use]
    pub fn format(requested: Category, payload: &StatusPayload) -> Self {
        let raw = payload.value();
        if raw == STANDBY {
            return Self {
                label: Category::Power.label(),
                value: STANDBY.to_string(),
            };
        }
        let value = match requested {
            Category::Volume => format_volume(raw),
            Category::Source => requested
                .display_name(raw)
                .map_or_else(|| raw.to_string(), str::to_string),
            Category::Mode => requested
                .display_name(raw)
                .map_or_else(|| capitalize(raw), str::to_string),
            Category::Power | Category::Mute => raw.to_string(),
        };
        Self {
            label: requested.label(),
            value,
        }
    }

    /// Wraps an unprocessed passthrough reply.
    #[must_use]
    pub fn raw(payload: &StatusPayload) -> Self {
        Self {
            label: RESPONSE_LABEL,
            value: payload.as_str().to_string(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

/// `425` reads as `42.5`, `07` as `7`; anything else passes through.
fn format_volume(raw: &str) -> String {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    match raw.len() {
        3 => {
            let whole = raw[..2].parse::<u8>().unwrap_or_default();
            format!("{}.{}", whole, &raw[2..])
        }
        2 => raw.parse::<u8>().map_or_else(|_| raw.to_string(), |level| level.to_string()),
        _ => raw.to_string(),
    }
}

fn capitalize(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
