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

//! Status replies and reply recognition

use crate::category::{MAX_VOLUME_PREFIX, POWER_ON, STANDBY};
use crate::{Category, CommandCode};
use std::fmt;

/// A status line reported by the receiver, terminator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPayload {
    line: String,
}

impl StatusPayload {
    /// Wraps a received line.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// Full line, prefix included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Two-letter prefix, or the whole line if it is shorter.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.line.get(..2).unwrap_or(&self.line)
    }

    /// Everything after the prefix.
    #[must_use]
    pub fn value(&self) -> &str {
        self.line.get(2..).unwrap_or_default().trim_end()
    }

    /// Category owning the prefix, if known.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_line(&self.line)
    }

    /// Returns `true` for the unsolicited maximum-volume announcement.
    #[must_use]
    pub fn is_max_volume(&self) -> bool {
        self.line.starts_with(MAX_VOLUME_PREFIX)
    }

    /// Returns `true` if the value is the standby sentinel.
    #[must_use]
    pub fn is_standby(&self) -> bool {
        self.value() == STANDBY
    }

    /// Returns `true` for the exact power-on reply.
    #[must_use]
    pub fn is_power_on(&self) -> bool {
        self.line == POWER_ON
    }

    /// Returns `true` if the reported state already equals `code`.
    #[must_use]
    pub fn reports(&self, code: &CommandCode) -> bool {
        self.line == code.as_str()
    }

    /// Consumes the payload, returning the line.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.line
    }
}

impl fmt::Display for StatusPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Decides whether a received line is the reply to an outgoing code.
///
/// A line qualifies when it starts with the code's two-letter prefix and is
/// not the `MVMAX` announcement, which shares the volume prefix but never
/// answers anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFilter {
    prefix: String,
}

impl ReplyFilter {
    /// Filter for replies to `code`.
    #[must_use]
    pub fn for_code(code: &CommandCode) -> Self {
        Self {
            prefix: code.prefix().to_string(),
        }
    }

    /// Filter for status replies of `category`.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        Self {
            prefix: category.prefix().to_string(),
        }
    }

    /// Prefix being waited for.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if `line` answers the outgoing code.
    #[must_use]
    pub fn accepts(&self, line: &str) -> bool {
        line.starts_with(&self.prefix) && !line.starts_with(MAX_VOLUME_PREFIX)
    }
}
