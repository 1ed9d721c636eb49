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

//! Logical actions and the command codes they map to

use crate::{Category, ProtocolError, ProtocolResult};
use std::fmt;

/// Master volume level in whole steps, `0..=90`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Highest accepted level.
    pub const MAX: u8 = 90;

    /// Validates a level.
    pub fn new(level: u32) -> ProtocolResult<Self> {
        match u8::try_from(level) {
            Ok(level) if level <= Self::MAX => Ok(Self(level)),
            _ => Err(ProtocolError::VolumeOutOfRange(level)),
        }
    }

    /// Numeric level.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Two-digit zero-padded wire value.
    #[must_use]
    pub fn wire_value(self) -> String {
        format!("{:02}", self.0)
    }
}

/// Literal command code transmitted to the receiver, without terminator.
///
/// Always at least two characters long; the first two are the category prefix
/// used to recognise its reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandCode(String);

impl CommandCode {
    /// Wraps a code taken from the rule tables.
    #[must_use]
    pub fn from_static(code: &'static str) -> Self {
        Self(code.to_string())
    }

    /// Builds `<prefix><value>` for a category.
    #[must_use]
    pub fn with_value(category: Category, value: &str) -> Self {
        Self(format!("{}{}", category.prefix(), value))
    }

    /// Validates a user supplied code for passthrough.
    ///
    /// The code is upper-cased. It must start with two ASCII letters and
    /// contain only printable ASCII.
    pub fn raw(input: &str) -> ProtocolResult<Self> {
        let code = input.trim().to_ascii_uppercase();
        let prefix_ok = code.len() >= 2 && code.bytes().take(2).all(|b| b.is_ascii_alphabetic());
        let printable = code.bytes().all(|b| b.is_ascii_graphic() || b == b' ');
        if prefix_ok && printable {
            Ok(Self(code))
        } else {
            Err(ProtocolError::InvalidCode(input.to_string()))
        }
    }

    /// Code as transmitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-letter prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }

    /// Category owning this code's prefix, if it is one of ours.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_line(&self.0)
    }

    /// Returns `true` for `<prefix>?` style status queries.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.0.ends_with('?')
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Category-scoped symbolic action requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Report the current state, transmit nothing.
    Status,
    /// Flip between the category's toggle pair.
    Toggle,
    /// Named action bound to a fixed code (`on`, `up`, `bluetooth`, ...).
    Named {
        /// Action name
        name: &'static str,
        /// Code transmitted for it
        code: &'static str,
    },
    /// Absolute volume level.
    Level(VolumeLevel),
}

impl Action {
    /// Parses and validates an action for `category`.
    pub fn parse(category: Category, input: &str) -> ProtocolResult<Self> {
        let action = input.trim().to_ascii_lowercase();
        if action == "status" {
            return Ok(Action::Status);
        }
        if action == "toggle" && category.toggle_pair().is_some() {
            return Ok(Action::Toggle);
        }
        if let Some((name, code)) = category
            .rules()
            .actions
            .iter()
            .find(|(name, _)| *name == action)
            .copied()
        {
            return Ok(Action::Named { name, code });
        }
        let numeric = !action.is_empty() && action.bytes().all(|b| b.is_ascii_digit());
        if category == Category::Volume && numeric {
            let level = action.parse::<u32>().unwrap_or(u32::MAX);
            return VolumeLevel::new(level).map(Action::Level);
        }
        Err(ProtocolError::InvalidAction {
            category,
            action: input.to_string(),
            expected: Self::choices(category).join(", "),
        })
    }

    /// Action used when none is given: `toggle` for mute, `status` otherwise.
    #[must_use]
    pub fn default_for(category: Category) -> Self {
        match category {
            Category::Mute => Action::Toggle,
            _ => Action::Status,
        }
    }

    /// Accepted action spellings for `category`, for help and error text.
    #[must_use]
    pub fn choices(category: Category) -> Vec<&'static str> {
        let mut choices = vec!["status"];
        if category.toggle_pair().is_some() {
            choices.push("toggle");
        }
        choices.extend(category.rules().actions.iter().map(|(name, _)| *name));
        if category == Category::Volume {
            choices.push("0-90");
        }
        choices
    }

    /// The code this action always transmits, if it does not depend on state.
    ///
    /// `Status` and `Toggle` have no fixed code. A `Level` outside the volume
    /// category is rejected.
    pub fn fixed_code(&self, category: Category) -> ProtocolResult<Option<CommandCode>> {
        match self {
            Action::Status | Action::Toggle => Ok(None),
            Action::Named { code, .. } => Ok(Some(CommandCode::from_static(*code))),
            Action::Level(level) if category == Category::Volume => {
                Ok(Some(CommandCode::with_value(category, &level.wire_value())))
            }
            Action::Level(level) => Err(ProtocolError::InvalidAction {
                category,
                action: level.get().to_string(),
                expected: Self::choices(category).join(", "),
            }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Status => f.write_str("status"),
            Action::Toggle => f.write_str("toggle"),
            Action::Named { name, .. } => f.write_str(name),
            Action::Level(level) => write!(f, "{}", level.get()),
        }
    }
}
