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

//! State gate and toggle resolution
//!
//! Turns a `(category, action)` pair into at most one transmitted command:
//!
//! 1. Query the category (`Unknown -> Queried`).
//! 2. `status` stops here.
//! 3. `toggle` picks the complement of the observed state.
//! 4. Gated categories check power; anything but `PWON` returns the power
//!    reading and nothing is sent.
//! 5. A target equal to the observed state is not sent again. Otherwise it is
//!    sent and the category re-queried (`Queried -> Resolved`).

use crate::matcher::ResponseMatcher;
use crate::transport::Transport;
use crate::Result;
use avremote_protocol::{
    Action, Category, CommandCode, GatingPolicy, ProtocolError, Reading, StatusPayload,
};
use std::fmt;
use tracing::debug;

/// Resolution progress for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing observed yet
    Unknown,
    /// Current state observed
    Queried,
    /// Final state observed
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unknown => f.write_str("unknown"),
            Phase::Queried => f.write_str("queried"),
            Phase::Resolved => f.write_str("resolved"),
        }
    }
}

/// Result of resolving one control request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Category the caller asked about
    pub requested: Category,
    /// Final observed status. Holds the power reading when `gated` is set.
    pub payload: StatusPayload,
    /// Command that was transmitted, if any
    pub transmitted: Option<CommandCode>,
    /// The command was suppressed because the receiver is not on
    pub gated: bool,
}

impl Outcome {
    fn observed(requested: Category, payload: StatusPayload) -> Self {
        Self {
            requested,
            payload,
            transmitted: None,
            gated: false,
        }
    }

    /// Formats the final status for display.
    #[must_use]
    pub fn reading(&self) -> Reading {
        Reading::format(self.requested, &self.payload)
    }
}

/// Decides what to transmit for a logical action.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    gating: GatingPolicy,
}

impl Resolver {
    /// Creates a resolver applying `gating`.
    #[must_use]
    pub fn new(gating: GatingPolicy) -> Self {
        Self { gating }
    }

    /// Runs the full query, gate and confirm cycle.
    ///
    /// Invalid combinations are rejected before anything is sent.
    pub async fn resolve<T: Transport>(
        &self,
        matcher: &mut ResponseMatcher<T>,
        category: Category,
        action: &Action,
    ) -> Result<Outcome> {
        let fixed = action.fixed_code(category)?;
        let toggle = match action {
            Action::Toggle => Some(
                category
                    .toggle_pair()
                    .ok_or(ProtocolError::ToggleUnsupported(category))?,
            ),
            _ => None,
        };

        let current = self.observe(matcher, category, Phase::Unknown).await?;

        let target = match (toggle, fixed) {
            (Some(pair), _) => CommandCode::from_static(pair.resolve(current.as_str())),
            (None, Some(code)) => code,
            (None, None) => {
                debug!("{} {}: status only, nothing to send", category, Phase::Resolved);
                return Ok(Outcome::observed(category, current));
            }
        };
        debug!("{} {}: target {} from {}", category, Phase::Queried, target, current);

        if self.gating.is_gated(category) {
            let power = matcher.query(Category::Power).await?;
            if !power.is_power_on() {
                debug!("{} gated: receiver reports {}, not sending {}", category, power, target);
                return Ok(Outcome {
                    requested: category,
                    payload: power,
                    transmitted: None,
                    gated: true,
                });
            }
        }

        if current.reports(&target) {
            debug!("{} already {}, not sending", category, target);
            return Ok(Outcome::observed(category, current));
        }

        matcher.send(&target).await?;
        let stale = matcher.discard_pending();
        if stale > 0 {
            debug!("{} dropped {} line(s) received before {}", category, stale, target);
        }
        let confirmed = self.observe(matcher, category, Phase::Queried).await?;
        debug!("{} {}: {}", category, Phase::Resolved, confirmed);
        Ok(Outcome {
            requested: category,
            payload: confirmed,
            transmitted: Some(target),
            gated: false,
        })
    }

    /// Queries `category`, draining the max-volume line that follows volume.
    async fn observe<T: Transport>(
        &self,
        matcher: &mut ResponseMatcher<T>,
        category: Category,
        from: Phase,
    ) -> Result<StatusPayload> {
        let payload = matcher.query(category).await?;
        if category == Category::Volume {
            match matcher.receive_only().await? {
                Some(line) if StatusPayload::new(line.as_str()).is_max_volume() => {
                    debug!("Drained {:?}", line);
                }
                Some(line) => matcher.requeue(line),
                None => debug!("No max-volume line to drain"),
            }
        }
        debug!("{} {} -> {}: {}", category, from, Phase::Queried, payload);
        Ok(payload)
    }
}
