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

use crate::Category;

/// Which categories are suppressed while the receiver is in standby.
///
/// A gated category's command is never transmitted when the power query does
/// not report `PWON`; the power reading is returned in its place. Power itself
/// can never be gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatingPolicy {
    gated: [bool; Category::ALL.len()],
}

impl GatingPolicy {
    /// Policy that gates nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            gated: [false; Category::ALL.len()],
        }
    }

    /// Enables or disables gating for `category`. Ignored for power.
    #[must_use]
    pub fn with(mut self, category: Category, gated: bool) -> Self {
        if category != Category::Power {
            self.gated[category as usize] = gated;
        }
        self
    }

    /// Returns `true` if `category` commands require the receiver to be on.
    #[must_use]
    pub fn is_gated(&self, category: Category) -> bool {
        self.gated[category as usize]
    }
}

impl Default for GatingPolicy {
    /// Gates volume, mute, source and mode.
    fn default() -> Self {
        Self::none()
            .with(Category::Volume, true)
            .with(Category::Mute, true)
            .with(Category::Source, true)
            .with(Category::Mode, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gates_everything_but_power() {
        let policy = GatingPolicy::default();
        assert!(!policy.is_gated(Category::Power));
        for category in [Category::Volume, Category::Mute, Category::Source, Category::Mode] {
            assert!(policy.is_gated(category), "{category}");
        }
    }

    #[test]
    fn mode_gating_is_configurable() {
        let policy = GatingPolicy::default().with(Category::Mode, false);
        assert!(!policy.is_gated(Category::Mode));
        assert!(policy.is_gated(Category::Source));
    }

    #[test]
    fn power_cannot_be_gated() {
        let policy = GatingPolicy::none().with(Category::Power, true);
        assert!(!policy.is_gated(Category::Power));
    }
}
