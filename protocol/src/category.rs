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

//! Controllable categories and their immutable rule tables

use crate::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// Power reply when the receiver is on.
pub const POWER_ON: &str = "PWON";

/// Power reply when the receiver is in standby.
pub const POWER_STANDBY: &str = "PWSTANDBY";

/// Reply value marking the receiver as powered off.
pub const STANDBY: &str = "STANDBY";

/// Prefix of the unsolicited maximum-volume announcement.
///
/// Shares the `MV` category prefix but never answers a volume query.
pub const MAX_VOLUME_PREFIX: &str = "MVMAX";

/// A controllable aspect of the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Main zone power
    Power,
    /// Master volume
    Volume,
    /// Mute
    Mute,
    /// Source input
    Source,
    /// Surround sound mode
    Mode,
}

/// Pair of command codes a `toggle` action alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePair {
    /// Code that switches the feature on.
    pub on: &'static str,
    /// Code that switches the feature off.
    pub off: &'static str,
}

impl TogglePair {
    /// Picks the code that flips the reported state.
    ///
    /// A status line equal to the off code resolves to the on code; anything
    /// else, including an unrecognised reply, resolves to the off code.
    #[must_use]
    pub fn resolve(&self, current: &str) -> &'static str {
        if current == self.off { self.on } else { self.off }
    }
}

/// Static protocol rules for one category.
#[derive(Debug)]
pub struct CategoryRules {
    /// User-facing category name.
    pub name: &'static str,
    /// Two-letter wire prefix.
    pub prefix: &'static str,
    /// Status query code.
    pub status_query: &'static str,
    /// Display label preceding the formatted value.
    pub label: &'static str,
    /// Toggle pair, for the categories that support `toggle`.
    pub toggle: Option<TogglePair>,
    /// Named logical actions and the command codes they transmit.
    pub actions: &'static [(&'static str, &'static str)],
    /// Reply value to display name table.
    pub display_names: &'static [(&'static str, &'static str)],
}

static RULES: [CategoryRules; 5] = [
    CategoryRules {
        name: "power",
        prefix: "PW",
        status_query: "PW?",
        label: "Power State:",
        toggle: Some(TogglePair {
            on: POWER_ON,
            off: POWER_STANDBY,
        }),
        actions: &[("on", POWER_ON), ("off", POWER_STANDBY)],
        display_names: &[],
    },
    CategoryRules {
        name: "volume",
        prefix: "MV",
        status_query: "MV?",
        label: "Volume Level:",
        toggle: None,
        actions: &[("up", "MVUP"), ("down", "MVDOWN")],
        display_names: &[],
    },
    CategoryRules {
        name: "mute",
        prefix: "MU",
        status_query: "MU?",
        label: "Mute State:",
        toggle: Some(TogglePair {
            on: "MUON",
            off: "MUOFF",
        }),
        actions: &[("on", "MUON"), ("off", "MUOFF")],
        display_names: &[],
    },
    CategoryRules {
        name: "source",
        prefix: "SI",
        status_query: "SI?",
        label: "Source Input:",
        toggle: None,
        actions: &[
            ("bluetooth", "SIBT"),
            ("tuner", "SITUNER"),
            ("aux", "SIAUX1"),
            ("iradio", "SIIRADIO"),
            ("mplayer", "SIMPLAY"),
            ("game", "SIGAME"),
            ("dvd", "SIDVD"),
            ("bluray", "SIBD"),
            ("favorites", "SIFAVORITES"),
            ("siriusxm", "SISIRIUSXM"),
            ("pandora", "SIPANDORA"),
            ("ipod", "SIUSB/IPOD"),
        ],
        display_names: &[
            ("BT", "Bluetooth"),
            ("TUNER", "Tuner"),
            ("AUX1", "Aux"),
            ("IRADIO", "Internet Radio"),
            ("MPLAY", "Media Player"),
            ("GAME", "Game"),
            ("DVD", "DVD"),
            ("BD", "BluRay"),
            ("FAVORITES", "Favorites"),
            ("SIRIUSXM", "Sirius XM"),
            ("PANDORA", "Pandora"),
            ("USB/IPOD", "iPod"),
        ],
    },
    CategoryRules {
        name: "mode",
        prefix: "MS",
        status_query: "MS?",
        label: "Sound Mode:",
        toggle: None,
        actions: &[
            ("stereo", "MSSTEREO"),
            ("direct", "MSDIRECT"),
            ("puredirect", "MSPURE DIRECT"),
            ("dolby", "MSDOLBY DIGITAL"),
            ("dts", "MSDTS SURROUND"),
            ("mchstereo", "MSMCH STEREO"),
            ("movie", "MSMOVIE"),
            ("music", "MSMUSIC"),
            ("game", "MSGAME"),
            ("auto", "MSAUTO"),
            ("virtual", "MSVIRTUAL"),
        ],
        display_names: &[
            ("DOLBY DIGITAL", "Dolby"),
            ("DTS SURROUND", "DTS"),
            ("PURE DIRECT", "Pure Direct"),
            ("MCH STEREO", "Multi-Channel Stereo"),
        ],
    },
];

impl Category {
    /// Every category, in table order.
    pub const ALL: [Category; 5] = [
        Category::Power,
        Category::Volume,
        Category::Mute,
        Category::Source,
        Category::Mode,
    ];

    /// Rule table entry for this category.
    #[must_use]
    pub fn rules(self) -> &'static CategoryRules {
        &RULES[self as usize]
    }

    /// User-facing name (`power`, `volume`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.rules().name
    }

    /// Two-letter wire prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        self.rules().prefix
    }

    /// Status query code (`<prefix>?`).
    #[must_use]
    pub fn status_query(self) -> &'static str {
        self.rules().status_query
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.rules().label
    }

    /// Toggle pair, if `toggle` is meaningful for this category.
    #[must_use]
    pub fn toggle_pair(self) -> Option<TogglePair> {
        self.rules().toggle
    }

    /// Looks up the command code bound to a named action.
    #[must_use]
    pub fn action_code(self, name: &str) -> Option<&'static str> {
        self.rules()
            .actions
            .iter()
            .find(|(action, _)| *action == name)
            .map(|(_, code)| *code)
    }

    /// Looks up the display name for a reply value.
    #[must_use]
    pub fn display_name(self, value: &str) -> Option<&'static str> {
        self.rules()
            .display_names
            .iter()
            .find(|(code, _)| *code == value)
            .map(|(_, name)| *name)
    }

    /// Finds the category whose prefix starts `line`.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| line.starts_with(category.prefix()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProtocolError::UnknownCategory(s.to_string()))
    }
}
