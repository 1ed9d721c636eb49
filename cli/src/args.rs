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

//! Command line arguments

use avremote_client::Request;
use avremote_protocol::{Action, Category, CommandCode, ProtocolResult};
use clap::{ArgAction, Parser, Subcommand};

/// Remote control for networked AV receivers
#[derive(Parser, Debug)]
#[command(name = "avremote", version, about, propagate_version = true)]
#[command(after_help = "EXAMPLES:
    avremote -a 10.0.0.5 power toggle     Toggle power
    avremote -a 10.0.0.5 volume 42        Set master volume
    avremote -a 10.0.0.5 source bluetooth Switch input
    avremote -a 10.0.0.5 command PSFRONT? Send a raw code")]
pub struct Cli {
    /// Receiver IPv4 address (prompted for when missing on a terminal)
    #[arg(short, long, global = true, env = "AVREMOTE_ADDRESS")]
    pub address: Option<String>,

    /// Receiver control port
    #[arg(short, long, global = true, env = "AVREMOTE_PORT", default_value = "23")]
    pub port: String,

    /// Connect and per-read timeout in seconds
    #[arg(long, global = true, default_value_t = 5)]
    pub timeout: u64,

    /// Status queries sent before giving up on a reply
    #[arg(long, global = true, default_value_t = 3)]
    pub attempts: usize,

    /// Send sound-mode changes even while the receiver is in standby
    #[arg(long, global = true)]
    pub ungated_mode: bool,

    /// Increase log verbosity (-d debug, -dd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Power: status, toggle, on, off
    Power {
        #[arg(value_parser = power_action)]
        action: Option<Action>,
    },

    /// Master volume: status, up, down, or a level 0-90
    Volume {
        #[arg(value_parser = volume_action)]
        action: Option<Action>,
    },

    /// Mute: toggle (default), status, on, off
    Mute {
        #[arg(value_parser = mute_action)]
        action: Option<Action>,
    },

    /// Input source: status, bluetooth, tuner, aux, iradio, mplayer, game,
    /// dvd, bluray, favorites, siriusxm, pandora, ipod
    Source {
        #[arg(value_parser = source_action)]
        action: Option<Action>,
    },

    /// Sound mode: status, stereo, direct, puredirect, dolby, dts,
    /// mchstereo, movie, music, game, auto, virtual
    Mode {
        #[arg(value_parser = mode_action)]
        action: Option<Action>,
    },

    /// Send a raw command code and print the first reply with its prefix
    Command {
        #[arg(value_parser = raw_code)]
        code: CommandCode,
    },
}

impl Command {
    /// Request to execute. No subcommand means `power status`.
    pub fn request(command: Option<&Command>) -> Request {
        let (category, action) = match command {
            None => (Category::Power, None),
            Some(Command::Command { code }) => return Request::passthrough(code.clone()),
            Some(Command::Power { action }) => (Category::Power, action.as_ref()),
            Some(Command::Volume { action }) => (Category::Volume, action.as_ref()),
            Some(Command::Mute { action }) => (Category::Mute, action.as_ref()),
            Some(Command::Source { action }) => (Category::Source, action.as_ref()),
            Some(Command::Mode { action }) => (Category::Mode, action.as_ref()),
        };
        let action = action
            .cloned()
            .unwrap_or_else(|| Action::default_for(category));
        Request::control(category, action)
    }
}

fn power_action(input: &str) -> ProtocolResult<Action> {
    Action::parse(Category::Power, input)
}

fn volume_action(input: &str) -> ProtocolResult<Action> {
    Action::parse(Category::Volume, input)
}

fn mute_action(input: &str) -> ProtocolResult<Action> {
    Action::parse(Category::Mute, input)
}

fn source_action(input: &str) -> ProtocolResult<Action> {
    Action::parse(Category::Source, input)
}

fn mode_action(input: &str) -> ProtocolResult<Action> {
    Action::parse(Category::Mode, input)
}

fn raw_code(input: &str) -> ProtocolResult<CommandCode> {
    CommandCode::raw(input)
}
