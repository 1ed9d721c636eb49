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

//! Error types for command validation

use crate::Category;
use thiserror::Error;

/// Result type for protocol operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Invalid input detected before anything reaches the receiver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Category name not recognised
    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    /// Action not in the category's allowed set
    #[error("invalid {category} action {action:?} (expected one of: {expected})")]
    InvalidAction {
        /// Category the action was given for
        category: Category,
        /// The rejected action
        action: String,
        /// Comma separated list of accepted actions
        expected: String,
    },

    /// Numeric volume outside the accepted range
    #[error("volume level {0} is outside 0-90")]
    VolumeOutOfRange(u32),

    /// `toggle` requested for a category without a toggle pair
    #[error("{0} cannot be toggled")]
    ToggleUnsupported(Category),

    /// Raw command code that cannot be transmitted
    #[error("invalid command code {0:?}")]
    InvalidCode(String),
}
