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

/// Line terminator used in both directions.
pub const TERMINATOR: u8 = b'\r';

/// Line feed. Never sent; stripped if a device pairs it with the terminator.
pub const LINE_FEED: u8 = b'\n';

/// Maximum length of a single line in bytes, excluding the terminator.
///
/// Receiver replies are short (the longest sound-mode names are well under
/// 32 bytes). Anything beyond this limit is treated as a garbage stream and
/// discarded rather than buffered without bound.
pub const MAX_LINE_LENGTH: usize = 256;
