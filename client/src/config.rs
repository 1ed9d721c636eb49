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

//! Client configuration

use avremote_protocol::{Category, GatingPolicy};
use std::time::Duration;

/// Receiver control client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Receiver hostname or IP address
    pub host: String,

    /// Receiver control port
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Timeout for a single socket read
    pub read_timeout: Duration,

    /// Status query transmissions per wait before giving up
    pub max_attempts: usize,

    /// Upper bound on a whole wait for a reply, across all attempts
    pub response_timeout: Duration,

    /// How long to wait for the unsolicited maximum-volume line
    pub drain_timeout: Duration,

    /// Maximum bytes taken per socket read
    pub chunk_size: usize,

    /// Categories suppressed while the receiver is in standby
    pub gating: GatingPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            max_attempts: 3,
            response_timeout: Duration::from_secs(15),
            drain_timeout: Duration::from_millis(500),
            chunk_size: 64,
            gating: GatingPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-read timeout
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the number of status queries per wait (at least one)
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the overall bound on waiting for one reply
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set the maximum-volume drain timeout
    #[must_use]
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Set the read chunk size (at least one byte)
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Replace the gating policy
    #[must_use]
    pub fn with_gating(mut self, gating: GatingPolicy) -> Self {
        self.gating = gating;
        self
    }

    /// Enable or disable gating for one category
    #[must_use]
    pub fn with_category_gating(mut self, category: Category, gated: bool) -> Self {
        self.gating = self.gating.with(category, gated);
        self
    }

    /// Get the receiver address as a string
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.port, 23);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.chunk_size, 64);
        assert!(config.gating.is_gated(Category::Volume));
        assert!(!config.gating.is_gated(Category::Power));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("10.0.0.5", 2323)
            .with_read_timeout(Duration::from_secs(1))
            .with_max_attempts(0)
            .with_chunk_size(16)
            .with_category_gating(Category::Mode, false);

        assert_eq!(config.address(), "10.0.0.5:2323");
        assert_eq!(config.read_timeout, Duration::from_secs(1));
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.chunk_size, 16);
        assert!(!config.gating.is_gated(Category::Mode));
        assert!(config.gating.is_gated(Category::Source));
    }
}
