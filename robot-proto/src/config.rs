// Copyright © 2026 Robot Recall Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

//! ## SERVER CONFIGURATION
//!
//! A plain settings struct with a hand-written [`Default`]. There is no
//! config file and no CLI flag surface — this is a single server binary
//! with no flags; `main` constructs this with [`ServerConfig::default`]
//! and nothing else.

use std::time::Duration;

/// ## SERVER CONFIG
///
/// Every tunable the accept loop and the per-connection [Session] need.
///
/// [Session]: crate::session::Session
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds, e.g. `"127.0.0.1:6969"`.
    pub bind_addr: String,

    /// Number of worker threads servicing accepted connections. Each
    /// worker handles one connection for its full lifetime.
    pub worker_count: usize,

    /// The short (non-recharging) read-timeout regime.
    pub short_timeout: Duration,

    /// The long (recharging) read-timeout regime.
    pub long_timeout: Duration,
}

impl Default for ServerConfig {
    /// `127.0.0.1:6969`, 4 workers, 1s short timeout, 5s long timeout.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:6969".to_string(),
            worker_count: 4,
            short_timeout: Duration::from_secs(1),
            long_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_localhost_6969_with_four_workers() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:6969");
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.short_timeout, Duration::from_secs(1));
        assert_eq!(config.long_timeout, Duration::from_secs(5));
    }
}
