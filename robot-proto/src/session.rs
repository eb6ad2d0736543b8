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

//! ## SESSION CONTROLLER
//!
//! Orchestrates Authenticator → Navigator → secret retrieval → logout
//! over one [Transport], and is the *sole* place a [`ProtocolError`] is
//! turned into a wire reply. Always closes the transport on every exit
//! path.
//!
//! [Transport]: crate::transport::Transport

use crate::auth::Authenticator;
use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::framed::FramedReader;
use crate::navigator::Navigator;
use crate::transport::Transport;
use crate::wire;

/// ### SESSION
///
/// Drives exactly one connection's protocol lifecycle, from the first
/// byte read to the transport being closed.
pub struct Session;

impl Session {
    /// Runs the full session lifecycle over `transport` using
    /// [`ServerConfig::default`]'s timeout regimes.
    pub fn run<T: Transport>(transport: &mut T) {
        Self::run_with_config(transport, &ServerConfig::default())
    }

    /// Runs the full session lifecycle over `transport`, using `config`
    /// for the initial read timeout and for the [`FramedReader`]'s
    /// short/long timeout regimes. Never returns an `Err` — every fault
    /// is either mapped to a wire reply and swallowed, or was already
    /// replied to by the subroutine that raised it. The transport is
    /// always closed before returning.
    pub fn run_with_config<T: Transport>(transport: &mut T, config: &ServerConfig) {
        if let Err(error) = transport.set_read_timeout(config.short_timeout) {
            log::warn!("failed to set initial read timeout: {error}");
            let _ = transport.close();
            return;
        }

        let mut reader = FramedReader::from_config(config);
        let outcome = Self::drive(&mut reader, transport);

        if let Err(error) = outcome {
            Self::reply_for(transport, &error);
        }

        if let Err(error) = transport.close() {
            log::warn!("error closing transport: {error}");
        }
    }

    /// Authenticates, navigates to the origin, retrieves the secret,
    /// and logs out, in that order.
    fn drive<T: Transport>(
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        Authenticator::run(reader, transport)?;
        log::debug!("authentication succeeded");

        Navigator::drive_to_origin(reader, transport)?;
        log::debug!("navigation reached the origin");

        wire::send(transport, wire::GET_MESSAGE)?;
        let secret = reader
            .read_message(transport, "", 100, true)?
            .ok_or(ProtocolError::Io(std::io::Error::from(
                std::io::ErrorKind::TimedOut,
            )))?;
        log::info!("retrieved secret message ({} bytes)", secret.len());

        wire::send(transport, wire::LOGOUT)?;
        Ok(())
    }

    /// The one place a [`ProtocolError`] becomes (or does not become) a
    /// wire reply.
    fn reply_for<T: Transport>(transport: &mut T, error: &ProtocolError) {
        match error {
            ProtocolError::Syntax => {
                log::warn!("syntax error");
                if let Err(send_error) = wire::send(transport, wire::SYNTAX_ERROR) {
                    log::warn!("failed to send syntax error reply: {send_error}");
                }
            }
            ProtocolError::Logic => {
                log::warn!("logic error");
                if let Err(send_error) = wire::send(transport, wire::LOGIC_ERROR) {
                    log::warn!("failed to send logic error reply: {send_error}");
                }
            }
            ProtocolError::Auth(failure) => {
                // The specific reply for KeyOutOfRange/LoginFailed was
                // already sent by the Authenticator; EmptyUsername and
                // ConfirmationTimedOut never get one. Either way the
                // Session Controller sends nothing further.
                log::warn!("authentication failed: {failure} (already_replied={})", failure.already_replied());
            }
            ProtocolError::Io(io_error) => {
                log::warn!("transport error: {io_error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::key_pair;
    use crate::transport::mock::MockTransport;

    fn username_hash(username: &str) -> u32 {
        let byte_sum: u32 = username.bytes().map(u32::from).sum();
        (byte_sum * 1000) % 65536
    }

    #[test]
    fn full_happy_path_reaches_logout() {
        let hash = username_hash("Mnau");
        let (server_key, client_key) = key_pair(0).unwrap();
        let client_conf = (hash + client_key) % 65536;

        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"0\x07\x08");
        inbound.extend_from_slice(format!("{}\x07\x08", client_conf).as_bytes());
        inbound.extend_from_slice(b"OK 0 2\x07\x08");
        inbound.extend_from_slice(b"OK 0 1\x07\x08");
        inbound.extend_from_slice(b"OK 0 0\x07\x08");
        inbound.extend_from_slice(b"hello there\x07\x08");

        let mut transport = MockTransport::new(&inbound);
        Session::run(&mut transport);

        let server_conf = (hash + server_key) % 65536;
        let expected_tail = format!(
            "{}\x07\x08200 OK\x07\x08102 MOVE\x07\x08102 MOVE\x07\x08102 MOVE\x07\x08105 GET MESSAGE\x07\x08106 LOGOUT\x07\x08",
            server_conf
        );
        assert!(transport.outbound.ends_with(expected_tail.as_bytes()));
    }

    #[test]
    fn full_power_without_recharging_sends_logic_error_and_closes() {
        let mut transport = MockTransport::new(b"FULL POWER\x07\x08");
        Session::run(&mut transport);
        assert_eq!(transport.outbound, b"302 LOGIC ERROR\x07\x08");
    }

    #[test]
    fn oversize_username_sends_syntax_error() {
        let mut transport = MockTransport::new(b"abcdefghijklmnopqrs\x07\x08");
        Session::run(&mut transport);
        assert_eq!(transport.outbound, b"301 SYNTAX ERROR\x07\x08");
    }

    #[test]
    fn key_out_of_range_sends_only_its_own_reply() {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"9\x07\x08");
        let mut transport = MockTransport::new(&inbound);
        Session::run(&mut transport);
        assert_eq!(
            transport.outbound,
            b"107 KEY REQUEST\x07\x08303 KEY OUT OF RANGE\x07\x08"
        );
    }

    #[test]
    fn empty_username_closes_with_no_reply() {
        let mut transport = MockTransport::new(b"\x07\x08");
        Session::run(&mut transport);
        assert!(transport.outbound.is_empty());
    }

    #[test]
    fn run_with_config_applies_the_configured_short_timeout() {
        use crate::config::ServerConfig;
        use std::time::Duration;

        let config = ServerConfig {
            short_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let mut transport = MockTransport::new(b"\x07\x08");
        Session::run_with_config(&mut transport, &config);
        assert_eq!(transport.last_timeout, Some(Duration::from_millis(50)));
    }
}
