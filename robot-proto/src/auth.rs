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

//! ## AUTHENTICATOR
//!
//! Runs the name/key/confirmation exchange over an already-framed
//! [Transport]: read username, request and validate a `key_id`, exchange
//! hash-derived confirmations, and accept or reject the robot.
//!
//! [Transport]: crate::transport::Transport

use crate::error::{AuthFailure, ProtocolError};
use crate::framed::FramedReader;
use crate::keys::key_pair;
use crate::transport::Transport;
use crate::wire;

/// ### USERNAME HASH
///
/// `(Σ utf-8 byte values of username) * 1000 mod 65536`.
fn username_hash(username: &str) -> u32 {
    let byte_sum: u32 = username.bytes().map(u32::from).sum();
    (byte_sum * 1000) % 65536
}

/// ### AUTHENTICATOR
///
/// Stateless: every call to [`Authenticator::run`] executes the entire
/// name/key/confirmation exchange in order, using the caller's
/// [FramedReader] to honor the recharging sub-protocol transparently at
/// every read.
///
/// [FramedReader]: crate::framed::FramedReader
pub struct Authenticator;

impl Authenticator {
    /// Runs the authentication handshake to completion. On success, a
    /// `200 OK` has already been sent and the robot is authenticated.
    /// On failure, whichever specific reply (if any) the failed step
    /// calls for has already been sent; the caller must not send
    /// another.
    pub fn run<T: Transport>(
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        // USERNAME
        //
        // A timeout here and an empty username are treated identically:
        // both end the session with no reply at all.
        let username = reader
            .read_message(transport, "", 20, true)?
            .unwrap_or_default();
        if username.is_empty() {
            return Err(AuthFailure::EmptyUsername.into());
        }

        wire::send(transport, wire::KEY_REQUEST)?;

        // KEY ID
        //
        // A timeout here is not given the same silent treatment as an
        // empty username: the missing payload fails to parse as an
        // integer and is reported as a syntax error.
        let key_id_str = reader.read_message(transport, "", 5, true)?;
        let key_id: usize = key_id_str
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or(ProtocolError::Syntax)?;

        let (server_key, client_key) = match key_pair(key_id) {
            Some(pair) => pair,
            None => {
                wire::send(transport, wire::KEY_OUT_OF_RANGE)?;
                return Err(AuthFailure::KeyOutOfRange.into());
            }
        };

        let hash = username_hash(&username);
        let server_confirmation = (hash + server_key) % 65536;
        wire::send(transport, &server_confirmation.to_string())?;

        // CLIENT CONFIRMATION
        //
        // `strip_trailing_spaces = false`: any whitespace the stripped
        // form would have removed is instead treated as a syntax
        // violation.
        let confirmation_str = reader
            .read_message(transport, "", 7, false)?
            .ok_or(AuthFailure::ConfirmationTimedOut)?;
        let stripped = confirmation_str.trim();
        if stripped != confirmation_str {
            return Err(ProtocolError::Syntax);
        }
        let client_confirmation: u32 = stripped.parse().map_err(|_| ProtocolError::Syntax)?;

        let expected = (hash + client_key) % 65536;
        if client_confirmation != expected {
            wire::send(transport, wire::LOGIN_FAILED)?;
            return Err(AuthFailure::LoginFailed.into());
        }

        wire::send(transport, wire::OK)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn run(inbound: &[u8]) -> (Result<(), ProtocolError>, MockTransport) {
        let mut transport = MockTransport::new(inbound);
        let mut reader = FramedReader::new();
        let result = Authenticator::run(&mut reader, &mut transport);
        (result, transport)
    }

    #[test]
    fn username_hash_sums_utf8_bytes_times_1000_mod_65536() {
        // "Mnau" -> 77 + 110 + 97 + 117 = 401; 401 * 1000 % 65536 = 400999 % 65536 = 5287
        assert_eq!(username_hash("Mnau"), 5287);
    }

    #[test]
    fn happy_path_accepts_matching_confirmation() {
        let hash = username_hash("Mnau");
        let (server_key, client_key) = key_pair(0).unwrap();
        let server_conf = (hash + server_key) % 65536;
        let client_conf = (hash + client_key) % 65536;
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"0\x07\x08");
        inbound.extend_from_slice(format!("{}\x07\x08", client_conf).as_bytes());
        let (result, transport) = run(&inbound);
        assert!(result.is_ok());
        let expected_tail = format!("{}\x07\x08200 OK\x07\x08", server_conf);
        assert!(transport
            .outbound
            .ends_with(expected_tail.as_bytes()));
    }

    #[test]
    fn empty_username_closes_silently() {
        let (result, transport) = run(b"\x07\x08");
        assert!(matches!(
            result,
            Err(ProtocolError::Auth(AuthFailure::EmptyUsername))
        ));
        assert!(transport.outbound.is_empty());
    }

    #[test]
    fn username_timeout_closes_silently() {
        let (result, transport) = run(b"");
        assert!(matches!(
            result,
            Err(ProtocolError::Auth(AuthFailure::EmptyUsername))
        ));
        assert!(transport.outbound.is_empty());
    }

    #[test]
    fn non_numeric_key_id_is_syntax_error() {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"xx\x07\x08");
        let (result, _) = run(&inbound);
        assert!(matches!(result, Err(ProtocolError::Syntax)));
    }

    #[test]
    fn out_of_range_key_id_sends_reply_and_fails() {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"9\x07\x08");
        let (result, transport) = run(&inbound);
        assert!(matches!(
            result,
            Err(ProtocolError::Auth(AuthFailure::KeyOutOfRange))
        ));
        assert!(transport.outbound.ends_with(b"303 KEY OUT OF RANGE\x07\x08"));
    }

    #[test]
    fn mismatched_confirmation_sends_login_failed() {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"0\x07\x08");
        inbound.extend_from_slice(b"1\x07\x08");
        let (result, transport) = run(&inbound);
        assert!(matches!(
            result,
            Err(ProtocolError::Auth(AuthFailure::LoginFailed))
        ));
        assert!(transport.outbound.ends_with(b"300 LOGIN FAILED\x07\x08"));
    }

    #[test]
    fn whitespace_in_confirmation_is_syntax_error() {
        let mut inbound = Vec::new();
        inbound.extend_from_slice(b"Mnau\x07\x08");
        inbound.extend_from_slice(b"0\x07\x08");
        inbound.extend_from_slice(b" 123\x07\x08");
        let (result, _) = run(&inbound);
        assert!(matches!(result, Err(ProtocolError::Syntax)));
    }
}
