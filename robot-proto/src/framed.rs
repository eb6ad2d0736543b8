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

//! ## FRAMED READER
//!
//! Consumes bytes from a [Transport] one at a time, strips the
//! terminator, transparently absorbs the RECHARGING/FULL POWER
//! sub-protocol, enforces a per-call length cap, and yields one logical
//! message per [`read_message`] call.
//!
//! Recharging is cross-cutting by design: this is the *only* place the
//! recharging flag lives, and the *only* place that decides whether a
//! read timeout is benign (non-recharging: "no message, try later") or
//! fatal (recharging: `302 LOGIC ERROR`). Higher layers never see a
//! `RECHARGING`/`FULL POWER` frame and never re-check the flag
//! themselves.
//!
//! [Transport]:      crate::transport::Transport
//! [`read_message`]: FramedReader::read_message

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::transport::Transport;
use crate::wire::TERMINATOR;
use std::io::ErrorKind;
use std::time::Duration;

fn is_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

/// ## FRAMED READER
///
/// Owns the recharging flag for one [Session]. Stateless between calls
/// otherwise: the accumulation buffer for a single message lives only
/// for the duration of one [`read_message`] call.
///
/// [Session]:        crate::session::Session
/// [`read_message`]: FramedReader::read_message
pub struct FramedReader {
    recharging: bool,
    short_timeout: Duration,
    long_timeout: Duration,
}

impl FramedReader {
    /// A fresh reader starts outside the recharging state, using the
    /// short/long timeout regimes from [`ServerConfig::default`].
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    /// A fresh reader whose short/long timeout regimes come from
    /// `config` rather than the built-in defaults — the way
    /// [`crate::session::Session`] constructs one per connection.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            recharging: false,
            short_timeout: config.short_timeout,
            long_timeout: config.long_timeout,
        }
    }

    /// Whether the session is currently in the recharging state. Used
    /// only by [Session] to decide the read timeout it must already
    /// have in effect before the first call to [`read_message`]; the
    /// reader itself changes the transport's timeout as it crosses
    /// RECHARGING/FULL POWER boundaries.
    ///
    /// [Session]:        crate::session::Session
    /// [`read_message`]: FramedReader::read_message
    pub fn is_recharging(&self) -> bool {
        self.recharging
    }

    /// ### READ MESSAGE
    ///
    /// Reads and returns one delivered (non-control) payload, or
    /// `Ok(None)` if a read timeout elapsed while not recharging — the
    /// "no message" outcome callers must treat as a hard stop.
    ///
    /// `expected_prefix` is stripped byte-for-byte from the start of the
    /// payload; a mismatch is a [`ProtocolError::Syntax`]. When
    /// `strip_trailing_spaces` is set, trailing ASCII spaces are then
    /// trimmed.
    pub fn read_message<T: Transport>(
        &mut self,
        transport: &mut T,
        expected_prefix: &str,
        max_length: usize,
        strip_trailing_spaces: bool,
    ) -> Result<Option<String>, ProtocolError> {
        loop {
            let frame = match self.read_one_frame(transport, max_length)? {
                Some(frame) => frame,
                None => return Ok(None),
            };

            // RECHARGING / FULL POWER are absorbed here, before the
            // caller ever sees a payload, and never reordered relative
            // to surrounding frames.
            if frame == "RECHARGING" {
                self.recharging = true;
                transport.set_read_timeout(self.long_timeout)?;
                continue;
            }
            if frame == "FULL POWER" {
                if !self.recharging {
                    return Err(ProtocolError::Logic);
                }
                self.recharging = false;
                transport.set_read_timeout(self.short_timeout)?;
                continue;
            }
            if self.recharging {
                return Err(ProtocolError::Logic);
            }

            if !frame.starts_with(expected_prefix) {
                return Err(ProtocolError::Syntax);
            }
            let mut payload = frame[expected_prefix.len()..].to_string();
            if strip_trailing_spaces {
                payload.truncate(payload.trim_end_matches(' ').len());
            }
            return Ok(Some(payload));
        }
    }

    /// Reads bytes until the terminator is observed, enforcing
    /// `max_length` over the entire framed message (terminator
    /// included). Returns the message body with the terminator removed,
    /// or `Ok(None)` on a read timeout.
    fn read_one_frame<T: Transport>(
        &mut self,
        transport: &mut T,
        max_length: usize,
    ) -> Result<Option<String>, ProtocolError> {
        let mut buffer: Vec<u8> = Vec::with_capacity(max_length.min(64));
        loop {
            let byte = match transport.read_one_byte() {
                Ok(byte) => byte,
                Err(error) if is_timeout(error.kind()) => {
                    // A timeout while recharging is an immediate fatal
                    // protocol violation, regardless of how much of a
                    // frame had been buffered so far.
                    if self.recharging {
                        return Err(ProtocolError::Logic);
                    }
                    return Ok(None);
                }
                Err(error) => return Err(ProtocolError::Io(error)),
            };
            buffer.push(byte);

            if buffer.len() >= 2 && buffer[buffer.len() - 2..] == TERMINATOR {
                if buffer.len() > max_length {
                    return Err(ProtocolError::Syntax);
                }
                let body = &buffer[..buffer.len() - 2];
                let text = std::str::from_utf8(body).map_err(|_| ProtocolError::Syntax)?;
                return Ok(Some(text.to_string()));
            }

            // The moment `max_length` bytes have been consumed without
            // the terminator ending the buffer (checked above, so this
            // point is only reached when it did not), overflow is
            // provably unavoidable.
            if buffer.len() >= max_length {
                return Err(ProtocolError::Syntax);
            }
        }
    }
}

impl Default for FramedReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn framed(bytes: &[u8]) -> (MockTransport, FramedReader) {
        (MockTransport::new(bytes), FramedReader::new())
    }

    #[test]
    fn recharging_switches_to_the_configured_long_timeout() {
        let config = ServerConfig {
            short_timeout: Duration::from_millis(250),
            long_timeout: Duration::from_secs(30),
            ..ServerConfig::default()
        };
        let mut reader = FramedReader::from_config(&config);
        let mut transport = MockTransport::new(b"RECHARGING\x07\x08");
        // No frame follows, so the subsequent read times out; since the
        // reader is now recharging, that timeout is fatal — but only
        // after the long timeout has already been applied.
        let err = reader
            .read_message(&mut transport, "", 20, true)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Logic));
        assert_eq!(transport.last_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn delivers_payload_with_prefix_stripped() {
        let (mut transport, mut reader) = framed(b"OK 1 2\x07\x08");
        let payload = reader
            .read_message(&mut transport, "OK ", 12, false)
            .unwrap()
            .unwrap();
        assert_eq!(payload, "1 2");
    }

    #[test]
    fn strips_trailing_spaces_when_asked() {
        let (mut transport, mut reader) = framed(b"alice  \x07\x08");
        let payload = reader
            .read_message(&mut transport, "", 20, true)
            .unwrap()
            .unwrap();
        assert_eq!(payload, "alice");
    }

    #[test]
    fn preserves_trailing_spaces_when_not_asked() {
        let (mut transport, mut reader) = framed(b"OK 1 2 \x07\x08");
        let payload = reader
            .read_message(&mut transport, "OK ", 12, false)
            .unwrap()
            .unwrap();
        assert_eq!(payload, "1 2 ");
    }

    #[test]
    fn missing_prefix_is_syntax_error() {
        let (mut transport, mut reader) = framed(b"NOPE\x07\x08");
        let err = reader
            .read_message(&mut transport, "OK ", 12, false)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Syntax));
    }

    #[test]
    fn oversize_message_is_syntax_error() {
        // 21 bytes including terminator, max is 20.
        let (mut transport, mut reader) = framed(b"abcdefghijklmnopqrs\x07\x08");
        let err = reader
            .read_message(&mut transport, "", 20, true)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Syntax));
    }

    #[test]
    fn exact_max_length_with_terminator_succeeds() {
        // "ab" + terminator = 4 bytes, max_length = 4.
        let (mut transport, mut reader) = framed(b"ab\x07\x08");
        let payload = reader
            .read_message(&mut transport, "", 4, false)
            .unwrap()
            .unwrap();
        assert_eq!(payload, "ab");
    }

    #[test]
    fn recharging_is_absorbed_and_switches_timeout() {
        let (mut transport, mut reader) =
            framed(b"RECHARGING\x07\x08FULL POWER\x07\x08OK 0 0\x07\x08");
        let payload = reader
            .read_message(&mut transport, "OK ", 12, false)
            .unwrap()
            .unwrap();
        assert_eq!(payload, "0 0");
        assert!(!reader.is_recharging());
    }

    #[test]
    fn full_power_without_recharging_is_logic_error() {
        let (mut transport, mut reader) = framed(b"FULL POWER\x07\x08");
        let err = reader
            .read_message(&mut transport, "", 12, true)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Logic));
    }

    #[test]
    fn non_control_message_while_recharging_is_logic_error() {
        let (mut transport, mut reader) = framed(b"RECHARGING\x07\x08hello\x07\x08");
        let err = reader
            .read_message(&mut transport, "", 20, true)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Logic));
    }

    #[test]
    fn timeout_while_not_recharging_yields_none() {
        let (mut transport, mut reader) = framed(b"");
        let outcome = reader.read_message(&mut transport, "", 20, true).unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn timeout_while_recharging_is_logic_error() {
        let (mut transport, mut reader) = framed(b"RECHARGING\x07\x08");
        let err = reader
            .read_message(&mut transport, "", 20, true)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Logic));
    }
}
