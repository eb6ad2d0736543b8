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

//! ## TRANSPORT
//!
//! The octet-stream abstraction every higher layer is built on:
//! `read_one_byte`, `write_all`, `set_read_timeout`, `close`. A timeout
//! on read is reported as an `io::Error` of kind [`ErrorKind::TimedOut`]
//! or [`ErrorKind::WouldBlock`], distinct from any other I/O failure.
//!
//! [`ErrorKind::TimedOut`]:   std::io::ErrorKind::TimedOut
//! [`ErrorKind::WouldBlock`]: std::io::ErrorKind::WouldBlock

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// ## TIMEOUT REGIME
///
/// The two read-timeout budgets a [Session] cycles between depending on
/// its recharging flag.
///
/// [Session]: crate::session::Session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutRegime {
    /// Normal operation: 1 second, applied to the wait for any single
    /// byte.
    Short,
    /// While recharging: 5 seconds, applied to the wait for any single
    /// byte.
    Long,
}

impl TimeoutRegime {
    /// The duration this regime applies.
    pub fn duration(self) -> Duration {
        match self {
            TimeoutRegime::Short => Duration::from_secs(1),
            TimeoutRegime::Long => Duration::from_secs(5),
        }
    }
}

/// ## TRANSPORT
///
/// An octet-stream with a settable read timeout. `read_one_byte`
/// returning `Err` of kind `TimedOut`/`WouldBlock` is the "no byte
/// arrived within the current regime" signal; any other `Err` is a
/// genuine transport failure and is never retried.
pub trait Transport {
    /// Blocks for at most the current read timeout waiting for exactly
    /// one byte. A timeout surfaces as `Err` with
    /// [`ErrorKind::TimedOut`] or [`ErrorKind::WouldBlock`].
    fn read_one_byte(&mut self) -> io::Result<u8>;

    /// Writes the entire buffer, or fails.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Replaces the read timeout applied to subsequent
    /// [`read_one_byte`] calls.
    ///
    /// [`read_one_byte`]: Transport::read_one_byte
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;

    /// Shuts the transport down. Idempotent: closing twice is not an
    /// error.
    fn close(&mut self) -> io::Result<()>;
}

/// ## TCP TRANSPORT
///
/// The production [Transport], backed by a [`TcpStream`].
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Wraps an already-accepted stream. The caller is expected to have
    /// set an initial read timeout via [`Transport::set_read_timeout`]
    /// before the first [`Transport::read_one_byte`] call; [`Session`]
    /// does this as its first action.
    ///
    /// [`Session`]: crate::session::Session
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }
}

impl Transport for TcpTransport {
    fn read_one_byte(&mut self) -> io::Result<u8> {
        // `&TcpStream` implements `Read`/`Write` directly, so this
        // doesn't need `&mut self` to outlive the call.
        let mut stream: &TcpStream = &self.stream;
        let mut byte = [0u8; 1];
        match stream.read(&mut byte) {
            Ok(0) => Err(io::Error::from(ErrorKind::UnexpectedEof)),
            Ok(_) => Ok(byte[0]),
            Err(error) => Err(error),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stream: &TcpStream = &self.stream;
        stream.write_all(bytes)
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.stream.set_read_timeout(Some(timeout))
    }

    fn close(&mut self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Already shut down, or never fully connected; both are
            // fine at session teardown.
            Err(error) if error.kind() == ErrorKind::NotConnected => Ok(()),
            Err(error) => Err(error),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    #[test]
    fn regime_durations_are_one_and_five_seconds() {
        assert_eq!(TimeoutRegime::Short.duration(), Duration::from_secs(1));
        assert_eq!(TimeoutRegime::Long.duration(), Duration::from_secs(5));
    }

    #[test]
    fn mock_reads_in_order_then_times_out() {
        let mut transport = MockTransport::new(b"ab");
        assert_eq!(transport.read_one_byte().unwrap(), b'a');
        assert_eq!(transport.read_one_byte().unwrap(), b'b');
        let err = transport.read_one_byte().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimedOut);
    }

    #[test]
    fn mock_records_last_timeout() {
        let mut transport = MockTransport::new(b"");
        transport.set_read_timeout(TimeoutRegime::Long.duration()).unwrap();
        assert_eq!(transport.last_timeout, Some(Duration::from_secs(5)));
    }
}
