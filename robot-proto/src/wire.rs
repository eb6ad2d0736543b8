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

//! ## WIRE MESSAGES
//!
//! The literal, terminator-suffixed server-originated messages. Kept as
//! a flat module of constants rather than an enum because every caller
//! already knows exactly which one it means to send — there is no
//! dispatch over these values anywhere in the crate, only composition
//! with [`send`].

use crate::transport::Transport;
use std::io;

/// The two-byte terminator every framed message ends with: bell,
/// backspace. The one definition [`crate::framed`] and [`send`] both
/// use.
pub(crate) const TERMINATOR: [u8; 2] = [0x07, 0x08];

pub const MOVE: &str = "102 MOVE";
pub const TURN_LEFT: &str = "103 TURN LEFT";
pub const TURN_RIGHT: &str = "104 TURN RIGHT";
pub const GET_MESSAGE: &str = "105 GET MESSAGE";
pub const LOGOUT: &str = "106 LOGOUT";
pub const KEY_REQUEST: &str = "107 KEY REQUEST";
pub const OK: &str = "200 OK";
pub const LOGIN_FAILED: &str = "300 LOGIN FAILED";
pub const SYNTAX_ERROR: &str = "301 SYNTAX ERROR";
pub const LOGIC_ERROR: &str = "302 LOGIC ERROR";
pub const KEY_OUT_OF_RANGE: &str = "303 KEY OUT OF RANGE";

/// Writes `text` followed by the terminator.
pub fn send<T: Transport>(transport: &mut T, text: &str) -> io::Result<()> {
    let mut framed = Vec::with_capacity(text.len() + TERMINATOR.len());
    framed.extend_from_slice(text.as_bytes());
    framed.extend_from_slice(&TERMINATOR);
    transport.write_all(&framed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    #[test]
    fn send_appends_terminator() {
        let mut transport = MockTransport::new(b"");
        send(&mut transport, OK).unwrap();
        assert_eq!(transport.outbound, b"200 OK\x07\x08");
    }
}
