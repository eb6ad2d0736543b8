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

//! ## ERROR TAXONOMY
//!
//! Every fallible operation in the [Framed Reader], [Authenticator], and
//! [Navigator] raises one of these tagged variants. The [Session
//! Controller] is the *sole* place that maps a variant to a wire reply;
//! no other layer writes an error reply directly, keeping transition
//! interpretation at a single call site.
//!
//! [Framed Reader]:     crate::framed::FramedReader
//! [Authenticator]:     crate::auth::Authenticator
//! [Navigator]:         crate::navigator::Navigator
//! [Session Controller]: crate::session::Session

use std::io;
use thiserror::Error;

/// ## PROTOCOL ERROR
///
/// The four kinds of fault a session can encounter.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// ### SYNTAX
    ///
    /// Framing too long, non-parseable numeric, missing required prefix,
    /// stray whitespace where not allowed, or a terminator appearing
    /// mid-message. Maps to `301 SYNTAX ERROR`.
    #[error("syntax error")]
    Syntax,

    /// ### LOGIC
    ///
    /// A RECHARGING/FULL POWER sequencing violation, including a read
    /// timeout while recharging. Maps to `302 LOGIC ERROR`.
    #[error("logic error")]
    Logic,

    /// ### AUTH
    ///
    /// An authentication-phase condition that already sent its own wire
    /// reply (or deliberately sent none), per [AuthFailure]. The Session
    /// Controller must not send any further reply for this variant.
    ///
    /// [AuthFailure]: AuthFailure
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    /// ### TRANSPORT
    ///
    /// A read or write failure other than a timeout. The Session
    /// Controller closes the transport silently.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// ## AUTH FAILURE
///
/// The three ways the [Authenticator] can terminate a session without
/// going through the generic SYNTAX/LOGIC path, plus the read-timeout
/// cases that are treated identically to an empty username: a bare,
/// message-less fault that never matches the generic syntax/logic
/// error strings the wire protocol otherwise distinguishes.
///
/// [Authenticator]: crate::auth::Authenticator
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Username was empty, or no username arrived before the read
    /// timeout elapsed. No reply is sent.
    #[error("empty or missing username")]
    EmptyUsername,

    /// `key_id` parsed but fell outside `0..5`. `303 KEY OUT OF RANGE`
    /// has already been sent by the caller before this is raised.
    #[error("key id out of range")]
    KeyOutOfRange,

    /// The client confirmation did not match. `300 LOGIN FAILED` has
    /// already been sent by the caller before this is raised.
    #[error("login failed")]
    LoginFailed,

    /// The client confirmation never arrived before the read timeout
    /// elapsed. No reply is sent.
    #[error("timed out awaiting client confirmation")]
    ConfirmationTimedOut,
}

impl AuthFailure {
    /// Whether this failure already sent its own wire reply. Used by the
    /// Session Controller only as a debug-log hint — it never sends a
    /// reply for any `AuthFailure` itself either way.
    pub fn already_replied(self) -> bool {
        matches!(self, AuthFailure::KeyOutOfRange | AuthFailure::LoginFailed)
    }
}
