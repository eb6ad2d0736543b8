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

//! # ROBOT RECALL CONTROL PROTOCOL
//!
//! A text-oriented control protocol for guiding a remote client
//! "robot" — authenticated via a shared-secret key-pair scheme — from
//! an unknown starting position and orientation on an integer 2-D grid
//! back to the origin, where a short secret message is retrieved and
//! the session closed.
//!
//! Per-connection pipeline (leaves first), each a module of this crate:
//!
//! - [`transport`] — the octet-stream abstraction: `read_one_byte`,
//!   `write_all`, `set_read_timeout`, `close`.
//! - [`framed`] — the framed reader: terminator stripping, the
//!   RECHARGING/FULL POWER sub-protocol, and per-call length caps.
//! - [`auth`] — the authentication handshake.
//! - [`navigator`] — orientation inference and the drive back to the
//!   origin.
//! - [`session`] — composes the three above in sequence and is the
//!   sole mapper from [`error::ProtocolError`] to a wire reply.
//!
//! The TCP accept loop, the worker-pool sizing, and logging
//! initialization are external collaborators left to the binary crate
//! (`robot-proto-server`); this crate only knows how to drive one
//! already-accepted connection.

pub mod auth;
pub mod config;
pub mod error;
pub mod framed;
pub mod keys;
pub mod navigator;
pub mod orientation;
pub mod session;
pub mod transport;
pub mod wire;

pub use config::ServerConfig;
pub use error::{AuthFailure, ProtocolError};
pub use session::Session;
pub use transport::{TcpTransport, TimeoutRegime, Transport};
