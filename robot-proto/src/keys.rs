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

//! ## KEY TABLE
//!
//! The fixed, read-only set of (server_key, client_key) pairs indexed by
//! the `key_id` a robot presents during the [Authenticator]'s
//! [Key Exchange Procedure].
//!
//! There is no process-wide mutable state here or anywhere else in this
//! crate: [KEYS] is a compile-time constant table, looked up by value.
//!
//! [Authenticator]:          crate::auth::Authenticator
//! [Key Exchange Procedure]: crate::auth::Authenticator::run
//! [KEYS]:                   KEYS

/// ### KEYS
///
/// Indexed by `key_id` in `0..KEYS.len()`. Each entry is
/// `(server_key, client_key)`.
pub const KEYS: [(u32, u32); 5] = [
    (23019, 32037),
    (32037, 29295),
    (18789, 13603),
    (16443, 29533),
    (18189, 21952),
];

/// ### KEY PAIR
///
/// Looks up the `(server_key, client_key)` pair for a given `key_id`.
///
/// Returns `None` if `key_id` falls outside `0..KEYS.len()`, which the
/// [Authenticator] turns into a `303 KEY OUT OF RANGE` reply.
///
/// [Authenticator]: crate::auth::Authenticator
pub fn key_pair(key_id: usize) -> Option<(u32, u32)> {
    KEYS.get(key_id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pair_in_range() {
        assert_eq!(key_pair(0), Some((23019, 32037)));
        assert_eq!(key_pair(4), Some((18189, 21952)));
    }

    #[test]
    fn key_pair_out_of_range() {
        assert_eq!(key_pair(5), None);
        assert_eq!(key_pair(1000), None);
    }
}
