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

//! ## NAVIGATOR
//!
//! Issues movement commands, parses `OK x y` replies, infers
//! orientation from the first two observed positions, and drives the
//! robot to the origin, backing off the moment two consecutive moves
//! land on the same position (an inferred obstacle) rather than relying
//! on any iteration cap.

use crate::error::ProtocolError;
use crate::framed::FramedReader;
use crate::orientation::Orientation;
use crate::transport::Transport;
use crate::wire;
use std::io::{self, ErrorKind};

/// A reported position on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };
}

/// Parses the payload of a `move` reply (prefix already stripped).
/// Anything beyond the single space separating the two integers —
/// leading, trailing, or doubled — is a syntax violation.
fn parse_ok_position(payload: &str) -> Result<Position, ProtocolError> {
    if payload.starts_with(' ') || payload.ends_with(' ') || payload.is_empty() {
        return Err(ProtocolError::Syntax);
    }
    let mut parts = payload.split(' ');
    let x_str = parts.next().ok_or(ProtocolError::Syntax)?;
    let y_str = parts.next().ok_or(ProtocolError::Syntax)?;
    if parts.next().is_some() || x_str.is_empty() || y_str.is_empty() {
        return Err(ProtocolError::Syntax);
    }
    let x: i32 = x_str.parse().map_err(|_| ProtocolError::Syntax)?;
    let y: i32 = y_str.parse().map_err(|_| ProtocolError::Syntax)?;
    Ok(Position { x, y })
}

/// Parses the payload of a `turn` reply (prefix already stripped,
/// trailing spaces already trimmed by the caller's `read_message`).
/// Unlike [`parse_ok_position`], any amount of interior whitespace
/// between the two integers is tolerated — only the pair of integers
/// themselves matters.
fn parse_turn_position(payload: &str) -> Result<Position, ProtocolError> {
    let mut parts = payload.split_whitespace();
    let x_str = parts.next().ok_or(ProtocolError::Syntax)?;
    let y_str = parts.next().ok_or(ProtocolError::Syntax)?;
    let x: i32 = x_str.parse().map_err(|_| ProtocolError::Syntax)?;
    let y: i32 = y_str.parse().map_err(|_| ProtocolError::Syntax)?;
    Ok(Position { x, y })
}

/// A read timeout during navigation is not given any special handling;
/// it is surfaced as a transport fault so the Session Controller closes
/// without a reply, the same disposition an unexpected disconnect gets.
fn require_reply<T>(reply: Option<T>) -> Result<T, ProtocolError> {
    reply.ok_or_else(|| ProtocolError::Io(io::Error::from(ErrorKind::TimedOut)))
}

/// Sends `102 MOVE` and returns the reported position, without
/// touching any [Navigator] state — used both during initial-
/// orientation discovery (where no orientation exists yet to update)
/// and, wrapped by [`Navigator::move_forward`], during the main loop.
fn raw_move<T: Transport>(
    reader: &mut FramedReader,
    transport: &mut T,
) -> Result<Position, ProtocolError> {
    wire::send(transport, wire::MOVE)?;
    let payload = require_reply(reader.read_message(transport, "OK ", 12, false)?)?;
    parse_ok_position(&payload)
}

/// Sends `104 TURN RIGHT` and returns the reported position, without
/// touching any [Navigator] state — used only during initial-
/// orientation discovery's obstacle handling. Turn replies are read
/// leniently (trailing spaces stripped, interior whitespace tolerated),
/// unlike the strict `move` reply.
fn raw_turn_right<T: Transport>(
    reader: &mut FramedReader,
    transport: &mut T,
) -> Result<Position, ProtocolError> {
    wire::send(transport, wire::TURN_RIGHT)?;
    let payload = require_reply(reader.read_message(transport, "OK ", 12, true)?)?;
    parse_turn_position(&payload)
}

/// ### NAVIGATOR
///
/// Tracks the last known [Position] and [Orientation], always
/// consistent with the last successful move/turn reply.
pub struct Navigator {
    position: Position,
    orientation: Orientation,
}

impl Navigator {
    /// ### INITIAL ORIENTATION DISCOVERY + NAVIGATION LOOP
    ///
    /// Discovers the robot's starting position and orientation, then
    /// drives it to `(0, 0)`. Returns once the origin is reached.
    pub fn drive_to_origin<T: Transport>(
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        let mut navigator = Self::discover_initial(reader, transport)?;
        navigator.run_loop(reader, transport)
    }

    /// Executes two moves; if they land on the same position (an
    /// obstacle directly ahead), turns right and moves once more to
    /// obtain a second, distinct position. The displacement between the
    /// two distinct positions determines the orientation that produced
    /// it.
    fn discover_initial<T: Transport>(
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<Self, ProtocolError> {
        let position1 = raw_move(reader, transport)?;
        let mut position2 = raw_move(reader, transport)?;
        if position1 == position2 {
            raw_turn_right(reader, transport)?;
            position2 = raw_move(reader, transport)?;
        }
        let dx = position2.x - position1.x;
        let dy = position2.y - position1.y;
        let orientation = Orientation::from_delta(dx, dy);
        Ok(Navigator {
            position: position2,
            orientation,
        })
    }

    /// The repeated axis-reduction loop, run until the tracked position
    /// reaches the origin.
    fn run_loop<T: Transport>(
        &mut self,
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        while self.position != Position::ORIGIN {
            for axis in 0..2 {
                let coord = self.coord(axis);
                if coord != 0 {
                    let desired = Self::desired_direction(axis, self.position);
                    while self.orientation != desired {
                        self.turn_left(reader, transport)?;
                    }
                    while self.coord(axis) != 0 {
                        let before = self.position;
                        self.move_forward(reader, transport)?;
                        if before == self.position {
                            // Stalled against an obstacle: abandon this
                            // axis attempt, the outer loop retries.
                            break;
                        }
                    }
                } else if self.coord(1 - axis) != 0 {
                    self.turn_left(reader, transport)?;
                    self.move_forward(reader, transport)?;
                }
            }
        }
        Ok(())
    }

    fn coord(&self, axis: usize) -> i32 {
        if axis == 0 {
            self.position.x
        } else {
            self.position.y
        }
    }

    /// Desired facing to reduce the magnitude of `position`'s
    /// coordinate on `axis`. Axis 1 pairs "north" with decreasing y —
    /// see DESIGN.md for the rationale.
    fn desired_direction(axis: usize, position: Position) -> Orientation {
        match axis {
            0 => {
                if position.x > 0 {
                    Orientation::West
                } else {
                    Orientation::East
                }
            }
            _ => {
                if position.y < 0 {
                    Orientation::North
                } else {
                    Orientation::South
                }
            }
        }
    }

    /// Turn replies are read leniently: trailing spaces stripped and
    /// interior whitespace tolerated — unlike the strict `move` reply
    /// handled by [`parse_ok_position`].
    fn turn_left<T: Transport>(
        &mut self,
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        wire::send(transport, wire::TURN_LEFT)?;
        let payload = require_reply(reader.read_message(transport, "OK ", 12, true)?)?;
        self.position = parse_turn_position(&payload)?;
        self.orientation = self.orientation.turn_left();
        Ok(())
    }

    fn move_forward<T: Transport>(
        &mut self,
        reader: &mut FramedReader,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        self.position = raw_move(reader, transport)?;
        Ok(())
    }
}
