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

//! ## ORIENTATION
//!
//! The direction the robot faces, modeled as a four-valued tagged
//! variant with explicit cyclic successor/predecessor — never as a raw
//! integer index escaped into callers.

/// One of the four cardinal directions the robot can face.
///
/// Orientation is always server-inferred from successive move/turn
/// replies; it is never supplied by the client directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// Rotates one step clockwise: N→E→S→W→N.
    pub fn turn_right(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Rotates one step counter-clockwise: N→W→S→E→N.
    pub fn turn_left(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    /// Infers orientation from the displacement between two observed
    /// positions: `dx>0 → E`, `dx<0 → W`, `dy>0 → N`, otherwise `S`.
    /// The final branch is an unconditional default, not a `dy<0`
    /// guard: `dx==0 && dy==0` (still blocked on both probe moves) is
    /// reachable and defaults to `S` rather than signaling a fault.
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        if dx > 0 {
            Orientation::East
        } else if dx < 0 {
            Orientation::West
        } else if dy > 0 {
            Orientation::North
        } else {
            Orientation::South
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_right_cycles_n_e_s_w() {
        let mut o = Orientation::North;
        for expected in [
            Orientation::East,
            Orientation::South,
            Orientation::West,
            Orientation::North,
        ] {
            o = o.turn_right();
            assert_eq!(o, expected);
        }
    }

    #[test]
    fn turn_left_is_inverse_of_turn_right() {
        for o in [
            Orientation::North,
            Orientation::East,
            Orientation::South,
            Orientation::West,
        ] {
            assert_eq!(o.turn_right().turn_left(), o);
        }
    }

    #[test]
    fn from_delta_prefers_x_axis() {
        assert_eq!(Orientation::from_delta(3, 5), Orientation::East);
        assert_eq!(Orientation::from_delta(-3, 5), Orientation::West);
        assert_eq!(Orientation::from_delta(0, 4), Orientation::North);
        assert_eq!(Orientation::from_delta(0, -4), Orientation::South);
    }

    #[test]
    fn from_delta_defaults_to_south_when_both_zero() {
        assert_eq!(Orientation::from_delta(0, 0), Orientation::South);
    }
}
