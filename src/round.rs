// This file is part of racquet-rivals.
//
// racquet-rivals is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// racquet-rivals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Slots remaining in the round that closes the prediction window.
pub const ROUND_OF_SIXTEEN_SLOTS: usize = 16;

/// The round index at which exactly sixteen slots remain, `log2(size) - 3`.
///
/// Round 0 is the first round of the draw, so a 64 draw has its round of 16
/// at round 3 and a 128 draw at round 4. A size that is zero or not a power of
/// two has no such round. Sizes below 16 give a negative round that no slot
/// can have.
#[must_use]
pub fn round_of_sixteen_round(size: u32) -> Option<i64> {
    if size.is_power_of_two() {
        Some(i64::from(size.trailing_zeros()) - 3)
    } else {
        None
    }
}

/// How far past the round of 16 `round` is for a draw of `size`.
#[must_use]
pub fn rounds_past_sixteen(size: u32, round: u32) -> Option<i64> {
    round_of_sixteen_round(size).map(|sixteen| i64::from(round) - sixteen)
}
