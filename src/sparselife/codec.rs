//! Pairing codec: a bijection between lattice coordinates and cell keys.
//!
//! Each signed component is zig-zag folded into a natural number, then the
//! two naturals are combined with the triangular pairing function
//! `(a + b)(a + b + 1) / 2 + b`. Everything is exact integer arithmetic.
//!
//! Coordinates are limited to `[MIN_COORD, MAX_COORD]` on each axis so that
//! folded components fit in 63 bits and every key fits in a `u128` (keys
//! stay below `2^127`). Encoding outside that range fails instead of
//! silently aliasing another cell.

use thiserror::Error;

/// Smallest addressable coordinate on either axis.
pub const MIN_COORD: i64 = -(1 << 62);
/// Largest addressable coordinate on either axis.
pub const MAX_COORD: i64 = (1 << 62) - 1;

/// Largest folded component produced by an addressable coordinate.
const FOLD_MAX: u64 = (1 << 63) - 1;
/// Every key in the codec image is strictly below this bound.
const KEY_LIMIT: u128 = 1 << 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("coordinate ({x}, {y}) is outside the addressable lattice")]
    CoordinateOutOfRange { x: i64, y: i64 },
    #[error("key {0} is not the image of any addressable coordinate")]
    KeyOutOfRange(u128),
}

/// A single non-negative integer identifying one lattice cell.
///
/// Values are only produced by [`encode`] or the checked `TryFrom<u128>`
/// conversion, so decoding a `CellKey` always succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey(u128);

impl CellKey {
    #[inline]
    pub fn from_coords(x: i64, y: i64) -> Result<Self, CodecError> {
        encode(x, y)
    }

    #[inline(always)]
    pub fn raw(self) -> u128 {
        self.0
    }

    #[inline]
    pub fn coords(self) -> (i64, i64) {
        decode(self)
    }
}

impl TryFrom<u128> for CellKey {
    type Error = CodecError;

    fn try_from(raw: u128) -> Result<Self, Self::Error> {
        if raw >= KEY_LIMIT {
            return Err(CodecError::KeyOutOfRange(raw));
        }
        let (a, b) = split(raw);
        if a > FOLD_MAX || b > FOLD_MAX {
            return Err(CodecError::KeyOutOfRange(raw));
        }
        Ok(Self(raw))
    }
}

/// Zig-zag fold: `0, -1, 1, -2, 2, ...` map to `0, 1, 2, 3, 4, ...`.
///
/// Total over `i64`; [`unfold`] is its inverse over all of `u64`.
#[inline(always)]
pub fn fold(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline(always)]
pub fn unfold(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

/// Triangular pairing of two folded components.
///
/// Exact for `a, b <= 2^63 - 1`, the range [`fold`] produces for addressable
/// coordinates.
#[inline(always)]
pub fn combine(a: u64, b: u64) -> u128 {
    let s = a as u128 + b as u128;
    triangle(s) + b as u128
}

/// Inverse of [`combine`] for `p < 2^127`.
#[inline]
pub fn split(p: u128) -> (u64, u64) {
    debug_assert!(p < KEY_LIMIT);
    // isqrt(2p) is either the diagonal index w or w + 1.
    let mut w = (p << 1).isqrt();
    if triangle(w) > p {
        w -= 1;
    }
    let b = p - triangle(w);
    let a = w - b;
    (a as u64, b as u64)
}

/// `n(n + 1) / 2`, computed without overflowing for `n < 2^64`.
#[inline(always)]
fn triangle(n: u128) -> u128 {
    if n & 1 == 0 {
        (n >> 1) * (n + 1)
    } else {
        n * ((n + 1) >> 1)
    }
}

#[inline(always)]
fn in_range(n: i64) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&n)
}

pub fn encode(x: i64, y: i64) -> Result<CellKey, CodecError> {
    if !in_range(x) || !in_range(y) {
        return Err(CodecError::CoordinateOutOfRange { x, y });
    }
    Ok(CellKey(combine(fold(x), fold(y))))
}

pub fn decode(key: CellKey) -> (i64, i64) {
    let (a, b) = split(key.0);
    (unfold(a), unfold(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_interleaves_signs() {
        let folded: Vec<u64> = [0i64, -1, 1, -2, 2, -3, 3].iter().map(|&n| fold(n)).collect();
        assert_eq!(folded, vec![0, 1, 2, 3, 4, 5, 6]);
        for n in 0..1_000u64 {
            assert_eq!(fold(unfold(n)), n);
        }
        assert_eq!(fold(MAX_COORD), FOLD_MAX - 1);
        assert_eq!(fold(MIN_COORD), FOLD_MAX);
        assert_eq!(unfold(FOLD_MAX), MIN_COORD);
    }

    #[test]
    fn fold_is_total_at_i64_extremes() {
        assert_eq!(fold(i64::MIN), u64::MAX);
        assert_eq!(fold(i64::MAX), u64::MAX - 1);
        assert_eq!(unfold(u64::MAX), i64::MIN);
        assert_eq!(unfold(u64::MAX - 1), i64::MAX);
        for n in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
            assert_eq!(unfold(fold(n)), n);
        }
    }

    #[test]
    fn combine_walks_diagonals() {
        // Diagonal 0: (0,0); diagonal 1: (1,0), (0,1); diagonal 2: (2,0), (1,1), (0,2).
        let expected = [(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2), (3, 0)];
        for (p, &(a, b)) in expected.iter().enumerate() {
            assert_eq!(combine(a, b), p as u128);
            assert_eq!(split(p as u128), (a, b));
        }
    }

    #[test]
    fn split_is_exact_near_triangle_boundaries() {
        for w in [1u128, 2, 1 << 20, (1 << 32) + 7, (1 << 52) + 1, (1 << 63) - 1, (1 << 64) - 2] {
            let t = triangle(w);
            assert_eq!(split(t), (w as u64, 0), "start of diagonal {w}");
            assert_eq!(split(t - 1), (0, (w - 1) as u64), "end of diagonal {}", w - 1);
        }
    }

    #[test]
    fn extreme_corners_round_trip() {
        for &(x, y) in &[
            (MIN_COORD, MIN_COORD),
            (MAX_COORD, MAX_COORD),
            (MIN_COORD, MAX_COORD),
            (MAX_COORD, MIN_COORD),
            (0, MIN_COORD),
        ] {
            let key = encode(x, y).unwrap();
            assert!(key.raw() < KEY_LIMIT);
            assert_eq!(decode(key), (x, y));
        }
    }

    #[test]
    fn rejects_unaddressable_values() {
        assert_eq!(
            encode(MAX_COORD + 1, 0),
            Err(CodecError::CoordinateOutOfRange { x: MAX_COORD + 1, y: 0 })
        );
        assert!(encode(0, i64::MIN).is_err());
        assert_eq!(CellKey::try_from(KEY_LIMIT), Err(CodecError::KeyOutOfRange(KEY_LIMIT)));
        // Start of the diagonal just past the largest addressable fold.
        let past = triangle(FOLD_MAX as u128 + 1);
        assert_eq!(CellKey::try_from(past), Err(CodecError::KeyOutOfRange(past)));
        assert_eq!(CellKey::try_from(past - 1).map(CellKey::coords), Ok((0, MIN_COORD)));
    }
}
