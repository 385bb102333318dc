//! Bit-manipulation puzzles over 32-bit two's-complement words.
//!
//! Every operation re-implements a common arithmetic or logical primitive
//! with bitwise operators, shifts and wrapping addition only. None of them
//! branch, and none of them can panic on arithmetic overflow: where the
//! classic puzzle relies on two's-complement wrap-around, the `wrapping_*`
//! methods are used instead of `+` and `-`.
//!
//! Predicates return `1` for true and `0` for false, as words.
//!
//! Right shifts on [`Word`] are arithmetic (sign-extending).

/// A 32-bit signed integer in two's-complement representation.
pub type Word = i32;

/// Sign bit of a word.
const SIGN: Word = Word::MIN;

/// Bitwise AND, via De Morgan's law.
pub fn and(x: Word, y: Word) -> Word {
	!(!x | !y)
}

/// Bitwise OR, via De Morgan's law.
pub fn or(x: Word, y: Word) -> Word {
	!(!x & !y)
}

/// Returns `1` if `x` is TMax (`2^31 - 1`), `0` otherwise.
///
/// Adding `TMin + 1` to TMax is the only way to land exactly on zero.
pub fn is_tmax(x: Word) -> Word {
	is_zero(x.wrapping_add(SIGN).wrapping_add(1))
}

/// Returns `1` if `x` is zero, `0` otherwise.
pub fn is_zero(x: Word) -> Word {
	(x == 0) as Word
}

/// Returns `1` if `x` is representable as an `n`-bit two's-complement
/// number, i.e. `-2^(n-1) <= x < 2^(n-1)`.
///
/// Every bit above bit `n - 1` must be a copy of the sign bit, so after
/// shifting them down the result is either all zeros or all ones.
///
/// # Panics
/// Panics if `n` is outside `[1, 32]`.
pub fn fits_in(x: Word, n: Word) -> Word {
	assert!((1..=32).contains(&n), "fits_in: bit width {n} outside [1, 32]");
	let high = x >> (n - 1);
	is_zero(high) | is_zero(!high)
}

/// Returns `1` if `x + y` does not overflow, `0` otherwise.
///
/// Overflow happens only when both operands share a sign and the sum has
/// the other one; operands of opposite signs never overflow.
pub fn can_add(x: Word, y: Word) -> Word {
	let sum = x.wrapping_add(y);
	let overflow = (x ^ sum) & (y ^ sum);
	is_zero(overflow & SIGN)
}

/// Returns `1` if `x > y` as signed integers, `0` otherwise.
///
/// Computes the sign of `y - x`, corrected for the case where the
/// subtraction overflows (operands of opposite signs).
pub fn greater_than(x: Word, y: Word) -> Word {
	let diff = y.wrapping_sub(x);
	let less = diff ^ ((y ^ x) & (diff ^ y));
	(less >> 31) & 1
}

/// Replaces byte `index` of `x` (0 = least significant) with `byte`.
///
/// # Panics
/// Panics if `index` is outside `[0, 3]` or `byte` outside `[0, 255]`.
pub fn write_byte(x: Word, index: Word, byte: Word) -> Word {
	assert!((0..=3).contains(&index), "write_byte: byte index {index} outside [0, 3]");
	assert!((0..=0xff).contains(&byte), "write_byte: byte value {byte} outside [0, 255]");
	let shift = index << 3;
	let cleared = x & !(0xff << shift);
	cleared | (byte << shift)
}

/// Rotates `x` left by `n` bits.
///
/// The bits pushed out at the top are recovered with a logical right shift
/// built from an arithmetic one: shifting by one and clearing the sign bit
/// first means the remaining shift is at most 31, so `n = 0` needs no
/// special case.
///
/// # Panics
/// Panics if `n` is outside `[0, 31]`.
pub fn rotate_left(x: Word, n: Word) -> Word {
	assert!((0..=31).contains(&n), "rotate_left: rotation {n} outside [0, 31]");
	let wrapped = ((x >> 1) & Word::MAX) >> (31 - n);
	(x << n) | wrapped
}

/// Number of set bits in `x`, in `[0, 32]`.
///
/// Negative words are counted with unsigned bit semantics. The count is
/// accumulated in 2-, 4-, 8-, 16- and finally 32-bit buckets.
pub fn pop_count(x: Word) -> Word {
	const M1: Word = 0x5555_5555;
	const M2: Word = 0x3333_3333;
	const M4: Word = 0x0f0f_0f0f;
	const M8: Word = 0x00ff_00ff;
	const M16: Word = 0x0000_ffff;

	let x = (x & M1).wrapping_add((x >> 1) & M1);
	let x = (x & M2).wrapping_add((x >> 2) & M2);
	let x = (x & M4).wrapping_add((x >> 4) & M4);
	let x = (x & M8).wrapping_add((x >> 8) & M8);
	(x & M16).wrapping_add((x >> 16) & M16)
}
