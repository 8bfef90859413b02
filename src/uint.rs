use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use byteorder::{BigEndian, ByteOrder};

use crate::Error;

/// A fixed-width unsigned integer: `N` 32-bit words, least-significant word
/// first.
///
/// The width never changes and there is no sign; `!` is ones'-complement,
/// not arithmetic negation. `+`, `-` and `*` wrap modulo `2^(32*N)`.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Uint<const N: usize>(pub [u32; N]);

/// The engine width: 16 words, 512 bits.
///
/// Wide enough that expanding a compact target or folding 256-bit work
/// values into a running chainwork total cannot silently truncate.
pub type U512 = Uint<16>;

/// The width block hashes, targets and per-block work live in.
pub type U256 = Uint<8>;

static_assertions::assert_eq_size!(U512, [u8; 64]);
static_assertions::assert_eq_size!(U256, [u8; 32]);

// Scratch sizing for hex parsing; can't use `N` in an array length, so size
// for the widest supported instantiation instead.
const MAX_BYTES: usize = 64 * 4;
const MAX_ENCODED: usize = MAX_BYTES * 2;

impl<const N: usize> Uint<N> {
    const WORD_BITS: usize = 32;

    /// Maximum value.
    pub const MAX: Self = Uint::<N>([u32::MAX; N]);

    /// Zero (additive identity) of this type.
    #[inline]
    pub const fn zero() -> Self {
        Self([0; N])
    }

    /// One (multiplicative identity) of this type.
    #[inline]
    pub fn one() -> Self {
        From::from(1u32)
    }

    /// The maximum value which can be inhabited by this type.
    #[inline]
    pub fn max_value() -> Self {
        Self::MAX
    }

    /// Whether this is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        let &Self(ref arr) = self;
        for i in 0..N {
            if arr[i] != 0 {
                return false;
            }
        }
        true
    }

    /// Low word.
    #[inline]
    pub const fn low_u32(&self) -> u32 {
        let &Self(ref arr) = self;
        arr[0]
    }

    /// Low 2 words (u64). Higher words are silently discarded; this is the
    /// defined narrowing used when a value is known to fit a native integer.
    #[inline]
    pub const fn low_u64(&self) -> u64 {
        let &Self(ref arr) = self;
        ((arr[1] as u64) << 32) | arr[0] as u64
    }

    /// Return the least number of bits needed to represent the number.
    #[inline]
    pub fn bits(&self) -> usize {
        let &Self(ref arr) = self;
        for i in 1..N {
            if arr[N - i] > 0 {
                return (0x20 * (N - i + 1)) - arr[N - i].leading_zeros() as usize;
            }
        }
        0x20 - arr[0].leading_zeros() as usize
    }

    /// Return if specific bit is set.
    ///
    /// # Panics
    ///
    /// Panics if `index` exceeds the bit width of the number.
    #[inline]
    pub const fn bit(&self, index: usize) -> bool {
        let &Self(ref arr) = self;
        arr[index / 32] & (1 << (index % 32)) != 0
    }

    /// Return specific byte, counting from the least significant.
    ///
    /// # Panics
    ///
    /// Panics if `index` exceeds the byte width of the number.
    #[inline]
    pub const fn byte(&self, index: usize) -> u8 {
        let &Self(ref arr) = self;
        (arr[index / 4] >> ((index % 4) * 8)) as u8
    }

    /// Returns the number of leading zeros in the binary representation of self.
    pub fn leading_zeros(&self) -> u32 {
        let mut r = 0;
        for i in 0..N {
            let w = self.0[N - i - 1];
            if w == 0 {
                r += 32;
            } else {
                r += w.leading_zeros();
                break;
            }
        }
        r
    }

    /// Returns the number of trailing zeros in the binary representation of self.
    pub fn trailing_zeros(&self) -> u32 {
        let mut r = 0;
        for i in 0..N {
            let w = self.0[i];
            if w == 0 {
                r += 32;
            } else {
                r += w.trailing_zeros();
                break;
            }
        }
        r
    }

    /// Parse a hexadecimal string, with or without a `0x` prefix.
    ///
    /// Each 8-digit group decodes one word, most significant group first.
    /// An odd-length string is read as if a zero digit preceded it, so the
    /// minimal strings [`to_hex`](Self::to_hex) produces always parse back.
    /// Fails with [`Error::InvalidLength`] on an empty string or one with
    /// more digits than the width can hold, and [`Error::InvalidDigit`] on
    /// any character outside `[0-9a-fA-F]`.
    pub fn from_hex(value: &str) -> Result<Self, Error> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        let encoded = value.as_bytes();

        if encoded.is_empty() || encoded.len() > N * 8 {
            return Err(Error::InvalidLength);
        }

        let mut bytes = [0u8; MAX_BYTES];

        if encoded.len() % 2 == 0 {
            let out = &mut bytes[MAX_BYTES - encoded.len() / 2..];
            hex::decode_to_slice(encoded, out)?;
        } else {
            // Prepend '0' by overlaying the digits on a scratch buffer
            // filled with '0' characters.
            let mut s = [b'0'; MAX_ENCODED];
            s[MAX_ENCODED - encoded.len()..].copy_from_slice(encoded);
            let encoded = &s[MAX_ENCODED - encoded.len() - 1..];

            let out = &mut bytes[MAX_BYTES - encoded.len() / 2..];
            hex::decode_to_slice(encoded, out)?;
        }

        Ok(Self::read_be_words(&bytes[MAX_BYTES - N * 4..]))
    }

    /// Render as minimal hexadecimal: the full fixed width, most significant
    /// word first, with leading zero digits stripped. Zero renders `"0"`,
    /// never an empty string.
    ///
    /// `width` is the caller's output budget in characters; it must cover
    /// the full fixed-width rendering (`8 * N`) or the call fails with
    /// [`Error::BufferTooSmall`].
    pub fn to_hex(&self, width: usize) -> Result<String, Error> {
        if width < N * 8 {
            return Err(Error::BufferTooSmall);
        }
        Ok(format!("{:x}", self))
    }

    /// Converts from big endian representation bytes in memory.
    ///
    /// The slice length must be a multiple of 4 and at most `4 * N` bytes;
    /// words beyond the encoded range are zero.
    pub fn from_big_endian(slice: &[u8]) -> Result<Self, Error> {
        if slice.len() % 4 != 0 || slice.len() > N * 4 {
            return Err(Error::InvalidLength);
        }

        let mut padded = vec![0u8; N * 4];
        padded[N * 4 - slice.len()..].copy_from_slice(slice);

        Ok(Self::read_be_words(&padded))
    }

    /// Write to the slice in big-endian format.
    ///
    /// The slice length must be a multiple of 4 and at most `4 * N` bytes,
    /// or the call fails with [`Error::BufferTooSmall`]. A slice narrower
    /// than the value's significant bytes truncates: only the low words are
    /// written. Callers pass the domain width, e.g. 32 bytes for a 256-bit
    /// hash or target.
    pub fn to_big_endian(&self, bytes: &mut [u8]) -> Result<(), Error> {
        if bytes.len() % 4 != 0 || bytes.len() > N * 4 {
            return Err(Error::BufferTooSmall);
        }

        let words = bytes.len() / 4;
        for i in 0..words {
            BigEndian::write_u32(&mut bytes[4 * i..], self.0[words - i - 1]);
        }
        Ok(())
    }

    // `slice` must be exactly `4 * N` bytes.
    fn read_be_words(slice: &[u8]) -> Self {
        let mut ret = [0; N];
        for i in 0..N {
            ret[N - i - 1] = BigEndian::read_u32(&slice[4 * i..]);
        }
        Self(ret)
    }

    /// Add with overflow. The boolean is the carry out of the top word.
    #[inline(always)]
    pub fn overflowing_add(self, other: Self) -> (Self, bool) {
        let Self(ref me) = self;
        let Self(ref you) = other;

        let mut ret = [0u32; N];
        let mut carry = 0u64;
        for i in 0..N {
            let tmp = me[i] as u64 + you[i] as u64 + carry;
            ret[i] = tmp as u32;
            carry = tmp >> Self::WORD_BITS;
        }
        (Self(ret), carry != 0)
    }

    /// Subtraction with underflow. The boolean is the borrow out of the top
    /// word; when it is set the value has wrapped modulo `2^(32*N)`.
    #[inline(always)]
    pub fn overflowing_sub(self, other: Self) -> (Self, bool) {
        let Self(ref me) = self;
        let Self(ref you) = other;

        let mut ret = [0u32; N];
        let mut borrow = 0u64;
        for i in 0..N {
            let tmp = (1u64 << Self::WORD_BITS) + me[i] as u64 - you[i] as u64 - borrow;
            ret[i] = tmp as u32;
            borrow = u64::from(tmp <= u32::MAX as u64);
        }
        (Self(ret), borrow != 0)
    }

    /// Multiply with overflow. The boolean reports any nonzero word in the
    /// discarded upper half of the full double-width product.
    #[inline(always)]
    pub fn overflowing_mul(self, other: Self) -> (Self, bool) {
        let prod = self.full_mul(other);

        let mut ret = [0u32; N];
        ret.copy_from_slice(&prod[..N]);

        let overflow = prod[N..].iter().any(|&w| w != 0);
        (Self(ret), overflow)
    }

    // Schoolbook product of all word pairs into `2 * N` words.
    fn full_mul(self, other: Self) -> Vec<u32> {
        let Self(ref me) = self;
        let Self(ref you) = other;
        let mut ret = vec![0u32; 2 * N];

        for i in 0..N {
            let mut carry = 0u64;
            for j in 0..N {
                let tmp = me[i] as u64 * you[j] as u64 + ret[i + j] as u64 + carry;
                ret[i + j] = tmp as u32;
                carry = tmp >> Self::WORD_BITS;
            }
            ret[i + N] = carry as u32;
        }
        ret
    }

    /// Wrapping addition modulo `2^(32*N)`.
    #[inline]
    pub fn wrapping_add(self, other: Self) -> Self {
        self.overflowing_add(other).0
    }

    /// Wrapping subtraction modulo `2^(32*N)`.
    #[inline]
    pub fn wrapping_sub(self, other: Self) -> Self {
        self.overflowing_sub(other).0
    }

    /// Wrapping multiplication modulo `2^(32*N)`.
    #[inline]
    pub fn wrapping_mul(self, other: Self) -> Self {
        self.overflowing_mul(other).0
    }

    /// Checked addition. Returns `None` if overflow occurred.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match self.overflowing_add(other) {
            (_, true) => None,
            (val, _) => Some(val),
        }
    }

    /// Checked subtraction. Returns `None` if overflow occurred.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        match self.overflowing_sub(other) {
            (_, true) => None,
            (val, _) => Some(val),
        }
    }

    /// Checked multiplication. Returns `None` if overflow occurred.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        match self.overflowing_mul(other) {
            (_, true) => None,
            (val, _) => Some(val),
        }
    }

    /// Checked division. Returns `None` if `other == 0`.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        self.div_mod(other).ok().map(|(quotient, _)| quotient)
    }

    /// Checked modulus. Returns `None` if `other == 0`.
    pub fn checked_rem(self, other: Self) -> Option<Self> {
        self.div_mod(other).ok().map(|(_, remainder)| remainder)
    }

    /// Returns `(self / other, self % other)` by binary long division:
    /// double a denominator and a power-of-two counter until the denominator
    /// would pass `self` (or its top bit is set), then walk back down,
    /// subtracting the shifted denominator and OR-ing the counter into the
    /// quotient wherever the subtraction fits. What remains at the end is
    /// the remainder.
    ///
    /// A zero divisor fails with [`Error::DivisionByZero`] before the
    /// doubling loop; without the check the loop would never terminate.
    pub fn div_mod(self, other: Self) -> Result<(Self, Self), Error> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let mut current = Self::one();
        let mut denom = other;
        let mut remaining = self;
        let mut overflow = false;

        while denom <= self {
            if denom.0[N - 1] & (1 << (Self::WORD_BITS - 1)) != 0 {
                overflow = true;
                break;
            }
            current = current << 1;
            denom = denom << 1;
        }

        if !overflow {
            current = current >> 1;
            denom = denom >> 1;
        }

        let mut quotient = Self::zero();
        while !current.is_zero() {
            if remaining >= denom {
                remaining = remaining.wrapping_sub(denom);
                quotient = quotient | current;
            }
            current = current >> 1;
            denom = denom >> 1;
        }

        Ok((quotient, remaining))
    }

    /// Exponentiation by repeated multiplication, wrapping modulo
    /// `2^(32*N)`. A zero exponent yields one for every base, `0^0`
    /// included. The exponent is counted down internally; the caller's
    /// value is never touched.
    pub fn pow(self, expon: Self) -> Self {
        if expon.is_zero() {
            return Self::one();
        }

        let mut result = self;
        let mut count = expon;
        count.decrement();
        while !count.is_zero() {
            result = result.wrapping_mul(self);
            count.decrement();
        }
        result
    }

    /// Add one in place, wrapping modulo `2^(32*N)`.
    ///
    /// The carry stops at the first word that does not wrap; a carry only
    /// continues past a word when that word itself wrapped.
    pub fn increment(&mut self) {
        for word in self.0.iter_mut() {
            let (res, wrapped) = word.overflowing_add(1);
            *word = res;
            if !wrapped {
                break;
            }
        }
    }

    /// Subtract one in place, wrapping modulo `2^(32*N)`.
    pub fn decrement(&mut self) {
        for word in self.0.iter_mut() {
            let (res, wrapped) = word.overflowing_sub(1);
            *word = res;
            if !wrapped {
                break;
            }
        }
    }
}

/// Get a reference to the underlying little-endian words.
impl<const N: usize> AsRef<[u32]> for Uint<N> {
    #[inline]
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<u32> for Uint<N> {
    fn from(value: u32) -> Self {
        let mut ret = [0; N];
        ret[0] = value;
        Self(ret)
    }
}

/// The low 64 bits land in the two least-significant words.
impl<const N: usize> From<u64> for Uint<N> {
    fn from(value: u64) -> Self {
        let mut ret = [0; N];
        ret[0] = value as u32;
        ret[1] = (value >> 32) as u32;
        Self(ret)
    }
}

impl<const N: usize> From<u128> for Uint<N> {
    fn from(value: u128) -> Self {
        let mut ret = [0; N];
        ret[0] = value as u32;
        ret[1] = (value >> 32) as u32;
        ret[2] = (value >> 64) as u32;
        ret[3] = (value >> 96) as u32;
        Self(ret)
    }
}

impl<'a, const N: usize> From<&'a Uint<N>> for Uint<N> {
    fn from(x: &'a Self) -> Self {
        *x
    }
}

impl<const N: usize> FromStr for Uint<N> {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hex(value)
    }
}

impl<T, const N: usize> core::ops::Add<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    type Output = Uint<N>;

    fn add(self, other: T) -> Uint<N> {
        self.wrapping_add(other.into())
    }
}

impl<T, const N: usize> core::ops::AddAssign<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    fn add_assign(&mut self, other: T) {
        *self = self.wrapping_add(other.into());
    }
}

impl<T, const N: usize> core::ops::Sub<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    type Output = Uint<N>;

    #[inline]
    fn sub(self, other: T) -> Uint<N> {
        self.wrapping_sub(other.into())
    }
}

impl<T, const N: usize> core::ops::SubAssign<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    fn sub_assign(&mut self, other: T) {
        *self = self.wrapping_sub(other.into());
    }
}

impl<T, const N: usize> core::ops::Mul<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    type Output = Uint<N>;

    fn mul(self, other: T) -> Uint<N> {
        self.wrapping_mul(other.into())
    }
}

impl<T, const N: usize> core::ops::MulAssign<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    fn mul_assign(&mut self, other: T) {
        *self = self.wrapping_mul(other.into());
    }
}

impl<T, const N: usize> core::ops::Div<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    type Output = Uint<N>;

    /// # Panics
    ///
    /// Panics if `other` is zero; use [`Uint::div_mod`] or
    /// [`Uint::checked_div`] to handle a zero divisor.
    fn div(self, other: T) -> Uint<N> {
        match self.div_mod(other.into()) {
            Ok((quotient, _)) => quotient,
            Err(_) => panic!("division by zero"),
        }
    }
}

impl<T, const N: usize> core::ops::DivAssign<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    fn div_assign(&mut self, other: T) {
        *self = *self / other.into();
    }
}

impl<T, const N: usize> core::ops::Rem<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    type Output = Uint<N>;

    /// # Panics
    ///
    /// Panics if `other` is zero; use [`Uint::div_mod`] or
    /// [`Uint::checked_rem`] to handle a zero divisor.
    fn rem(self, other: T) -> Uint<N> {
        match self.div_mod(other.into()) {
            Ok((_, remainder)) => remainder,
            Err(_) => panic!("division by zero"),
        }
    }
}

impl<T, const N: usize> core::ops::RemAssign<T> for Uint<N>
where
    T: Into<Uint<N>>,
{
    fn rem_assign(&mut self, other: T) {
        *self = *self % other.into();
    }
}

impl<const N: usize> core::ops::BitAnd<Uint<N>> for Uint<N> {
    type Output = Uint<N>;

    #[inline]
    fn bitand(self, other: Self) -> Self {
        let Self(ref arr1) = self;
        let Self(ref arr2) = other;
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = arr1[i] & arr2[i];
        }
        Self(ret)
    }
}

impl<const N: usize> core::ops::BitOr<Uint<N>> for Uint<N> {
    type Output = Uint<N>;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        let Self(ref arr1) = self;
        let Self(ref arr2) = other;
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = arr1[i] | arr2[i];
        }
        Self(ret)
    }
}

impl<const N: usize> core::ops::BitXor<Uint<N>> for Uint<N> {
    type Output = Uint<N>;

    #[inline]
    fn bitxor(self, other: Self) -> Self {
        let Self(ref arr1) = self;
        let Self(ref arr2) = other;
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = arr1[i] ^ arr2[i];
        }
        Self(ret)
    }
}

/// Ones'-complement of every word. This is bitwise complement, not
/// arithmetic negation: the type is unsigned and `!x + x` is all ones, not
/// zero.
impl<const N: usize> core::ops::Not for Uint<N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        let Self(ref arr) = self;
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = !arr[i];
        }
        Self(ret)
    }
}

impl<const N: usize> core::ops::Shl<usize> for Uint<N> {
    type Output = Self;

    /// Shifting by the full bit width or more yields zero.
    fn shl(self, shift: usize) -> Self {
        let Self(ref original) = self;
        let mut ret = [0u32; N];
        let word_shift = shift / 32;
        let bit_shift = shift % 32;

        // whole words
        for i in word_shift..N {
            ret[i] = original[i - word_shift] << bit_shift;
        }
        // spill from the lower neighbor
        if bit_shift > 0 {
            for i in word_shift + 1..N {
                ret[i] |= original[i - 1 - word_shift] >> (32 - bit_shift);
            }
        }
        Self(ret)
    }
}

impl<const N: usize> core::ops::ShlAssign<usize> for Uint<N> {
    fn shl_assign(&mut self, shift: usize) {
        *self = *self << shift;
    }
}

impl<const N: usize> core::ops::Shr<usize> for Uint<N> {
    type Output = Self;

    /// Shifting by the full bit width or more yields zero.
    fn shr(self, shift: usize) -> Self {
        let Self(ref original) = self;
        let mut ret = [0u32; N];
        let word_shift = shift / 32;
        let bit_shift = shift % 32;

        // whole words
        for i in word_shift..N {
            ret[i - word_shift] = original[i] >> bit_shift;
        }
        // spill from the upper neighbor
        if bit_shift > 0 {
            for i in word_shift + 1..N {
                ret[i - word_shift - 1] |= original[i] << (32 - bit_shift);
            }
        }
        Self(ret)
    }
}

impl<const N: usize> core::ops::ShrAssign<usize> for Uint<N> {
    fn shr_assign(&mut self, shift: usize) {
        *self = *self >> shift;
    }
}

/// Total order, most significant word first.
impl<const N: usize> Ord for Uint<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ref().iter().rev().cmp(other.as_ref().iter().rev())
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> fmt::Debug for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Minimal hexadecimal, the node's diagnostic rendering.
impl<const N: usize> fmt::Display for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl<const N: usize> fmt::LowerHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self(ref data) = self;
        if f.alternate() {
            write!(f, "0x")?;
        }
        // zero must still produce a digit
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut latch = false;
        for word in data.iter().rev() {
            for x in 0..8 {
                let nibble = (word >> ((7 - x) * 4)) & 0xf;
                if !latch {
                    latch = nibble != 0;
                }
                if latch {
                    write!(f, "{:x}", nibble)?;
                }
            }
        }
        Ok(())
    }
}

macro_rules! convert {
    ($small:tt, $big:tt) => {
        impl From<Uint<$small>> for Uint<$big> {
            fn from(num: Uint<$small>) -> Self {
                let Uint::<$small>(ref arr) = num;
                let mut arr2 = [0; $big];
                for i in 0..$small {
                    arr2[i] = arr[i];
                }
                Uint::<$big>(arr2)
            }
        }

        impl From<Uint<$big>> for Uint<$small> {
            fn from(num: Uint<$big>) -> Self {
                let Uint::<$big>(ref arr) = num;
                let mut arr2 = [0; $small];
                for i in 0..$small {
                    arr2[i] = arr[i];
                }
                Uint::<$small>(arr2)
            }
        }
    };
}

// U256 <-> U512
convert!(8, 16);
