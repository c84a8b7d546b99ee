// ============================================================================
// 128-bit Unsigned Magnitude
// Fixed-width limb arithmetic for exact decimal scaling
// ============================================================================

use std::num::NonZeroU64;

/// Unsigned 128-bit magnitude held as four little-endian 32-bit limbs.
///
/// The value is always non-negative. Any operation whose result would need a
/// fifth limb returns `None` instead of wrapping, so callers can turn it into
/// an overflow error.
///
/// A 64-bit significand times a 64-bit magnitude needs at most 128 bits,
/// which is why the width stops here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uint128 {
    limbs: [u32; 4],
}

impl Uint128 {
    /// Zero
    pub const ZERO: Self = Self { limbs: [0; 4] };

    /// Widen a u64.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self {
            limbs: [value as u32, (value >> 32) as u32, 0, 0],
        }
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }

    /// Multiply by a 64-bit value, `None` if the product needs more than 128 bits.
    #[inline]
    pub fn multiply_by_u64(self, factor: u64) -> Option<Self> {
        let mut limbs = [0u32; 4];
        let mut carry: u128 = 0;
        for (out, &limb) in limbs.iter_mut().zip(self.limbs.iter()) {
            // < 2^96, cannot overflow u128
            let product = limb as u128 * factor as u128 + carry;
            *out = product as u32;
            carry = product >> 32;
        }
        (carry == 0).then_some(Self { limbs })
    }

    /// Multiply by 10, `None` on overflow.
    #[inline]
    pub fn multiply_by_10(self) -> Option<Self> {
        let mut limbs = [0u32; 4];
        let mut carry: u64 = 0;
        for (out, &limb) in limbs.iter_mut().zip(self.limbs.iter()) {
            let product = limb as u64 * 10 + carry;
            *out = product as u32;
            carry = product >> 32;
        }
        (carry == 0).then_some(Self { limbs })
    }

    /// Divide by 10, discarding the remainder. Never overflows.
    #[inline]
    pub fn divide_by_10(self) -> Self {
        let mut limbs = [0u32; 4];
        let mut remainder: u64 = 0;
        for i in (0..4).rev() {
            let current = (remainder << 32) | self.limbs[i] as u64;
            limbs[i] = (current / 10) as u32;
            remainder = current % 10;
        }
        Self { limbs }
    }

    /// Divide by a non-zero 64-bit value.
    ///
    /// Returns the truncated quotient and the remainder.
    pub fn divide_by_u64(self, divisor: NonZeroU64) -> (Self, u64) {
        let divisor = divisor.get() as u128;
        let mut limbs = [0u32; 4];
        let mut remainder: u128 = 0;
        for i in (0..4).rev() {
            // remainder < divisor, so current / divisor < 2^32
            let current = (remainder << 32) | self.limbs[i] as u128;
            limbs[i] = (current / divisor) as u32;
            remainder = current % divisor;
        }
        (Self { limbs }, remainder as u64)
    }

    /// Add another magnitude, `None` on overflow.
    pub fn add(self, other: Self) -> Option<Self> {
        let mut limbs = [0u32; 4];
        let mut carry: u64 = 0;
        for i in 0..4 {
            let sum = self.limbs[i] as u64 + other.limbs[i] as u64 + carry;
            limbs[i] = sum as u32;
            carry = sum >> 32;
        }
        (carry == 0).then_some(Self { limbs })
    }

    /// True if the magnitude is less than or equal to `bound`.
    #[inline]
    pub fn is_at_most(&self, bound: u64) -> bool {
        match self.to_u64() {
            Some(value) => value <= bound,
            None => false,
        }
    }

    /// Narrow to u64, `None` if either high limb is set.
    #[inline]
    pub fn to_u64(&self) -> Option<u64> {
        if self.limbs[2] != 0 || self.limbs[3] != 0 {
            return None;
        }
        Some(self.limbs[0] as u64 | (self.limbs[1] as u64) << 32)
    }
}

impl From<u64> for Uint128 {
    #[inline]
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value
            .limbs
            .iter()
            .rev()
            .fold(0u128, |acc, &limb| (acc << 32) | limb as u128)
    }
}
