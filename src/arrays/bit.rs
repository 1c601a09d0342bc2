use std::{
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
    ops::{AddAssign, BitAnd, BitOr, BitXor, Neg, Not, Shl, Shr},
};

use crate::error::{Error, Result};

const WORD_LEN: usize = u64::BITS as usize;

/// Conversion of a value to a single bit. Any non-zero number is a set bit.
pub trait IntoBit {
    fn into_bit(self) -> bool;
}

impl IntoBit for bool {
    fn into_bit(self) -> bool {
        self
    }
}

impl<T: IntoBit + Copy> IntoBit for &T {
    fn into_bit(self) -> bool {
        (*self).into_bit()
    }
}

macro_rules! impl_into_bit {
    ($($t:ty),*) => {
        $(impl IntoBit for $t {
            fn into_bit(self) -> bool {
                self != 0
            }
        })*
    };
}

impl_into_bit!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// A bit array (bitmap, bitset or bit vector) packing bits into 64-bit words.
///
/// Read left to right, the bits form a binary number: `BitArray::from_iter([1, 0, 0])`
/// displays as `100` and has the value 4. Equality and hashing go through that value,
/// so leading zeros do not matter.
#[derive(Clone, Default)]
pub struct BitArray {
    words: Vec<u64>,
    len: usize,
}

impl BitArray {
    pub fn new() -> Self {
        Self {
            words: vec![],
            len: 0,
        }
    }

    /// Creates an array of `len` unset bits
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; Self::words_for(len)],
            len,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    #[inline(always)]
    pub fn get(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            Some(self.get_unchecked(pos))
        } else {
            None
        }
    }

    #[inline(always)]
    fn get_unchecked(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len);
        let block = pos / WORD_LEN;
        let shift = pos % WORD_LEN;
        (self.words[block] >> shift) & 1 == 1
    }

    #[inline(always)]
    fn set_unchecked(&mut self, pos: usize, b: bool) {
        debug_assert!(pos < self.len);
        let wpos = pos / WORD_LEN;
        let pos_in_word = pos % WORD_LEN;
        self.words[wpos] &= !(1 << pos_in_word);
        self.words[wpos] |= (b as u64) << pos_in_word;
    }

    /// Updates the `pos`-th bit
    pub fn set(&mut self, pos: usize, bit: impl IntoBit) -> Result<()> {
        if pos >= self.len {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                len: self.len,
            });
        }
        self.set_unchecked(pos, bit.into_bit());
        Ok(())
    }

    /// Appends the bit representation of `bit`
    pub fn push(&mut self, bit: impl IntoBit) {
        let b = bit.into_bit();
        let pos_in_word = self.len % WORD_LEN;
        if pos_in_word == 0 {
            self.words.push(b as u64);
        } else if let Some(cur_word) = self.words.last_mut() {
            *cur_word |= (b as u64) << pos_in_word;
        }
        self.len += 1;
    }

    /// Removes and returns the last bit
    pub fn pop(&mut self) -> Option<bool> {
        let last = self.get(self.len.checked_sub(1)?)?;
        self.set_unchecked(self.len - 1, false);
        self.len -= 1;
        if self.len % WORD_LEN == 0 {
            self.words.pop();
        }
        Some(last)
    }

    /// Inserts the bit representation of `bit` at `index`, shifting later bits right
    pub fn insert(&mut self, index: usize, bit: impl IntoBit) -> Result<()> {
        if index > self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        self.push(false);
        for pos in (index + 1..self.len).rev() {
            let moved = self.get_unchecked(pos - 1);
            self.set_unchecked(pos, moved);
        }
        self.set_unchecked(index, bit.into_bit());
        Ok(())
    }

    /// Removes the bit at `index`, shifting later bits left
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let removed = self.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len,
        })?;
        for pos in index..self.len - 1 {
            let moved = self.get_unchecked(pos + 1);
            self.set_unchecked(pos, moved);
        }
        self.pop();
        Ok(removed)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bits: self,
            front: 0,
            back: self.len,
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when any bit is set, i.e. the numeric value is non-zero
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Number of bits from the first set bit to the end
    pub fn significant_bits(&self) -> usize {
        self.iter()
            .position(|b| b)
            .map(|first| self.len - first)
            .unwrap_or(0)
    }

    /// The numeric value of the bits read left to right
    pub fn to_u64(&self) -> Result<u64> {
        let bits = self.significant_bits();
        if bits > WORD_LEN {
            return Err(Error::Overflow {
                bits,
                target: "u64",
            });
        }
        Ok(self
            .iter()
            .skip(self.len - bits)
            .fold(0u64, |acc, b| (acc << 1) | b as u64))
    }

    /// The numeric value as a float. Arrays wider than 64 bits lose precision.
    pub fn to_f64(&self) -> f64 {
        self.iter()
            .fold(0f64, |acc, b| acc * 2.0 + if b { 1.0 } else { 0.0 })
    }

    /// New array with the bits rotated `n` positions to the left
    pub fn rotate_left(&self, n: usize) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        let n = n % self.len;
        (0..self.len)
            .map(|i| self.get_unchecked((i + n) % self.len))
            .collect()
    }

    /// New array with the bits rotated `n` positions to the right
    pub fn rotate_right(&self, n: usize) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        let n = n % self.len;
        self.rotate_left(self.len - n)
    }

    /// Bit `j` counted from the least significant end, zero past the start
    fn bit_from_right(&self, j: usize) -> bool {
        j < self.len && self.get_unchecked(self.len - 1 - j)
    }

    fn combine(&self, other: &Self, op: impl Fn(bool, bool) -> bool) -> Self {
        let width = self.len.max(other.len);
        (0..width)
            .rev()
            .map(|j| op(self.bit_from_right(j), other.bit_from_right(j)))
            .collect()
    }

    /// Digits of the numeric value in a power-of-two radix, most significant first
    fn radix_digits(&self, bits_per_digit: usize, upper: bool) -> String {
        let significant = self.significant_bits();
        if significant == 0 {
            return "0".into();
        }
        let mut digits = Vec::new();
        let mut j = 0;
        while j < significant {
            let mut digit = 0u32;
            for k in 0..bits_per_digit {
                if self.bit_from_right(j + k) {
                    digit |= 1 << k;
                }
            }
            let c = std::char::from_digit(digit, 1 << bits_per_digit).unwrap_or('0');
            digits.push(if upper { c.to_ascii_uppercase() } else { c });
            j += bits_per_digit;
        }
        // The top digit may only carry zero padding
        while digits.len() > 1 && digits.last() == Some(&'0') {
            digits.pop();
        }
        digits.iter().rev().collect()
    }

    #[inline(always)]
    fn words_for(n: usize) -> usize {
        (n + WORD_LEN - 1) / WORD_LEN
    }
}

impl<B: IntoBit> FromIterator<B> for BitArray {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<B: IntoBit> Extend<B> for BitArray {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        for b in iter {
            self.push(b);
        }
    }
}

pub struct Iter<'a> {
    bits: &'a BitArray,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        let b = self.bits.get_unchecked(self.front);
        self.front += 1;
        Some(b)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bits.get_unchecked(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitArray {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::ops::Index<usize> for BitArray {
    type Output = bool;

    fn index(&self, pos: usize) -> &bool {
        match self.get(pos) {
            Some(true) => &true,
            Some(false) => &false,
            None => panic!("index out of bounds: the len is {} but the index is {}", self.len, pos),
        }
    }
}

impl BitOr for &BitArray {
    type Output = BitArray;

    fn bitor(self, rhs: Self) -> BitArray {
        self.combine(rhs, |a, b| a | b)
    }
}

impl BitAnd for &BitArray {
    type Output = BitArray;

    fn bitand(self, rhs: Self) -> BitArray {
        self.combine(rhs, |a, b| a & b)
    }
}

impl BitXor for &BitArray {
    type Output = BitArray;

    fn bitxor(self, rhs: Self) -> BitArray {
        self.combine(rhs, |a, b| a ^ b)
    }
}

impl Not for &BitArray {
    type Output = BitArray;

    fn not(self) -> BitArray {
        self.iter().map(|b| !b).collect()
    }
}

impl Shl<usize> for &BitArray {
    type Output = BitArray;

    fn shl(self, n: usize) -> BitArray {
        self.rotate_left(n)
    }
}

impl Shr<usize> for &BitArray {
    type Output = BitArray;

    fn shr(self, n: usize) -> BitArray {
        self.rotate_right(n)
    }
}

/// A negative amount rotates the other way
impl Shl<isize> for &BitArray {
    type Output = BitArray;

    fn shl(self, n: isize) -> BitArray {
        if n < 0 {
            self.rotate_right(n.unsigned_abs())
        } else {
            self.rotate_left(n.unsigned_abs())
        }
    }
}

impl Shr<isize> for &BitArray {
    type Output = BitArray;

    fn shr(self, n: isize) -> BitArray {
        if n < 0 {
            self.rotate_left(n.unsigned_abs())
        } else {
            self.rotate_right(n.unsigned_abs())
        }
    }
}

/// Numeric value of the inverted array
impl Neg for &BitArray {
    type Output = Result<u64>;

    fn neg(self) -> Result<u64> {
        (!self).to_u64()
    }
}

impl AddAssign<&BitArray> for BitArray {
    fn add_assign(&mut self, rhs: &BitArray) {
        // Collect first, rhs may alias a clone of self
        let bits: Vec<bool> = rhs.iter().collect();
        self.extend(bits);
    }
}

impl AddAssign<bool> for BitArray {
    fn add_assign(&mut self, rhs: bool) {
        self.push(rhs);
    }
}

impl PartialEq for BitArray {
    fn eq(&self, other: &Self) -> bool {
        let a = self.significant_bits();
        let b = other.significant_bits();
        a == b
            && self
                .iter()
                .skip(self.len - a)
                .eq(other.iter().skip(other.len - b))
    }
}

impl Eq for BitArray {}

impl PartialEq<u64> for BitArray {
    fn eq(&self, other: &u64) -> bool {
        self.to_u64().map(|v| v == *other).unwrap_or(false)
    }
}

impl Hash for BitArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let significant = self.significant_bits();
        significant.hash(state);
        for b in self.iter().skip(self.len - significant) {
            b.hash(state);
        }
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.iter() {
            f.write_char(if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BitArray")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl fmt::Binary for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.radix_digits(1, false))
    }
}

impl fmt::Octal for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0o", &self.radix_digits(3, false))
    }
}

impl fmt::LowerHex for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.radix_digits(4, false))
    }
}

impl fmt::UpperHex for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.radix_digits(4, true))
    }
}
