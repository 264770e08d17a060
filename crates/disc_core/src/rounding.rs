//! Exact ratio type and the four spreadsheet rounding functions.
//!
//! Every weight, denominator and percentage is carried as an exact rational.
//! Decimal literals such as `2.345` are parsed from their shortest decimal text,
//! so `ROUND(2.345, 2)` sees the decimal value 2.345 and yields 2.35, the way a
//! spreadsheet does, rather than the binary neighbour 2.34499999…

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::CoreError;

/// Largest number of fractional digits accepted in a configuration literal.
pub const MAX_FRACTION_DIGITS: u32 = 12;

/// Largest `decimals` value accepted by a rounding spec.
pub const MAX_ROUNDING_DECIMALS: u32 = 9;

/// Rounding function applied at a configured decimal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingFn {
    /// Half away from zero (spreadsheet `ROUND`).
    #[serde(rename = "round")]
    Round,
    /// Away from zero (spreadsheet `ROUNDUP`).
    #[serde(rename = "round_up")]
    RoundUp,
    /// Toward zero (spreadsheet `ROUNDDOWN`).
    #[serde(rename = "round_down")]
    RoundDown,
    /// Half to even.
    #[serde(rename = "bankers")]
    Bankers,
}

/// Exact ratio with normalized sign and positive, GCD-reduced denominator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Ratio {
    num: i128,
    den: i128,
}

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    if a == 0 { 1 } else { a }
}

/// `10^decimals`, or `None` when it does not fit.
#[inline]
pub fn pow10(decimals: u32) -> Option<i128> {
    10i128.checked_pow(decimals)
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { num: 0, den: 1 };
    pub const ONE_HUNDRED: Ratio = Ratio { num: 100, den: 1 };

    /// Construct a ratio, ensuring `den > 0` and reducing by GCD.
    pub fn new(num: i128, den: i128) -> Result<Ratio, CoreError> {
        if den == 0 {
            return Err(CoreError::InvalidRatio);
        }
        let (mut n, mut d) = (num, den);
        if d < 0 {
            n = n.checked_neg().ok_or(CoreError::Overflow)?;
            d = d.checked_neg().ok_or(CoreError::Overflow)?;
        }
        // g divides d, and d <= i128::MAX here.
        let g = gcd_u128(n.unsigned_abs(), d.unsigned_abs()) as i128;
        Ok(Ratio { num: n / g, den: d / g })
    }

    #[inline]
    pub const fn from_int(v: i128) -> Ratio {
        Ratio { num: v, den: 1 }
    }

    #[inline]
    pub fn num(self) -> i128 {
        self.num
    }

    #[inline]
    pub fn den(self) -> i128 {
        self.den
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.num < 0
    }

    pub fn checked_add(self, rhs: Ratio) -> Option<Ratio> {
        let g = gcd_u128(self.den.unsigned_abs(), rhs.den.unsigned_abs()) as i128;
        let l = self.num.checked_mul(rhs.den / g)?;
        let r = rhs.num.checked_mul(self.den / g)?;
        let den = (self.den / g).checked_mul(rhs.den)?;
        Ratio::new(l.checked_add(r)?, den).ok()
    }

    pub fn checked_sub(self, rhs: Ratio) -> Option<Ratio> {
        self.checked_add(Ratio { num: rhs.num.checked_neg()?, den: rhs.den })
    }

    pub fn checked_mul(self, rhs: Ratio) -> Option<Ratio> {
        // Cross-reduce before multiplying to keep magnitudes small.
        let g1 = gcd_u128(self.num.unsigned_abs(), rhs.den.unsigned_abs()) as i128;
        let g2 = gcd_u128(rhs.num.unsigned_abs(), self.den.unsigned_abs()) as i128;
        let num = (self.num / g1).checked_mul(rhs.num / g2)?;
        let den = (self.den / g2).checked_mul(rhs.den / g1)?;
        Ratio::new(num, den).ok()
    }

    /// `None` on division by zero or overflow.
    pub fn checked_div(self, rhs: Ratio) -> Option<Ratio> {
        if rhs.num == 0 {
            return None;
        }
        self.checked_mul(Ratio::new(rhs.den, rhs.num).ok()?)
    }

    /// Nearest IEEE double to the exact value (exact operands up to 2^53).
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Parse a plain decimal literal (`-12`, `0.5`, `2.345`). No exponents.
    pub fn parse_decimal(s: &str) -> Result<Ratio, CoreError> {
        let s = s.trim();
        let (neg, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CoreError::InvalidDecimal);
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidDecimal);
        }
        let frac_len = frac_part.len() as u32;
        if frac_len > MAX_FRACTION_DIGITS {
            return Err(CoreError::PrecisionExceeded { max_fraction_digits: MAX_FRACTION_DIGITS });
        }

        let mut n: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            n = n
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as i128))
                .ok_or(CoreError::Overflow)?;
        }
        if neg {
            n = -n;
        }
        let den = pow10(frac_len).ok_or(CoreError::Overflow)?;
        Ratio::new(n, den)
    }

    /// Exact value of the shortest decimal text that round-trips `x`.
    pub fn from_f64_decimal(x: f64) -> Result<Ratio, CoreError> {
        if !x.is_finite() {
            return Err(CoreError::NonFiniteNumber);
        }
        // `Display` for f64 never uses exponent notation.
        Ratio::parse_decimal(&x.to_string())
    }

    /// Round to `decimals` fractional digits with the given function.
    /// `None` only on arithmetic overflow.
    pub fn round_to(self, decimals: u32, f: RoundingFn) -> Option<Ratio> {
        let scale = pow10(decimals)?;
        let g = gcd_u128(scale.unsigned_abs(), self.den.unsigned_abs()) as i128;
        let n = self.num.checked_mul(scale / g)?;
        let d = self.den / g;

        // Truncated quotient and remainder (remainder carries the sign of n).
        let q = n / d;
        let r = n % d;
        if r == 0 {
            return Ratio::new(q, scale).ok();
        }

        let away = if n < 0 { -1 } else { 1 };
        let half = r.unsigned_abs().checked_mul(2)?.cmp(&d.unsigned_abs());
        let rounded = match f {
            RoundingFn::RoundDown => q,
            RoundingFn::RoundUp => q.checked_add(away)?,
            RoundingFn::Round => match half {
                Ordering::Less => q,
                Ordering::Equal | Ordering::Greater => q.checked_add(away)?,
            },
            RoundingFn::Bankers => match half {
                Ordering::Less => q,
                Ordering::Greater => q.checked_add(away)?,
                Ordering::Equal => {
                    if q % 2 == 0 { q } else { q.checked_add(away)? }
                }
            },
        };
        Ratio::new(rounded, scale).ok()
    }

    /// True when the value has no digits beyond `decimals` fractional places.
    pub fn is_exact_at(self, decimals: u32) -> bool {
        self.round_to(decimals, RoundingFn::RoundDown) == Some(self)
    }

    pub fn clamp_to(self, min: Ratio, max: Ratio) -> Ratio {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ZERO
    }
}

impl Ord for Ratio {
    /// Compare two ratios exactly (cross-multiply).
    ///
    /// NOTE: Uses checked multiplication; in the unlikely event of overflow,
    /// falls back to `f64` comparison (deterministic but lossy).
    fn cmp(&self, other: &Self) -> Ordering {
        if self.den == other.den {
            return self.num.cmp(&other.num);
        }
        match (self.num.checked_mul(other.den), other.num.checked_mul(self.den)) {
            (Some(l), Some(r)) => l.cmp(&r),
            _ => self.to_f64().partial_cmp(&other.to_f64()).unwrap_or(Ordering::Equal),
        }
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// A display percentage. Exact internally; serialized as a JSON number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(Ratio);

impl Percent {
    pub const ZERO: Percent = Percent(Ratio::ZERO);

    #[inline]
    pub fn from_ratio(r: Ratio) -> Self {
        Percent(r)
    }

    #[inline]
    pub fn ratio(self) -> Ratio {
        self.0
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.to_f64())
    }
}
