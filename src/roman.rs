//! Roman numerals for homograph ordinals.

use crate::error::{RenderError, Result};

/// Largest value the digit tables can spell.
pub const MAX_ROMAN: usize = 3999;

const THOUSANDS: [&str; 4] = ["", "M", "MM", "MMM"];
const HUNDREDS: [&str; 10] = ["", "C", "CC", "CCC", "CD", "D", "DC", "DCC", "DCCC", "CM"];
const TENS: [&str; 10] = ["", "X", "XX", "XXX", "XL", "L", "LX", "LXX", "LXXX", "XC"];
const UNITS: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// Spell `n` as a Roman numeral, one table lookup per decimal digit.
///
/// Only `1..=3999` is representable; anything else is an
/// [`RenderError::OrdinalOutOfRange`] rather than a truncated numeral.
pub fn romanize(n: usize) -> Result<String> {
    if !(1..=MAX_ROMAN).contains(&n) {
        return Err(RenderError::OrdinalOutOfRange(n));
    }

    Ok([
        THOUSANDS[n / 1000],
        HUNDREDS[n / 100 % 10],
        TENS[n / 10 % 10],
        UNITS[n % 10],
    ]
    .concat())
}
