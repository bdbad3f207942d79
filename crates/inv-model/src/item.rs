//! Inventory line items and quantity coercion.

use serde::{Deserialize, Serialize};

/// A counted product inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Build an item from raw form input, coercing the quantity text.
    pub fn from_input(name: impl Into<String>, quantity_text: &str) -> Self {
        Self::new(name, parse_quantity(quantity_text))
    }
}

/// Raw item fields as typed by the user, before quantity coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub quantity: String,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }

    pub fn to_item(&self) -> Item {
        Item::from_input(self.name.clone(), &self.quantity)
    }
}

/// Coerce user-typed quantity text to an integer.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// longest run of digits that follows is used. A `0x` prefix switches to
/// hexadecimal. Input without any leading digits yields 0, fractional parts
/// are truncated and values beyond the `i64` range saturate.
///
/// ```
/// use inv_model::parse_quantity;
///
/// assert_eq!(parse_quantity("7.9"), 7);
/// assert_eq!(parse_quantity("abc"), 0);
/// assert_eq!(parse_quantity("  12 boxes"), 12);
/// ```
pub fn parse_quantity(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    if negative { -value } else { value }
}
