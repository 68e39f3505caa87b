//! Card record and key types.

use std::fmt;

/// Unique card number.
///
/// This is the key for the ordered, balanced and priority indices.
/// Card numbers are assumed unique across the store; the tree indices
/// silently ignore duplicates (see the index modules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardNumber(pub u64);

impl CardNumber {
    /// Creates a new card number.
    #[must_use]
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card:{}", self.0)
    }
}

/// Card PIN.
///
/// The hash-table key. PINs are NOT unique across records; both hash
/// tables tolerate collisions on the full key, not just the slot.
/// Signed so that slot computation can normalize negative input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(pub i64);

impl Pin {
    /// Creates a new PIN.
    #[must_use]
    pub const fn new(n: i64) -> Self {
        Self(n)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Returns the non-negative table slot for this PIN at the given capacity.
    #[must_use]
    pub fn slot(self, capacity: usize) -> usize {
        // rem_euclid keeps negative PINs in range.
        self.0.rem_euclid(capacity as i64) as usize
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin:{}", self.0)
    }
}

/// Stable handle to a record in the canonical sequence.
///
/// Handles are monotonically assigned and never reused. Every index
/// stores handles rather than references; a handle whose record has been
/// deleted is *dead* (resolving it yields `None`), never dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Creates a record handle from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec:{}", self.0)
    }
}

/// One card record.
///
/// Records are owned exclusively by the canonical sequence; indices refer
/// to them only through [`RecordId`] handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Card holder name.
    pub holder: String,
    /// Issuing bank name.
    pub bank: String,
    /// Unique card number.
    pub card_number: CardNumber,
    /// Expiry period in `MM/YY` form.
    pub expiry: String,
    /// Billing day-of-month.
    pub billing_date: i32,
    /// Card PIN.
    pub pin: Pin,
}

impl Record {
    /// Creates a record from its fields.
    #[must_use]
    pub fn new(
        holder: impl Into<String>,
        bank: impl Into<String>,
        card_number: CardNumber,
        expiry: impl Into<String>,
        billing_date: i32,
        pin: Pin,
    ) -> Self {
        Self {
            holder: holder.into(),
            bank: bank.into(),
            card_number,
            expiry: expiry.into(),
            billing_date,
            pin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_ordering() {
        assert!(CardNumber::new(10) < CardNumber::new(20));
    }

    #[test]
    fn pin_slot_normalizes_negatives() {
        assert_eq!(Pin::new(5).slot(1000), 5);
        assert_eq!(Pin::new(1005).slot(1000), 5);
        assert_eq!(Pin::new(-1).slot(1000), 999);
        assert_eq!(Pin::new(-1000).slot(1000), 0);
    }

    #[test]
    fn display_forms() {
        assert_eq!(format!("{}", CardNumber::new(42)), "card:42");
        assert_eq!(format!("{}", Pin::new(-7)), "pin:-7");
        assert_eq!(format!("{}", RecordId::new(3)), "rec:3");
    }

    #[test]
    fn record_construction() {
        let r = Record::new("Ada", "Acme", CardNumber::new(1), "01/30", 15, Pin::new(1234));
        assert_eq!(r.holder, "Ada");
        assert_eq!(r.card_number.as_u64(), 1);
    }
}
