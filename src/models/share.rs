//! Per-employee share model.
//!
//! [`Shares`] maps employee ids to cent amounts in a fixed order. It is used
//! both for a single day's split and for pay period totals.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculation::{cents_to_dollars, round_to_cents};

/// One employee's cut, stored in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeShare<'a> {
    /// The employee's identifier.
    pub employee_id: &'a str,
    /// The amount in cents.
    pub cents: i64,
}

impl EmployeeShare<'_> {
    /// The amount in dollars, with exactly two decimal places.
    pub fn amount(&self) -> Decimal {
        cents_to_dollars(self.cents)
    }
}

/// An ordered mapping from employee id to a cent-exact amount.
///
/// Serialized as a JSON object of employee id to a two-decimal dollar string.
///
/// # Example
///
/// ```
/// use tip_engine::models::Shares;
/// use rust_decimal::Decimal;
///
/// let mut shares = Shares::new();
/// shares.insert("a", 5000);
/// shares.add("a", 1050);
///
/// assert_eq!(shares.get("a"), Some(Decimal::new(6050, 2)));
/// assert_eq!(serde_json::to_string(&shares).unwrap(), r#"{"a":"60.50"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shares {
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
}

impl Shares {
    /// Creates an empty set of shares.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, employee_id: &str) -> Option<usize> {
        self.index.get(employee_id).copied()
    }

    fn push(&mut self, employee_id: String, cents: i64) {
        self.index.insert(employee_id.clone(), self.entries.len());
        self.entries.push((employee_id, cents));
    }

    /// Sets an employee's amount, keeping their position if already present.
    pub fn insert(&mut self, employee_id: impl Into<String>, cents: i64) {
        let employee_id = employee_id.into();
        match self.position(&employee_id) {
            Some(i) => self.entries[i].1 = cents,
            None => self.push(employee_id, cents),
        }
    }

    /// Adds cents to an employee's amount, appending them if not yet present.
    ///
    /// The amount saturates at the bounds of `i64`.
    pub fn add(&mut self, employee_id: &str, cents: i64) {
        match self.position(employee_id) {
            Some(i) => self.entries[i].1 = self.entries[i].1.saturating_add(cents),
            None => self.push(employee_id.to_string(), cents),
        }
    }

    /// Drops every employee whose amount is zero.
    pub fn retain_nonzero(&mut self) {
        self.entries.retain(|(_, cents)| *cents != 0);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();
    }

    /// Returns an employee's amount in dollars.
    pub fn get(&self, employee_id: &str) -> Option<Decimal> {
        self.cents(employee_id).map(cents_to_dollars)
    }

    /// Returns an employee's amount in cents.
    pub fn cents(&self, employee_id: &str) -> Option<i64> {
        self.position(employee_id).map(|i| self.entries[i].1)
    }

    /// Returns `true` if the employee has an entry.
    pub fn contains(&self, employee_id: &str) -> bool {
        self.index.contains_key(employee_id)
    }

    /// Iterates over the shares in order.
    pub fn iter(&self) -> impl Iterator<Item = EmployeeShare<'_>> {
        self.entries.iter().map(|(id, cents)| EmployeeShare {
            employee_id: id.as_str(),
            cents: *cents,
        })
    }

    /// Sum of all shares in cents, saturating at the bounds of `i64`.
    pub fn total_cents(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |sum, (_, cents)| sum.saturating_add(*cents))
    }

    /// Sum of all shares in dollars.
    pub fn total(&self) -> Decimal {
        cents_to_dollars(self.total_cents())
    }

    /// Returns the number of employees with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Shares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for share in self.iter() {
            map.serialize_entry(share.employee_id, &share.amount())?;
        }
        map.end()
    }
}

struct SharesVisitor;

impl<'de> Visitor<'de> for SharesVisitor {
    type Value = Shares;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of employee ids to dollar amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut shares = Shares::new();
        while let Some((employee_id, amount)) = access.next_entry::<String, Decimal>()? {
            shares.insert(employee_id, round_to_cents(amount));
        }
        Ok(shares)
    }
}

impl<'de> Deserialize<'de> for Shares {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SharesVisitor)
    }
}
