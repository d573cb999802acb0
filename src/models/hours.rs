//! Hours sheet model.
//!
//! An [`HoursSheet`] records the hours each employee worked on one day, in the
//! order the employees were added. That order decides who receives a
//! contested remainder cent, so it is kept as an explicit sequence rather than
//! a hashed map.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculation::coerce_hours;

/// The hours one employee worked on a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursWorked {
    /// The employee's identifier.
    pub employee_id: String,
    /// Hours worked, or `None` when the hours have not been entered yet.
    pub hours: Option<Decimal>,
}

impl HoursWorked {
    /// Returns the hours if they are strictly positive.
    pub fn positive_hours(&self) -> Option<Decimal> {
        self.hours.filter(|h| *h > Decimal::ZERO)
    }
}

/// One day's hours for every employee associated with that day.
///
/// Serialized as a JSON object keyed by employee id. Deserialization reads
/// the object in document order and coerces each value: numbers and numeric
/// strings become hours, while blanks, null and non-numeric text mean "not
/// entered".
///
/// # Example
///
/// ```
/// use tip_engine::models::HoursSheet;
/// use rust_decimal::Decimal;
///
/// let hours: HoursSheet = serde_json::from_str(r#"{"b": 4, "a": "8", "c": ""}"#).unwrap();
///
/// let ids: Vec<&str> = hours.employee_ids().collect();
/// assert_eq!(ids, vec!["b", "a", "c"]);
/// assert_eq!(hours.hours("a"), Some(Decimal::new(8, 0)));
/// assert_eq!(hours.hours("c"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoursSheet {
    entries: Vec<HoursWorked>,
    index: HashMap<String, usize>,
}

impl HoursSheet {
    /// Creates an empty hours sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this sheet with `employee_id` recorded as working `hours`.
    pub fn with(mut self, employee_id: impl Into<String>, hours: Decimal) -> Self {
        self.record(employee_id, Some(hours));
        self
    }

    /// Returns this sheet with `employee_id` present but no hours entered.
    pub fn with_blank(mut self, employee_id: impl Into<String>) -> Self {
        self.record(employee_id, None);
        self
    }

    /// Records hours for an employee.
    ///
    /// An employee already on the sheet keeps their original position.
    pub fn record(&mut self, employee_id: impl Into<String>, hours: Option<Decimal>) {
        let employee_id = employee_id.into();
        match self.index.get(&employee_id) {
            Some(&i) => self.entries[i].hours = hours,
            None => {
                self.index.insert(employee_id.clone(), self.entries.len());
                self.entries.push(HoursWorked { employee_id, hours });
            }
        }
    }

    /// Returns the hours recorded for an employee, if any were entered.
    pub fn hours(&self, employee_id: &str) -> Option<Decimal> {
        self.index
            .get(employee_id)
            .and_then(|&i| self.entries[i].hours)
    }

    /// Iterates over every entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HoursWorked> {
        self.entries.iter()
    }

    /// Iterates over the employee ids in insertion order.
    pub fn employee_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.employee_id.as_str())
    }

    /// Returns the number of employees on the sheet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no employees are on the sheet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<Decimal>)> for HoursSheet {
    fn from_iter<I: IntoIterator<Item = (S, Option<Decimal>)>>(iter: I) -> Self {
        let mut sheet = HoursSheet::new();
        for (employee_id, hours) in iter {
            sheet.record(employee_id, hours);
        }
        sheet
    }
}

impl Serialize for HoursSheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.employee_id, &entry.hours)?;
        }
        map.end()
    }
}

struct HoursSheetVisitor;

impl<'de> Visitor<'de> for HoursSheetVisitor {
    type Value = HoursSheet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of employee ids to hours worked")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut sheet = HoursSheet::new();
        while let Some((employee_id, value)) = access.next_entry::<String, serde_json::Value>()? {
            sheet.record(employee_id, coerce_hours(&value));
        }
        Ok(sheet)
    }
}

impl<'de> Deserialize<'de> for HoursSheet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HoursSheetVisitor)
    }
}
