//! Split parts: the scheduling units a section's hours are divided into.
//!
//! A section always has at least one part. The parts of a section must
//! sum (within tolerance) to the course's declared duration before the
//! edit session can be submitted.

use serde::{Deserialize, Serialize};

use crate::duration::{self, round2};
use crate::error::{Error, Result};

/// A room-category reference attached to a split part.
///
/// The id is absent when the category came from a flat record that only
/// carried the name; name matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCategoryRef {
    pub id: Option<i64>,
    pub name: String,
}

impl RoomCategoryRef {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    fn same_category(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.eq_ignore_ascii_case(&other.name),
        }
    }
}

/// One scheduling unit of a section: a duration plus an optional
/// preferred room category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPart {
    /// Duration in decimal hours, rounded to two places.
    pub duration: f64,
    pub category: Option<RoomCategoryRef>,
}

impl SplitPart {
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            duration: round2(duration),
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: RoomCategoryRef) -> Self {
        self.category = Some(category);
        self
    }
}

/// The ordered split parts of one section.
///
/// Never empty: construction seeds one part and [`SplitSet::remove_part`]
/// refuses to remove the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSet {
    parts: Vec<SplitPart>,
}

impl SplitSet {
    /// Create a set with a single part at the given duration.
    #[must_use]
    pub fn seeded(duration: f64) -> Self {
        Self {
            parts: vec![SplitPart::new(duration)],
        }
    }

    /// Create a set from existing parts. Empty input is invalid.
    pub fn from_parts(parts: Vec<SplitPart>) -> Result<Self> {
        if parts.is_empty() {
            return Err(Error::InvalidData(
                "a section must have at least one split part".to_string(),
            ));
        }
        Ok(Self { parts })
    }

    #[must_use]
    pub fn parts(&self) -> &[SplitPart] {
        &self.parts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always `false`; kept for the conventional pairing with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a new part at the default duration.
    pub fn add_part(&mut self, duration: f64) {
        self.parts.push(SplitPart::new(duration));
    }

    /// Append an already-built part, keeping its category.
    pub fn push_part(&mut self, part: SplitPart) {
        self.parts.push(part);
    }

    /// Remove the part at `index`.
    ///
    /// Returns `false` (no-op) when the index is out of range or the
    /// removal would leave the section without any part.
    pub fn remove_part(&mut self, index: usize) -> bool {
        if index >= self.parts.len() || self.parts.len() == 1 {
            return false;
        }
        self.parts.remove(index);
        true
    }

    /// Set the duration of the part at `index` directly.
    pub fn update_duration(&mut self, index: usize, duration: f64) -> Result<()> {
        let part = self.part_mut(index)?;
        part.duration = round2(duration);
        Ok(())
    }

    /// Set the duration of the part at `index` from an hours/minutes pair.
    pub fn update_duration_from_hours_minutes(
        &mut self,
        index: usize,
        hours: u32,
        minutes: u32,
    ) -> Result<()> {
        let part = self.part_mut(index)?;
        part.duration = duration::from_hours_minutes(hours, minutes);
        Ok(())
    }

    /// Replace only the hours component, keeping the current minutes.
    pub fn set_hours(&mut self, index: usize, hours: u32) -> Result<()> {
        let part = self.part_mut(index)?;
        let (_, minutes) = duration::to_hours_minutes(part.duration);
        part.duration = duration::from_hours_minutes(hours, minutes);
        Ok(())
    }

    /// Replace only the minutes component, keeping the current hours.
    pub fn set_minutes(&mut self, index: usize, minutes: u32) -> Result<()> {
        let part = self.part_mut(index)?;
        let (hours, _) = duration::to_hours_minutes(part.duration);
        part.duration = duration::from_hours_minutes(hours, minutes);
        Ok(())
    }

    /// Toggle the room category of the part at `index`.
    ///
    /// Selecting the category the part already has clears it; selecting a
    /// different one replaces it.
    pub fn set_category(&mut self, index: usize, category: RoomCategoryRef) -> Result<()> {
        let part = self.part_mut(index)?;
        match &part.category {
            Some(current) if current.same_category(&category) => part.category = None,
            _ => part.category = Some(category),
        }
        Ok(())
    }

    /// Sum of all part durations, rounded to two places.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        round2(self.parts.iter().map(|p| p.duration).sum())
    }

    /// Returns `true` when the parts are submittable against the declared
    /// course duration: the total matches within tolerance, the declared
    /// duration is positive, and every part is positive.
    #[must_use]
    pub fn is_valid(&self, declared_total: f64) -> bool {
        declared_total > 0.0
            && self.parts.iter().all(|p| p.duration > 0.0)
            && duration::approx_eq(self.total_duration(), declared_total)
    }

    /// Like [`SplitSet::is_valid`] but reporting the mismatch.
    pub fn check(&self, declared_total: f64) -> Result<()> {
        if self.is_valid(declared_total) {
            Ok(())
        } else {
            Err(Error::SplitInvariant {
                declared: declared_total,
                actual: self.total_duration(),
            })
        }
    }

    fn part_mut(&mut self, index: usize) -> Result<&mut SplitPart> {
        self.parts.get_mut(index).ok_or(Error::NotFound {
            entity: "split part",
            id: index.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_set_has_one_part() {
        let set = SplitSet::seeded(2.5);
        assert_eq!(set.len(), 1);
        assert_eq!(set.parts()[0].duration, 2.5);
        assert_eq!(set.total_duration(), 2.5);
    }

    #[test]
    fn test_from_parts_rejects_empty() {
        assert!(SplitSet::from_parts(vec![]).is_err());
    }

    #[test]
    fn test_add_and_remove_parts() {
        let mut set = SplitSet::seeded(2.0);
        set.add_part(1.0);
        set.add_part(0.5);
        assert_eq!(set.len(), 3);

        assert!(set.remove_part(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.parts()[1].duration, 0.5);
    }

    #[test]
    fn test_remove_never_empties_the_set() {
        let mut set = SplitSet::seeded(2.0);
        assert!(!set.remove_part(0));
        assert_eq!(set.len(), 1);

        set.add_part(1.0);
        assert!(set.remove_part(0));
        assert!(!set.remove_part(0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut set = SplitSet::seeded(2.0);
        set.add_part(1.0);
        assert!(!set.remove_part(5));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_update_duration_rounds() {
        let mut set = SplitSet::seeded(2.0);
        set.update_duration(0, 1.666_666_7).unwrap();
        assert_eq!(set.parts()[0].duration, 1.67);

        assert!(set.update_duration(3, 1.0).is_err());
    }

    #[test]
    fn test_two_field_update_preserves_other_half() {
        let mut set = SplitSet::seeded(1.5); // 1h 30m
        set.set_hours(0, 2).unwrap();
        assert_eq!(set.parts()[0].duration, 2.5);

        set.set_minutes(0, 45).unwrap();
        assert_eq!(set.parts()[0].duration, 2.75);
    }

    #[test]
    fn test_update_from_hours_minutes() {
        let mut set = SplitSet::seeded(1.0);
        set.update_duration_from_hours_minutes(0, 0, 50).unwrap();
        assert_eq!(set.parts()[0].duration, 0.83);
    }

    #[test]
    fn test_category_toggle() {
        let mut set = SplitSet::seeded(2.0);
        let lab = RoomCategoryRef::new(7, "Lab");

        set.set_category(0, lab.clone()).unwrap();
        assert_eq!(set.parts()[0].category, Some(lab.clone()));

        // Reselecting the same category clears it.
        set.set_category(0, lab.clone()).unwrap();
        assert!(set.parts()[0].category.is_none());

        // Selecting a different one replaces it.
        set.set_category(0, lab).unwrap();
        let lecture = RoomCategoryRef::new(3, "Lecture Hall");
        set.set_category(0, lecture.clone()).unwrap();
        assert_eq!(set.parts()[0].category, Some(lecture));
    }

    #[test]
    fn test_category_match_by_name_when_id_missing() {
        let mut set = SplitSet::seeded(2.0);
        set.set_category(0, RoomCategoryRef::named("Lab")).unwrap();
        set.set_category(0, RoomCategoryRef::named("LAB")).unwrap();
        assert!(set.parts()[0].category.is_none());
    }

    #[test]
    fn test_validity_within_tolerance() {
        let mut set = SplitSet::seeded(1.67);
        set.add_part(0.83);
        // 1.67 + 0.83 = 2.50 against a declared 2.5.
        assert!(set.is_valid(2.5));
        assert!(set.check(2.5).is_ok());

        let parts = SplitSet::from_parts(vec![SplitPart::new(1.666_67), SplitPart::new(0.833_33)])
            .unwrap();
        assert!(parts.is_valid(2.5));
    }

    #[test]
    fn test_validity_rejects_mismatch() {
        let set =
            SplitSet::from_parts(vec![SplitPart::new(1.5), SplitPart::new(0.9)]).unwrap();
        assert!(!set.is_valid(2.5));
        let err = set.check(2.5).unwrap_err();
        assert!(matches!(err, Error::SplitInvariant { .. }));
    }

    #[test]
    fn test_validity_rejects_nonpositive() {
        let set = SplitSet::from_parts(vec![SplitPart::new(2.5), SplitPart::new(0.0)]).unwrap();
        assert!(!set.is_valid(2.5));

        let seeded = SplitSet::seeded(0.0);
        assert!(!seeded.is_valid(0.0));
    }
}
