use std::fmt;

use tracing::debug;

use crate::aggregate::{RowEntry, aggregate};
use crate::config::CalcOptions;
use crate::domain::{CourseEntry, TermEntry};
use crate::error::{GradeError, Result};
use crate::id::{IdSource, RowId, UuidIds};
use crate::outcome::Outcome;

/// One editable row list plus the last outcome shown for it.
///
/// Every mutation clears the outcome; only [`Sheet::calculate`] sets it.
pub struct Sheet<E: RowEntry> {
    rows: Vec<E>,
    outcome: Option<Outcome>,
    options: CalcOptions,
    ids: Box<dyn IdSource>,
}

pub type CourseSheet = Sheet<CourseEntry>;
pub type TermSheet = Sheet<TermEntry>;

impl<E: RowEntry> Sheet<E> {
    /// Sheet with no rows.
    pub fn empty(options: CalcOptions, ids: Box<dyn IdSource>) -> Self {
        Self {
            rows: Vec::new(),
            outcome: None,
            options,
            ids,
        }
    }

    /// Sheet seeded with one default row, ids from `ids`.
    pub fn with_ids(options: CalcOptions, ids: Box<dyn IdSource>) -> Self {
        let mut sheet = Self::empty(options, ids);
        sheet.add_row();
        sheet
    }

    /// Sheet seeded with one default row and random ids.
    pub fn new(options: CalcOptions) -> Self {
        Self::with_ids(options, Box::new(UuidIds))
    }

    pub fn add_row(&mut self) -> RowId {
        let id = self.ids.next_id();
        let row = E::blank(id.clone(), self.rows.len() + 1);
        self.rows.push(row);
        self.outcome = None;
        debug!(pipeline = %E::PIPELINE, id = %id, "row added");
        id
    }

    pub fn remove_row(&mut self, id: &RowId) -> Result<E> {
        let at = self
            .position(id)
            .ok_or_else(|| GradeError::RowNotFound(id.clone()))?;
        let row = self.rows.remove(at);
        self.outcome = None;
        debug!(pipeline = %E::PIPELINE, id = %id, remaining = self.rows.len(), "row removed");
        Ok(row)
    }

    /// Whether removing `id` would leave at least one row behind.
    pub fn can_remove(&self, id: &RowId) -> bool {
        self.rows.len() > 1 && self.position(id).is_some()
    }

    /// Edit one field. A rejected value leaves the row and outcome as they were.
    pub fn update_field(&mut self, id: &RowId, field: E::Field, value: &str) -> Result<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| GradeError::RowNotFound(id.clone()))?;
        row.set_field(field, value)?;
        self.outcome = None;
        debug!(pipeline = %E::PIPELINE, id = %id, ?field, "field updated");
        Ok(())
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.outcome = None;
    }

    pub fn calculate(&mut self) -> &Outcome {
        self.outcome.insert(aggregate(&self.rows, &self.options))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn get(&self, id: &RowId) -> Option<&E> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == id)
    }

    /// Id of the row at a 0-based index.
    pub fn id_at(&self, index: usize) -> Option<&RowId> {
        self.rows.get(index).map(|r| r.id())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn options(&self) -> &CalcOptions {
        &self.options
    }
}

impl<E: RowEntry> fmt::Debug for Sheet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("rows", &self.rows)
            .field("outcome", &self.outcome)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseField, GpaInput, TermField};
    use crate::grade::LetterGrade;
    use crate::id::SequentialIds;
    use crate::outcome::Guidance;

    fn courses() -> CourseSheet {
        Sheet::with_ids(CalcOptions::default(), Box::new(SequentialIds::new("c")))
    }

    fn terms() -> TermSheet {
        Sheet::with_ids(CalcOptions::default(), Box::new(SequentialIds::new("t")))
    }

    #[test]
    fn starts_with_one_default_row() {
        let s = courses();
        assert_eq!(s.len(), 1);
        assert_eq!(s.rows()[0].name, "Subject 1");
        assert_eq!(s.rows()[0].id, RowId::new("c-1"));
        assert!(s.outcome().is_none());
    }

    #[test]
    fn added_rows_are_numbered_by_position() {
        let mut s = courses();
        let id = s.add_row();
        assert_eq!(id, RowId::new("c-2"));
        assert_eq!(s.get(&id).unwrap().name, "Subject 2");
    }

    #[test]
    fn calculate_stores_outcome_until_next_edit() {
        let mut s = courses();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, CourseField::Grade, "A").unwrap();
        assert_eq!(s.calculate().value(), Some(3.75));
        assert_eq!(s.outcome().and_then(Outcome::value), Some(3.75));

        s.update_field(&first, CourseField::Name, "Math").unwrap();
        assert!(s.outcome().is_none());
    }

    #[test]
    fn add_and_remove_clear_outcome() {
        let mut s = courses();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, CourseField::Grade, "B").unwrap();
        s.calculate();
        let second = s.add_row();
        assert!(s.outcome().is_none());

        s.calculate();
        assert_eq!(
            s.outcome().and_then(Outcome::guidance),
            Some(Guidance::IncompleteRows)
        );
        s.remove_row(&second).unwrap();
        assert!(s.outcome().is_none());
        assert_eq!(s.calculate().value(), Some(3.0));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut s = courses();
        let ghost = RowId::new("nope");
        assert!(matches!(
            s.remove_row(&ghost),
            Err(GradeError::RowNotFound(_))
        ));
        assert!(matches!(
            s.update_field(&ghost, CourseField::Name, "x"),
            Err(GradeError::RowNotFound(_))
        ));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn rejected_grade_keeps_outcome() {
        let mut s = courses();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, CourseField::Grade, "A+").unwrap();
        s.calculate();
        assert!(s.update_field(&first, CourseField::Grade, "Q").is_err());
        assert_eq!(s.outcome().and_then(Outcome::value), Some(4.0));
    }

    #[test]
    fn list_may_be_emptied_then_refilled_without_stale_result() {
        let mut s = terms();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, TermField::Gpa, "3.9").unwrap();
        assert_eq!(s.calculate().value(), Some(3.9));

        s.remove_row(&first).unwrap();
        assert!(s.is_empty());
        assert!(s.outcome().is_none());

        let fresh = s.add_row();
        assert!(s.outcome().is_none());
        assert_eq!(s.get(&fresh).unwrap().gpa, GpaInput::Unset);
        assert_eq!(
            s.calculate().guidance(),
            Some(Guidance::NothingEntered)
        );
    }

    #[test]
    fn last_row_guard() {
        let mut s = terms();
        let first = s.id_at(0).unwrap().clone();
        assert!(!s.can_remove(&first));
        let second = s.add_row();
        assert!(s.can_remove(&first));
        assert!(s.can_remove(&second));
        assert!(!s.can_remove(&RowId::new("ghost")));
    }

    #[test]
    fn calculate_twice_is_stable() {
        let mut s = terms();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, TermField::Label, "Year 1").unwrap();
        s.update_field(&first, TermField::Gpa, "3.333").unwrap();
        let a = s.calculate().clone();
        let b = s.calculate().clone();
        assert_eq!(a, b);
        assert_eq!(a.value(), Some(3.33));
    }

    #[test]
    fn clear_drops_rows_and_result() {
        let mut s = courses();
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, CourseField::Grade, "D").unwrap();
        s.calculate();
        s.clear();
        assert!(s.is_empty());
        assert!(s.outcome().is_none());
    }

    #[test]
    fn credits_option_flows_into_calculation() {
        let mut s: CourseSheet =
            Sheet::with_ids(CalcOptions::with_credits(0), Box::new(SequentialIds::default()));
        let first = s.id_at(0).unwrap().clone();
        s.update_field(&first, CourseField::Grade, LetterGrade::A.as_str())
            .unwrap();
        assert_eq!(s.calculate().guidance(), Some(Guidance::Unavailable));
    }
}
