//! Add/edit dialog model
//!
//! Each dialog owns its grade field and pair rows. Its lifecycle is a small
//! state machine:
//!
//! ```text
//! Open -> Editing -> Submitting -> Succeeded -> Closed
//!                              \-> Failed -> Editing
//! Open | Editing -> Cancelled -> Closed
//! ```
//!
//! Only one submission may be in flight; a second one fails with
//! [`DialogError::Busy`].

use crate::error::DialogError;
use paymatrix_model::{Level, LevelId, RawPair};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dialog lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogState {
    /// Shown, untouched
    Open,
    /// User is editing
    Editing,
    /// Submission in flight
    Submitting,
    /// Store accepted the submission
    Succeeded,
    /// Store or validation rejected the submission
    Failed,
    /// User dismissed the dialog
    Cancelled,
    /// Gone
    Closed,
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: DialogState) -> Vec<DialogState> {
    use DialogState::{Cancelled, Closed, Editing, Failed, Open, Submitting, Succeeded};
    match from {
        Open => vec![Editing, Cancelled],
        Editing => vec![Submitting, Cancelled],
        Submitting => vec![Succeeded, Failed],
        Succeeded | Cancelled => vec![Closed],
        Failed => vec![Editing],
        Closed => vec![],
    }
}

/// Check a single transition
///
/// # Errors
/// `DialogError::IllegalTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: DialogState, to: DialogState) -> Result<(), DialogError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(DialogError::IllegalTransition { from, to })
    }
}

/// What the dialog is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    /// New level
    Create,
    /// Existing level, as fetched when the dialog opened
    Edit(Level),
}

/// Editable (scale, amount) rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairRows(Vec<RawPair>);

impl PairRows {
    /// Single blank row, as a new dialog shows
    #[must_use]
    pub fn blank() -> Self {
        Self(vec![RawPair::default()])
    }

    /// Rows pre-filled from a level
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        let rows: Vec<RawPair> = level.pairs.iter().copied().map(RawPair::from).collect();
        if rows.is_empty() {
            Self::blank()
        } else {
            Self(rows)
        }
    }

    /// Append a blank row, returning its index
    pub fn add_row(&mut self) -> usize {
        self.0.push(RawPair::default());
        self.0.len() - 1
    }

    /// Append a filled row
    pub fn push(&mut self, scale: impl Into<String>, amount: impl Into<String>) {
        self.0.push(RawPair::new(scale, amount));
    }

    /// Remove a row
    pub fn remove_row(&mut self, index: usize) -> Option<RawPair> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Set a row's scale text; `false` if the row does not exist
    pub fn set_scale(&mut self, index: usize, scale: impl Into<String>) -> bool {
        self.0.get_mut(index).map(|row| row.scale = scale.into()).is_some()
    }

    /// Set a row's amount text; `false` if the row does not exist
    pub fn set_amount(&mut self, index: usize, amount: impl Into<String>) -> bool {
        self.0.get_mut(index).map(|row| row.amount = amount.into()).is_some()
    }

    /// Rows as typed
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[RawPair] {
        &self.0
    }

    /// Row count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One add or edit dialog
#[derive(Debug, Clone)]
pub struct LevelDialog {
    mode: DialogMode,
    grade: String,
    rows: PairRows,
    state: DialogState,
    last_error: Option<String>,
}

impl LevelDialog {
    /// Dialog for a new level
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: DialogMode::Create,
            grade: String::new(),
            rows: PairRows::blank(),
            state: DialogState::Open,
            last_error: None,
        }
    }

    /// Dialog for an existing level, pre-populated from it
    #[must_use]
    pub fn edit(level: Level) -> Self {
        Self {
            grade: level.grade.to_string(),
            rows: PairRows::from_level(&level),
            mode: DialogMode::Edit(level),
            state: DialogState::Open,
            last_error: None,
        }
    }

    /// Mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    /// Level being edited
    #[must_use]
    pub fn level_id(&self) -> Option<&LevelId> {
        match &self.mode {
            DialogMode::Create => None,
            DialogMode::Edit(level) => Some(&level.id),
        }
    }

    /// Grade field
    #[inline]
    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Pair rows
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &PairRows {
        &self.rows
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Message from the last failed submission
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Check the dialog is still on screen
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DialogState::Cancelled | DialogState::Closed)
    }

    /// Set the grade field
    ///
    /// # Errors
    /// `Busy` while submitting, `IllegalTransition` once closed
    pub fn set_grade(&mut self, grade: impl Into<String>) -> Result<(), DialogError> {
        self.touch()?;
        self.grade = grade.into();
        Ok(())
    }

    /// Edit the pair rows
    ///
    /// # Errors
    /// `Busy` while submitting, `IllegalTransition` once closed
    pub fn rows_mut(&mut self) -> Result<&mut PairRows, DialogError> {
        self.touch()?;
        Ok(&mut self.rows)
    }

    /// Enter `Submitting`
    ///
    /// # Errors
    /// - `DialogError::Busy` if a submission is already in flight
    /// - `DialogError::IllegalTransition` if the dialog is closed or cancelled
    pub fn begin_submission(&mut self) -> Result<(), DialogError> {
        if self.state == DialogState::Submitting {
            return Err(DialogError::Busy);
        }
        if self.state == DialogState::Open {
            self.transition(DialogState::Editing)?;
        }
        self.transition(DialogState::Submitting)
    }

    /// Leave `Submitting`: close on success, return to `Editing` with the
    /// error kept on failure
    ///
    /// # Errors
    /// `DialogError::IllegalTransition` if no submission is in flight
    pub fn finish_submission<T, E: fmt::Display>(
        &mut self,
        result: &Result<T, E>,
    ) -> Result<(), DialogError> {
        match result {
            Ok(_) => {
                self.transition(DialogState::Succeeded)?;
                self.last_error = None;
                self.transition(DialogState::Closed)
            }
            Err(e) => {
                self.transition(DialogState::Failed)?;
                self.last_error = Some(e.to_string());
                self.transition(DialogState::Editing)
            }
        }
    }

    /// Dismiss without submitting
    ///
    /// # Errors
    /// `Busy` while submitting, `IllegalTransition` once closed
    pub fn cancel(&mut self) -> Result<(), DialogError> {
        if self.state == DialogState::Submitting {
            return Err(DialogError::Busy);
        }
        self.transition(DialogState::Cancelled)?;
        self.transition(DialogState::Closed)
    }

    /// Field layout for the presentation layer
    #[must_use]
    pub fn schema(&self) -> DialogSchema {
        let (title, primary, secondary, default) = match &self.mode {
            DialogMode::Create => ("Add Pay Matrix Level", "Create", None, None),
            DialogMode::Edit(level) => (
                "Edit Pay Matrix Level",
                "Update",
                Some("Delete".to_string()),
                Some(level.grade.to_string()),
            ),
        };
        DialogSchema {
            title: title.to_string(),
            primary_action_label: primary.to_string(),
            secondary_action_label: secondary,
            fields: vec![
                FieldSchema {
                    name: "grade".to_string(),
                    label: "Grade".to_string(),
                    kind: FieldKind::Link {
                        target: "Employee Grade".to_string(),
                    },
                    required: true,
                    default,
                },
                FieldSchema {
                    name: "scales".to_string(),
                    label: "Scales (Scale / Amount)".to_string(),
                    kind: FieldKind::PairTable {
                        columns: vec!["Scale".to_string(), "Amount".to_string()],
                    },
                    required: true,
                    default: None,
                },
            ],
        }
    }

    fn touch(&mut self) -> Result<(), DialogError> {
        match self.state {
            DialogState::Editing => Ok(()),
            DialogState::Submitting => Err(DialogError::Busy),
            _ => self.transition(DialogState::Editing),
        }
    }

    fn transition(&mut self, to: DialogState) -> Result<(), DialogError> {
        validate_transition(self.state, to)?;
        tracing::trace!(from = ?self.state, to = ?to, "dialog transition");
        self.state = to;
        Ok(())
    }
}

/// Dialog layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSchema {
    /// Heading
    pub title: String,
    /// Submit button
    pub primary_action_label: String,
    /// Extra button (edit dialogs offer delete)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_action_label: Option<String>,
    /// Fields in display order
    pub fields: Vec<FieldSchema>,
}

/// One dialog field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field key
    pub name: String,
    /// Label
    pub label: String,
    /// Widget
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Must be filled
    pub required: bool,
    /// Initial value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Field widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Selector linked to a catalog
    Link {
        /// Catalog name
        target: String,
    },
    /// Editable (scale, amount) rows
    PairTable {
        /// Column headings
        columns: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymatrix_test_utils::{grade, matrix, pairs};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn level() -> Level {
        Level::new(LevelId::generate(), matrix("Standard"), grade("2"), pairs(&[(1, 6000)]))
    }

    #[test]
    fn create_starts_with_blank_row() {
        let dialog = LevelDialog::create();
        assert_eq!(dialog.state(), DialogState::Open);
        assert_eq!(dialog.rows().len(), 1);
        assert!(dialog.rows().rows()[0].is_blank());
    }

    #[test]
    fn edit_is_prefilled() {
        let dialog = LevelDialog::edit(level());
        assert_eq!(dialog.grade(), "2");
        assert_eq!(dialog.rows().rows(), &[RawPair::new("1", "6000")]);
        assert!(dialog.level_id().is_some());
    }

    #[test]
    fn second_submission_is_busy() {
        let mut dialog = LevelDialog::create();
        dialog.begin_submission().unwrap();
        assert_eq!(dialog.begin_submission(), Err(DialogError::Busy));
        assert_eq!(dialog.set_grade("3"), Err(DialogError::Busy));
        assert_eq!(dialog.cancel(), Err(DialogError::Busy));
    }

    #[test]
    fn failure_returns_to_editing_with_error() {
        let mut dialog = LevelDialog::create();
        dialog.set_grade("3").unwrap();
        dialog.begin_submission().unwrap();
        dialog
            .finish_submission::<(), _>(&Err("grade 3 already has a level in Standard"))
            .unwrap();

        assert_eq!(dialog.state(), DialogState::Editing);
        assert_eq!(dialog.last_error(), Some("grade 3 already has a level in Standard"));
        dialog.begin_submission().unwrap();
    }

    #[test]
    fn success_closes() {
        let mut dialog = LevelDialog::create();
        dialog.begin_submission().unwrap();
        dialog.finish_submission::<_, String>(&Ok(())).unwrap();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(!dialog.is_open());
        assert_eq!(
            dialog.begin_submission(),
            Err(DialogError::IllegalTransition {
                from: DialogState::Closed,
                to: DialogState::Submitting,
            })
        );
    }

    #[test]
    fn cancel_closes() {
        let mut dialog = LevelDialog::edit(level());
        dialog.cancel().unwrap();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.rows_mut().is_err());
    }

    #[test]
    fn finish_without_begin_is_illegal() {
        let mut dialog = LevelDialog::create();
        assert!(dialog.finish_submission::<_, String>(&Ok(())).is_err());
    }

    #[test]
    fn row_editing() {
        let mut rows = PairRows::blank();
        let i = rows.add_row();
        assert!(rows.set_scale(i, "4"));
        assert!(rows.set_amount(i, "120.5"));
        assert!(!rows.set_scale(9, "1"));
        assert_eq!(rows.remove_row(0), Some(RawPair::default()));
        assert_eq!(rows.remove_row(5), None);
        assert_eq!(rows.rows(), &[RawPair::new("4", "120.5")]);
    }

    #[test]
    fn schema_links_grade_catalog() {
        let schema = LevelDialog::edit(level()).schema();
        assert_eq!(schema.title, "Edit Pay Matrix Level");
        assert_eq!(schema.secondary_action_label.as_deref(), Some("Delete"));
        assert_eq!(
            schema.fields[0].kind,
            FieldKind::Link {
                target: "Employee Grade".to_string()
            }
        );
        assert_eq!(schema.fields[0].default.as_deref(), Some("2"));

        let json = serde_json::to_value(LevelDialog::create().schema()).unwrap();
        assert_eq!(json["fields"][0]["type"], "link");
        assert_eq!(json["fields"][1]["type"], "pair_table");
        assert!(json.get("secondary_action_label").is_none());
    }

    fn any_state() -> impl Strategy<Value = DialogState> {
        prop_oneof![
            Just(DialogState::Open),
            Just(DialogState::Editing),
            Just(DialogState::Submitting),
            Just(DialogState::Succeeded),
            Just(DialogState::Failed),
            Just(DialogState::Cancelled),
            Just(DialogState::Closed),
        ]
    }

    proptest! {
        #[test]
        fn validate_agrees_with_table(from in any_state(), to in any_state()) {
            let allowed = allowed_transitions(from).contains(&to);
            prop_assert_eq!(validate_transition(from, to).is_ok(), allowed);
        }

        #[test]
        fn closed_is_terminal(to in any_state()) {
            prop_assert!(validate_transition(DialogState::Closed, to).is_err());
        }
    }
}
