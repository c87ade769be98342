use crate::bulk::recalculate_row;
use crate::cell::CellValue;
use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::gap::RowGaps;
use crate::schema::{ColumnRole, Schema};
use crate::store::TableStore;
use log::debug;
use std::fmt::Write;

/// A single-cell edit as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct EditEvent {
    pub row: usize,
    pub column: usize,
    pub old_value: CellValue,
    pub new_value: CellValue,
}

impl EditEvent {
    pub fn new(
        row: usize,
        column: usize,
        old_value: impl Into<CellValue>,
        new_value: impl Into<CellValue>,
    ) -> Self {
        EditEvent {
            row,
            column,
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}

/// Which follow-up counter a date column drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Candidate,
    Client,
}

/// What a date edit does to its follow-up counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowupChange {
    Increment,
    Reset,
    Unchanged,
}

impl FollowupChange {
    pub fn apply(self, current: u32) -> u32 {
        match self {
            FollowupChange::Increment => current.saturating_add(1),
            FollowupChange::Reset => 0,
            FollowupChange::Unchanged => current,
        }
    }
}

/// Counter transition for a date edit from `old` to `new`.
///
/// Clearing the date resets the counter and changing a set date bumps it.
/// Entering a date into an empty cell bumps the candidate counter but leaves
/// the client counter alone; client follow-ups only count re-dates.
pub fn followup_change(kind: Followup, old: &CellValue, new: &CellValue) -> FollowupChange {
    if new.is_empty() {
        return FollowupChange::Reset;
    }
    if old.is_empty() {
        return match kind {
            Followup::Candidate => FollowupChange::Increment,
            Followup::Client => FollowupChange::Unchanged,
        };
    }
    if old != new {
        FollowupChange::Increment
    } else {
        FollowupChange::Unchanged
    }
}

/// Everything one edit changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditOutcome {
    /// New follow-up count, when a counter was written.
    pub followup: Option<u32>,
    /// Remark date text, when a status change stamped one.
    pub remark_stamp: Option<String>,
    /// Gaps written for the row, when a recompute ran.
    pub gaps: Option<RowGaps>,
}

/// Reacts to single-cell edits: keeps follow-up counters, stamps the remark
/// date on status changes and refreshes the row's gaps.
pub struct EditReactor<'a, C: Clock> {
    schema: Schema,
    config: &'a TrackerConfig,
    clock: C,
}

impl<'a, C: Clock> EditReactor<'a, C> {
    /// Resolves the schema from the store's header for this edit session.
    pub fn new<S: TableStore + ?Sized>(
        store: &S,
        config: &'a TrackerConfig,
        clock: C,
    ) -> Result<Self> {
        let schema = Schema::resolve(store, &config.columns)?;
        Ok(Self::with_schema(schema, config, clock))
    }

    pub fn with_schema(schema: Schema, config: &'a TrackerConfig, clock: C) -> Self {
        EditReactor {
            schema,
            config,
            clock,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn handle_edit<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        event: &EditEvent,
    ) -> Result<EditOutcome> {
        let mut outcome = EditOutcome::default();
        if event.row < 2 {
            return Ok(outcome);
        }

        let Some(role) = self.schema.role_at(event.column) else {
            return Ok(outcome);
        };

        match role {
            ColumnRole::CandidateDate => {
                outcome.followup = self.update_followup(
                    store,
                    event,
                    Followup::Candidate,
                    ColumnRole::CandidateFollowup,
                )?;
            }
            ColumnRole::ClientDate => {
                outcome.followup = self.update_followup(
                    store,
                    event,
                    Followup::Client,
                    ColumnRole::ClientFollowup,
                )?;
            }
            ColumnRole::Status => {
                outcome.remark_stamp = self.stamp_remark(store, event)?;
            }
            ColumnRole::RemarkDate => {}
            _ => return Ok(outcome),
        }

        let today = self.clock.today();
        outcome.gaps = Some(recalculate_row(store, &self.schema, event.row, today)?);
        Ok(outcome)
    }

    fn update_followup<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        event: &EditEvent,
        kind: Followup,
        counter: ColumnRole,
    ) -> Result<Option<u32>> {
        let Some(col) = self.schema.index(counter) else {
            debug!("row {}: no {:?} column, counter skipped", event.row, counter);
            return Ok(None);
        };

        let change = followup_change(kind, &event.old_value, &event.new_value);
        if change == FollowupChange::Unchanged {
            return Ok(None);
        }

        let current = store.get_cell(event.row, col)?.as_count();
        let next = change.apply(current);
        store.set_cell(event.row, col, CellValue::from(next))?;
        debug!("row {}: {:?} follow-up {} -> {}", event.row, kind, current, next);
        Ok(Some(next))
    }

    fn stamp_remark<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        event: &EditEvent,
    ) -> Result<Option<String>> {
        if event.new_value.is_empty() || event.new_value == event.old_value {
            return Ok(None);
        }
        let Some(col) = self.schema.index(ColumnRole::RemarkDate) else {
            debug!("row {}: no remark date column, stamp skipped", event.row);
            return Ok(None);
        };

        let mut stamp = String::new();
        write!(
            stamp,
            "{}",
            self.clock.today().format(&self.config.remark_date_format)
        )
        .map_err(|_| {
            TrackerError::Config(format!(
                "invalid remark_date_format '{}'",
                self.config.remark_date_format
            ))
        })?;

        store.set_cell(event.row, col, CellValue::text(stamp.clone()))?;
        debug!("row {}: status changed, remark date stamped {}", event.row, stamp);
        Ok(Some(stamp))
    }
}

/// Handles one edit, resolving column roles from the header on the spot.
pub fn on_edit<S: TableStore + ?Sized, C: Clock>(
    store: &mut S,
    config: &TrackerConfig,
    clock: C,
    event: &EditEvent,
) -> Result<EditOutcome> {
    let reactor = EditReactor::new(&*store, config, clock)?;
    reactor.handle_edit(store, event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_candidate_transitions() {
        let k = Followup::Candidate;
        assert_eq!(followup_change(k, &t(""), &t("01/01/2025")), FollowupChange::Increment);
        assert_eq!(
            followup_change(k, &t("01/01/2025"), &t("02/01/2025")),
            FollowupChange::Increment
        );
        assert_eq!(
            followup_change(k, &t("01/01/2025"), &t("01/01/2025")),
            FollowupChange::Unchanged
        );
        assert_eq!(followup_change(k, &t("01/01/2025"), &t("")), FollowupChange::Reset);
        assert_eq!(followup_change(k, &t(""), &t("")), FollowupChange::Reset);
        println!("✓ Candidate counter transitions");
    }

    #[test]
    fn test_client_skips_first_entry() {
        let k = Followup::Client;
        assert_eq!(followup_change(k, &t(""), &t("01/01/2025")), FollowupChange::Unchanged);
        assert_eq!(
            followup_change(k, &t("01/01/2025"), &t("02/01/2025")),
            FollowupChange::Increment
        );
        assert_eq!(followup_change(k, &t("02/01/2025"), &t("")), FollowupChange::Reset);
        println!("✓ Client counter ignores the first date entry");
    }

    #[test]
    fn test_apply() {
        assert_eq!(FollowupChange::Increment.apply(2), 3);
        assert_eq!(FollowupChange::Reset.apply(9), 0);
        assert_eq!(FollowupChange::Unchanged.apply(4), 4);
        assert_eq!(FollowupChange::Increment.apply(u32::MAX), u32::MAX);
        println!("✓ Counter changes apply to the current count");
    }
}
