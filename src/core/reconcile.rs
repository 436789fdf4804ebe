//! Stage date reconciliation
//!
//! Items move backwards through the workflow (rework, reopened stories), so a
//! stage can collect several status-change dates and later stages can carry
//! dates older than earlier ones. Reconciliation picks one date per stage such
//! that no reported date precedes the latest date seen in any earlier stage.

use chrono::NaiveDate;

/// Resolves one date per stage from the dates observed for each stage
///
/// Walking stages in order, each stage reports the earliest of its dates that
/// is not before `previous_max`, the latest date seen in any earlier stage.
/// A stage whose dates all precede `previous_max` reports nothing. Every date
/// a stage observed, reported or not, still advances `previous_max`.
///
/// The order of dates within a stage does not matter.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cycletime::core::reconcile::reconcile;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let events = vec![
///     vec![d("2024-01-01")],
///     vec![d("2024-01-05"), d("2024-01-03")],
///     vec![d("2024-01-04")],
/// ];
///
/// assert_eq!(
///     reconcile(&events),
///     vec![Some(d("2024-01-01")), Some(d("2024-01-03")), None]
/// );
/// ```
pub fn reconcile(events: &[Vec<NaiveDate>]) -> Vec<Option<NaiveDate>> {
    let mut previous_max: Option<NaiveDate> = None;
    let mut resolved = Vec::with_capacity(events.len());

    for dates in events {
        let best = dates
            .iter()
            .copied()
            .filter(|date| previous_max.map_or(true, |max| *date >= max))
            .min();

        if let Some(stage_max) = dates.iter().copied().max() {
            if previous_max.map_or(true, |max| stage_max > max) {
                previous_max = Some(stage_max);
            }
        }

        resolved.push(best);
    }

    resolved
}
