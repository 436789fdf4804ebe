//! Batch assembly
//!
//! Turns one page of history rows into completed work items. Rows for an item
//! are contiguous in the feed, so a page is walked once with a single open
//! accumulator. The last item on a page may continue on the next page; unless
//! the page reaches the end of the feed that item is left unfinished and its
//! rows are not counted as consumed, so the next window starts on its first row.

use crate::core::reconcile::reconcile;
use crate::domain::item::clean_name;
use crate::domain::{AttributeSchema, CompletedItem, ItemId, LinkId, RawEvent, StageSchema};
use chrono::NaiveDate;

/// Result of assembling one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items whose rows were all seen, in feed order
    pub items: Vec<CompletedItem>,

    /// Rows belonging to finalized items
    pub consumed: usize,

    /// Rows left in the feed after the consumed ones
    pub remaining: usize,
}

impl BatchOutcome {
    /// Whether this page reached the end of the feed
    pub fn is_final(&self) -> bool {
        self.remaining == 0
    }
}

/// Rows gathered so far for the item currently open
struct ItemAccumulator {
    id: ItemId,
    link: Option<LinkId>,
    name: String,
    stage_events: Vec<Vec<NaiveDate>>,
    attributes: Vec<Option<String>>,
    earliest: Option<NaiveDate>,
}

impl ItemAccumulator {
    fn new(id: ItemId, stages: usize, attributes: usize) -> Self {
        Self {
            id,
            link: None,
            name: String::new(),
            stage_events: vec![Vec::new(); stages],
            attributes: vec![None; attributes],
            earliest: None,
        }
    }

    fn absorb(&mut self, row: &RawEvent, stages: &StageSchema, attributes: &AttributeSchema) {
        self.name = clean_name(&row.name);

        if row.link.is_some() {
            self.link = row.link.clone();
        }

        for (slot, attribute) in self.attributes.iter_mut().zip(attributes.iter()) {
            if let Some(value) = row.value_for(&attribute.field) {
                *slot = Some(value.to_string());
            }
        }

        let Some(date) = row.change_date else {
            return;
        };

        if self.earliest.map_or(true, |earliest| date < earliest) {
            self.earliest = Some(date);
        }

        match stages.stage_for(&row.status) {
            Some(stage) => self.stage_events[stage].push(date),
            None => tracing::trace!(
                item = %self.id,
                status = %row.status,
                "Status not mapped to a stage"
            ),
        }
    }

    fn finish(mut self, stages: &StageSchema) -> CompletedItem {
        if stages.created_in_first_stage() {
            if let (Some(first), Some(created)) = (self.stage_events.first_mut(), self.earliest) {
                first.push(created);
            }
        }

        CompletedItem {
            id: self.id,
            link: self.link,
            name: self.name,
            stage_dates: reconcile(&self.stage_events),
            attributes: self.attributes,
        }
    }
}

/// Assembles pages of rows into completed items
///
/// Holds no state between calls; every call starts with an empty accumulator.
pub struct BatchAssembler<'a> {
    stages: &'a StageSchema,
    attributes: &'a AttributeSchema,
}

impl<'a> BatchAssembler<'a> {
    pub fn new(stages: &'a StageSchema, attributes: &'a AttributeSchema) -> Self {
        Self { stages, attributes }
    }

    /// Assemble the rows of one page
    ///
    /// `offset` is the absolute position of the page's first row and `total`
    /// the feed's row count. When a row sits at position `total - 1` the open
    /// item is finalized and every row up to it counts as consumed.
    pub fn assemble(&self, rows: &[RawEvent], total: usize, offset: usize) -> BatchOutcome {
        let mut items = Vec::new();
        let mut open: Option<ItemAccumulator> = None;
        let mut consumed = 0;

        for (index, row) in rows.iter().enumerate() {
            let continues = open.as_ref().is_some_and(|acc| acc.id == row.item_id);

            if !continues {
                if let Some(done) = open.take() {
                    items.push(done.finish(self.stages));
                    consumed = index;
                }
                open = Some(ItemAccumulator::new(
                    row.item_id.clone(),
                    self.stages.len(),
                    self.attributes.len(),
                ));
            }

            if let Some(acc) = open.as_mut() {
                acc.absorb(row, self.stages, self.attributes);
            }

            if offset + index + 1 == total {
                if let Some(done) = open.take() {
                    items.push(done.finish(self.stages));
                }
                consumed = index + 1;
            }
        }

        if let Some(acc) = &open {
            tracing::debug!(
                item = %acc.id,
                provisional_rows = rows.len() - consumed,
                "Deferring item that may continue on the next page"
            );
        }

        let remaining = total.saturating_sub(offset).saturating_sub(consumed);

        BatchOutcome {
            items,
            consumed,
            remaining,
        }
    }
}
