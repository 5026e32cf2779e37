use crate::desk::Desk;
use crate::error::{AppError, AppResult};
use crate::history::HistoryUpdate;
use crate::models::HistoryEntry;
use crate::prompt::Prompter;
use crate::reorder::{self, ReorderSummary};
use crate::sheet::OrderSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutput {
    Print,
    Download,
}

#[derive(Debug, Clone)]
pub struct FinalizedOrder {
    pub output: OrderOutput,
    pub sheet: OrderSheet,
    pub entry: HistoryEntry,
}

/// Builds the order sheet for the current quantities, hands it to
/// `deliver`, and records it in the history once delivery succeeded.
/// `Ok(None)` means the user cancelled at the name prompt. Nothing is
/// recorded when the user cancels or `deliver` fails.
pub fn finalize_order<F>(
    desk: &mut Desk,
    prompter: &mut dyn Prompter,
    output: OrderOutput,
    deliver: F,
) -> AppResult<Option<FinalizedOrder>>
where
    F: FnOnce(OrderOutput, &OrderSheet) -> AppResult<()>,
{
    if !desk.store.state().has_quantities() {
        return Err(AppError::EmptyOrder);
    }

    let Some(establishment_name) = prompter.prompt_text("Enter establishment name:") else {
        tracing::debug!("order cancelled at establishment prompt");
        return Ok(None);
    };

    let sheet = OrderSheet::build(
        &establishment_name,
        desk.history.order_number(),
        desk.clock.today(),
        desk.store.state(),
    );
    deliver(output, &sheet)?;

    let entry = desk
        .history
        .add_order(&establishment_name, &desk.store.state().products)?;

    Ok(Some(FinalizedOrder {
        output,
        sheet,
        entry,
    }))
}

pub fn get_history(desk: &Desk) -> Vec<HistoryEntry> {
    desk.history.entries().to_vec()
}

pub fn get_history_entry(desk: &Desk, id: &str) -> AppResult<HistoryEntry> {
    desk.history
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::OrderNotFound(id.to_string()))
}

pub fn rename_history_entry(desk: &mut Desk, id: &str, establishment_name: &str) -> AppResult<HistoryEntry> {
    if establishment_name.trim().is_empty() {
        return Err(AppError::EmptyName);
    }

    let update = HistoryUpdate {
        establishment_name: Some(establishment_name.trim().to_string()),
        ..HistoryUpdate::default()
    };

    desk.history
        .update_order(id, update)?
        .ok_or_else(|| AppError::OrderNotFound(id.to_string()))
}

pub fn delete_history_entry(desk: &mut Desk, prompter: &mut dyn Prompter, id: &str) -> AppResult<bool> {
    get_history_entry(desk, id)?;

    if !prompter.confirm("Delete this order from history?") {
        return Ok(false);
    }

    desk.history.delete_order(id)
}

/// Replaces the current quantities with those of a past order. `Ok(None)`
/// when the user declines.
pub fn reorder_from_history(
    desk: &mut Desk,
    prompter: &mut dyn Prompter,
    id: &str,
) -> AppResult<Option<ReorderSummary>> {
    let entry = get_history_entry(desk, id)?;

    if !prompter.confirm("This will reset current quantities and apply the selected order. Continue?") {
        return Ok(None);
    }

    let summary = reorder::reorder(&mut desk.store, desk.clock.as_ref(), &entry);
    Ok(Some(summary))
}
