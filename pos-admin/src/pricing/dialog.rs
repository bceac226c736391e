//! Price dialog controller
//!
//! State machine behind the per-product price dialog. It performs no I/O:
//! opening and confirming hand out requests stamped with a [`Ticket`], and
//! the caller reports the result back with the same ticket. A result whose
//! ticket is no longer current (dialog closed, re-targeted, or another
//! attempt started) is dropped without touching any state.
//!
//! ```text
//! Closed -> Loading -> View -> Editing -> ConfirmingSave -> Saving -> Closed
//!                                ^              |              |
//!                                +--------------+--------------+ (cancel / failure)
//! ```

use shared::models::{PriceType, ProductPrice};

use super::buffer::PriceEditBuffer;
use super::commit::BulkCommit;
use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// Fetching existing prices
    Loading,
    /// Read-only
    View,
    Editing,
    /// Save requested, waiting for explicit confirmation
    ConfirmingSave,
    /// Bulk commit in flight
    Saving,
}

/// Identifies one load or save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Product and branch the dialog is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogTarget {
    pub product_id: i64,
    pub branch_id: i64,
}

/// Price fetch the caller must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: Ticket,
    pub target: DialogTarget,
}

/// Commit the caller must submit
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub ticket: Ticket,
    pub target: DialogTarget,
    pub commit: BulkCommit,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// Buffer seeded, dialog in View
    Applied,
    /// Fetch failed, dialog closed
    Failed(AdminError),
    /// Result no longer belongs to the visible dialog
    Stale,
}

#[derive(Debug)]
pub enum SaveOutcome {
    /// Committed; dialog closed and buffer cleared. The branch's product
    /// list must be refetched.
    Committed {
        branch_id: i64,
        message: Option<String>,
    },
    /// Commit failed; dialog back in Editing with the buffer untouched
    Failed(AdminError),
    Stale,
}

#[derive(Debug, Default)]
pub struct PriceDialog {
    state: DialogState,
    generation: u64,
    pending: Option<Ticket>,
    target: Option<DialogTarget>,
    price_types: Vec<PriceType>,
    server_prices: Vec<ProductPrice>,
    buffer: PriceEditBuffer,
}

impl PriceDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn target(&self) -> Option<DialogTarget> {
        self.target
    }

    pub fn buffer(&self) -> &PriceEditBuffer {
        &self.buffer
    }

    pub fn price_types(&self) -> &[PriceType] {
        &self.price_types
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    fn is_current(&self, ticket: Ticket, expected: DialogState) -> bool {
        self.pending == Some(ticket) && self.state == expected
    }

    /// Select a product row: start loading its prices for `branch_id`
    ///
    /// Re-targets an open dialog; the earlier load, if any, becomes stale.
    /// Refused while a save is in flight.
    pub fn open(
        &mut self,
        product_id: i64,
        branch_id: i64,
        price_types: Vec<PriceType>,
    ) -> AdminResult<LoadRequest> {
        if self.state == DialogState::Saving {
            return Err(AdminError::InvalidState("a save is in progress"));
        }
        let target = DialogTarget {
            product_id,
            branch_id,
        };
        self.buffer.clear();
        self.server_prices.clear();
        self.price_types = price_types;
        self.target = Some(target);
        self.state = DialogState::Loading;
        let ticket = self.next_ticket();
        Ok(LoadRequest { ticket, target })
    }

    /// Report the price fetch started by [`open`](Self::open)
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: AdminResult<Vec<ProductPrice>>,
    ) -> LoadOutcome {
        if !self.is_current(ticket, DialogState::Loading) {
            return LoadOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(prices) => {
                self.server_prices = prices;
                self.reseed();
                self.state = DialogState::View;
                LoadOutcome::Applied
            }
            Err(e) => {
                self.reset();
                LoadOutcome::Failed(e)
            }
        }
    }

    fn reseed(&mut self) {
        if let Some(target) = self.target {
            self.buffer.seed(
                target.product_id,
                target.branch_id,
                &self.price_types,
                &self.server_prices,
            );
        }
    }

    /// View -> Editing
    pub fn begin_edit(&mut self) -> AdminResult<()> {
        match self.state {
            DialogState::View => {
                self.state = DialogState::Editing;
                Ok(())
            }
            DialogState::Editing => Ok(()),
            _ => Err(AdminError::InvalidState("prices are not loaded")),
        }
    }

    /// Record a keystroke for one price type of the target product
    pub fn edit(&mut self, price_type_id: i64, value: impl Into<String>) -> AdminResult<()> {
        if self.state != DialogState::Editing {
            return Err(AdminError::InvalidState("dialog is not in edit mode"));
        }
        if !self.price_types.iter().any(|t| t.id == price_type_id) {
            return Err(AdminError::NotFound(format!("Price type {}", price_type_id)));
        }
        let target = self
            .target
            .ok_or(AdminError::InvalidState("dialog has no product"))?;
        self.buffer
            .set(target.product_id, target.branch_id, price_type_id, value);
        Ok(())
    }

    /// Discard keystrokes and return to View with the server values
    pub fn cancel_edit(&mut self) -> AdminResult<()> {
        match self.state {
            DialogState::Editing | DialogState::ConfirmingSave => {
                self.reseed();
                self.state = DialogState::View;
                Ok(())
            }
            _ => Err(AdminError::InvalidState("dialog is not in edit mode")),
        }
    }

    /// Editing -> ConfirmingSave; a no-op while saving
    pub fn request_save(&mut self) -> AdminResult<()> {
        match self.state {
            DialogState::Editing => {
                self.state = DialogState::ConfirmingSave;
                Ok(())
            }
            DialogState::ConfirmingSave | DialogState::Saving => Ok(()),
            _ => Err(AdminError::InvalidState("dialog is not in edit mode")),
        }
    }

    /// ConfirmingSave -> Editing
    pub fn cancel_save(&mut self) -> AdminResult<()> {
        match self.state {
            DialogState::ConfirmingSave => {
                self.state = DialogState::Editing;
                Ok(())
            }
            _ => Err(AdminError::InvalidState("no save awaiting confirmation")),
        }
    }

    /// Confirm the save: ConfirmingSave -> Saving
    ///
    /// Returns `None` while a save is already in flight. A buffer that does
    /// not convert sends the dialog back to Editing with the error.
    pub fn confirm_save(&mut self) -> AdminResult<Option<SaveRequest>> {
        match self.state {
            DialogState::Saving => Ok(None),
            DialogState::ConfirmingSave => {
                let target = self
                    .target
                    .ok_or(AdminError::InvalidState("dialog has no product"))?;
                let commit = match BulkCommit::prepare(&self.buffer) {
                    Ok(commit) => commit,
                    Err(e) => {
                        self.state = DialogState::Editing;
                        return Err(e);
                    }
                };
                self.state = DialogState::Saving;
                let ticket = self.next_ticket();
                Ok(Some(SaveRequest {
                    ticket,
                    target,
                    commit,
                }))
            }
            _ => Err(AdminError::InvalidState("save was not requested")),
        }
    }

    /// Report the commit started by [`confirm_save`](Self::confirm_save)
    pub fn finish_save(&mut self, ticket: Ticket, result: AdminResult<Option<String>>) -> SaveOutcome {
        if !self.is_current(ticket, DialogState::Saving) {
            return SaveOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(message) => {
                let branch_id = self.target.map(|t| t.branch_id).unwrap_or_default();
                self.reset();
                SaveOutcome::Committed { branch_id, message }
            }
            Err(e) => {
                self.state = DialogState::Editing;
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Dismiss from any state; in-flight results become stale
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.state = DialogState::Closed;
        self.target = None;
        self.server_prices.clear();
        self.buffer.clear();
    }
}
