//! Branch pricing
//!
//! - [`key`]: composite (product, branch, price type) key
//! - [`buffer`]: pending edits of one product
//! - [`dialog`]: price dialog state machine
//! - [`commit`]: single batched write of a dialog's prices
//! - [`selector`]: branch / price type / product lookups
//! - [`workspace`]: async driver wiring the above to the API

pub mod buffer;
pub mod commit;
pub mod dialog;
pub mod key;
pub mod selector;
pub mod workspace;

pub use buffer::PriceEditBuffer;
pub use commit::{BulkCommit, COMMIT_FALLBACK_MESSAGE, COMMIT_SUCCESS_MESSAGE};
pub use dialog::{DialogState, DialogTarget, PriceDialog, Ticket};
pub use key::{KeyParseError, PriceKey};
pub use selector::{BranchFilter, BranchSelection};
pub use workspace::{PriceWorkspace, SaveStatus};
