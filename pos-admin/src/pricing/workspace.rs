//! Price workspace
//!
//! Async driver of the pricing page. It owns the selector lists, the price
//! dialog and the API, performs the requests the dialog asks for and turns
//! each operation's outcome into one notification.
//!
//! Locks are never held across a request: the dialog hands out a ticket,
//! the lock is released, the request runs, and the result is reported back
//! under a fresh lock where a stale ticket is simply dropped.

use pos_client::{ClientResult, HttpClient, PosApi, Session};
use shared::models::{Branch, BranchProduct, PriceType};
use shared::{AppError, ErrorCode};
use tokio::sync::{Mutex, RwLock};

use super::buffer::PriceEditBuffer;
use super::commit::{COMMIT_FALLBACK_MESSAGE, COMMIT_SUCCESS_MESSAGE};
use super::dialog::{DialogState, DialogTarget, LoadOutcome, PriceDialog, SaveOutcome};
use super::selector::{self, BranchFilter, BranchSelection};
use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;

/// Result of a confirmed save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Prices committed and the product list refetched
    Committed,
    /// Another save of this dialog was already in flight
    AlreadySaving,
    /// The dialog was closed while the commit ran
    Discarded,
}

#[derive(Debug, Default)]
struct Catalog {
    branches: Vec<Branch>,
    price_types: Vec<PriceType>,
    products: Vec<BranchProduct>,
    selection: BranchSelection,
}

impl Catalog {
    /// Apply the independently fetched lists, keeping the first failure
    fn apply_lists(
        &mut self,
        branches: ClientResult<Vec<Branch>>,
        price_types: ClientResult<Vec<PriceType>>,
        first_error: &mut Option<AdminError>,
    ) {
        match branches {
            Ok(list) => self.branches = list,
            Err(e) => {
                self.branches.clear();
                first_error.get_or_insert(e.into());
            }
        }
        match price_types {
            Ok(list) => self.price_types = list,
            Err(e) => {
                self.price_types.clear();
                first_error.get_or_insert(e.into());
            }
        }
        self.products.clear();
    }
}

fn no_employee() -> AdminError {
    AdminError::Rejected(AppError::with_message(
        ErrorCode::NotAuthenticated,
        "Session token does not identify an employee",
    ))
}

/// Pricing page state and operations
pub struct PriceWorkspace<C> {
    api: PosApi<C>,
    notifier: Notifier,
    catalog: RwLock<Catalog>,
    dialog: Mutex<PriceDialog>,
}

impl<C: HttpClient> PriceWorkspace<C> {
    pub fn new(api: PosApi<C>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            catalog: RwLock::new(Catalog::default()),
            dialog: Mutex::new(PriceDialog::new()),
        }
    }

    pub fn api(&self) -> &PosApi<C> {
        &self.api
    }

    fn fail<T>(&self, err: AdminError, fallback: &str) -> AdminResult<T> {
        self.notifier.error(&err, fallback);
        Err(err)
    }

    /// Notify a dialog transition error
    fn checked<T>(&self, result: AdminResult<T>) -> AdminResult<T> {
        result.or_else(|e| self.fail(e, ""))
    }

    // ========== Loading ==========

    /// Initial page load
    ///
    /// Branches and price types are fetched concurrently; with an id filter
    /// the branch's products are fetched alongside them. Each list is
    /// applied on its own, so one failure does not discard the others. The
    /// first failure is returned after everything else has been applied.
    pub async fn load(&self, filter: BranchFilter) -> AdminResult<()> {
        tracing::info!(?filter, "Loading pricing page");
        let branch_id = match &filter {
            BranchFilter::ById(id) => Some(*id),
            BranchFilter::ByName(_) => None,
        };
        let products_fut = async {
            match branch_id {
                Some(id) => Some(self.api.branch_products(id).await),
                None => None,
            }
        };
        let (branches, price_types, products) =
            tokio::join!(self.api.branches(), self.api.price_types(), products_fut);

        let mut first_error: Option<AdminError> = None;
        let mut selected = false;
        {
            let mut catalog = self.catalog.write().await;
            catalog.apply_lists(branches, price_types, &mut first_error);
            catalog.selection = selector::resolve_branch(&catalog.branches, &filter);
            if catalog.selection.is_selected() {
                selected = true;
                match products {
                    Some(Ok(list)) => catalog.products = list,
                    Some(Err(e)) => {
                        first_error.get_or_insert(e.into());
                    }
                    None => {}
                }
            }
        }
        self.dialog.lock().await.close();

        if let Some(err) = first_error {
            return self.fail(err, "Failed to load pricing data");
        }
        if !selected {
            return self.fail(AdminError::NoBranchSelected, "");
        }
        if let BranchFilter::ByName(_) = filter {
            self.refresh_products().await?;
        }
        Ok(())
    }

    /// Initial load of the own-branch page
    ///
    /// The employee record behind the session is fetched alongside the
    /// branch and price type lists; its branch id is then resolved against
    /// the fresh branch list.
    pub async fn load_own_branch(&self, session: &Session) -> AdminResult<()> {
        let Some(employee_id) = session.claims().and_then(|c| c.employee_id()) else {
            return self.fail(no_employee(), "");
        };
        tracing::info!(employee_id, "Loading own-branch pricing page");
        let (branches, price_types, employee) = tokio::join!(
            self.api.branches(),
            self.api.price_types(),
            self.api.employee(employee_id)
        );

        let mut first_error: Option<AdminError> = None;
        let selected = {
            let mut catalog = self.catalog.write().await;
            catalog.apply_lists(branches, price_types, &mut first_error);
            let branch_id = match employee {
                Ok(e) => e.branch_id,
                Err(e) => {
                    first_error.get_or_insert(e.into());
                    None
                }
            };
            catalog.selection = match branch_id {
                Some(id) => selector::resolve_branch(&catalog.branches, &BranchFilter::ById(id)),
                None => BranchSelection::None,
            };
            catalog.selection.is_selected()
        };
        self.dialog.lock().await.close();

        if let Some(err) = first_error {
            return self.fail(err, "Failed to load pricing data");
        }
        if !selected {
            return self.fail(AdminError::NoBranchSelected, "");
        }
        self.refresh_products().await
    }

    /// Switch branch; closes any open price dialog
    pub async fn select_branch(&self, filter: BranchFilter) -> AdminResult<()> {
        self.dialog.lock().await.close();
        let selected = {
            let mut catalog = self.catalog.write().await;
            catalog.selection = selector::resolve_branch(&catalog.branches, &filter);
            if !catalog.selection.is_selected() {
                catalog.products.clear();
            }
            catalog.selection.is_selected()
        };
        if !selected {
            tracing::info!(?filter, "No branch matches filter");
            return self.fail(AdminError::NoBranchSelected, "");
        }
        self.refresh_products().await
    }

    /// Own-branch page: the branch of the employee behind the session token
    pub async fn select_own_branch(&self, session: &Session) -> AdminResult<()> {
        let Some(employee_id) = session.claims().and_then(|c| c.employee_id()) else {
            return self.fail(no_employee(), "");
        };
        let employee = match self.api.employee(employee_id).await {
            Ok(e) => e,
            Err(e) => return self.fail(e.into(), "Failed to load employee"),
        };
        match employee.branch_id {
            Some(branch_id) => self.select_branch(BranchFilter::ById(branch_id)).await,
            None => {
                self.catalog.write().await.selection = BranchSelection::None;
                self.fail(AdminError::NoBranchSelected, "")
            }
        }
    }

    /// Refetch the product list of the selected branch
    pub async fn refresh_products(&self) -> AdminResult<()> {
        let selected = self.catalog.read().await.selection.branch_id();
        let branch_id = match selected {
            Ok(id) => id,
            Err(e) => return self.fail(e, ""),
        };
        self.reload_products(branch_id).await
    }

    async fn reload_products(&self, branch_id: i64) -> AdminResult<()> {
        tracing::debug!(branch_id, "Fetching branch products");
        let products = match self.api.branch_products(branch_id).await {
            Ok(list) => list,
            Err(e) => return self.fail(e.into(), "Failed to load products"),
        };
        let mut catalog = self.catalog.write().await;
        // the user may have switched branch meanwhile
        if catalog.selection.branch_id().ok() == Some(branch_id) {
            catalog.products = products;
        } else {
            tracing::debug!(branch_id, "Dropping products of a deselected branch");
        }
        Ok(())
    }

    // ========== Price dialog ==========

    /// Open the price dialog for a product row of the selected branch
    ///
    /// A load overtaken by another `open_product` or by `close` is dropped
    /// and reported as success.
    pub async fn open_product(&self, product_id: i64) -> AdminResult<()> {
        let (branch_id, price_types) = {
            let catalog = self.catalog.read().await;
            let branch_id = match catalog.selection.branch_id() {
                Ok(id) => id,
                Err(e) => return self.fail(e, ""),
            };
            if selector::find_product(&catalog.products, product_id).is_none() {
                return self.fail(AdminError::NotFound(format!("Product {}", product_id)), "");
            }
            (branch_id, catalog.price_types.clone())
        };

        let opened = self.dialog.lock().await.open(product_id, branch_id, price_types);
        let request = self.checked(opened)?;
        tracing::debug!(product_id, branch_id, "Loading product prices");

        let result = self
            .api
            .product_prices(product_id, branch_id)
            .await
            .map_err(AdminError::from);

        let outcome = self.dialog.lock().await.finish_load(request.ticket, result);
        match outcome {
            LoadOutcome::Applied => Ok(()),
            LoadOutcome::Stale => {
                tracing::debug!(product_id, "Discarding stale price load");
                Ok(())
            }
            LoadOutcome::Failed(e) => self.fail(e, "Failed to load prices"),
        }
    }

    pub async fn begin_edit(&self) -> AdminResult<()> {
        let result = self.dialog.lock().await.begin_edit();
        self.checked(result)
    }

    pub async fn set_price(&self, price_type_id: i64, value: impl Into<String>) -> AdminResult<()> {
        let result = self.dialog.lock().await.edit(price_type_id, value);
        self.checked(result)
    }

    pub async fn cancel_edit(&self) -> AdminResult<()> {
        let result = self.dialog.lock().await.cancel_edit();
        self.checked(result)
    }

    pub async fn request_save(&self) -> AdminResult<()> {
        let result = self.dialog.lock().await.request_save();
        self.checked(result)
    }

    pub async fn cancel_save(&self) -> AdminResult<()> {
        let result = self.dialog.lock().await.cancel_save();
        self.checked(result)
    }

    /// Confirm the pending save and run the bulk commit
    ///
    /// On success the product list of the dialog's branch is refetched once.
    /// On failure the dialog returns to editing with its buffer intact.
    pub async fn confirm_save(&self) -> AdminResult<SaveStatus> {
        let confirmed = self.dialog.lock().await.confirm_save();
        let request = match confirmed {
            Ok(Some(request)) => request,
            Ok(None) => {
                tracing::debug!("Save already in progress");
                return Ok(SaveStatus::AlreadySaving);
            }
            Err(e) => return self.fail(e, COMMIT_FALLBACK_MESSAGE),
        };

        let ticket = request.ticket;
        let result = request.commit.submit(&self.api).await;

        let outcome = self.dialog.lock().await.finish_save(ticket, result);
        match outcome {
            SaveOutcome::Committed { branch_id, message } => {
                self.notifier
                    .success(message.unwrap_or_else(|| COMMIT_SUCCESS_MESSAGE.to_string()));
                // the commit stands even if the refetch fails; that error is notified
                let _ = self.reload_products(branch_id).await;
                Ok(SaveStatus::Committed)
            }
            SaveOutcome::Failed(e) => self.fail(e, COMMIT_FALLBACK_MESSAGE),
            SaveOutcome::Stale => {
                tracing::debug!("Save finished after dialog was closed");
                Ok(SaveStatus::Discarded)
            }
        }
    }

    pub async fn close_dialog(&self) {
        self.dialog.lock().await.close();
    }

    // ========== Inventory ==========

    /// Set a product's low-stock threshold, then refetch the product list
    pub async fn update_alert_quantity(&self, product_id: i64, alert_quantity: i64) -> AdminResult<()> {
        if alert_quantity < 0 {
            let err = AdminError::Rejected(
                AppError::with_message(
                    ErrorCode::InvalidAlertQuantity,
                    "Alert quantity cannot be negative",
                )
                .with_detail("alert_quantity", alert_quantity),
            );
            return self.fail(err, "");
        }
        if let Err(e) = self.api.update_alert_quantity(product_id, alert_quantity).await {
            return self.fail(e.into(), "Failed to update alert quantity");
        }
        tracing::info!(product_id, alert_quantity, "Alert quantity updated");
        self.notifier.success("Alert quantity updated");
        self.refresh_products().await
    }

    // ========== Accessors ==========

    pub async fn branches(&self) -> Vec<Branch> {
        self.catalog.read().await.branches.clone()
    }

    pub async fn price_types(&self) -> Vec<PriceType> {
        self.catalog.read().await.price_types.clone()
    }

    pub async fn products(&self) -> Vec<BranchProduct> {
        self.catalog.read().await.products.clone()
    }

    pub async fn selection(&self) -> BranchSelection {
        self.catalog.read().await.selection.clone()
    }

    pub async fn dialog_state(&self) -> DialogState {
        self.dialog.lock().await.state()
    }

    pub async fn dialog_target(&self) -> Option<DialogTarget> {
        self.dialog.lock().await.target()
    }

    /// Copy of the dialog's pending prices
    pub async fn buffer(&self) -> PriceEditBuffer {
        self.dialog.lock().await.buffer().clone()
    }
}
