//! Generic CRUD console
//!
//! One list-plus-dialog component shared by every admin screen that follows
//! fetch list, open dialog, submit, refetch. The screen is described by a
//! [`Resource`]; its client-side checks run before any request is sent.

use pos_client::{HttpClient, PosApi, Resource};
use std::marker::PhantomData;
use tokio::sync::{Mutex, RwLock};

use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrudMode {
    #[default]
    Closed,
    Creating,
    Editing {
        id: i64,
    },
    ConfirmingDelete {
        id: i64,
    },
    /// Write request in flight
    Submitting,
}

pub struct CrudConsole<C, R: Resource> {
    api: PosApi<C>,
    notifier: Notifier,
    items: RwLock<Vec<R::Item>>,
    mode: Mutex<CrudMode>,
    _resource: PhantomData<R>,
}

impl<C: HttpClient, R: Resource> CrudConsole<C, R> {
    pub fn new(api: PosApi<C>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            items: RwLock::new(Vec::new()),
            mode: Mutex::new(CrudMode::Closed),
            _resource: PhantomData,
        }
    }

    fn fail<T>(&self, err: AdminError, fallback: &str) -> AdminResult<T> {
        self.notifier.error(&err, fallback);
        Err(err)
    }

    pub async fn mode(&self) -> CrudMode {
        *self.mode.lock().await
    }

    pub async fn items(&self) -> Vec<R::Item> {
        self.items.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<R::Item> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| R::id(item) == id)
            .cloned()
    }

    async fn require(&self, id: i64) -> AdminResult<R::Item> {
        match self.find(id).await {
            Some(item) => Ok(item),
            None => self.fail(AdminError::NotFound(format!("{} {}", R::LABEL, id)), ""),
        }
    }

    /// Refetch the list
    pub async fn refresh(&self) -> AdminResult<()> {
        tracing::debug!(resource = R::PATH, "Fetching list");
        match self.api.list::<R>().await {
            Ok(list) => {
                *self.items.write().await = list;
                Ok(())
            }
            Err(e) => self.fail(e.into(), &format!("Failed to load {}", R::PATH)),
        }
    }

    /// Open a dialog unless a request is in flight
    async fn enter(&self, next: CrudMode) -> AdminResult<()> {
        let mut mode = self.mode.lock().await;
        match *mode {
            CrudMode::Submitting => Err(AdminError::InvalidState("a request is in progress")),
            _ => {
                *mode = next;
                Ok(())
            }
        }
    }

    /// Leave `expected` for `Submitting`
    ///
    /// Refused unless the dialog is still exactly `expected`, record id included.
    async fn begin_submit(&self, expected: CrudMode) -> AdminResult<()> {
        let mut mode = self.mode.lock().await;
        if *mode != expected {
            return Err(AdminError::InvalidState("the dialog changed before submit"));
        }
        *mode = CrudMode::Submitting;
        Ok(())
    }

    pub async fn open_create(&self) -> AdminResult<()> {
        self.enter(CrudMode::Creating).await
    }

    pub async fn open_edit(&self, id: i64) -> AdminResult<R::Item> {
        let item = self.require(id).await?;
        self.enter(CrudMode::Editing { id }).await?;
        Ok(item)
    }

    pub async fn submit_create(&self, create: &R::Create) -> AdminResult<R::Item> {
        if let Err(e) = R::validate_create(create) {
            return self.fail(e.into(), "");
        }
        let previous = CrudMode::Creating;
        self.begin_submit(previous).await?;

        match self.api.create::<R>(create).await {
            Ok(item) => {
                *self.mode.lock().await = CrudMode::Closed;
                crate::audit_log!("create", format!("{}:{}", R::PATH, R::id(&item)));
                self.notifier
                    .success(format!("{} '{}' created", R::LABEL, R::display_name(&item)));
                let _ = self.refresh().await;
                Ok(item)
            }
            Err(e) => {
                *self.mode.lock().await = previous;
                self.fail(e.into(), &format!("Failed to create {}", R::LABEL.to_lowercase()))
            }
        }
    }

    /// Submit the open edit dialog
    pub async fn submit_update(&self, update: &R::Update) -> AdminResult<R::Item> {
        let id = match self.mode().await {
            CrudMode::Editing { id } => id,
            _ => return Err(AdminError::InvalidState("no edit dialog is open")),
        };
        let current = self.require(id).await?;
        if let Err(e) = R::guard_update(&current, update) {
            return self.fail(e.into(), "");
        }
        let previous = CrudMode::Editing { id };
        self.begin_submit(previous).await?;

        match self.api.update::<R>(id, update).await {
            Ok(item) => {
                *self.mode.lock().await = CrudMode::Closed;
                crate::audit_log!("update", format!("{}:{}", R::PATH, id));
                self.notifier
                    .success(format!("{} '{}' updated", R::LABEL, R::display_name(&item)));
                let _ = self.refresh().await;
                Ok(item)
            }
            Err(e) => {
                *self.mode.lock().await = previous;
                self.fail(e.into(), &format!("Failed to update {}", R::LABEL.to_lowercase()))
            }
        }
    }

    /// Ask for delete confirmation; protected records are refused here
    pub async fn request_delete(&self, id: i64) -> AdminResult<()> {
        let current = self.require(id).await?;
        if let Err(e) = R::guard_delete(&current) {
            return self.fail(e.into(), "");
        }
        self.enter(CrudMode::ConfirmingDelete { id }).await
    }

    pub async fn confirm_delete(&self) -> AdminResult<()> {
        let id = match self.mode().await {
            CrudMode::ConfirmingDelete { id } => id,
            _ => return Err(AdminError::InvalidState("no delete awaiting confirmation")),
        };
        let previous = CrudMode::ConfirmingDelete { id };
        self.begin_submit(previous).await?;

        match self.api.delete::<R>(id).await {
            Ok(()) => {
                *self.mode.lock().await = CrudMode::Closed;
                crate::audit_log!("delete", format!("{}:{}", R::PATH, id));
                self.notifier.success(format!("{} deleted", R::LABEL));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                *self.mode.lock().await = previous;
                self.fail(e.into(), &format!("Failed to delete {}", R::LABEL.to_lowercase()))
            }
        }
    }

    /// Close the dialog; refused while a request is in flight
    pub async fn cancel(&self) -> AdminResult<()> {
        let mut mode = self.mode.lock().await;
        if *mode == CrudMode::Submitting {
            return Err(AdminError::InvalidState("a request is in progress"));
        }
        *mode = CrudMode::Closed;
        Ok(())
    }
}
