//! Company settings page

use pos_client::{HttpClient, PosApi};
use shared::models::{CompanySettings, CompanySettingsUpdate};
use shared::{AppError, ErrorCode};
use tokio::sync::RwLock;

use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;

pub struct SettingsPage<C> {
    api: PosApi<C>,
    notifier: Notifier,
    settings: RwLock<Option<CompanySettings>>,
}

fn validate(update: &CompanySettingsUpdate) -> Result<(), AppError> {
    match &update.company_name {
        Some(name) if name.trim().is_empty() => Err(AppError::with_message(
            ErrorCode::CompanyNameRequired,
            "Company name is required",
        )
        .with_detail("field", "company_name")),
        _ => Ok(()),
    }
}

impl<C: HttpClient> SettingsPage<C> {
    pub fn new(api: PosApi<C>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            settings: RwLock::new(None),
        }
    }

    /// Last loaded settings
    pub async fn settings(&self) -> Option<CompanySettings> {
        self.settings.read().await.clone()
    }

    pub async fn load(&self) -> AdminResult<CompanySettings> {
        match self.api.settings().await {
            Ok(settings) => {
                *self.settings.write().await = Some(settings.clone());
                Ok(settings)
            }
            Err(e) => {
                let err = AdminError::from(e);
                self.notifier.error(&err, "Failed to load settings");
                Err(err)
            }
        }
    }

    /// Save changed fields, then reload
    pub async fn update(&self, update: &CompanySettingsUpdate) -> AdminResult<CompanySettings> {
        if let Err(e) = validate(update) {
            let err = AdminError::from(e);
            self.notifier.error(&err, "");
            return Err(err);
        }
        if let Err(e) = self.api.update_settings(update).await {
            let err = AdminError::from(e);
            self.notifier.error(&err, "Failed to update settings");
            return Err(err);
        }
        crate::audit_log!("update", "settings");
        self.notifier.success("Settings updated");
        self.load().await
    }
}
