//! POS admin console
//!
//! Headless core of the administrative console: branch pricing, the CRUD
//! screens and company settings, each driven through the typed API of
//! [`pos_client`]. Operations report their outcome as a [`Notification`].
//!
//! # Example
//!
//! ```ignore
//! use pos_admin::{Notifier, pricing::{BranchFilter, PriceWorkspace}};
//! use pos_client::{NetworkHttpClient, PosApi};
//!
//! let client = NetworkHttpClient::new(&config.client_config(), session)?;
//! let workspace = PriceWorkspace::new(PosApi::new(client), Notifier::new());
//! workspace.load(BranchFilter::ByName("Downtown".into())).await?;
//! workspace.open_product(7).await?;
//! workspace.begin_edit().await?;
//! workspace.set_price(1, "12.50").await?;
//! workspace.request_save().await?;
//! workspace.confirm_save().await?;
//! ```

pub mod config;
pub mod crud;
pub mod error;
pub mod logger;
pub mod notify;
pub mod pricing;
pub mod settings;

pub use config::AdminConfig;
pub use crud::{CrudConsole, CrudMode};
pub use error::{AdminError, AdminResult};
pub use notify::{Level, Notification, Notifier};
pub use settings::SettingsPage;
