//! Command line front end
//!
//! Each invocation runs one console operation and prints its result;
//! notifications go to stderr.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pos_admin::pricing::selector::resolve_price_type;
use pos_admin::pricing::{BranchFilter, PriceWorkspace, SaveStatus};
use pos_admin::{AdminConfig, CrudConsole, Level, Notification, Notifier, SettingsPage};
use pos_client::resource::{Branches, Employees, LoginStatuses, PriceTypes, Roles};
use pos_client::{HttpClient, NetworkHttpClient, PosApi, Resource, Session};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::CompanySettingsUpdate;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[command(name = "pos-admin", author, version, about = "POS administrative console")]
pub struct Cli {
    /// REST base URL (overrides POS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a bearer token for later commands
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Show who the stored token belongs to
    Whoami,
    /// List, create, update or delete records
    Crud {
        #[arg(value_enum)]
        entity: Entity,
        #[command(subcommand)]
        action: CrudAction,
    },
    /// List the products of a branch
    Products {
        #[command(flatten)]
        branch: BranchArgs,
    },
    /// Show or edit the prices of a product
    Prices {
        #[command(subcommand)]
        action: PriceAction,
    },
    /// Set a product's low-stock alert quantity
    Alert {
        product_id: i64,
        quantity: i64,
        #[command(flatten)]
        branch: BranchArgs,
    },
    /// Show or update company settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Entity {
    Branches,
    Employees,
    Roles,
    LoginStatuses,
    PriceTypes,
}

#[derive(Subcommand, Debug)]
pub enum CrudAction {
    List,
    /// Create from a JSON object
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update fields given as a JSON object
    Update {
        id: i64,
        #[arg(long)]
        json: String,
    },
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PriceAction {
    Show {
        product_id: i64,
        #[command(flatten)]
        branch: BranchArgs,
    },
    /// Edit prices; nothing is saved without --yes
    Set {
        product_id: i64,
        #[command(flatten)]
        branch: BranchArgs,
        /// TYPE=VALUE, where TYPE is a price type id or name
        #[arg(long = "set", value_name = "TYPE=VALUE", required = true)]
        values: Vec<String>,
        /// Confirm the save
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    Show,
    Update {
        #[arg(long)]
        json: String,
    },
}

#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct BranchArgs {
    /// Branch name
    #[arg(long)]
    pub branch: Option<String>,
    /// Branch id
    #[arg(long)]
    pub branch_id: Option<i64>,
    /// The branch of the logged-in employee
    #[arg(long)]
    pub mine: bool,
}

enum BranchChoice {
    Filter(BranchFilter),
    Mine,
}

impl BranchArgs {
    fn choice(&self) -> anyhow::Result<BranchChoice> {
        if self.mine {
            return Ok(BranchChoice::Mine);
        }
        if let Some(id) = self.branch_id {
            return Ok(BranchChoice::Filter(BranchFilter::ById(id)));
        }
        if let Some(name) = &self.branch {
            return Ok(BranchChoice::Filter(BranchFilter::ByName(name.clone())));
        }
        bail!("choose a branch with --branch, --branch-id or --mine")
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn drain(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(n) = rx.try_recv() {
        let tag = match n.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Error => "error",
        };
        eprintln!("[{}] {}", tag, n.message);
    }
}

pub async fn run(cli: Cli, mut config: AdminConfig) -> anyhow::Result<()> {
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    let storage = config.session_storage();

    match &cli.command {
        Command::Login { token } => {
            let session = Session::with_token(token.as_str());
            if !session.is_authenticated() {
                bail!("token is empty");
            }
            storage.save(&session)?;
            println!("Token stored in {}", storage.path().display());
            return Ok(());
        }
        Command::Logout => {
            storage.delete()?;
            println!("Logged out");
            return Ok(());
        }
        Command::Whoami => {
            let session = config.load_session()?;
            match session.claims() {
                Some(claims) => print_json(&serde_json::json!({
                    "employee_id": claims.employee_id(),
                    "name": claims.name,
                    "role": claims.role,
                    "branch_id": claims.branch_id,
                }))?,
                None if session.is_authenticated() => println!("Token present, not readable"),
                None => println!("Not logged in"),
            }
            return Ok(());
        }
        _ => {}
    }

    let session = config.load_session()?;
    let client = NetworkHttpClient::new(&config.client_config(), session.clone())
        .context("failed to build HTTP client")?;
    let api = PosApi::new(client);
    let notifier = Notifier::new();
    let mut rx = notifier.subscribe();

    let result = dispatch(cli.command, api, notifier, &session).await;
    drain(&mut rx);
    result
}

async fn dispatch<C: HttpClient>(
    command: Command,
    api: PosApi<C>,
    notifier: Notifier,
    session: &Session,
) -> anyhow::Result<()> {
    match command {
        Command::Crud { entity, action } => match entity {
            Entity::Branches => run_crud::<C, Branches>(api, notifier, action).await,
            Entity::Employees => run_crud::<C, Employees>(api, notifier, action).await,
            Entity::Roles => run_crud::<C, Roles>(api, notifier, action).await,
            Entity::LoginStatuses => run_crud::<C, LoginStatuses>(api, notifier, action).await,
            Entity::PriceTypes => run_crud::<C, PriceTypes>(api, notifier, action).await,
        },
        Command::Products { branch } => {
            let workspace = PriceWorkspace::new(api, notifier);
            load_branch(&workspace, &branch, session).await?;
            print_json(&workspace.products().await)
        }
        Command::Prices { action } => {
            let workspace = PriceWorkspace::new(api, notifier);
            match action {
                PriceAction::Show { product_id, branch } => {
                    load_branch(&workspace, &branch, session).await?;
                    workspace.open_product(product_id).await?;
                    print_prices(&workspace).await
                }
                PriceAction::Set {
                    product_id,
                    branch,
                    values,
                    yes,
                } => {
                    load_branch(&workspace, &branch, session).await?;
                    set_prices(&workspace, product_id, &values, yes).await
                }
            }
        }
        Command::Alert {
            product_id,
            quantity,
            branch,
        } => {
            let workspace = PriceWorkspace::new(api, notifier);
            load_branch(&workspace, &branch, session).await?;
            workspace.update_alert_quantity(product_id, quantity).await?;
            Ok(())
        }
        Command::Settings { action } => {
            let page = SettingsPage::new(api, notifier);
            let settings = match action {
                SettingsAction::Show => page.load().await?,
                SettingsAction::Update { json } => {
                    let update: CompanySettingsUpdate =
                        serde_json::from_str(&json).context("invalid settings JSON")?;
                    page.update(&update).await?
                }
            };
            print_json(&settings)
        }
        Command::Login { .. } | Command::Logout | Command::Whoami => Ok(()),
    }
}

async fn load_branch<C: HttpClient>(
    workspace: &PriceWorkspace<C>,
    branch: &BranchArgs,
    session: &Session,
) -> anyhow::Result<()> {
    match branch.choice()? {
        BranchChoice::Filter(filter) => workspace.load(filter).await?,
        BranchChoice::Mine => workspace.load_own_branch(session).await?,
    }
    Ok(())
}

async fn print_prices<C: HttpClient>(workspace: &PriceWorkspace<C>) -> anyhow::Result<()> {
    let types = workspace.price_types().await;
    let buffer = workspace.buffer().await;
    for (key, value) in buffer.iter() {
        let name = types
            .iter()
            .find(|t| t.id == key.price_type_id)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        println!("{:<8} {:<20} {}", key, name, value);
    }
    Ok(())
}

async fn set_prices<C: HttpClient>(
    workspace: &PriceWorkspace<C>,
    product_id: i64,
    values: &[String],
    yes: bool,
) -> anyhow::Result<()> {
    workspace.open_product(product_id).await?;
    workspace.begin_edit().await?;

    let types = workspace.price_types().await;
    for entry in values {
        let (needle, value) = entry
            .split_once('=')
            .with_context(|| format!("expected TYPE=VALUE, got '{}'", entry))?;
        let price_type = resolve_price_type(&types, needle)
            .with_context(|| format!("unknown price type '{}'", needle))?;
        workspace.set_price(price_type.id, value.trim()).await?;
    }

    workspace.request_save().await?;
    print_prices(workspace).await?;
    if !yes {
        workspace.cancel_save().await?;
        workspace.close_dialog().await;
        println!("Not saved; re-run with --yes to confirm");
        return Ok(());
    }

    match workspace.confirm_save().await? {
        SaveStatus::Committed => Ok(()),
        status => bail!("save did not complete: {:?}", status),
    }
}

async fn run_crud<C, R>(api: PosApi<C>, notifier: Notifier, action: CrudAction) -> anyhow::Result<()>
where
    C: HttpClient,
    R: Resource,
    R::Item: Serialize,
    R::Create: DeserializeOwned,
    R::Update: DeserializeOwned,
{
    let console = CrudConsole::<C, R>::new(api, notifier);
    console.refresh().await?;

    match action {
        CrudAction::List => print_json(&console.items().await),
        CrudAction::Create { json } => {
            let create: R::Create = serde_json::from_str(&json)
                .with_context(|| format!("invalid {} JSON", R::LABEL.to_lowercase()))?;
            console.open_create().await?;
            let item = console.submit_create(&create).await?;
            print_json(&item)
        }
        CrudAction::Update { id, json } => {
            let update: R::Update = serde_json::from_str(&json)
                .with_context(|| format!("invalid {} JSON", R::LABEL.to_lowercase()))?;
            console.open_edit(id).await?;
            let item = console.submit_update(&update).await?;
            print_json(&item)
        }
        CrudAction::Delete { id, yes } => {
            console.request_delete(id).await?;
            if !yes {
                console.cancel().await?;
                println!("Not deleted; re-run with --yes to confirm");
                return Ok(());
            }
            console.confirm_delete().await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_set_parses() {
        let cli = Cli::try_parse_from([
            "pos-admin", "prices", "set", "7", "--branch", "Downtown", "--set", "Retail=12.50",
            "--set", "2=9", "--yes",
        ])
        .unwrap();
        match cli.command {
            Command::Prices {
                action: PriceAction::Set {
                    product_id,
                    branch,
                    values,
                    yes,
                },
            } => {
                assert_eq!(product_id, 7);
                assert_eq!(branch.branch.as_deref(), Some("Downtown"));
                assert_eq!(values, vec!["Retail=12.50", "2=9"]);
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_branch_flags_are_exclusive() {
        assert!(
            Cli::try_parse_from(["pos-admin", "products", "--branch", "A", "--branch-id", "2"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["pos-admin", "products"]).unwrap();
        let Command::Products { branch } = cli.command else {
            panic!("expected products command");
        };
        assert!(branch.choice().is_err());
    }

    #[test]
    fn test_crud_entity_names() {
        let cli =
            Cli::try_parse_from(["pos-admin", "crud", "login-statuses", "delete", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Crud {
                entity: Entity::LoginStatuses,
                action: CrudAction::Delete { id: 3, yes: false }
            }
        ));
    }
}
