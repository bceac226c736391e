//! REST resource schemas
//!
//! Each CRUD-managed entity is described once by a [`Resource`]: its
//! collection path, wire types and the client-side checks applied before a
//! write is sent.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::AppError;
use shared::models::{
    Branch, BranchCreate, BranchUpdate, Employee, EmployeeCreate, EmployeeUpdate, LoginStatus,
    LoginStatusCreate, LoginStatusUpdate, MAIN_STORE_NAME, PriceType, PriceTypeCreate,
    PriceTypeUpdate, Role, RoleCreate, RoleUpdate,
};

/// Schema of a CRUD resource
pub trait Resource: Send + Sync + 'static {
    /// Collection path relative to the API base (e.g. "branches")
    const PATH: &'static str;
    /// Singular label used in messages
    const LABEL: &'static str;

    type Item: DeserializeOwned + Clone + Send + Sync + 'static;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    fn id(item: &Self::Item) -> i64;
    fn display_name(item: &Self::Item) -> &str;

    fn validate_create(_create: &Self::Create) -> Result<(), AppError> {
        Ok(())
    }

    fn guard_update(_current: &Self::Item, _update: &Self::Update) -> Result<(), AppError> {
        Ok(())
    }

    fn guard_delete(_current: &Self::Item) -> Result<(), AppError> {
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    Ok(())
}

fn require_if_set(field: &str, value: Option<&String>) -> Result<(), AppError> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

pub struct Branches;

impl Resource for Branches {
    const PATH: &'static str = "branches";
    const LABEL: &'static str = "Branch";
    type Item = Branch;
    type Create = BranchCreate;
    type Update = BranchUpdate;

    fn id(item: &Branch) -> i64 {
        item.id
    }

    fn display_name(item: &Branch) -> &str {
        &item.name
    }

    fn validate_create(create: &BranchCreate) -> Result<(), AppError> {
        require("name", &create.name)
    }

    fn guard_update(current: &Branch, update: &BranchUpdate) -> Result<(), AppError> {
        require_if_set("name", update.name.as_ref())?;
        match &update.name {
            Some(name) if current.is_main_store() && name != MAIN_STORE_NAME => {
                Err(AppError::main_store_protected())
            }
            _ => Ok(()),
        }
    }

    fn guard_delete(current: &Branch) -> Result<(), AppError> {
        if current.is_main_store() {
            return Err(AppError::main_store_protected());
        }
        Ok(())
    }
}

pub struct Employees;

impl Resource for Employees {
    const PATH: &'static str = "employees";
    const LABEL: &'static str = "Employee";
    type Item = Employee;
    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;

    fn id(item: &Employee) -> i64 {
        item.id
    }

    fn display_name(item: &Employee) -> &str {
        &item.name
    }

    fn validate_create(create: &EmployeeCreate) -> Result<(), AppError> {
        require("name", &create.name)?;
        require("username", &create.username)?;
        require("password", &create.password)
    }

    fn guard_update(_current: &Employee, update: &EmployeeUpdate) -> Result<(), AppError> {
        require_if_set("name", update.name.as_ref())?;
        require_if_set("username", update.username.as_ref())
    }
}

pub struct Roles;

impl Resource for Roles {
    const PATH: &'static str = "roles";
    const LABEL: &'static str = "Role";
    type Item = Role;
    type Create = RoleCreate;
    type Update = RoleUpdate;

    fn id(item: &Role) -> i64 {
        item.id
    }

    fn display_name(item: &Role) -> &str {
        &item.name
    }

    fn validate_create(create: &RoleCreate) -> Result<(), AppError> {
        require("name", &create.name)
    }

    fn guard_update(_current: &Role, update: &RoleUpdate) -> Result<(), AppError> {
        require_if_set("name", update.name.as_ref())
    }
}

pub struct LoginStatuses;

impl Resource for LoginStatuses {
    const PATH: &'static str = "login-statuses";
    const LABEL: &'static str = "Login status";
    type Item = LoginStatus;
    type Create = LoginStatusCreate;
    type Update = LoginStatusUpdate;

    fn id(item: &LoginStatus) -> i64 {
        item.id
    }

    fn display_name(item: &LoginStatus) -> &str {
        &item.name
    }

    fn validate_create(create: &LoginStatusCreate) -> Result<(), AppError> {
        require("name", &create.name)
    }

    fn guard_update(_current: &LoginStatus, update: &LoginStatusUpdate) -> Result<(), AppError> {
        require_if_set("name", update.name.as_ref())
    }
}

pub struct PriceTypes;

impl Resource for PriceTypes {
    const PATH: &'static str = "price-types";
    const LABEL: &'static str = "Price type";
    type Item = PriceType;
    type Create = PriceTypeCreate;
    type Update = PriceTypeUpdate;

    fn id(item: &PriceType) -> i64 {
        item.id
    }

    fn display_name(item: &PriceType) -> &str {
        &item.name
    }

    fn validate_create(create: &PriceTypeCreate) -> Result<(), AppError> {
        require("name", &create.name)
    }

    fn guard_update(_current: &PriceType, update: &PriceTypeUpdate) -> Result<(), AppError> {
        require_if_set("name", update.name.as_ref())
    }
}
