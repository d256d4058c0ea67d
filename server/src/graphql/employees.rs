use async_graphql::{Enum, InputObject, SimpleObject};
use products_hr::{Employee, InitOutcome, PhotoUpload};

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub status: String,
    pub note: String,
    pub photo_url: String,
}

impl From<Employee> for EmployeeNode {
    fn from(value: Employee) -> Self {
        Self {
            emp_id: value.emp_id,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            email: value.email,
            position: value.position,
            status: value.status,
            note: value.note,
            photo_url: value.photo_url,
        }
    }
}

/// Fields left out of the input are stored as empty strings.
#[derive(Clone, Debug, InputObject)]
pub struct EmployeeInput {
    pub emp_id: String,
    #[graphql(default)]
    pub first_name: String,
    #[graphql(default)]
    pub last_name: String,
    #[graphql(default)]
    pub phone: String,
    #[graphql(default)]
    pub email: String,
    #[graphql(default)]
    pub position: String,
    #[graphql(default)]
    pub status: String,
    #[graphql(default)]
    pub note: String,
    #[graphql(default)]
    pub photo_url: String,
}

impl From<EmployeeInput> for Employee {
    fn from(value: EmployeeInput) -> Self {
        Self {
            emp_id: value.emp_id,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            email: value.email,
            position: value.position,
            status: value.status,
            note: value.note,
            photo_url: value.photo_url,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct MessagePayload {
    pub message: String,
}

impl MessagePayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct PhotoPayload {
    pub url: String,
    pub id: String,
}

impl From<PhotoUpload> for PhotoPayload {
    fn from(value: PhotoUpload) -> Self {
        Self {
            url: value.url,
            id: value.id,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum SheetState {
    #[graphql(name = "CREATED")]
    Created,
    #[graphql(name = "MIGRATED")]
    Migrated,
    #[graphql(name = "ALREADY_INITIALIZED")]
    AlreadyInitialized,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct InitializePayload {
    pub state: SheetState,
    pub notice: String,
}

impl From<InitOutcome> for InitializePayload {
    fn from(value: InitOutcome) -> Self {
        let state = match value {
            InitOutcome::Created => SheetState::Created,
            InitOutcome::Migrated { .. } => SheetState::Migrated,
            InitOutcome::AlreadyInitialized => SheetState::AlreadyInitialized,
        };
        Self {
            state,
            notice: value.notice().to_string(),
        }
    }
}
