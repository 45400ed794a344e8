//! Access Roles

use serde::{Deserialize, Serialize};

/// Who is operating the till
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Staff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Checkout,
    ManageProducts,
    ManageCustomers,
    ManageSuppliers,
    ManageDebt,
    ManageSettings,
    ViewTransactions,
}

impl Role {
    pub const fn key(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Staff => "staff",
        }
    }

    /// Owner can do everything; staff runs the till
    pub fn can(&self, permission: Permission) -> bool {
        match self {
            Role::Owner => true,
            Role::Staff => matches!(
                permission,
                Permission::Checkout
                    | Permission::ManageCustomers
                    | Permission::ManageDebt
                    | Permission::ViewTransactions
            ),
        }
    }
}
