mod accounts;
mod admin;

pub use accounts::AccountsPage;
pub use admin::ClientAccessAdminPage;
