mod admin_guard;
mod credentials;
mod session;

pub use admin_guard::Administrator;
pub use credentials::Credentials;
pub use session::{AdminCredentials, AdminIdentity};
