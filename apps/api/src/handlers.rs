pub mod health;
pub mod rbac;
pub mod session;
