//! Request handlers

pub mod add;
pub mod backend;
pub mod health;

pub use add::add_router;
pub use backend::backend_router;
pub use health::health_router;
