pub mod contracts;
pub mod dispatcher;
pub mod error;
pub mod helpers;
pub mod service;
pub mod telemetry;

pub use contracts::{AccountView, Envelope};
pub use dispatcher::{Dispatcher, Pattern};
pub use error::ServiceError;
pub use helpers::{configure_postgres, get_postgres_pool};
pub use service::AccountService;
pub use telemetry::init_tracing;
