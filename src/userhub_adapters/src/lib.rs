pub mod config;
pub mod hashing;
pub mod messaging;
pub mod persistence;
pub mod profile;
pub mod token;

// Re-export commonly used adapters for convenience
pub use config::Settings;
pub use hashing::Argon2PasswordHasher;
pub use messaging::{Delivery, InProcessBus, MessageBus, MessageBusError};
pub use persistence::{InMemoryAccountStore, PostgresAccountStore};
pub use profile::{BusProfileClient, MockProfileClient, PROFILE_CREATE};
pub use token::{JwtConfig, JwtTokenSigner};
