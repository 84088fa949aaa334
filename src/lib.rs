//! # Userhub - User Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the user
//! account service components. Use this crate to get access to the whole
//! account lifecycle in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! userhub = { path = "../userhub" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `Account`, etc.
//! - **Port traits**: `AccountStore`, `PasswordHasher`, `TokenSigner`, `ProfileClient`
//! - **Use cases**: `CreateAccountUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `Argon2PasswordHasher`, `JwtTokenSigner`, `InProcessBus`, etc.
//! - **Service**: `AccountService` plus the `Dispatcher` that consumes the bus patterns

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use userhub_core::*;
}

// Re-export most commonly used core types at the root level
pub use userhub_core::{
    Account, AccountId, DomainError, Email, NewAccount, Password, PasswordDigest, ProfileId,
    ResetToken, TokenClaims, Username,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use userhub_core::{
        AccountStore, AccountStoreError, CredentialError, PasswordHasher, ProfileClient,
        ProfileClientError, ProfileDraft, ProfileRecord, TokenSignError, TokenSigner,
    };
}

// Re-export port traits at root level
pub use userhub_core::{
    AccountStore, AccountStoreError, CredentialError, PasswordHasher, ProfileClient,
    ProfileClientError, ProfileDraft, ProfileRecord, TokenSignError, TokenSigner,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use userhub_application::*;
}

pub use userhub_application::{
    CreateAccountUseCase, FederatedLoginUseCase, GetAccountUseCase, LinkProfileUseCase,
    LoginUseCase, NewAccountData, RequestPasswordResetUseCase, ResetPasswordUseCase,
    VerifyCredentialsUseCase,
};

// ============================================================================
// Adapters
// ============================================================================

/// Concrete adapter implementations
pub mod adapters {
    pub use userhub_adapters::*;
}

pub use userhub_adapters::{
    Argon2PasswordHasher, BusProfileClient, Delivery, InMemoryAccountStore, InProcessBus,
    JwtConfig, JwtTokenSigner, MessageBus, MessageBusError, MockProfileClient,
    PostgresAccountStore, Settings,
};

// ============================================================================
// Service Layer
// ============================================================================

/// Service wiring: the lifecycle facade and the pattern dispatcher
pub mod service {
    pub use userhub_service::*;
}

pub use userhub_service::{
    AccountService, AccountView, Dispatcher, Envelope, Pattern, ServiceError, configure_postgres,
    get_postgres_pool, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use serde_json;
pub use tokio;
