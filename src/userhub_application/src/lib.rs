pub mod use_cases;

pub use use_cases::{
    create_account::{CreateAccountError, CreateAccountUseCase, NewAccountData},
    federated_login::{FederatedLoginError, FederatedLoginUseCase},
    get_account::{GetAccountError, GetAccountUseCase},
    link_profile::{LinkProfileError, LinkProfileUseCase},
    login::{LoginError, LoginUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    verify_credentials::{VerifyCredentialsError, VerifyCredentialsUseCase},
};
