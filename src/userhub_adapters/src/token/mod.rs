pub mod jwt_signer;

pub use jwt_signer::{JwtConfig, JwtTokenSigner};
