pub mod settings;

pub use settings::{BusSettings, JwtSettings, PostgresSettings, Settings};
