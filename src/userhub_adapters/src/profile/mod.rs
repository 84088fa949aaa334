pub mod bus_profile_client;
pub mod mock_profile_client;

pub use bus_profile_client::BusProfileClient;
pub use mock_profile_client::MockProfileClient;

/// Pattern the profile service consumes for profile creation.
pub const PROFILE_CREATE: &str = "PROFILE_CREATE";
