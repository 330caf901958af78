//! Configuration for providers and generation parameters

pub mod params;
pub mod provider;

pub use params::GenerationParams;
pub use provider::{ProviderConfig, TimeoutConfig};

use std::sync::Once;

static ENV_INIT: Once = Once::new();

/// Load environment variables from a `.env` file, once per process.
///
/// Missing `.env` files are fine; process environment always wins over
/// file contents. Safe to call from multiple entry points.
pub fn load_env() {
    ENV_INIT.call_once(|| {
        dotenv::dotenv().ok();
    });
}
