//! Command implementations.

pub mod batch;
pub mod config;
pub mod features;
pub mod value;

pub use self::batch::execute_batch;
pub use self::config::execute_config;
pub use self::features::execute_features;
pub use self::value::execute_value;
