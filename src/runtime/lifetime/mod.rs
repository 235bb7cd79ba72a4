pub mod readiness;
#[cfg(feature = "server")]
pub mod shutdown;
pub mod startup;

pub use readiness::Readiness;
