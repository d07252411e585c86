mod idm;

pub use idm::{IdmConfig, MEMORY_DB};
