mod feature;
mod models;

pub use feature::Features;
pub use models::*;
