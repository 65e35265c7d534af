pub mod model;

pub use model::{User, SYSTEM_GENERATED_USER_ID};
