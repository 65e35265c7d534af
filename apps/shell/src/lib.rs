pub mod error;
pub mod router;

pub use error::ShellError;
pub use router::{Page, Shell};
