pub mod post;
pub mod query;

pub use post::{create_fixed, create_page};
pub use query::{home, show};
