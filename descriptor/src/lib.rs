mod document;
mod error;
mod output;
mod path;
mod rewrite;

pub use document::*;
pub use error::*;
pub use output::*;
pub use path::*;
pub use rewrite::*;
