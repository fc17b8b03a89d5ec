mod annotation_locator;
mod error;
mod file_patcher;
mod magic_comments;
mod models;
mod options;
mod schema_info;
mod splicer;
mod text_width;

pub use error::*;
pub use file_patcher::*;
pub use models::*;
pub use options::*;
pub use schema_info::*;
pub use splicer::*;
pub use text_width::*;

pub(crate) fn default<T: Default>() -> T {
    T::default()
}
