//! Command implementations

mod catalog;
mod convert;
mod links;
mod sync;

pub use catalog::run_update_catalog;
pub use convert::run_convert_roles;
pub use links::run_check_links;
pub use sync::run_sync;
