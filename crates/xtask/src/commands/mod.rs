//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod list;
mod show;

pub use check_content::CheckContent;
pub use list::List;
pub use show::Show;
