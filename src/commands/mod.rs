mod common;
mod format;
mod init;
mod show;
mod validate;

pub use format::{FormatArgs, format_snapshots};
pub use init::{InitArgs, init_config};
pub use show::{ShowArgs, show_snapshots};
pub use validate::{ValidateArgs, validate_config};
