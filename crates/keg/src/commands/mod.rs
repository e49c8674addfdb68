//! Command handlers for the `keg` CLI, one module per subcommand.

pub mod audit;
pub mod completion;
pub mod fetch;
pub mod info;
pub mod init;
pub mod install;
pub mod list;
pub mod verify;
pub mod version;
