//! Interactive layer of fxplore.
//!
//! - [command]: parsing of command lines into [Command] values
//! - [session]: the [Session] loop owning the current directory and filter criteria

pub mod command;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{Flow, Opener, Session, SystemOpener};
