//! Command line front end over the library operations.

pub mod convert;
pub mod setup;
pub mod ui;
