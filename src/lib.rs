pub mod error;

pub mod config;
pub mod federation;
pub mod sts;

pub mod cmd;

#[cfg(test)]
pub(crate) mod dev;
