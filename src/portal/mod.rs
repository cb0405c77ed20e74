pub(crate) mod assignment;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod submission;
pub(crate) mod toolchain;
