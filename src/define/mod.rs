pub(crate) mod combinators;
pub(crate) mod context;
pub(crate) mod json;
pub(crate) mod path;
pub(crate) mod produce;
mod resolve;
pub(crate) mod spec;
