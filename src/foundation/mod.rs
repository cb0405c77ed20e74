pub(crate) mod error;
pub(crate) mod rng;
pub(crate) mod value;
