//! Detyra produces per-student programming assignments from declarative definitions.
//!
//! A definition is a tree of [`Spec`]s: plain values, arrays and objects, plus combinators
//! that draw random numbers, read other fields by path, or compute text. Producing a
//! definition with a base seed yields a concrete [`Value`]; the same seed always yields
//! the same value, and every node draws from its own generator so editing one part of a
//! definition leaves the others untouched.
//!
//! - Author definitions in Rust with the combinators, or in JSON via [`spec_from_str`]
//! - Produce them with [`Producer`] or [`produce`]
//! - The portal layer ([`produce_assignment`], [`check_submission`],
//!   [`archive_submission`]) wires production to student ids and a C++ [`Toolchain`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod define;
mod foundation;
mod portal;

pub use crate::foundation::error::{DefineError, DefineResult};
pub use crate::foundation::rng::{HashSeeder, RandomSource, Rng64, Seeder};
pub use crate::foundation::value::{Fields, Value};

pub use crate::define::combinators::{
    Scrutinee, TextArg, bind, bind2, bind3, concat, env, get, map, map2, map3, map4, map5,
    match_on, pick, random, random_int, shuffle, text, val,
};
pub use crate::define::context::Ctx;
pub use crate::define::json::{spec_from_json, spec_from_path, spec_from_str};
pub use crate::define::produce::{Env, Producer, produce};
pub use crate::define::spec::{Spec, Thunk};

pub use crate::portal::assignment::{Assignment, AssignmentSpec, produce_assignment};
pub use crate::portal::catalog::first_assignment;
pub use crate::portal::config::{DEFAULT_SECRET, PortalConfig};
pub use crate::portal::submission::{
    ArchiveEntry, ArchivedSubmission, CheckReport, Clock, OUTPUT_LIMIT, archive_submission,
    check_submission, format_archive, inject_echo_prelude, normalize_output, run_submission,
    sanitize_file_name,
};
pub use crate::portal::toolchain::{CheckStatus, ExecutionResult, Toolchain, TypeCheckResult};
