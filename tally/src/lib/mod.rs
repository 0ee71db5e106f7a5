//! `tally` turns [`depot`] runs into something people can read:
//! console tables, CSV and JSON files, PNG charts and side-by-side
//! comparisons. It also hosts the `warehouse` binary.
//!
//! A [`Session`] owns one loaded workload for its whole lifetime,
//! which is what makes stateful engines (the Next-Fit cursor, the
//! disk head) behave the same from the menu as from a script.

pub mod utils;
pub mod table;
pub mod csv;
pub mod export;
pub mod plot;
pub mod compare;
pub mod session;
pub mod menu;

pub use crate::{
    compare::Family,
    session::{Options, Session},
};
