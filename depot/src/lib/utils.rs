pub use std::{
    cmp::Reverse,
    collections::VecDeque,
    fmt,
    hash::BuildHasherDefault,
    io::{BufRead, BufReader, BufWriter, Write},
    fs::File,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use log::{debug, info};

use ahash::AHasher;
use indexmap::IndexMap;

use crate::{DiskRequest, StorageBlock, Task};

/// The unit of simulated time. One tick is the smallest amount of
/// service a preemptive scheduler hands out.
pub type Ticks = usize;

/// A position on the disk (a loading dock, in warehouse lingo).
pub type Cylinder = usize;

/// Orders, racks and truck requests are all identified by
/// small positive integers, starting from 1.
pub type TaskId = u32;

/// Insertion-ordered map keyed by record ID. Used wherever we need
/// to look something up by ID but still care about input order.
pub type Registry<V> = IndexMap<u32, V, BuildHasherDefault<AHasher>>;

/// Arithmetic mean which reports 0 for empty inputs.
#[inline]
pub fn mean(total: usize, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}

/// `100 * part / whole`, guarded against an empty `whole`.
#[inline]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 * 100.0 / whole as f64 }
}

/// Appears while reading, generating or validating a [`crate::Workload`].
///
/// Validation failures carry the offending record, in the same
/// spirit as a gatekeeper that refuses to let bad input reach the
/// algorithms.
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("workload I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse {
        line:       usize,
        message:    String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{message}\n{:?}", culprit)]
    Task {
        message:    String,
        culprit:    Task,
    },
    #[error("{message}\n{:?}", culprit)]
    Block {
        message:    String,
        culprit:    StorageBlock,
    },
    #[error("{message}\n{:?}", culprit)]
    Request {
        message:    String,
        culprit:    DiskRequest,
    },
    #[error("storage blocks cover {covered} units, warehouse capacity is {expected}")]
    Capacity {
        covered:    usize,
        expected:   usize,
    },
}

/// Appears when an algorithm is asked for with unusable parameters.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Round Robin needs a positive time quantum")]
    ZeroQuantum,
}
