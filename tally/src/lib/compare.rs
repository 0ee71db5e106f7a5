//! Runs every algorithm of one family side by side.
//!
//! Each run gets its own engine instance, built from the same
//! workload, so the Next-Fit cursor and the disk head start from
//! their initial values for every algorithm.

use clap::ValueEnum;
use rayon::prelude::*;

use depot::*;
use crate::utils::*;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Family {
    /// CPU scheduling
    Cpu,
    /// Storage (memory) allocation
    Memory,
    /// Disk-head scheduling
    Disk,
}

pub fn cpu(workload: &Workload, quantum: NonZeroUsize) -> Vec<CpuRun> {
    let algorithms = CpuAlgorithm::all(quantum);
    let scheduler = workload.cpu();

    algorithms[..].par_iter()
        .map(|&a| scheduler.run(a))
        .collect()
}

pub fn memory(workload: &Workload) -> Vec<AllocationRun> {
    Fit::ALL[..].par_iter()
        .map(|&fit| workload.memory().allocate(fit))
        .collect()
}

pub fn disk(workload: &Workload, direction: Direction) -> Vec<SeekRun> {
    let algorithms = DiskAlgorithm::all(direction);

    algorithms[..].par_iter()
        .map(|&a| workload.disk().run(a))
        .collect()
}
