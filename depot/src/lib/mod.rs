//! Welcome to `depot`!
//!
//! `depot` is the engine of the warehouse simulator. A warehouse has
//! workers that handle orders, racks that store them and a forklift
//! that travels between loading docks. Each of these maps onto a
//! classic operating-system problem:
//!
//! | warehouse        | OS problem                      | engine              |
//! |------------------|---------------------------------|---------------------|
//! | orders, workers  | CPU scheduling                  | [`CpuScheduler`]    |
//! | racks            | contiguous memory allocation    | [`MemoryAllocator`] |
//! | forklift, docks  | disk-head seek scheduling       | [`DiskScheduler`]   |
//!
//! All algorithms run *offline*: the complete [`Workload`] is known
//! before anything is scheduled. An engine instance is built from a
//! copy of the workload, one algorithm is invoked on it, and a plain
//! result value ([`CpuRun`], [`AllocationRun`], [`SeekRun`]) comes back
//! for reporting.
//!
//! Two pieces of state deliberately survive between invocations on the
//! same instance: the allocator's Next-Fit cursor and the disk head.

pub mod utils;
pub mod task;
pub mod cpu;
pub mod memory;
pub mod disk;
pub mod workload;

pub use crate::{
    task::{Task, TaskOutcome},
    cpu::{CpuAlgorithm, CpuMetrics, CpuRun, CpuScheduler, GanttSlice},
    memory::{AllocationMetrics, AllocationRun, Fit, MemoryAllocator, Placement, StorageBlock},
    disk::{Direction, DiskAlgorithm, DiskRequest, DiskScheduler, SeekRun},
    workload::{Workload, WorkloadConfig},
    utils::{Cylinder, EngineError, TaskId, Ticks, WorkloadError},
};
