//! Workloads: the fixed input every algorithm is run against.
//!
//! A [`Workload`] is produced either by the seeded random
//! [`generate`] or by reading a previously saved file with
//! [`load`]. Both go through [`init`], which is the
//! gatekeeper to the rest of the library.

mod generate;
mod io;

pub use self::generate::generate;
pub use self::io::{load, read_from, save, write_to, DEFAULT_PATH};

use clap::Args;

use crate::utils::*;
use crate::{CpuScheduler, DiskRequest, DiskScheduler, MemoryAllocator, StorageBlock, Task};

/// Knobs of the workload generator. The ten numeric fields are also
/// the header of a saved workload file, in declaration order.
#[derive(Args, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Number of orders (processes), at most 500
    #[arg(long, default_value_t = 10)]
    pub tasks:          usize,
    /// Max order completion time (burst)
    #[arg(long, default_value_t = 10)]
    pub max_burst:      Ticks,
    /// Max priority level, at most 10
    #[arg(long, default_value_t = 5)]
    pub max_priority:   u32,
    /// Total warehouse rack space, at most 1000000
    #[arg(long, default_value_t = 2000)]
    pub warehouse_size: usize,
    /// Max individual rack size
    #[arg(long, default_value_t = 500)]
    pub max_block_size: usize,
    /// Max order size
    #[arg(long, default_value_t = 400)]
    pub max_task_size:  usize,
    /// Number of truck (disk) requests, at most 10000
    #[arg(long, default_value_t = 8)]
    pub requests:       usize,
    /// Highest dock (cylinder) number
    #[arg(long, default_value_t = 199)]
    pub disk_size:      Cylinder,
    /// Initial forklift (head) position
    #[arg(long, default_value_t = 50)]
    pub head_position:  Cylinder,
    /// Stock buffer capacity
    #[arg(long, default_value_t = 5)]
    pub buffer_size:    usize,
    /// Seed for the generator; clock-based if omitted
    #[arg(long)]
    pub seed:           Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            tasks:          10,
            max_burst:      10,
            max_priority:   5,
            warehouse_size: 2000,
            max_block_size: 500,
            max_task_size:  400,
            requests:       8,
            disk_size:      199,
            head_position:  50,
            buffer_size:    5,
            seed:           None,
        }
    }
}

pub(crate) const HEADER_LEN: usize = 10;

impl WorkloadConfig {
    pub const MAX_TASKS:    usize = 500;
    pub const MAX_PRIORITY: u32 = 10;
    /// Ceiling of every other numeric knob.
    pub const MAX_VALUE:    usize = i32::MAX as usize;
    /// The generator carves and stores every rack, so capacity and
    /// request count are held well below [`Self::MAX_VALUE`].
    pub const MAX_CAPACITY: usize = 1_000_000;
    pub const MAX_REQUESTS: usize = 10_000;

    pub fn validate(&self) -> Result<(), WorkloadError> {
        let positive = [
            ("tasks", self.tasks),
            ("max_burst", self.max_burst),
            ("max_priority", self.max_priority as usize),
            ("warehouse_size", self.warehouse_size),
            ("max_block_size", self.max_block_size),
            ("max_task_size", self.max_task_size),
            ("requests", self.requests),
            ("disk_size", self.disk_size),
            ("buffer_size", self.buffer_size),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(WorkloadError::Config(format!("{name} must be positive")));
        }
        if self.tasks > Self::MAX_TASKS {
            return Err(WorkloadError::Config(format!("at most {} tasks allowed", Self::MAX_TASKS)));
        }
        if self.max_priority > Self::MAX_PRIORITY {
            return Err(WorkloadError::Config(format!("max_priority must lie in 1..={}", Self::MAX_PRIORITY)));
        }
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v > Self::MAX_VALUE) {
            return Err(WorkloadError::Config(format!("{name} must not exceed {}", Self::MAX_VALUE)));
        }
        if self.warehouse_size > Self::MAX_CAPACITY {
            return Err(WorkloadError::Config(format!("warehouse_size must not exceed {}", Self::MAX_CAPACITY)));
        }
        if self.requests > Self::MAX_REQUESTS {
            return Err(WorkloadError::Config(format!("at most {} requests allowed", Self::MAX_REQUESTS)));
        }
        if self.head_position > self.disk_size {
            return Err(WorkloadError::Config(format!(
                "head position {} lies beyond the last cylinder {}",
                self.head_position,
                self.disk_size
            )));
        }

        Ok(())
    }

    pub(crate) fn header(&self) -> [usize; HEADER_LEN] {
        [
            self.tasks,
            self.max_burst,
            self.max_priority as usize,
            self.warehouse_size,
            self.max_block_size,
            self.max_task_size,
            self.requests,
            self.disk_size,
            self.head_position,
            self.buffer_size,
        ]
    }

    pub(crate) fn from_header(h: [usize; HEADER_LEN]) -> Result<Self, WorkloadError> {
        let max_priority = u32::try_from(h[2])
            .map_err(|_| WorkloadError::Config(format!("max_priority {} out of range", h[2])))?;

        Ok(Self {
            tasks:          h[0],
            max_burst:      h[1],
            max_priority,
            warehouse_size: h[3],
            max_block_size: h[4],
            max_task_size:  h[5],
            requests:       h[6],
            disk_size:      h[7],
            head_position:  h[8],
            buffer_size:    h[9],
            seed:           None,
        })
    }
}

/// Tasks, racks and truck requests, plus the configuration that
/// produced them. Engines never borrow a workload; they copy what
/// they need (see [`Workload::cpu`] and friends).
#[derive(Clone, Debug)]
pub struct Workload {
    pub config:     WorkloadConfig,
    pub tasks:      Vec<Task>,
    pub blocks:     Vec<StorageBlock>,
    pub requests:   Vec<DiskRequest>,
}

impl Workload {
    pub fn cpu(&self) -> CpuScheduler {
        CpuScheduler::new(&self.tasks)
    }

    pub fn memory(&self) -> MemoryAllocator {
        MemoryAllocator::new(&self.blocks, &self.tasks, self.config.warehouse_size)
    }

    pub fn disk(&self) -> DiskScheduler {
        DiskScheduler::new(&self.requests, self.config.head_position, self.config.disk_size)
    }
}

/// Assembles a [`Workload`] out of its parts. A successfully returned
/// workload is guaranteed to satisfy every assumption the engines make:
/// - the configuration is valid
/// - record counts agree with the configuration
/// - IDs are unique within each record kind
/// - every task has a positive burst and a priority in `1..=max_priority`
/// - every block has a positive size and the blocks exactly cover
///   the warehouse capacity
/// - every request targets a cylinder in `0..=disk_size`
pub fn init(
    config:     WorkloadConfig,
    tasks:      Vec<Task>,
    blocks:     Vec<StorageBlock>,
    requests:   Vec<DiskRequest>,
) -> Result<Workload, WorkloadError> {
    config.validate()?;
    if tasks.len() != config.tasks || requests.len() != config.requests {
        return Err(WorkloadError::Config(format!(
            "expected {} tasks and {} requests, found {} and {}",
            config.tasks,
            config.requests,
            tasks.len(),
            requests.len()
        )));
    }

    let mut seen: Registry<()> = Registry::default();
    for t in &tasks {
        let message = if t.burst_time == 0 {
            "Task with 0 burst found!"
        } else if t.priority == 0 || t.priority > config.max_priority {
            "Task with out-of-range priority found!"
        } else if seen.insert(t.id, ()).is_some() {
            "Duplicate task ID found!"
        } else { continue; };

        return Err(WorkloadError::Task { message: message.into(), culprit: *t });
    }

    seen.clear();
    for b in &blocks {
        let message = if b.size == 0 {
            "Block with 0 size found!"
        } else if seen.insert(b.block_id, ()).is_some() {
            "Duplicate block ID found!"
        } else { continue; };

        return Err(WorkloadError::Block { message: message.into(), culprit: *b });
    }
    let covered: usize = blocks.iter().map(|b| b.size).sum();
    if covered != config.warehouse_size {
        return Err(WorkloadError::Capacity { covered, expected: config.warehouse_size });
    }

    seen.clear();
    for r in &requests {
        let message = if r.cylinder > config.disk_size {
            "Request beyond the last cylinder found!"
        } else if seen.insert(r.request_id, ()).is_some() {
            "Duplicate request ID found!"
        } else { continue; };

        return Err(WorkloadError::Request { message: message.into(), culprit: *r });
    }

    Ok(Workload { config, tasks, blocks, requests })
}
