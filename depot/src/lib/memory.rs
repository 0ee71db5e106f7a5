use clap::ValueEnum;

use crate::utils::*;
use crate::Task;

/// A rack: one contiguous partition of the warehouse's storage
/// capacity. Racks are carved once per workload and never resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageBlock {
    pub block_id:           u32,
    pub size:               usize,
    pub is_allocated:       bool,
    pub assigned_task_id:   Option<TaskId>,
}

impl StorageBlock {
    pub fn new(block_id: u32, size: usize) -> Self {
        Self {
            block_id,
            size,
            is_allocated:       false,
            assigned_task_id:   None,
        }
    }

    /// Returns `true` if the block is free and big enough.
    #[inline]
    pub fn fits(&self, requirement: usize) -> bool {
        !self.is_allocated && self.size >= requirement
    }

    #[inline]
    fn assign(&mut self, task: TaskId) {
        self.is_allocated = true;
        self.assigned_task_id = Some(task);
    }
}

/// Placement heuristic for choosing which free block takes a task.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug)]
pub enum Fit {
    /// First free block that is big enough
    First,
    /// Free block leaving the least space unused
    Best,
    /// Like first fit, but resume scanning where the last fit was made
    Next,
    /// Free block leaving the most space unused
    Worst,
}

impl Fit {
    pub const ALL: [Fit; 4] = [Fit::First, Fit::Best, Fit::Next, Fit::Worst];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Fit::First  => { "first_fit" },
            Fit::Best   => { "best_fit" },
            Fit::Next   => { "next_fit" },
            Fit::Worst  => { "worst_fit" },
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fit::First  => write!(f, "First Fit"),
            Fit::Best   => write!(f, "Best Fit"),
            Fit::Next   => write!(f, "Next Fit"),
            Fit::Worst  => write!(f, "Worst Fit"),
        }
    }
}

/// Where one task ended up. `block_id` is `None` if no free
/// block could take it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub task:       Task,
    pub block_id:   Option<u32>,
    pub block_size: Option<usize>,
}

impl Placement {
    /// Internal fragmentation of this placement.
    pub fn wasted(&self) -> Option<usize> {
        self.block_size.map(|s| s - self.task.size())
    }

    pub fn is_allocated(&self) -> bool {
        self.block_id.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AllocationMetrics {
    pub allocated:          usize,
    pub tasks:              usize,
    /// Sum of the sizes of all assigned blocks.
    pub space_allocated:    usize,
    /// Sum of the requirements actually placed.
    pub space_used:         usize,
    pub wasted:             usize,
    /// `100 * space_used / capacity`.
    pub utilization:        f64,
}

impl AllocationMetrics {
    fn measure(placements: &[Placement], capacity: usize) -> Self {
        let mut res = Self { tasks: placements.len(), ..Self::default() };
        for p in placements {
            if let Some(size) = p.block_size {
                res.allocated += 1;
                res.space_allocated += size;
                res.space_used += p.task.size();
            }
        }
        res.wasted = res.space_allocated - res.space_used;
        res.utilization = percentage(res.space_used, capacity);

        res
    }
}

/// Everything one allocation strategy produced.
#[derive(Clone, Debug)]
pub struct AllocationRun {
    pub fit:        Fit,
    /// The blocks as the strategy left them.
    pub blocks:     Vec<StorageBlock>,
    /// One entry per task, in input order.
    pub placements: Vec<Placement>,
    pub metrics:    AllocationMetrics,
}

impl AllocationRun {
    pub fn placement_of(&self, id: TaskId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task.id == id)
    }
}

/// Assigns tasks to storage blocks.
///
/// Every call to [`allocate`](MemoryAllocator::allocate) starts from
/// the pristine, all-free block list. The only state carried between
/// calls is the Next-Fit cursor, which keeps rotating across
/// successive [`Fit::Next`] invocations on the same instance.
#[derive(Clone, Debug)]
pub struct MemoryAllocator {
    blocks:         Vec<StorageBlock>,
    tasks:          Vec<Task>,
    capacity:       usize,
    next_fit_index: usize,
}

impl MemoryAllocator {
    pub fn new(blocks: &[StorageBlock], tasks: &[Task], capacity: usize) -> Self {
        Self {
            blocks: blocks.iter()
                .map(|b| StorageBlock::new(b.block_id, b.size))
                .collect(),
            tasks:          tasks.to_vec(),
            capacity,
            next_fit_index: 0,
        }
    }

    /// Index of the block where the next Next-Fit scan starts.
    pub fn next_fit_index(&self) -> usize {
        self.next_fit_index
    }

    pub fn blocks(&self) -> &[StorageBlock] {
        &self.blocks
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// One forward pass over the tasks; each task is placed at most
    /// once and nothing is ever released or moved.
    pub fn allocate(&mut self, fit: Fit) -> AllocationRun {
        let start = Instant::now();
        let mut blocks = self.blocks.clone();
        let mut placements = Vec::with_capacity(self.tasks.len());

        for task in &self.tasks {
            let req = task.size();
            let chosen = match fit {
                Fit::First  => {
                    blocks.iter().position(|b| b.fits(req))
                },
                Fit::Best   => {
                    // `min_by_key` keeps the first of equal minima.
                    blocks.iter()
                        .enumerate()
                        .filter(|(_, b)| b.fits(req))
                        .min_by_key(|(_, b)| b.size - req)
                        .map(|(idx, _)| idx)
                },
                Fit::Worst  => {
                    // `max_by_key` keeps the *last* of equal maxima,
                    // hence the reversed index in the key.
                    blocks.iter()
                        .enumerate()
                        .filter(|(_, b)| b.fits(req))
                        .max_by_key(|(idx, b)| (b.size, Reverse(*idx)))
                        .map(|(idx, _)| idx)
                },
                Fit::Next   => {
                    next_fit(&blocks, &mut self.next_fit_index, req)
                },
            };

            match chosen {
                Some(idx)   => {
                    blocks[idx].assign(task.id);
                    placements.push(Placement {
                        task:       *task,
                        block_id:   Some(blocks[idx].block_id),
                        block_size: Some(blocks[idx].size),
                    });
                },
                None        => {
                    debug!("{fit}: no block fits task {} ({} units)", task.id, req);
                    placements.push(Placement { task: *task, block_id: None, block_size: None });
                }
            }
        }

        let metrics = AllocationMetrics::measure(&placements, self.capacity);
        info!(
            "{fit}: {}/{} tasks placed in {} μs",
            metrics.allocated,
            metrics.tasks,
            start.elapsed().as_micros()
        );

        AllocationRun { fit, blocks, placements, metrics }
    }
}

/// Circular first-fit scan starting at `cursor`. On success the
/// cursor moves to the slot right after the chosen block.
fn next_fit(blocks: &[StorageBlock], cursor: &mut usize, requirement: usize) -> Option<usize> {
    let n = blocks.len();
    let found = (0..n)
        .map(|step| (*cursor + step) % n)
        .find(|&idx| blocks[idx].fits(requirement))?;
    *cursor = (found + 1) % n;

    Some(found)
}
