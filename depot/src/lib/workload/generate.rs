use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::utils::*;
use crate::{DiskRequest, StorageBlock, Task};
use super::{init, Workload, WorkloadConfig};

/// Smallest rack the generator carves, unless racks are capped lower.
const MIN_BLOCK_SIZE: usize = 100;

/// Produces a random [`Workload`] from `config`.
///
/// Tasks, blocks and requests each get their own RNG stream
/// (`seed`, `seed + 1`, `seed + 2`), so changing e.g. the number of
/// requests leaves the generated tasks untouched. The seed actually
/// used is stored in the returned configuration.
pub fn generate(config: &WorkloadConfig) -> Result<Workload, WorkloadError> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    info!("Generating workload with seed {seed}");

    let tasks = gen_tasks(config, seed)?;
    let blocks = gen_blocks(config, seed.wrapping_add(1));
    let requests = gen_requests(config, seed.wrapping_add(2))?;

    init(WorkloadConfig { seed: Some(seed), ..*config }, tasks, blocks, requests)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Arrivals fall in `[0, 2 * max_burst]`; the result is sorted by
/// arrival, IDs reflect generation order.
fn gen_tasks(config: &WorkloadConfig, seed: u64) -> Result<Vec<Task>, WorkloadError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let latest = horizon(config.max_burst, 2)?;

    Ok((1..=config.tasks)
        .map(|id| {
            let arrival_time = rng.gen_range(0..=latest);
            let burst_time = rng.gen_range(1..=config.max_burst);
            let priority = rng.gen_range(1..=config.max_priority);

            Task::new(id as TaskId, arrival_time, burst_time, priority)
        })
        .sorted_by_key(|t| t.arrival_time)
        .collect())
}

/// `max_burst * factor`, or a configuration error if that overflows.
fn horizon(max_burst: Ticks, factor: usize) -> Result<Ticks, WorkloadError> {
    max_burst.checked_mul(factor)
        .ok_or_else(|| WorkloadError::Config(format!("max_burst {max_burst} is too large")))
}

/// Carves the warehouse capacity into consecutive racks. The last
/// rack is clipped so that the partition is exact.
fn gen_blocks(config: &WorkloadConfig, seed: u64) -> Vec<StorageBlock> {
    let mut rng = StdRng::seed_from_u64(seed);
    let low = MIN_BLOCK_SIZE.min(config.max_block_size);
    let mut res = vec![];
    let mut offset = 0;
    let mut next_id = 1;

    while offset < config.warehouse_size {
        let size = rng.gen_range(low..=config.max_block_size)
            .min(config.warehouse_size - offset);
        res.push(StorageBlock::new(next_id, size));
        offset += size;
        next_id += 1;
    }

    res
}

fn gen_requests(config: &WorkloadConfig, seed: u64) -> Result<Vec<DiskRequest>, WorkloadError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let latest = horizon(config.max_burst, config.tasks)? / 2;

    Ok((1..=config.requests)
        .map(|id| {
            let cylinder = rng.gen_range(0..=config.disk_size);
            let arrival_time = rng.gen_range(0..=latest);

            DiskRequest::new(id as u32, cylinder, arrival_time)
        })
        .collect())
}
