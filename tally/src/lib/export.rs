//! JSON dumps of algorithm runs.
//!
//! The engine types stay serialization-agnostic; the structs below
//! are flat mirrors of them, built with `From`.

use serde::{Deserialize, Serialize};

use depot::*;
use crate::utils::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TaskRow {
    pub id:                 TaskId,
    pub arrival_time:       Ticks,
    pub burst_time:         Ticks,
    pub priority:           u32,
    pub completion_time:    Ticks,
    pub waiting_time:       Ticks,
    pub turnaround_time:    Ticks,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SliceRow {
    pub task_id:    TaskId,
    pub start:      Ticks,
    pub end:        Ticks,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CpuReport {
    pub algorithm:          String,
    pub tasks:              Vec<TaskRow>,
    pub gantt:              Vec<SliceRow>,
    pub total_time:         Ticks,
    pub cpu_utilization:    f64,
    pub avg_waiting:        f64,
    pub avg_turnaround:     f64,
    pub throughput:         f64,
}

impl From<&CpuRun> for CpuReport {
    fn from(run: &CpuRun) -> Self {
        Self {
            algorithm:  run.algorithm.to_string(),
            tasks:      run.outcomes.iter()
                .map(|o| TaskRow {
                    id:                 o.task.id,
                    arrival_time:       o.task.arrival_time,
                    burst_time:         o.task.burst_time,
                    priority:           o.task.priority,
                    completion_time:    o.completion_time,
                    waiting_time:       o.waiting_time,
                    turnaround_time:    o.turnaround_time,
                })
                .collect(),
            gantt:      run.gantt.iter()
                .map(|s| SliceRow { task_id: s.task_id, start: s.start, end: s.end })
                .collect(),
            total_time:         run.metrics.total_time,
            cpu_utilization:    run.metrics.cpu_utilization,
            avg_waiting:        run.metrics.avg_waiting,
            avg_turnaround:     run.metrics.avg_turnaround,
            throughput:         run.metrics.throughput,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct PlacementRow {
    pub task_id:    TaskId,
    pub size:       usize,
    /// `None` for tasks no block could take.
    pub block_id:   Option<u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MemoryReport {
    pub strategy:           String,
    pub placements:         Vec<PlacementRow>,
    pub allocated:          usize,
    pub tasks:              usize,
    pub space_allocated:    usize,
    pub space_used:         usize,
    pub wasted:             usize,
    pub utilization:        f64,
}

impl From<&AllocationRun> for MemoryReport {
    fn from(run: &AllocationRun) -> Self {
        let m = &run.metrics;

        Self {
            strategy:   run.fit.to_string(),
            placements: run.placements.iter()
                .map(|p| PlacementRow { task_id: p.task.id, size: p.task.size(), block_id: p.block_id })
                .collect(),
            allocated:          m.allocated,
            tasks:              m.tasks,
            space_allocated:    m.space_allocated,
            space_used:         m.space_used,
            wasted:             m.wasted,
            utilization:        m.utilization,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DiskReport {
    pub algorithm:      String,
    pub sequence:       Vec<Cylinder>,
    pub total_seek:     usize,
    pub average_seek:   f64,
    pub requests:       usize,
}

impl From<&SeekRun> for DiskReport {
    fn from(run: &SeekRun) -> Self {
        Self {
            algorithm:      run.algorithm.to_string(),
            sequence:       run.sequence.clone(),
            total_seek:     run.total_seek,
            average_seek:   run.average_seek,
            requests:       run.requests,
        }
    }
}

/// Pretty-prints `report` into `path`.
pub fn write_json<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let mut w = create(path)?;
    serde_json::to_writer_pretty(&mut w, report)
        .with_context(|| format!("cannot serialize into {}", path.display()))?;
    w.flush()?;

    Ok(())
}
