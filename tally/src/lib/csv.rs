//! Result files under the output directory, one per algorithm run.
//! A later run of the same algorithm overwrites the earlier file.

use depot::*;
use crate::{table, utils::*};

/// Per-task timeline followed by the Gantt row.
pub fn write_cpu(dir: &Path, run: &CpuRun) -> Result<PathBuf> {
    let path = artifact(dir, run.algorithm.file_stem(), "cpu", "csv");
    let mut w = create(&path)?;
    writeln!(w, "Order_ID,Arrival_Time,Burst_Time,Priority,Completion_Time,Waiting_Time,Turnaround_Time")?;
    for o in &run.outcomes {
        writeln!(
            w,
            "{},{},{},{},{},{},{}",
            o.task.id,
            o.task.arrival_time,
            o.task.burst_time,
            o.task.priority,
            o.completion_time,
            o.waiting_time,
            o.turnaround_time
        )?;
    }
    writeln!(w, "{}", table::gantt_line(run))?;
    w.flush()?;

    Ok(path)
}

/// Placement table followed by the statistics rows.
pub fn write_memory(dir: &Path, run: &AllocationRun) -> Result<PathBuf> {
    let path = artifact(dir, run.fit.file_stem(), "memory", "csv");
    let mut w = create(&path)?;
    writeln!(w, "Order_ID,Order_Size,Rack_Number")?;
    for p in &run.placements {
        match p.block_id {
            Some(id)    => { writeln!(w, "{},{},{}", p.task.id, p.task.size(), id)?; },
            None        => { writeln!(w, "{},{},Not Allocated", p.task.id, p.task.size())?; },
        }
    }
    let m = &run.metrics;
    writeln!(w)?;
    writeln!(w, "Successfully Allocated,{},{}", m.allocated, m.tasks)?;
    writeln!(w, "Total Space Allocated,{}", m.space_allocated)?;
    writeln!(w, "Total Space Used,{}", m.space_used)?;
    writeln!(w, "Wasted Space,{}", m.wasted)?;
    writeln!(w, "Memory Utilization,{:.2}", m.utilization)?;
    w.flush()?;

    Ok(path)
}

/// The served requests, a blank row, then the head sequence and
/// seek figures.
pub fn write_disk(dir: &Path, run: &SeekRun, requests: &[DiskRequest]) -> Result<PathBuf> {
    let path = artifact(dir, run.algorithm.file_stem(), "disk", "csv");
    let mut w = create(&path)?;
    writeln!(w, "Truck_Request_ID,Dock_Cylinder,Arrival_Time")?;
    for r in requests {
        writeln!(w, "{},{},{}", r.request_id, r.cylinder, r.arrival_time)?;
    }
    writeln!(w)?;
    writeln!(w, "Head Sequence:")?;
    writeln!(w, "{}", table::head_sequence(&run.sequence))?;
    writeln!(w, "Total Seek Time,{}", run.total_seek)?;
    writeln!(w, "Avg Seek Time,{:.2}", run.average_seek)?;
    w.flush()?;

    Ok(path)
}
