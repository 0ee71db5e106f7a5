//! PNG charts of CPU and disk runs.

use plotters::prelude::*;

use depot::{CpuRun, Cylinder, SeekRun, TaskId};
use crate::utils::{anyhow, Path, Result};

// plotters' error types are generic over the backend; flatten them.
fn drawn<T, E: std::fmt::Debug>(res: std::result::Result<T, E>) -> Result<T> {
    res.map_err(|e| anyhow!("plotting failed: {e:?}"))
}

/// One row per task, one bar per Gantt slice.
pub fn gantt(run: &CpuRun, path: &Path) -> Result<()> {
    let rows: Vec<TaskId> = run.outcomes.iter().map(|o| o.task.id).collect();
    let lanes = rows.len().max(1);
    let horizon = run.metrics.total_time.max(1);
    let height = 120 + 40 * lanes as u32;

    let root = BitMapBackend::new(path, (1280, height)).into_drawing_area();
    drawn(root.fill(&WHITE))?;
    let mut chart = drawn(
        ChartBuilder::on(&root)
            .caption(run.algorithm.to_string(), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(0..horizon, 0..lanes)
    )?;

    let label = |y: &usize| rows.get(*y).map(|id| format!("P{id}")).unwrap_or_default();
    drawn(
        chart.configure_mesh()
            .disable_y_mesh()
            .x_desc("time")
            .y_labels(lanes)
            .y_label_formatter(&label)
            .draw()
    )?;

    drawn(chart.draw_series(run.gantt.iter().map(|s| {
        let lane = rows.iter().position(|&id| id == s.task_id).unwrap_or(0);
        Rectangle::new([(s.start, lane), (s.end, lane + 1)], Palette99::pick(lane).filled())
    })))?;
    drawn(root.present())?;

    Ok(())
}

/// Head position (x) against service step (y).
pub fn seek(run: &SeekRun, disk_size: Cylinder, path: &Path) -> Result<()> {
    let steps = run.sequence.len().max(1);

    let root = BitMapBackend::new(path, (1280, 720)).into_drawing_area();
    drawn(root.fill(&WHITE))?;
    let mut chart = drawn(
        ChartBuilder::on(&root)
            .caption(format!("{} (total seek {})", run.algorithm, run.total_seek), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0..disk_size + 1, 0..steps)
    )?;
    drawn(
        chart.configure_mesh()
            .x_desc("cylinder")
            .y_desc("step")
            .draw()
    )?;

    let points = || run.sequence.iter().enumerate().map(|(step, &c)| (c, step));
    drawn(chart.draw_series(LineSeries::new(points(), &RED)))?;
    drawn(chart.draw_series(points().map(|p| Circle::new(p, 4, RED.filled()))))?;
    drawn(root.present())?;

    Ok(())
}
