//! Console rendering. Everything here returns a `String`; the caller
//! decides where it goes.

use depot::*;
use crate::utils::*;

const RULE: usize = 60;

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE);

    format!("\n{rule}\n  {title}\n{rule}\n")
}

fn row<I, T>(cells: I) -> String
where I: IntoIterator<Item = T>, T: std::fmt::Display {
    cells.into_iter()
        .map(|c| format!("{:<CELL$}", c.to_string()))
        .join("")
        .trim_end()
        .to_string()
}

fn rule(columns: usize) -> String {
    "-".repeat(columns * CELL)
}

/// A banner followed by `lines`, each newline-terminated.
fn section(title: &str, lines: Vec<String>) -> String {
    lines.into_iter()
        .fold(banner(title), |acc, line| acc + &line + "\n")
}

/// `|P1 [0-5]|P2 [5-8]|...`, one cell per Gantt slice.
pub fn gantt_line(run: &CpuRun) -> String {
    let cells = run.gantt.iter()
        .map(|s| format!("P{} [{}-{}]", s.task_id, s.start, s.end))
        .join("|");

    format!("Gantt Chart: |{cells}|")
}

/// `53 -> 37 -> 98`.
pub fn head_sequence(sequence: &[Cylinder]) -> String {
    sequence.iter().join(" -> ")
}

pub fn cpu_report(run: &CpuRun) -> String {
    let header = ["Order_ID", "Arrival", "Burst", "Priority", "Completion", "Waiting", "Turnaround"];
    let mut lines = vec![row(header), rule(header.len())];
    lines.extend(run.outcomes.iter().map(|o| row([
        format!("P{}", o.task.id),
        o.task.arrival_time.to_string(),
        o.task.burst_time.to_string(),
        o.task.priority.to_string(),
        o.completion_time.to_string(),
        o.waiting_time.to_string(),
        o.turnaround_time.to_string(),
    ])));
    let m = &run.metrics;
    lines.extend([
        String::new(),
        gantt_line(run),
        String::new(),
        format!("Total Time: {} units", m.total_time),
        format!("CPU Utilization: {:.2}%", m.cpu_utilization),
        format!("Avg Waiting Time: {:.2} units", m.avg_waiting),
        format!("Avg Turnaround Time: {:.2} units", m.avg_turnaround),
        format!("Throughput: {:.2} orders/unit", m.throughput),
    ]);

    section(&format!("SCHEDULING RESULTS - {}", run.algorithm), lines)
}

pub fn memory_report(run: &AllocationRun) -> String {
    let header = ["Order_ID", "Order_Size", "Rack_Number"];
    let mut lines = vec![row(header), rule(header.len())];
    lines.extend(run.placements.iter().map(|p| {
        let rack = match p.block_id {
            Some(id)    => { format!("B{id}") },
            None        => { String::from("Not Allocated") },
        };
        row([format!("P{}", p.task.id), p.task.size().to_string(), rack])
    }));
    let m = &run.metrics;
    lines.extend([
        String::new(),
        rule(header.len()),
        String::from("ALLOCATION STATISTICS:"),
        format!("Successfully Allocated: {}/{}", m.allocated, m.tasks),
        format!("Total Space Allocated: {} units", m.space_allocated),
        format!("Total Space Used: {} units", m.space_used),
        format!("Wasted Space: {} units", m.wasted),
        format!("Memory Utilization: {:.2}%", m.utilization),
    ]);

    section(&format!("STORAGE ALLOCATION RESULTS - {}", run.fit), lines)
}

pub fn disk_report(run: &SeekRun) -> String {
    section(&format!("DISK SCHEDULING RESULTS - {}", run.algorithm), vec![
        format!("Head Sequence: {}", head_sequence(&run.sequence)),
        format!("Total Seek Time: {} units", run.total_seek),
        format!("Avg Seek Time: {:.2} units", run.average_seek),
    ])
}

pub fn cpu_summary(runs: &[CpuRun]) -> String {
    let header = ["Algorithm", "Total", "CPU %", "Avg Wait", "Avg TAT", "Throughput"];
    let mut lines = vec![
        format!("{:<28}{}", header[0], row(&header[1..])),
        "-".repeat(28 + (header.len() - 1) * CELL),
    ];
    lines.extend(runs.iter().map(|r| {
        let m = &r.metrics;
        format!("{:<28}{}", r.algorithm.to_string(), row([
            m.total_time.to_string(),
            format!("{:.2}", m.cpu_utilization),
            format!("{:.2}", m.avg_waiting),
            format!("{:.2}", m.avg_turnaround),
            format!("{:.2}", m.throughput),
        ]))
    }));

    section("CPU SCHEDULING COMPARISON", lines)
}

pub fn memory_summary(runs: &[AllocationRun]) -> String {
    let header = ["Strategy", "Allocated", "Space", "Used", "Wasted", "Util %"];
    let mut lines = vec![row(header), rule(header.len())];
    lines.extend(runs.iter().map(|r| {
        let m = &r.metrics;
        row([
            r.fit.to_string(),
            format!("{}/{}", m.allocated, m.tasks),
            m.space_allocated.to_string(),
            m.space_used.to_string(),
            m.wasted.to_string(),
            format!("{:.2}", m.utilization),
        ])
    }));

    section("STORAGE ALLOCATION COMPARISON", lines)
}

pub fn disk_summary(runs: &[SeekRun]) -> String {
    let header = ["Algorithm", "Total Seek", "Avg Seek"];
    let mut lines = vec![row(header), rule(header.len())];
    lines.extend(runs.iter().map(|r| row([
        r.algorithm.to_string(),
        r.total_seek.to_string(),
        format!("{:.2}", r.average_seek),
    ])));

    section("DISK SCHEDULING COMPARISON", lines)
}
