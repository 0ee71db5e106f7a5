use std::{fs, io::Cursor, num::NonZeroUsize, path::PathBuf};

use depot::*;
use tally::{compare, export::CpuReport, menu, table, Family, Options, Session};

fn get_crate_root() -> Result<PathBuf, std::env::VarError> {
    Ok(PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?))
}

fn small_depot() -> Workload {
    let mut path = get_crate_root().unwrap();
    path.push("../depot/tests/data/small_depot.txt");

    workload::load(&path).unwrap()
}

/// A fresh, empty directory under the system temp dir.
fn scratch(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("tally-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    dir
}

fn session(name: &str, json: bool) -> (Session, PathBuf) {
    let output = scratch(name);
    let options = Options { output: output.clone(), json, plot: false };

    (Session::new(small_depot(), options), output)
}

fn lines_of(path: PathBuf) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(String::from).collect()
}

#[test]
fn cpu_run_writes_csv_and_json() {
    let (session, output) = session("cpu", true);
    let mut console = Vec::new();
    let run = session.cpu(CpuAlgorithm::Fcfs, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("SCHEDULING RESULTS - FCFS"));
    assert!(console.contains("CPU Utilization: 100.00%"));

    let csv = lines_of(output.join("fcfs_cpu_results.csv"));
    assert_eq!(csv[0], "Order_ID,Arrival_Time,Burst_Time,Priority,Completion_Time,Waiting_Time,Turnaround_Time");
    assert_eq!(csv[2], "2,1,3,4,8,4,7");
    assert_eq!(csv.len(), run.outcomes.len() + 2);
    assert_eq!(csv[6], "Gantt Chart: |P1 [0-5]|P2 [5-8]|P3 [8-16]|P4 [16-22]|P5 [22-24]|");

    let fd = fs::File::open(output.join("fcfs_cpu_results.json")).unwrap();
    let report: CpuReport = serde_json::from_reader(fd).unwrap();
    assert_eq!(report.algorithm, "FCFS");
    assert_eq!(report.total_time, 24);
    assert_eq!(report.tasks.len(), 5);
    assert_eq!(report.gantt.len(), 5);

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn priority_files_are_named_by_mode() {
    let (session, output) = session("priority", false);
    let mut sink = Vec::new();
    session.cpu(CpuAlgorithm::Priority { preemptive: true }, &mut sink).unwrap();
    session.cpu(CpuAlgorithm::Priority { preemptive: false }, &mut sink).unwrap();
    assert!(output.join("priority_preemptive_cpu_results.csv").exists());
    assert!(output.join("priority_non_preemptive_cpu_results.csv").exists());
    assert!(!output.join("priority_preemptive_cpu_results.json").exists());

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn memory_run_writes_csv() {
    let (mut session, output) = session("memory", false);
    let mut console = Vec::new();
    session.memory(Fit::First, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("Not Allocated"));
    assert!(console.contains("Successfully Allocated: 4/5"));

    let csv = lines_of(output.join("first_fit_memory_results.csv"));
    assert_eq!(csv[0], "Order_ID,Order_Size,Rack_Number");
    assert_eq!(csv[1], "1,5,1");
    assert_eq!(csv[4], "4,6,Not Allocated");
    assert!(csv.contains(&String::from("Successfully Allocated,4,5")));
    assert!(csv.contains(&String::from("Memory Utilization,60.00")));

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn disk_run_writes_csv() {
    let (mut session, output) = session("disk", false);
    let mut console = Vec::new();
    session.disk(DiskAlgorithm::Fcfs, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("Head Sequence: 53 -> 98 -> 183 -> 37 -> 122"));

    let csv = lines_of(output.join("fcfs_disk_results.csv"));
    assert_eq!(csv[0], "Truck_Request_ID,Dock_Cylinder,Arrival_Time");
    assert_eq!(csv[1], "1,98,0");
    assert_eq!(csv[5], "");
    assert_eq!(csv[6], "Head Sequence:");
    assert_eq!(csv[7], "53 -> 98 -> 183 -> 37 -> 122");
    assert_eq!(csv[8], "Total Seek Time,361");
    assert_eq!(csv[9], "Avg Seek Time,90.25");

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn charts_are_drawn_when_requested() {
    let output = scratch("plot");
    let options = Options { output: output.clone(), json: false, plot: true };
    let mut session = Session::new(small_depot(), options);
    let mut sink = Vec::new();
    session.cpu(CpuAlgorithm::Fcfs, &mut sink).unwrap();
    session.disk(DiskAlgorithm::CScan(Direction::Up), &mut sink).unwrap();

    for chart in ["fcfs_gantt.png", "cscan_seek.png"] {
        let meta = fs::metadata(output.join(chart)).unwrap();
        assert!(meta.len() > 0, "{chart}");
    }
    assert!(!output.join("fcfs_seek.png").exists());

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn session_keeps_the_head() {
    let (mut session, output) = session("head", false);
    let mut sink = Vec::new();
    assert_eq!(session.head(), 53);
    session.disk(DiskAlgorithm::Fcfs, &mut sink).unwrap();
    assert_eq!(session.head(), 122);
    let run = session.disk(DiskAlgorithm::Sstf, &mut sink).unwrap();
    assert_eq!(run.sequence, vec![122, 98, 37, 183]);
    assert_eq!(session.head(), 183);

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn session_keeps_the_next_fit_cursor() {
    let config = WorkloadConfig {
        tasks:          1,
        max_burst:      5,
        max_priority:   5,
        warehouse_size: 30,
        max_block_size: 10,
        max_task_size:  10,
        requests:       1,
        disk_size:      199,
        head_position:  50,
        buffer_size:    5,
        seed:           None,
    };
    let blocks = (1..=3).map(|id| StorageBlock::new(id, 10)).collect();
    let w = workload::init(
        config,
        vec![Task::new(1, 0, 5, 1)],
        blocks,
        vec![DiskRequest::new(1, 10, 0)],
    ).unwrap();
    let output = scratch("cursor");
    let mut session = Session::new(w, Options { output: output.clone(), json: false, plot: false });

    let mut sink = Vec::new();
    let picks: Vec<Option<u32>> = (0..4)
        .map(|_| session.memory(Fit::Next, &mut sink).unwrap().placements[0].block_id)
        .collect();
    assert_eq!(picks, vec![Some(1), Some(2), Some(3), Some(1)]);
    assert_eq!(session.next_fit_index(), 1);

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn parallel_comparison_matches_sequential_runs() {
    let w = small_depot();
    let quantum = NonZeroUsize::new(2).unwrap();

    let runs = compare::cpu(&w, quantum);
    let expected = CpuAlgorithm::all(quantum);
    assert_eq!(runs.len(), expected.len());
    for (run, algorithm) in runs.iter().zip(expected) {
        assert_eq!(run.algorithm, algorithm);
        assert_eq!(run.gantt, w.cpu().run(algorithm).gantt);
    }

    let runs = compare::memory(&w);
    assert_eq!(runs.iter().map(|r| r.fit).collect::<Vec<_>>(), Fit::ALL.to_vec());

    // Every disk run starts from the configured head.
    let runs = compare::disk(&w, Direction::Up);
    assert!(runs.iter().all(|r| r.sequence[0] == w.config.head_position));
    assert_eq!(runs.iter().map(|r| r.total_seek).collect::<Vec<_>>(), vec![361, 162, 276, 382]);
}

#[test]
fn comparison_table_lists_every_algorithm() {
    let (session, _) = session("compare", false);
    let mut console = Vec::new();
    session.compare(Family::Cpu, NonZeroUsize::new(3).unwrap(), Direction::Up, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();
    for algorithm in CpuAlgorithm::all(NonZeroUsize::new(3).unwrap()) {
        assert!(console.contains(&algorithm.to_string()), "{algorithm}");
    }
}

#[test]
fn menu_runs_a_scripted_session() {
    let (mut session, output) = session("menu", false);
    let script = "1\nA\n2\nc\n3\nA\n3\nB\n5\n";
    let mut console = Vec::new();
    menu::run(&mut session, Cursor::new(script), &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();

    assert!(console.contains("SCHEDULING RESULTS - FCFS"));
    assert!(console.contains("STORAGE ALLOCATION RESULTS - Next Fit"));
    assert!(console.contains("DISK SCHEDULING RESULTS - SSTF"));
    assert!(console.contains("Leaving the warehouse."));
    // The second disk run started where the first one stopped.
    assert!(console.contains("Head Sequence: 122 -> 98 -> 37 -> 183"));
    assert_eq!(session.head(), 183);

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn menu_rejects_bad_input_and_stops_at_eof() {
    let (mut session, output) = session("menu-bad", false);
    let script = "9\n1\nE\n0\nx\n2\n";
    let mut console = Vec::new();
    menu::run(&mut session, Cursor::new(script), &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();

    assert!(console.contains("Invalid choice"));
    assert_eq!(console.matches("Invalid quantum").count(), 2);
    assert!(console.contains("SCHEDULING RESULTS - Round Robin (TQ=2)"));
    assert!(output.join("rr_cpu_results.csv").exists());

    fs::remove_dir_all(output).unwrap();
}

#[test]
fn table_helpers() {
    let run = small_depot().cpu().run(CpuAlgorithm::Srjf);
    assert!(table::gantt_line(&run).starts_with("Gantt Chart: |P1 [0-1]|P2 [1-4]|P1 [4-8]|"));
    assert_eq!(table::head_sequence(&[53, 37]), "53 -> 37");
    assert_eq!(table::head_sequence(&[]), "");
    assert!(table::banner("X").contains("  X\n"));

    let disk = small_depot().disk().run(DiskAlgorithm::Fcfs);
    let report = table::disk_report(&disk);
    assert!(report.starts_with(&table::banner("DISK SCHEDULING RESULTS - FCFS")));
    assert!(report.ends_with("Head Sequence: 53 -> 98 -> 183 -> 37 -> 122\nTotal Seek Time: 361 units\nAvg Seek Time: 90.25 units\n"));

    let report = table::cpu_report(&run);
    assert!(report.contains("\n\nGantt Chart: |P1 [0-1]|"));
    assert!(report.ends_with(" orders/unit\n"));
}
