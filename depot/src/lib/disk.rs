use clap::ValueEnum;

use crate::utils::*;

/// A truck waiting at a dock: the disk has to move its head to
/// `cylinder` to serve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiskRequest {
    pub request_id:     u32,
    pub cylinder:       Cylinder,
    pub arrival_time:   Ticks,
}

impl DiskRequest {
    pub fn new(request_id: u32, cylinder: Cylinder, arrival_time: Ticks) -> Self {
        Self { request_id, cylinder, arrival_time }
    }
}

/// Initial sweep direction of SCAN and C-SCAN.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug)]
pub enum Direction {
    /// Toward higher cylinder numbers
    Up,
    /// Toward lower cylinder numbers
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiskAlgorithm {
    /// Serve requests in arrival order.
    Fcfs,
    /// Shortest seek time first.
    Sstf,
    /// Elevator: sweep one way, then reverse.
    Scan(Direction),
    /// Circular elevator: sweep one way, wrap around, keep going.
    CScan(Direction),
}

impl DiskAlgorithm {
    pub fn all(direction: Direction) -> [DiskAlgorithm; 4] {
        [
            DiskAlgorithm::Fcfs,
            DiskAlgorithm::Sstf,
            DiskAlgorithm::Scan(direction),
            DiskAlgorithm::CScan(direction),
        ]
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            DiskAlgorithm::Fcfs     => { "fcfs" },
            DiskAlgorithm::Sstf     => { "sstf" },
            DiskAlgorithm::Scan(_)  => { "scan" },
            DiskAlgorithm::CScan(_) => { "cscan" },
        }
    }
}

impl fmt::Display for DiskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskAlgorithm::Fcfs     => write!(f, "FCFS"),
            DiskAlgorithm::Sstf     => write!(f, "SSTF"),
            DiskAlgorithm::Scan(_)  => write!(f, "SCAN"),
            DiskAlgorithm::CScan(_) => write!(f, "C-SCAN"),
        }
    }
}

/// Everything one disk algorithm produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SeekRun {
    pub algorithm:      DiskAlgorithm,
    /// Head positions, starting with where the head was before the run.
    pub sequence:       Vec<Cylinder>,
    /// Sum of absolute deltas along `sequence`.
    pub total_seek:     usize,
    /// `total_seek / requests`, 0 without requests.
    pub average_seek:   f64,
    pub requests:       usize,
}

/// Head bookkeeping for one run.
struct Sweep {
    head:       Cylinder,
    sequence:   Vec<Cylinder>,
    total:      usize,
}

impl Sweep {
    fn new(head: Cylinder, capacity: usize) -> Self {
        let mut sequence = Vec::with_capacity(capacity + 3);
        sequence.push(head);

        Self { head, sequence, total: 0 }
    }

    #[inline]
    fn move_to(&mut self, target: Cylinder) {
        self.total += self.head.abs_diff(target);
        self.head = target;
        self.sequence.push(target);
    }
}

/// Moves a disk head over a fixed list of requests.
///
/// The head position belongs to the instance: every run starts
/// where the previous one left the head.
#[derive(Clone, Debug)]
pub struct DiskScheduler {
    requests:   Vec<DiskRequest>,
    head:       Cylinder,
    disk_size:  Cylinder,
}

impl DiskScheduler {
    pub fn new(requests: &[DiskRequest], head: Cylinder, disk_size: Cylinder) -> Self {
        Self {
            requests: requests.to_vec(),
            head,
            disk_size,
        }
    }

    pub fn head(&self) -> Cylinder {
        self.head
    }

    pub fn disk_size(&self) -> Cylinder {
        self.disk_size
    }

    pub fn requests(&self) -> &[DiskRequest] {
        &self.requests
    }

    pub fn run(&mut self, algorithm: DiskAlgorithm) -> SeekRun {
        let start = Instant::now();
        let mut sweep = Sweep::new(self.head, self.requests.len());

        match algorithm {
            DiskAlgorithm::Fcfs             => {
                self.requests.iter()
                    .sorted_by_key(|r| r.arrival_time)
                    .for_each(|r| sweep.move_to(r.cylinder));
            },
            DiskAlgorithm::Sstf             => {
                let mut pending: Vec<Cylinder> = self.requests.iter()
                    .map(|r| r.cylinder)
                    .collect();
                loop {
                    let head = sweep.head;
                    // `position_min_by_key` reports the first of equal minima.
                    let Some(pos) = pending.iter().position_min_by_key(|c| c.abs_diff(head)) else { break };
                    sweep.move_to(pending.remove(pos));
                }
            },
            DiskAlgorithm::Scan(dir)        => {
                let (forward, backward) = self.split(sweep.head, dir);
                forward.into_iter().for_each(|c| sweep.move_to(c));
                backward.into_iter().for_each(|c| sweep.move_to(c));
            },
            DiskAlgorithm::CScan(dir)       => {
                let (forward, backward) = self.split(sweep.head, dir);
                forward.into_iter().for_each(|c| sweep.move_to(c));
                // The sweep always runs out to the edge and wraps, even
                // with nothing left behind. No requests, no movement.
                if !self.requests.is_empty() {
                    let (edge, wrap) = match dir {
                        Direction::Up   => { (self.disk_size, 0) },
                        Direction::Down => { (0, self.disk_size) },
                    };
                    debug!("C-SCAN: wrapping {edge} -> {wrap}");
                    sweep.move_to(edge);
                    sweep.move_to(wrap);
                    // Keep moving the same way, starting from the far end.
                    backward.into_iter().rev().for_each(|c| sweep.move_to(c));
                }
            },
        }

        self.head = sweep.head;
        let requests = self.requests.len();
        let res = SeekRun {
            algorithm,
            average_seek:   mean(sweep.total, requests),
            total_seek:     sweep.total,
            sequence:       sweep.sequence,
            requests,
        };
        info!(
            "{algorithm}: total seek {} over {} requests in {} μs",
            res.total_seek,
            requests,
            start.elapsed().as_micros()
        );

        res
    }

    /// Splits the requested cylinders around `head`, once, before the
    /// sweep begins. The first half is ordered along `dir`, the second
    /// half in the reverse direction (i.e. as SCAN serves it).
    fn split(&self, head: Cylinder, dir: Direction) -> (Vec<Cylinder>, Vec<Cylinder>) {
        let sorted = self.requests.iter()
            .map(|r| r.cylinder)
            .sorted_unstable();
        match dir {
            Direction::Up   => {
                let (up, down): (Vec<Cylinder>, Vec<Cylinder>) = sorted.partition(|&c| c >= head);
                (up, down.into_iter().rev().collect())
            },
            Direction::Down => {
                let (down, up): (Vec<Cylinder>, Vec<Cylinder>) = sorted.partition(|&c| c <= head);
                (down.into_iter().rev().collect(), up)
            },
        }
    }
}
