mod preemptive;
mod round_robin;

use crate::utils::*;
use crate::{Task, TaskOutcome};
use self::preemptive::Pick;

/// The CPU scheduling algorithms offered by [`CpuScheduler::run`].
///
/// All tie-breaks are fixed: when two tasks are equally good
/// candidates, the one met first in the algorithm's working order
/// wins. The working order is arrival order (stable w.r.t. input)
/// for FCFS, SRJF and Round Robin, and plain input order for SJF and
/// both Priority modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuAlgorithm {
    /// First come, first served.
    Fcfs,
    /// Non-preemptive shortest job first.
    Sjf,
    /// Preemptive shortest remaining job first.
    Srjf,
    /// Higher `priority` value wins.
    Priority { preemptive: bool },
    /// Time-sliced FIFO rotation.
    RoundRobin { quantum: NonZeroUsize },
}

impl CpuAlgorithm {
    /// Round Robin with a checked quantum.
    pub fn round_robin(quantum: usize) -> Result<Self, EngineError> {
        NonZeroUsize::new(quantum)
            .map(|quantum| CpuAlgorithm::RoundRobin { quantum })
            .ok_or(EngineError::ZeroQuantum)
    }

    /// Every algorithm, Round Robin using `quantum`.
    pub fn all(quantum: NonZeroUsize) -> [CpuAlgorithm; 6] {
        [
            CpuAlgorithm::Fcfs,
            CpuAlgorithm::Sjf,
            CpuAlgorithm::Srjf,
            CpuAlgorithm::Priority { preemptive: false },
            CpuAlgorithm::Priority { preemptive: true },
            CpuAlgorithm::RoundRobin { quantum },
        ]
    }

    pub fn is_preemptive(&self) -> bool {
        match self {
            CpuAlgorithm::Fcfs | CpuAlgorithm::Sjf  => { false },
            CpuAlgorithm::Priority { preemptive }   => { *preemptive },
            _                                       => { true },
        }
    }

    /// Used to name result files, e.g. `srjf_cpu_results.csv`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            CpuAlgorithm::Fcfs                              => { "fcfs" },
            CpuAlgorithm::Sjf                               => { "sjf" },
            CpuAlgorithm::Srjf                              => { "srjf" },
            CpuAlgorithm::Priority { preemptive: true }     => { "priority_preemptive" },
            CpuAlgorithm::Priority { preemptive: false }    => { "priority_non_preemptive" },
            CpuAlgorithm::RoundRobin { .. }                 => { "rr" },
        }
    }
}

impl fmt::Display for CpuAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuAlgorithm::Fcfs                              => write!(f, "FCFS"),
            CpuAlgorithm::Sjf                               => write!(f, "SJF"),
            CpuAlgorithm::Srjf                              => write!(f, "SRJF"),
            CpuAlgorithm::Priority { preemptive: true }     => write!(f, "PRIORITY_PREEMPTIVE"),
            CpuAlgorithm::Priority { preemptive: false }    => write!(f, "PRIORITY_NON-PREEMPTIVE"),
            CpuAlgorithm::RoundRobin { quantum }            => write!(f, "Round Robin (TQ={quantum})"),
        }
    }
}

/// A contiguous interval `[start, end)` during which one task
/// held the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GanttSlice {
    pub task_id:    TaskId,
    pub start:      Ticks,
    pub end:        Ticks,
}

impl GanttSlice {
    #[inline]
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Execution trace built while an algorithm runs. Back-to-back
/// service of the same task is folded into a single slice, so a
/// tick-by-tick simulation still yields a readable chart.
#[derive(Default)]
pub(crate) struct Timeline {
    slices: Vec<GanttSlice>,
}

impl Timeline {
    pub(crate) fn record(&mut self, task_id: TaskId, start: Ticks, end: Ticks) {
        if start == end { return; }
        if let Some(last) = self.slices.last_mut() {
            if last.task_id == task_id && last.end == start {
                last.end = end;
                return;
            }
        }
        self.slices.push(GanttSlice { task_id, start, end });
    }
}

/// Completion tick of every task, indexed like the scheduler's input.
pub(crate) type Completions = Vec<Ticks>;

/// Aggregate figures reported for every CPU run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuMetrics {
    /// Final clock value, i.e. the latest completion.
    pub total_time:         Ticks,
    pub total_burst:        Ticks,
    /// `100 * total_burst / total_time`.
    pub cpu_utilization:    f64,
    pub avg_waiting:        f64,
    pub avg_turnaround:     f64,
    /// Tasks completed per tick.
    pub throughput:         f64,
}

impl CpuMetrics {
    fn measure(outcomes: &[TaskOutcome]) -> Self {
        let count = outcomes.len();
        let total_time = outcomes.iter()
            .map(|o| o.completion_time)
            .max()
            .unwrap_or(0);
        let total_burst = outcomes.iter().map(|o| o.task.burst_time).sum();

        Self {
            total_time,
            total_burst,
            cpu_utilization:    percentage(total_burst, total_time),
            avg_waiting:        mean(outcomes.iter().map(|o| o.waiting_time).sum(), count),
            avg_turnaround:     mean(outcomes.iter().map(|o| o.turnaround_time).sum(), count),
            throughput:         mean(count, total_time),
        }
    }
}

/// Everything one CPU algorithm produced.
#[derive(Clone, Debug)]
pub struct CpuRun {
    pub algorithm:  CpuAlgorithm,
    /// One entry per task, in input order.
    pub outcomes:   Vec<TaskOutcome>,
    /// Service intervals in execution order.
    pub gantt:      Vec<GanttSlice>,
    pub metrics:    CpuMetrics,
}

impl CpuRun {
    fn assemble(
        algorithm:      CpuAlgorithm,
        tasks:          &[Task],
        completions:    Completions,
        timeline:       Timeline,
    ) -> Self {
        let outcomes: Vec<TaskOutcome> = tasks.iter()
            .zip(completions)
            .map(|(t, c)| t.finished_at(c))
            .collect();
        let metrics = CpuMetrics::measure(&outcomes);

        Self {
            algorithm,
            outcomes,
            gantt: timeline.slices,
            metrics,
        }
    }

    pub fn outcome_of(&self, id: TaskId) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task.id == id)
    }

    /// Total ticks of service task `id` received.
    pub fn service_of(&self, id: TaskId) -> Ticks {
        self.gantt.iter()
            .filter(|s| s.task_id == id)
            .map(|s| s.len())
            .sum()
    }

    /// Task IDs in the order they held the CPU. A preempted task
    /// appears once per slice.
    pub fn execution_order(&self) -> Vec<TaskId> {
        self.gantt.iter().map(|s| s.task_id).collect()
    }
}

/// Runs CPU algorithms over a private copy of the task list, so
/// that repeated runs on one workload never share results.
#[derive(Clone, Debug)]
pub struct CpuScheduler {
    tasks: Vec<Task>,
}

impl CpuScheduler {
    pub fn new(tasks: &[Task]) -> Self {
        Self { tasks: tasks.to_vec() }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn run(&self, algorithm: CpuAlgorithm) -> CpuRun {
        let start = Instant::now();
        let (completions, timeline) = match algorithm {
            CpuAlgorithm::Fcfs                              => { self.fcfs() },
            CpuAlgorithm::Sjf                               => {
                self.non_preemptive(|cand, best| cand.burst_time < best.burst_time)
            },
            CpuAlgorithm::Priority { preemptive: false }    => {
                self.non_preemptive(|cand, best| cand.priority > best.priority)
            },
            CpuAlgorithm::Srjf                              => {
                preemptive::run(&self.tasks, &self.by_arrival(), Pick::ShortestRemaining)
            },
            CpuAlgorithm::Priority { preemptive: true }     => {
                let input_order: Vec<usize> = (0..self.tasks.len()).collect();
                preemptive::run(&self.tasks, &input_order, Pick::HighestPriority)
            },
            CpuAlgorithm::RoundRobin { quantum }            => {
                round_robin::run(&self.tasks, &self.by_arrival(), quantum)
            },
        };
        let res = CpuRun::assemble(algorithm, &self.tasks, completions, timeline);
        info!(
            "{algorithm}: {} tasks done at t={} in {} μs",
            res.outcomes.len(),
            res.metrics.total_time,
            start.elapsed().as_micros()
        );

        res
    }

    /// Input indices sorted by arrival. Sorting is stable, so
    /// simultaneous arrivals keep their input order.
    fn by_arrival(&self) -> Vec<usize> {
        (0..self.tasks.len())
            .sorted_by_key(|&i| self.tasks[i].arrival_time)
            .collect()
    }

    fn fcfs(&self) -> (Completions, Timeline) {
        let mut completions = self.tasks.iter().map(|t| t.arrival_time).collect::<Completions>();
        let mut timeline = Timeline::default();
        let mut clock = 0;
        for i in self.by_arrival() {
            let t = &self.tasks[i];
            if clock < t.arrival_time {
                debug!("FCFS: idle {clock}..{}", t.arrival_time);
                clock = t.arrival_time;
            }
            timeline.record(t.id, clock, clock + t.burst_time);
            clock += t.burst_time;
            completions[i] = clock;
        }

        (completions, timeline)
    }

    /// Shared skeleton of SJF and non-preemptive Priority: whenever
    /// the CPU frees up, pick the preferred task among those that
    /// have arrived and run it to completion. `prefers(cand, best)`
    /// must be strict, so that earlier tasks win ties.
    fn non_preemptive<F>(&self, prefers: F) -> (Completions, Timeline)
    where F: Fn(&Task, &Task) -> bool {
        let mut completions = self.tasks.iter().map(|t| t.arrival_time).collect::<Completions>();
        let mut timeline = Timeline::default();
        let mut pending: Vec<usize> = (0..self.tasks.len()).collect();
        let mut clock = 0;

        while !pending.is_empty() {
            // Fast-forward over idle gaps before selecting, so that
            // the selection only ever sees arrived tasks.
            let earliest = pending.iter()
                .map(|&i| self.tasks[i].arrival_time)
                .min()
                .unwrap_or(clock);
            if earliest > clock {
                debug!("idle {clock}..{earliest}");
                clock = earliest;
            }

            let mut chosen: Option<usize> = None;
            for (pos, &i) in pending.iter().enumerate() {
                let cand = &self.tasks[i];
                if cand.arrival_time > clock { continue; }
                match chosen {
                    None        => { chosen = Some(pos); },
                    Some(best)  => {
                        if prefers(cand, &self.tasks[pending[best]]) {
                            chosen = Some(pos);
                        }
                    }
                }
            }
            let Some(pos) = chosen else { continue };
            let i = pending.remove(pos);
            let t = &self.tasks[i];
            timeline.record(t.id, clock, clock + t.burst_time);
            clock += t.burst_time;
            completions[i] = clock;
        }

        (completions, timeline)
    }
}
