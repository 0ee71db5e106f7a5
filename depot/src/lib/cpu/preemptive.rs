use crate::utils::*;
use crate::Task;
use super::{Completions, Timeline};

/// Selection rule of a tick-driven scheduler.
#[derive(Clone, Copy, Debug)]
pub(super) enum Pick {
    /// SRJF: least remaining service first.
    ShortestRemaining,
    /// Preemptive Priority: biggest `priority` first.
    HighestPriority,
}

impl Pick {
    #[inline]
    fn prefers(&self, tasks: &[Task], remaining: &[Ticks], cand: usize, best: usize) -> bool {
        match self {
            Pick::ShortestRemaining => { remaining[cand] < remaining[best] },
            Pick::HighestPriority   => { tasks[cand].priority > tasks[best].priority },
        }
    }
}

/// Simulates the CPU one tick at a time. On every tick exactly one
/// eligible task (arrived, work left) gets one unit of service, so
/// a newly arrived task can take over at any tick boundary.
///
/// `order` is the scan order; ties go to whoever comes first in it.
/// When nothing is eligible the clock jumps straight to the next
/// arrival instead of spinning over empty ticks.
pub(super) fn run(tasks: &[Task], order: &[usize], pick: Pick) -> (Completions, Timeline) {
    let mut remaining: Vec<Ticks> = tasks.iter().map(|t| t.burst_time).collect();
    let mut completions = tasks.iter().map(|t| t.arrival_time).collect::<Completions>();
    let mut timeline = Timeline::default();
    let mut left = remaining.iter().filter(|&&r| r > 0).count();
    let mut clock = 0;

    while left > 0 {
        let mut chosen: Option<usize> = None;
        for &i in order {
            if remaining[i] == 0 || tasks[i].arrival_time > clock { continue; }
            chosen = match chosen {
                Some(best) if !pick.prefers(tasks, &remaining, i, best) => { Some(best) },
                _                                                       => { Some(i) },
            };
        }

        match chosen {
            Some(i) => {
                timeline.record(tasks[i].id, clock, clock + 1);
                remaining[i] -= 1;
                clock += 1;
                if remaining[i] == 0 {
                    completions[i] = clock;
                    left -= 1;
                }
            },
            None    => {
                let next_arrival = order.iter()
                    .filter(|&&i| remaining[i] > 0)
                    .map(|&i| tasks[i].arrival_time)
                    .min();
                match next_arrival {
                    Some(t) => {
                        debug!("{pick:?}: idle {clock}..{t}");
                        clock = t;
                    },
                    // Unreachable as long as `left` is accurate.
                    None    => { break; }
                }
            }
        }
    }

    (completions, timeline)
}
