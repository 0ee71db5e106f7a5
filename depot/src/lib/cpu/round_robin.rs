use crate::utils::*;
use crate::Task;
use super::{Completions, Timeline};

/// Moves every task that has arrived by `clock` into the ready
/// queue. `order` is sorted by arrival, so admission is a cursor
/// sweep and a task can never be queued twice.
fn admit(
    tasks:      &[Task],
    order:      &[usize],
    remaining:  &[Ticks],
    clock:      Ticks,
    admitted:   &mut usize,
    ready:      &mut VecDeque<usize>,
) {
    while let Some(&i) = order.get(*admitted) {
        if tasks[i].arrival_time > clock { break; }
        if remaining[i] > 0 {
            ready.push_back(i);
        }
        *admitted += 1;
    }
}

/// Round Robin over tasks visited in `order` (arrival order).
///
/// After each slice, tasks that arrived meanwhile are queued
/// *before* the task that was just preempted, which goes to the
/// tail.
pub(super) fn run(tasks: &[Task], order: &[usize], quantum: NonZeroUsize) -> (Completions, Timeline) {
    let quantum = quantum.get();
    let mut remaining: Vec<Ticks> = tasks.iter().map(|t| t.burst_time).collect();
    let mut completions = tasks.iter().map(|t| t.arrival_time).collect::<Completions>();
    let mut timeline = Timeline::default();
    let mut ready: VecDeque<usize> = VecDeque::with_capacity(tasks.len());
    let mut admitted = 0;
    let mut clock = 0;

    admit(tasks, order, &remaining, clock, &mut admitted, &mut ready);
    loop {
        let Some(i) = ready.pop_front() else {
            // Nobody is ready: jump to the next arrival, if any.
            match order.get(admitted) {
                Some(&next) => {
                    let t = tasks[next].arrival_time;
                    if t > clock {
                        debug!("RR: idle {clock}..{t}");
                        clock = t;
                    }
                    admit(tasks, order, &remaining, clock, &mut admitted, &mut ready);
                    continue;
                },
                None        => { break; }
            }
        };

        let slice = quantum.min(remaining[i]);
        timeline.record(tasks[i].id, clock, clock + slice);
        clock += slice;
        remaining[i] -= slice;
        admit(tasks, order, &remaining, clock, &mut admitted, &mut ready);
        if remaining[i] > 0 {
            ready.push_back(i);
        } else {
            completions[i] = clock;
        }
    }

    (completions, timeline)
}
