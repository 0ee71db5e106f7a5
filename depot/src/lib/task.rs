use crate::utils::*;

/// An order placed with the warehouse. For CPU scheduling it is a
/// process: it shows up at [`arrival_time`](Task::arrival_time) and
/// needs [`burst_time`](Task::burst_time) ticks of a worker's time.
///
/// The storage allocator reuses the burst time as the amount of rack
/// space the order occupies (see [`Task::size`]).
///
/// > Priorities are *inverted* w.r.t. the usual textbook convention:
/// > a **higher** [`priority`](Task::priority) value means the task is
/// > **more** urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Task {
    pub id:             TaskId,
    pub arrival_time:   Ticks,
    pub burst_time:     Ticks,
    pub priority:       u32,
}

impl Task {
    pub fn new(
        id:             TaskId,
        arrival_time:   Ticks,
        burst_time:     Ticks,
        priority:       u32,
    ) -> Self {
        Self { id, arrival_time, burst_time, priority }
    }

    /// Rack space required when the task is stored.
    #[inline]
    pub fn size(&self) -> usize {
        self.burst_time
    }

    /// Derives the timing triplet of a task finishing at `completion_time`.
    pub fn finished_at(&self, completion_time: Ticks) -> TaskOutcome {
        let turnaround_time = completion_time.saturating_sub(self.arrival_time);

        TaskOutcome {
            task:               *self,
            completion_time,
            waiting_time:       turnaround_time.saturating_sub(self.burst_time),
            turnaround_time,
        }
    }
}

/// What a CPU algorithm computed for one [`Task`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task:               Task,
    pub completion_time:    Ticks,
    pub waiting_time:       Ticks,
    pub turnaround_time:    Ticks,
}
