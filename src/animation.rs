//! Single-lane animation sequencer.
//!
//! Expand and collapse transitions must never overlap, and must run in the
//! order the user asked for them. [`Queue`] provides exactly that: every
//! submitted task waits in a FIFO backlog, then runs on its own turn of the
//! bubbletea-rs event loop, and holds the lane for the duration of its
//! transition before the next task may start.
//!
//! The queue is driven by messages, like the spinner and timer components:
//!
//! 1. [`Queue::submit`] returns a command that delivers an [`AnimationMsg`]
//!    with [`Phase::Run`] on the next turn of the event loop (only when the
//!    lane was idle; otherwise the task simply waits).
//! 2. Routing that message back into [`Queue::update`] runs the task against
//!    the caller's context and returns a command that fires [`Phase::Settle`]
//!    once the transition duration has elapsed.
//! 3. The settle message releases the lane and schedules the next task.
//!
//! There is no cancellation and no coalescing: a task that has been submitted
//! always runs. Rapid repeated input therefore builds a backlog that drains one
//! transition at a time.
//!
//! ```rust
//! use bubbletea_expandable::animation::Queue;
//! use std::time::Duration;
//!
//! let mut queue: Queue<Vec<&str>> = Queue::new();
//! let mut log = Vec::new();
//!
//! let cmd = queue.submit(Duration::from_millis(300), |log: &mut Vec<&str>| log.push("first"));
//! assert!(cmd.is_some());
//! let cmd = queue.submit(Duration::from_millis(300), |log: &mut Vec<&str>| log.push("second"));
//! assert!(cmd.is_none()); // waits behind the first task
//!
//! // Drive the lane without a clock.
//! while let Some(msg) = queue.due_msg() {
//!     queue.update(&(Box::new(msg) as bubbletea_rs::Msg), &mut log);
//! }
//! assert_eq!(log, vec!["first", "second"]);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A deferred mutation run inside an animated transition.
pub type Task<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Which step of a task's life an [`AnimationMsg`] announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The task's turn has come: run its mutation.
    Run,
    /// The task's transition has finished: release the lane.
    Settle,
}

/// Message routed back into [`Queue::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationMsg {
    /// Identifier of the queue the message belongs to.
    pub id: i64,
    /// Sequence number of the task, in submission order.
    pub seq: u64,
    /// What the message asks the queue to do.
    pub phase: Phase,
}

/// A transition currently holding the lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Sequence number of the running task.
    pub seq: u64,
    /// How long the lane stays busy.
    pub duration: Duration,
}

/// Produces the commands that advance the lane.
///
/// The default [`TickScheduler`] uses bubbletea-rs ticks. Swap it out to
/// observe requested durations or to settle transitions instantly.
pub trait Scheduler: Send {
    /// A command delivering `msg` on the next turn of the event loop.
    fn next_turn(&self, msg: AnimationMsg) -> Cmd;

    /// A command delivering `msg` once `duration` has elapsed.
    fn after(&self, duration: Duration, msg: AnimationMsg) -> Cmd;
}

/// Scheduler backed by `bubbletea_rs::tick`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler;

impl Scheduler for TickScheduler {
    fn next_turn(&self, msg: AnimationMsg) -> Cmd {
        bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg) as Msg)
    }

    fn after(&self, duration: Duration, msg: AnimationMsg) -> Cmd {
        bubbletea_tick(duration, move |_| Box::new(msg) as Msg)
    }
}

struct Pending<C> {
    seq: u64,
    duration: Duration,
    task: Task<C>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    Idle,
    Scheduled(u64),
    Animating(Transition),
}

/// FIFO, non-overlapping animation sequencer over a context `C`.
pub struct Queue<C> {
    id: i64,
    next_seq: u64,
    lane: Lane,
    backlog: VecDeque<Pending<C>>,
    completed: u64,
    scheduler: Box<dyn Scheduler>,
}

impl<C> fmt::Debug for Queue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("id", &self.id)
            .field("lane", &self.lane)
            .field("pending", &self.backlog.len())
            .field("completed", &self.completed)
            .finish()
    }
}

impl<C> Default for Queue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Queue<C> {
    /// Creates an idle queue using [`TickScheduler`].
    pub fn new() -> Self {
        Self::with_scheduler(TickScheduler)
    }

    /// Creates an idle queue using a custom scheduler.
    pub fn with_scheduler<S: Scheduler + 'static>(scheduler: S) -> Self {
        Self {
            id: next_id(),
            next_seq: 0,
            lane: Lane::Idle,
            backlog: VecDeque::new(),
            completed: 0,
            scheduler: Box::new(scheduler),
        }
    }

    /// Swaps the scheduler, keeping the backlog and the task holding the lane.
    ///
    /// Only commands produced from now on use the new scheduler. Commands
    /// already handed out still deliver, since the queue's id is unchanged.
    pub fn set_scheduler<S: Scheduler + 'static>(&mut self, scheduler: S) {
        self.scheduler = Box::new(scheduler);
    }

    /// Unique identifier used to route messages to this queue.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Queues `task` to run inside a transition lasting `duration`.
    ///
    /// Returns the command that starts the lane if it was idle. When another
    /// task is scheduled or animating, the new task waits and `None` is
    /// returned; the lane picks it up by itself.
    pub fn submit<F>(&mut self, duration: Duration, task: F) -> Option<Cmd>
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.backlog.push_back(Pending {
            seq,
            duration,
            task: Box::new(task),
        });
        log::debug!(
            "animation queue {}: submitted task {} ({:?}), {} pending",
            self.id,
            seq,
            duration,
            self.backlog.len()
        );

        if self.lane == Lane::Idle {
            return Some(self.schedule_head());
        }
        None
    }

    /// Advances the lane in response to an [`AnimationMsg`].
    ///
    /// Messages for other queues, and messages the lane is not waiting for,
    /// are ignored.
    pub fn update(&mut self, msg: &Msg, context: &mut C) -> Option<Cmd> {
        let msg = *msg.downcast_ref::<AnimationMsg>()?;
        if msg.id != self.id {
            return None;
        }

        match (msg.phase, self.lane) {
            (Phase::Run, Lane::Scheduled(seq)) if seq == msg.seq => {
                let pending = self.backlog.pop_front()?;
                log::debug!(
                    "animation queue {}: running task {} for {:?}",
                    self.id,
                    pending.seq,
                    pending.duration
                );
                (pending.task)(context);
                let transition = Transition {
                    seq: pending.seq,
                    duration: pending.duration,
                };
                self.lane = Lane::Animating(transition);
                Some(self.scheduler.after(
                    transition.duration,
                    AnimationMsg {
                        id: self.id,
                        seq: transition.seq,
                        phase: Phase::Settle,
                    },
                ))
            }
            (Phase::Settle, Lane::Animating(transition)) if transition.seq == msg.seq => {
                self.completed += 1;
                self.lane = Lane::Idle;
                log::debug!(
                    "animation queue {}: task {} settled, {} pending",
                    self.id,
                    transition.seq,
                    self.backlog.len()
                );
                if self.backlog.is_empty() {
                    None
                } else {
                    Some(self.schedule_head())
                }
            }
            _ => None,
        }
    }

    /// The message the lane is currently waiting for, if any.
    ///
    /// Useful for driving the queue without a clock: feed the returned
    /// message back into [`Queue::update`] until this returns `None`.
    pub fn due_msg(&self) -> Option<AnimationMsg> {
        match self.lane {
            Lane::Idle => None,
            Lane::Scheduled(seq) => Some(AnimationMsg {
                id: self.id,
                seq,
                phase: Phase::Run,
            }),
            Lane::Animating(transition) => Some(AnimationMsg {
                id: self.id,
                seq: transition.seq,
                phase: Phase::Settle,
            }),
        }
    }

    /// Number of tasks that have not started running yet.
    pub fn pending(&self) -> usize {
        self.backlog.len()
    }

    /// Returns true when nothing is scheduled, animating or waiting.
    pub fn is_idle(&self) -> bool {
        self.lane == Lane::Idle && self.backlog.is_empty()
    }

    /// The transition currently holding the lane.
    pub fn current_transition(&self) -> Option<Transition> {
        match self.lane {
            Lane::Animating(transition) => Some(transition),
            _ => None,
        }
    }

    /// Number of tasks whose transitions have settled.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    fn schedule_head(&mut self) -> Cmd {
        // Only called with a non-empty backlog.
        let seq = self.backlog.front().map_or(self.next_seq, |p| p.seq);
        self.lane = Lane::Scheduled(seq);
        self.scheduler.next_turn(AnimationMsg {
            id: self.id,
            seq,
            phase: Phase::Run,
        })
    }
}
