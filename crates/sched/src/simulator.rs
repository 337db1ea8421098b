//! The simulator facade: `run`/`runFor`/`runUntil`/`pause`/`resume` layered
//! over an [`EventScheduler`], plus a lifecycle event interface built on
//! `simnet_core`'s connection-pool machinery.

use std::cell::Cell;
use std::rc::Rc;

use simnet_core::{Cookie, EventSource};
use simnet_time::{Duration, TimePoint};

use crate::error::Result;
use crate::scheduler::EventScheduler;

/// A transition the simulator fires synchronously on its lifecycle
/// interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Begin,
    Pause,
    Resume,
    End,
}

/// Wraps an [`EventScheduler`] with pause/resume and lifecycle
/// notifications. `pause` flips a flag the run loop checks at the top of
/// every iteration; it never interrupts a sink that is already running.
pub struct Simulator {
    scheduler: Rc<EventScheduler>,
    paused: Cell<bool>,
    lifecycle: EventSource<Box<dyn Fn(LifecycleEvent)>>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Simulator {
            scheduler: Rc::new(EventScheduler::new()),
            paused: Cell::new(false),
            lifecycle: EventSource::new(),
        }
    }

    pub fn with_capacity_hint(hint: usize) -> Self {
        Simulator {
            scheduler: Rc::new(EventScheduler::with_capacity_hint(hint)),
            paused: Cell::new(false),
            lifecycle: EventSource::new(),
        }
    }

    /// The underlying scheduler, for scheduling/cancelling entries.
    pub fn scheduler(&self) -> &Rc<EventScheduler> {
        &self.scheduler
    }

    pub fn now(&self) -> TimePoint {
        self.scheduler.now()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Connects a sink to the `begin`/`pause`/`resume`/`end` interface.
    pub fn on_lifecycle(
        &self,
        sink: Box<dyn Fn(LifecycleEvent)>,
    ) -> simnet_core::Result<Cookie> {
        self.lifecycle.connect(sink)
    }

    pub fn remove_lifecycle(&self, cookie: Cookie) {
        self.lifecycle.disconnect(cookie);
    }

    fn fire_lifecycle(&self, event: LifecycleEvent) {
        self.lifecycle.fire::<()>(|sink| sink(event));
    }

    /// Runs until the queue is empty, pause is requested, or time effectively
    /// exhausts (there is no deadline; a model that keeps rescheduling runs
    /// forever, same as `runUntil` with an unreachable deadline would).
    pub fn run(&self) -> Result<()> {
        self.run_until_internal(TimePoint::from_ticks(i64::MAX))
    }

    pub fn run_for(&self, dt: Duration) -> Result<()> {
        let deadline = self.now() + dt;
        self.run_until_internal(deadline)
    }

    pub fn run_until(&self, t: TimePoint) -> Result<()> {
        self.run_until_internal(t)
    }

    fn run_until_internal(&self, deadline: TimePoint) -> Result<()> {
        self.fire_lifecycle(LifecycleEvent::Begin);
        let result = self
            .scheduler
            .run_while(deadline, || !self.paused.get());
        self.fire_lifecycle(LifecycleEvent::End);
        result
    }

    /// Requests that the run loop stop at the top of its next iteration.
    /// Has no effect on a sink that is already executing.
    pub fn pause(&self) {
        self.paused.set(true);
        self.fire_lifecycle(LifecycleEvent::Pause);
    }

    /// Clears the pause flag. Does not itself resume the run loop; call
    /// `run`/`runFor`/`runUntil` again to continue draining the queue.
    pub fn resume(&self) {
        self.paused.set(false);
        self.fire_lifecycle(LifecycleEvent::Resume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn lifecycle_events_fire_in_order_around_a_run() {
        let sim = Simulator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        sim.on_lifecycle(Box::new(move |event| sink_log.borrow_mut().push(event)))
            .unwrap();

        sim.run_for(Duration::from_ticks(10)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![LifecycleEvent::Begin, LifecycleEvent::End]
        );
    }

    #[test]
    fn a_sink_can_pause_the_simulator_it_runs_in() {
        let sim = Rc::new(Simulator::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_sim = Rc::clone(&sim);
        let first_log = Rc::clone(&log);
        sim.scheduler().schedule_now(Box::new(move || {
            first_log.borrow_mut().push(1);
            first_sim.pause();
            Ok(())
        }));

        let second_log = Rc::clone(&log);
        sim.scheduler()
            .schedule_in(
                Duration::from_ticks(1),
                Box::new(move || {
                    second_log.borrow_mut().push(2);
                    Ok(())
                }),
            )
            .unwrap();

        sim.run_for(Duration::from_ticks(10)).unwrap();

        assert_eq!(*log.borrow(), vec![1], "the second entry never ran");
        assert!(sim.is_paused());
        assert_eq!(sim.scheduler().pending_count(), 1);
    }

    #[test]
    fn resuming_lets_a_paused_run_continue_on_the_next_call() {
        let sim = Simulator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first_log = Rc::clone(&log);
        sim.scheduler().schedule_now(Box::new(move || {
            first_log.borrow_mut().push(1);
            Ok(())
        }));

        sim.pause();
        sim.run_for(Duration::ZERO).unwrap();
        assert!(log.borrow().is_empty());

        sim.resume();
        sim.run_for(Duration::ZERO).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
    }
}
