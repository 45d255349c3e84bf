//! Deferred-action queue drained after the dependency-install phase.
//!
//! Steps declare work while the pipeline iterates, but some mutations target
//! files that only exist (or only make sense) once `bundle install` and the
//! gem-backed generators have run. Those steps enqueue closures here instead
//! of mutating immediately; the orchestrator drains the queue once, at the
//! end of the run.

use std::collections::VecDeque;

use anyhow::Result;

/// A queued unit of work. Actions receive the shared context plus the queue
/// itself so an action can enqueue follow-up work mid-drain.
pub type Action<C> = Box<dyn FnOnce(&mut C, &mut DeferredQueue<C>) -> Result<()>>;

/// Single-threaded FIFO work-list of one-shot actions.
pub struct DeferredQueue<C> {
    items: VecDeque<Action<C>>,
}

impl<C> Default for DeferredQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DeferredQueue<C> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an action to the back of the queue.
    pub fn enqueue<F>(&mut self, action: F)
    where
        F: FnOnce(&mut C, &mut DeferredQueue<C>) -> Result<()> + 'static,
    {
        self.items.push_back(Box::new(action));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run every queued action exactly once, in enqueue order, and clear the
    /// queue.
    ///
    /// This is a work-list, not a snapshot: actions enqueued while draining
    /// are processed in the same pass, before `drain` returns. The first
    /// failing action aborts the drain with the remainder unexecuted.
    pub fn drain(&mut self, ctx: &mut C) -> Result<()> {
        while let Some(action) = self.items.pop_front() {
            action(ctx, self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn drains_in_enqueue_order() {
        let mut queue: DeferredQueue<Vec<u32>> = DeferredQueue::new();
        for i in 0..5u32 {
            queue.enqueue(move |log, _| {
                log.push(i);
                Ok(())
            });
        }
        let mut log = Vec::new();
        queue.drain(&mut log).expect("drain");
        assert_eq!(log, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn actions_enqueued_mid_drain_run_in_the_same_pass() {
        let mut queue: DeferredQueue<Vec<&'static str>> = DeferredQueue::new();
        queue.enqueue(|log, queue| {
            log.push("first");
            queue.enqueue(|log, _| {
                log.push("nested");
                Ok(())
            });
            Ok(())
        });
        queue.enqueue(|log, _| {
            log.push("second");
            Ok(())
        });
        let mut log = Vec::new();
        queue.drain(&mut log).expect("drain");
        // The nested action lands at the back, after already-queued work.
        assert_eq!(log, vec!["first", "second", "nested"]);
    }

    #[test]
    fn failing_action_aborts_the_drain() {
        let mut queue: DeferredQueue<Vec<&'static str>> = DeferredQueue::new();
        queue.enqueue(|log, _| {
            log.push("ran");
            Ok(())
        });
        queue.enqueue(|_, _| Err(anyhow!("boom")));
        queue.enqueue(|log, _| {
            log.push("never");
            Ok(())
        });
        let mut log = Vec::new();
        let err = queue.drain(&mut log).expect_err("should fail");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(log, vec!["ran"]);
    }
}
