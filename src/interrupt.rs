//! Ctrl-C routing
//!
//! The launcher must survive SIGINT in both places it blocks. While an
//! agent runs the signal only marks the run as interrupted (the child,
//! sharing our process group, receives it as well) and the runner takes it
//! from there. Otherwise it is handed to the prompt, which drops it unless
//! a read is being waited on.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AppError;

type Notify = Box<dyn Fn() + Send + Sync>;

struct Shared {
    child_running: AtomicBool,
    child_interrupted: AtomicBool,
    notify_prompt: Notify,
}

#[derive(Clone)]
pub(crate) struct Interrupts {
    shared: Arc<Shared>,
}

impl Interrupts {
    pub(crate) fn new(notify_prompt: impl Fn() + Send + Sync + 'static) -> Self {
        Interrupts {
            shared: Arc::new(Shared {
                child_running: AtomicBool::new(false),
                child_interrupted: AtomicBool::new(false),
                notify_prompt: Box::new(notify_prompt),
            }),
        }
    }

    /// Route the process-wide Ctrl-C handler through a new `Interrupts`.
    /// Can only succeed once per process.
    pub(crate) fn install(
        notify_prompt: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, AppError> {
        let interrupts = Self::new(notify_prompt);
        let handler = interrupts.clone();
        ctrlc::set_handler(move || handler.fire())?;
        Ok(interrupts)
    }

    pub(crate) fn fire(&self) {
        if self.shared.child_running.load(Ordering::SeqCst) {
            self.shared.child_interrupted.store(true, Ordering::SeqCst);
        } else {
            (self.shared.notify_prompt)();
        }
    }

    /// Mark an agent run; the mark is cleared when the scope drops
    pub(crate) fn child_scope(&self) -> ChildScope<'_> {
        self.shared.child_interrupted.store(false, Ordering::SeqCst);
        self.shared.child_running.store(true, Ordering::SeqCst);
        ChildScope { interrupts: self }
    }
}

pub(crate) struct ChildScope<'a> {
    interrupts: &'a Interrupts,
}

impl ChildScope<'_> {
    pub(crate) fn interrupted(&self) -> bool {
        self.interrupts
            .shared
            .child_interrupted
            .load(Ordering::SeqCst)
    }
}

impl Drop for ChildScope<'_> {
    fn drop(&mut self) {
        self.interrupts
            .shared
            .child_running
            .store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting() -> (Interrupts, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let interrupts = Interrupts::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (interrupts, count)
    }

    #[test]
    fn idle_interrupt_goes_to_prompt() {
        let (interrupts, count) = counting();
        interrupts.fire();
        interrupts.fire();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn interrupt_during_child_is_recorded_not_forwarded() {
        let (interrupts, count) = counting();
        let scope = interrupts.child_scope();
        assert!(!scope.interrupted());
        interrupts.fire();
        assert!(scope.interrupted());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropping_scope_restores_prompt_routing() {
        let (interrupts, count) = counting();
        {
            let _scope = interrupts.child_scope();
            interrupts.fire();
        }
        interrupts.fire();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_scope_starts_clean() {
        let (interrupts, _count) = counting();
        {
            let _scope = interrupts.child_scope();
            interrupts.fire();
        }
        let scope = interrupts.child_scope();
        assert!(!scope.interrupted());
    }
}
