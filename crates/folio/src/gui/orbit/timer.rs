use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// At most one pending one-shot timeout. The slot is emptied when the
/// timeout fires, so `cancel` never removes a source that is already gone.
#[derive(Debug, Default)]
pub struct PendingTimeout {
    source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl PendingTimeout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending timeout with one that runs `f` after `delay`.
    pub fn schedule<F: FnOnce() + 'static>(&self, delay: Duration, f: F) {
        self.cancel();
        let slot = self.source.clone();
        let id = glib::timeout_add_local_once(delay, move || {
            slot.borrow_mut().take();
            f();
        });
        *self.source.borrow_mut() = Some(id);
    }

    pub fn is_pending(&self) -> bool {
        self.source.borrow().is_some()
    }

    pub fn cancel(&self) {
        let id = self.source.borrow_mut().take();
        if let Some(id) = id {
            id.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn run_until(ctx: &glib::MainContext, done: impl Fn() -> bool) {
        while !done() {
            ctx.iteration(true);
        }
    }

    #[test]
    fn test_fired_timeout_clears_itself() {
        let ctx = glib::MainContext::new();
        ctx.with_thread_default(|| {
            let fired = Rc::new(Cell::new(false));
            let timer = PendingTimeout::new();
            let f = fired.clone();
            timer.schedule(Duration::from_millis(1), move || f.set(true));
            assert!(timer.is_pending());

            run_until(&ctx, || fired.get());
            assert!(!timer.is_pending());
            timer.cancel();
        })
        .unwrap();
    }

    #[test]
    fn test_cancel_before_firing() {
        let ctx = glib::MainContext::new();
        ctx.with_thread_default(|| {
            let fired = Rc::new(Cell::new(false));
            let timer = PendingTimeout::new();
            let f = fired.clone();
            timer.schedule(Duration::from_millis(1), move || f.set(true));
            timer.cancel();
            assert!(!timer.is_pending());

            let later = Rc::new(Cell::new(false));
            let l = later.clone();
            glib::timeout_add_local_once(Duration::from_millis(5), move || l.set(true));
            run_until(&ctx, || later.get());
            assert!(!fired.get());
        })
        .unwrap();
    }
}
