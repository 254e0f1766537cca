use std::cell::RefCell;
use std::time::Duration;

use tokio::task::JoinHandle;

// Dropping the handle does not cancel the callback.
#[derive(Debug)]
pub struct Timeout {
    handle: JoinHandle<()>,
}

impl Timeout {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// Spawns a local task, so callers must be inside a `LocalSet`.
pub fn set_timeout<F>(delay: Duration, f: F) -> Timeout
where
    F: FnOnce() + 'static,
{
    let handle = tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;
        f();
    });
    Timeout { handle }
}

#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: RefCell::new(None),
        }
    }

    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let mut pending = self.pending.borrow_mut();
        if let Some(prev) = pending.take() {
            prev.cancel();
        }
        *pending = Some(set_timeout(self.wait, f));
    }

    pub fn cancel(&self) {
        if let Some(prev) = self.pending.borrow_mut().take() {
            prev.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_once_after_delay() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(0));
                let f = fired.clone();
                set_timeout(Duration::from_millis(200), move || f.set(f.get() + 1));

                tokio::time::sleep(Duration::from_millis(199)).await;
                assert_eq!(fired.get(), 0);
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert_eq!(fired.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_keeps_only_last_call() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let seen = Rc::new(RefCell::new(Vec::new()));
                let debouncer = Debouncer::new(Duration::from_millis(300));

                for word in ["o", "on", "one"] {
                    let seen = seen.clone();
                    debouncer.call(move || seen.borrow_mut().push(word));
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                assert!(seen.borrow().is_empty());
                assert!(debouncer.is_pending());

                tokio::time::sleep(Duration::from_millis(250)).await;
                assert_eq!(*seen.borrow(), vec!["one"]);
                assert!(!debouncer.is_pending());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_debounce_never_fires() {
        tokio::task::LocalSet::new()
            .run_until(async {
                let fired = Rc::new(Cell::new(false));
                let debouncer = Debouncer::new(Duration::from_millis(300));
                let f = fired.clone();
                debouncer.call(move || f.set(true));
                debouncer.cancel();
                tokio::time::sleep(Duration::from_secs(1)).await;
                assert!(!fired.get());
            })
            .await;
    }
}
