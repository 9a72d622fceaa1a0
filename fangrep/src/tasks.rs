use std::sync::{Arc, Condvar, Mutex};

/// Tracks the number of in-flight traversal and scan tasks so the driver
/// can block until the whole search has finished.
///
/// The spawning context must call [`register`](TaskGroup::register) before
/// handing work to the scheduler; a task that registered itself after
/// starting could let [`wait`](TaskGroup::wait) observe a false zero while
/// the task was still being scheduled. Every registration is paired with
/// exactly one [`release`](TaskGroup::release), normally through the
/// [`TaskGuard`] returned by [`guard`](TaskGroup::guard) so the release
/// also happens on error exits.
#[derive(Clone, Default)]
pub struct TaskGroup {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    outstanding: Mutex<usize>,
    done: Condvar,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more in-flight task. Call before spawning it.
    pub fn register(&self) {
        let mut outstanding = self.inner.outstanding.lock().unwrap();
        *outstanding += 1;
    }

    /// Records the completion of one task, waking waiters when the last
    /// one finishes.
    pub fn release(&self) {
        let mut outstanding = self.inner.outstanding.lock().unwrap();
        debug_assert!(*outstanding > 0, "release without a matching register");
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.inner.done.notify_all();
        }
    }

    /// Blocks until every registered task has released.
    pub fn wait(&self) {
        let mut outstanding = self.inner.outstanding.lock().unwrap();
        while *outstanding > 0 {
            outstanding = self.inner.done.wait(outstanding).unwrap();
        }
    }

    /// Current number of registered, unreleased tasks.
    pub fn outstanding(&self) -> usize {
        *self.inner.outstanding.lock().unwrap()
    }

    /// Returns a guard that releases one registration when dropped.
    ///
    /// The corresponding `register` must already have happened in the
    /// spawning context.
    pub fn guard(&self) -> TaskGuard {
        TaskGuard {
            group: self.clone(),
        }
    }
}

/// Releases one [`TaskGroup`] registration on drop, so a task's
/// registration is returned on every exit path.
pub struct TaskGuard {
    group: TaskGroup,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.group.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_immediately_when_empty() {
        let tasks = TaskGroup::new();
        tasks.wait();
        assert_eq!(tasks.outstanding(), 0);
    }

    #[test]
    fn test_register_and_release() {
        let tasks = TaskGroup::new();
        tasks.register();
        tasks.register();
        assert_eq!(tasks.outstanding(), 2);
        tasks.release();
        assert_eq!(tasks.outstanding(), 1);
        tasks.release();
        assert_eq!(tasks.outstanding(), 0);
        tasks.wait();
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let tasks = TaskGroup::new();
        tasks.register();
        {
            let _guard = tasks.guard();
            assert_eq!(tasks.outstanding(), 1);
        }
        assert_eq!(tasks.outstanding(), 0);
    }

    #[test]
    fn test_wait_blocks_until_all_released() {
        let tasks = TaskGroup::new();
        tasks.register();

        let worker = {
            let tasks = tasks.clone();
            thread::spawn(move || {
                let _guard = tasks.guard();
                thread::sleep(Duration::from_millis(50));
            })
        };

        tasks.wait();
        assert_eq!(tasks.outstanding(), 0);
        worker.join().unwrap();
    }

    #[test]
    fn test_concurrent_register_release() {
        let tasks = TaskGroup::new();
        let mut handles = Vec::new();

        for _ in 0..8 {
            tasks.register();
            let tasks = tasks.clone();
            handles.push(thread::spawn(move || {
                let _guard = tasks.guard();
                for _ in 0..100 {
                    tasks.register();
                    let inner = tasks.clone();
                    let _inner_guard = inner.guard();
                }
            }));
        }

        tasks.wait();
        assert_eq!(tasks.outstanding(), 0);
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
