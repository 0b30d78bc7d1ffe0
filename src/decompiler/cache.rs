//! A cell that is built at most once at a time and published once.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};

enum State<T> {
    Unbuilt,
    Building,
    Built(T),
}

/// Lazily built, shared value.
///
/// Concurrent first callers of [`get_or_try_build`] run one build; the rest
/// block until it finishes. A failed or panicking build leaves the cell
/// unbuilt and wakes the waiters, one of which builds again.
///
/// [`get_or_try_build`]: BuildOnce::get_or_try_build
pub struct BuildOnce<T> {
    state: Mutex<State<T>>,
    ready: Condvar,
    builds: AtomicUsize,
}

impl<T: Clone> BuildOnce<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Unbuilt),
            ready: Condvar::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// The published value, if any.
    pub fn get(&self) -> Option<T> {
        match &*self.state.lock() {
            State::Built(value) => Some(value.clone()),
            State::Unbuilt | State::Building => None,
        }
    }

    /// Number of builds started, including failed ones.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Acquire)
    }

    pub fn get_or_try_build<E>(&self, build: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let mut state = self.state.lock();
        loop {
            match &*state {
                State::Built(value) => return Ok(value.clone()),
                State::Building => {
                    tracing::trace!("waiting for in-flight build");
                    self.ready.wait(&mut state);
                }
                State::Unbuilt => break,
            }
        }
        *state = State::Building;
        drop(state);

        self.builds.fetch_add(1, Ordering::AcqRel);
        let mut guard = ResetOnUnwind { cell: self, armed: true };
        let result = build();
        guard.armed = false;

        let mut state = self.state.lock();
        *state = match &result {
            Ok(value) => State::Built(value.clone()),
            Err(_) => State::Unbuilt,
        };
        drop(state);
        self.ready.notify_all();
        result
    }

    fn reset(&self) {
        *self.state.lock() = State::Unbuilt;
        self.ready.notify_all();
    }
}

impl<T: Clone> Default for BuildOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BuildOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.lock() {
            State::Unbuilt => "unbuilt",
            State::Building => "building",
            State::Built(_) => "built",
        };
        f.debug_struct("BuildOnce")
            .field("state", &state)
            .field("builds", &self.builds.load(Ordering::Acquire))
            .finish()
    }
}

/// Returns the cell to `Unbuilt` if the build closure panics.
struct ResetOnUnwind<'a, T: Clone> {
    cell: &'a BuildOnce<T>,
    armed: bool,
}

impl<T: Clone> Drop for ResetOnUnwind<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("build panicked; cell reset");
            self.cell.reset();
        }
    }
}
