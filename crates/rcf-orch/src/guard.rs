use std::ops::Deref;

use log::debug;
use rcf_core::{ClosedFormHandle, TermStructure};

/// Scoped owner of a solver handle that releases it exactly once.
///
/// Release happens on [`HandleGuard::release`] or when the guard is dropped,
/// whichever comes first, so every exit path of a run gives the handle back.
#[derive(Debug)]
pub struct HandleGuard {
    label: &'static str,
    handle: Box<dyn ClosedFormHandle>,
}

impl HandleGuard {
    /// Takes ownership of `handle`; `label` names it in log output.
    pub fn new(label: &'static str, handle: Box<dyn ClosedFormHandle>) -> Self {
        Self { label, handle }
    }

    /// Releases the handle now.
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for HandleGuard {
    type Target = dyn ClosedFormHandle;

    fn deref(&self) -> &Self::Target {
        self.handle.as_ref()
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        let handle = std::mem::replace(&mut self.handle, Box::new(Released));
        debug!("releasing {} handle", self.label);
        handle.release();
    }
}

/// Placeholder left behind once the real handle has been released.
#[derive(Debug)]
struct Released;

impl ClosedFormHandle for Released {
    fn term_structure(&self) -> Option<&dyn TermStructure> {
        None
    }

    fn notation(&self, _variable: &str) -> String {
        String::new()
    }

    fn term(&self, _n: u64) -> [f64; 2] {
        [f64::NAN, f64::NAN]
    }

    fn release(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug)]
    struct Counted(Rc<Cell<usize>>);

    impl ClosedFormHandle for Counted {
        fn term_structure(&self) -> Option<&dyn TermStructure> {
            None
        }

        fn notation(&self, _variable: &str) -> String {
            "n".to_string()
        }

        fn term(&self, n: u64) -> [f64; 2] {
            [n as f64, 0.0]
        }

        fn release(self: Box<Self>) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn explicit_release_happens_once() {
        let count = Rc::new(Cell::new(0));
        let guard = HandleGuard::new("test", Box::new(Counted(count.clone())));
        assert_eq!(guard.term(3), [3.0, 0.0]);
        guard.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_releases() {
        let count = Rc::new(Cell::new(0));
        {
            let _guard = HandleGuard::new("test", Box::new(Counted(count.clone())));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unwinding_releases() {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = HandleGuard::new("test", Box::new(Counted(inner)));
            panic!("render blew up");
        }));
        assert!(result.is_err());
        assert_eq!(count.get(), 1);
    }
}
