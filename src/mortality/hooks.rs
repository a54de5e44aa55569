//! Cancellation and observation hooks for the M2 kernel.
//!
//! Both hooks are optional: [`NeverInterrupt`] and [`NoopObserver`] make
//! the kernel behave as a plain function.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::Cohort;

/// Cooperative cancellation check.
///
/// Consulted once per prey species, before that species writes any output.
pub trait Interrupt {
    /// Return true to abandon the computation.
    fn should_stop(&self) -> bool;
}

/// Interrupt that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    #[inline]
    fn should_stop(&self) -> bool {
        false
    }
}

impl<F: Fn() -> bool> Interrupt for F {
    #[inline]
    fn should_stop(&self) -> bool {
        self()
    }
}

/// Shareable cancellation flag.
///
/// Clones share the same flag, so one clone can be handed to the kernel
/// while another is cancelled from a different thread.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Interrupt for CancelFlag {
    #[inline]
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}

/// One summed term of the M2 reduction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredationTerm {
    /// Prey cohort (msp, nsz) receiving the contribution.
    pub prey: Cohort,
    /// Predator cohort (isp, jsz) exerting it.
    pub predator: Cohort,
    /// ration * N * suitability
    pub numerator: f64,
    /// Food available to the predator cohort, including other food.
    pub denominator: f64,
    /// Value actually added to M2 before scaling by phi_min.
    pub contribution: f64,
}

/// Receives every term of the reduction.
pub trait PredationObserver {
    fn on_term(&mut self, term: &PredationTerm);
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PredationObserver for NoopObserver {
    #[inline]
    fn on_term(&mut self, _term: &PredationTerm) {}
}

impl<F: FnMut(&PredationTerm)> PredationObserver for F {
    #[inline]
    fn on_term(&mut self, term: &PredationTerm) {
        self(term)
    }
}
