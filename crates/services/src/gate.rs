//! In-flight guard for view-owned requests.
//!
//! A view holds one `RequestGate`. `begin` refuses a second request while one is
//! running, and after `teardown` every completion is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::GateError;

#[derive(Debug, Default)]
struct GateState {
    busy: AtomicBool,
    torn_down: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    state: Arc<GateState>,
}

impl RequestGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for one request.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Busy` while another request holds the gate and
    /// `GateError::TornDown` once the owner is gone.
    pub fn begin(&self) -> Result<InFlight, GateError> {
        if self.is_torn_down() {
            return Err(GateError::TornDown);
        }
        self.state
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GateError::Busy)?;
        Ok(InFlight {
            state: Arc::clone(&self.state),
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.busy.load(Ordering::Acquire)
    }

    /// Mark the owner as gone; pending completions become no-ops.
    pub fn teardown(&self) {
        self.state.torn_down.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.state.torn_down.load(Ordering::Acquire)
    }
}

/// Token for one running request. Dropping it releases the gate.
#[derive(Debug)]
pub struct InFlight {
    state: Arc<GateState>,
}

impl InFlight {
    /// Hand back the completion value, or `None` if the owner was torn down
    /// while the request ran.
    #[must_use]
    pub fn finish<T>(self, value: T) -> Option<T> {
        (!self.state.torn_down.load(Ordering::Acquire)).then_some(value)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}
