//! Test doubles for the transport and scheduler seams.

use crate::animation::Scheduler;
use crate::client::{MultipartForm, Transport, TransportResponse};
use crate::error::TransportError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    /// `None` for GET requests.
    pub form: Option<MultipartForm>,
}

/// Answers every request with the same canned reply and records it.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Result<TransportResponse, TransportError>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(cause: &str) -> Self {
        Self {
            reply: Err(TransportError::Network(cause.to_string())),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            url: url.to_string(),
            form: Some(form),
        });
        self.reply.clone()
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            url: url.to_string(),
            form: None,
        });
        self.reply.clone()
    }
}

struct VirtualTimerEntry {
    generation: u64,
    period_ms: u64,
    next_due_ms: u64,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct VirtualClock {
    now_ms: u64,
    timers: Vec<VirtualTimerEntry>,
}

/// Scheduler whose time only moves when [`VirtualScheduler::advance`] is
/// called. Clones share the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

/// Cancelled when dropped.
pub struct VirtualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for VirtualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for VirtualScheduler {
    type Timer = VirtualTimer;

    fn every(&self, period_ms: u32, generation: u64) -> VirtualTimer {
        let mut clock = self.clock.borrow_mut();
        let period_ms = u64::from(period_ms.max(1));
        let cancelled = Rc::new(Cell::new(false));
        let next_due_ms = clock.now_ms + period_ms;
        clock.timers.push(VirtualTimerEntry {
            generation,
            period_ms,
            next_due_ms,
            cancelled: Rc::clone(&cancelled),
        });
        VirtualTimer { cancelled }
    }
}

impl VirtualScheduler {
    /// Moves time forward and returns the generations of every timer that
    /// fired, in firing order.
    pub fn advance(&self, ms: u64) -> Vec<u64> {
        let mut clock = self.clock.borrow_mut();
        clock.timers.retain(|timer| !timer.cancelled.get());
        let end = clock.now_ms + ms;

        let mut fired = Vec::new();
        for (order, timer) in clock.timers.iter_mut().enumerate() {
            while timer.next_due_ms <= end {
                fired.push((timer.next_due_ms, order, timer.generation));
                timer.next_due_ms += timer.period_ms;
            }
        }
        fired.sort_unstable();
        clock.now_ms = end;

        fired.into_iter().map(|(_, _, generation)| generation).collect()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    pub fn active_timers(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }
}
