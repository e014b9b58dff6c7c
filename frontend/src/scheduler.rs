use gloo_timers::callback::Interval;
use shared::{Event, Scheduler};
use yew::html::Scope;

use crate::{Model, Msg};

/// Turns animation timers into component messages. Dropping the returned
/// `Interval` clears it.
pub struct BrowserScheduler {
    link: Scope<Model>,
}

impl BrowserScheduler {
    pub fn new(link: Scope<Model>) -> Self {
        Self { link }
    }
}

impl Scheduler for BrowserScheduler {
    type Timer = Interval;

    fn every(&self, period_ms: u32, generation: u64) -> Interval {
        let link = self.link.clone();
        Interval::new(period_ms, move || {
            link.send_message(Msg::Session(Event::AnimationTick(generation)));
        })
    }
}
