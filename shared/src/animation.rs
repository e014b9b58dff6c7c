//! Count-up animation of the displayed probability.
//!
//! The animation is a plain step function. Timing comes from a [`Scheduler`]:
//! the browser wires it to a real interval, tests to a virtual clock. Every
//! timer carries the generation of the animation it belongs to, so ticks from
//! a superseded timer are recognised and ignored.

use crate::config::AnimationConfig;

/// Produces periodic timers. Dropping the returned timer stops it.
pub trait Scheduler {
    type Timer;

    /// Starts a timer that reports `generation` every `period_ms`.
    fn every(&self, period_ms: u32, generation: u64) -> Self::Timer;
}

/// Displayed value converging on `target` in fixed-size steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    target: f64,
    step: f64,
    displayed: f64,
    finished: bool,
}

impl Animation {
    pub fn new(target: f64, config: &AnimationConfig) -> Self {
        let steps = config.steps().max(1.0);
        Self {
            target,
            step: (target / steps).ceil(),
            displayed: 0.0,
            finished: false,
        }
    }

    /// Advances one step and returns the new displayed value. Never
    /// overshoots: the last step lands exactly on the target.
    pub fn tick(&mut self) -> f64 {
        if self.finished {
            return self.displayed;
        }
        self.displayed += self.step;
        if self.displayed >= self.target {
            self.displayed = self.target;
            self.finished = true;
        }
        self.displayed
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle {
    generation: u64,
}

impl AnimationHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Running<T> {
    generation: u64,
    animation: Animation,
    _timer: T,
}

/// Owns at most one running animation and its timer.
pub struct Animator<S: Scheduler> {
    scheduler: S,
    config: AnimationConfig,
    running: Option<Running<S::Timer>>,
    generation: u64,
    displayed: f64,
}

impl<S: Scheduler> Animator<S> {
    pub fn new(scheduler: S, config: AnimationConfig) -> Self {
        Self {
            scheduler,
            config,
            running: None,
            generation: 0,
            displayed: 0.0,
        }
    }

    /// Cancels whatever is running and starts counting up to `target`.
    pub fn start(&mut self, target: f64) -> AnimationHandle {
        self.cancel();
        self.generation += 1;

        let animation = Animation::new(target, &self.config);
        log::debug!(
            "Animation {} towards {:.2} in steps of {}",
            self.generation,
            target,
            animation.step()
        );
        let timer = self.scheduler.every(self.config.interval_ms, self.generation);
        self.running = Some(Running {
            generation: self.generation,
            animation,
            _timer: timer,
        });
        self.displayed = 0.0;

        AnimationHandle {
            generation: self.generation,
        }
    }

    /// Applies one tick from the timer of `generation`. Ticks from any other
    /// generation are ignored and return `None`. The timer is dropped as
    /// soon as the target is reached.
    pub fn tick(&mut self, generation: u64) -> Option<f64> {
        let running = self
            .running
            .as_mut()
            .filter(|running| running.generation == generation)?;

        let value = running.animation.tick();
        self.displayed = value;
        if running.animation.is_finished() {
            log::debug!("Animation {} settled at {:.2}", generation, value);
            self.running = None;
        }
        Some(value)
    }

    /// Stops the running animation, if any. The last displayed value stays.
    pub fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            log::debug!("Animation {} cancelled", running.generation);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_current(&self, handle: AnimationHandle) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.generation == handle.generation)
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }
}
