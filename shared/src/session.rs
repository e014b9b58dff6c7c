//! The single state container behind the screen.
//!
//! Everything the view shows lives here: the active mode, the captures, the
//! last committed probability and its animation. The view feeds [`Event`]s
//! into [`Session::apply`] and carries out the returned [`Reaction`]
//! (showing a notice, sending a request, building a preview).

use crate::animation::{Animator, Scheduler};
use crate::canvas::{CanvasCapture, Point};
use crate::client::PredictionResult;
use crate::config::{PipelineConfig, RangePolicy};
use crate::error::{PredictionError, SubmissionBlockedError};
use crate::normalizer::{CaptureMode, InputNormalizer};
use crate::notice::Notice;
use crate::payload::{ImagePayload, RawFile};
use crate::risk::RiskBand;

#[derive(Debug)]
pub enum Event {
    SwitchMode(CaptureMode),
    FileChosen(RawFile),
    PreviewReady { selection: u64, preview: String },
    StrokeStarted(Point),
    StrokeMoved(Point),
    StrokeEnded,
    UndoStroke,
    ClearCanvas,
    Submit,
    PredictionFinished {
        ticket: u64,
        outcome: Result<PredictionResult, PredictionError>,
    },
    AnimationTick(u64),
}

/// A request the view has to send. Its outcome comes back as
/// [`Event::PredictionFinished`] with the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub payload: ImagePayload,
}

/// Preview the view should build off the event loop and hand back as
/// [`Event::PreviewReady`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewJob {
    pub selection: u64,
    pub payload: ImagePayload,
}

#[derive(Debug, Default, PartialEq)]
pub struct Reaction {
    pub changed: bool,
    pub notice: Option<Notice>,
    pub submission: Option<Submission>,
    pub preview: Option<PreviewJob>,
}

impl Reaction {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    fn notice(notice: Notice) -> Self {
        Self {
            changed: true,
            notice: Some(notice),
            ..Self::default()
        }
    }
}

pub struct Session<S: Scheduler> {
    normalizer: InputNormalizer,
    animator: Animator<S>,
    range_policy: RangePolicy,
    result: Option<f64>,
    latest_ticket: u64,
    awaiting: Option<u64>,
}

impl<S: Scheduler> Session<S> {
    pub fn new(config: &PipelineConfig, scheduler: S) -> Self {
        Self {
            normalizer: InputNormalizer::new(config),
            animator: Animator::new(scheduler, config.animation),
            range_policy: config.policy.out_of_range,
            result: None,
            latest_ticket: 0,
            awaiting: None,
        }
    }

    pub fn apply(&mut self, event: Event) -> Reaction {
        match event {
            Event::SwitchMode(mode) => Reaction::changed(self.normalizer.switch_mode(mode)),
            Event::FileChosen(raw) => self.handle_file_chosen(raw),
            Event::PreviewReady { selection, preview } => Reaction::changed(
                self.normalizer.upload_mut().attach_preview(selection, preview),
            ),
            Event::StrokeStarted(point) => {
                self.normalizer.canvas_mut().begin_stroke(point);
                Reaction::changed(true)
            }
            Event::StrokeMoved(point) => {
                Reaction::changed(self.normalizer.canvas_mut().extend_stroke(point))
            }
            Event::StrokeEnded => Reaction::changed(self.normalizer.canvas_mut().end_stroke()),
            Event::UndoStroke => {
                Reaction::changed(self.normalizer.canvas_mut().undo_last_stroke().is_some())
            }
            Event::ClearCanvas => {
                self.normalizer.canvas_mut().clear();
                Reaction::changed(true)
            }
            Event::Submit => self.handle_submit(),
            Event::PredictionFinished { ticket, outcome } => {
                self.handle_prediction_finished(ticket, outcome)
            }
            Event::AnimationTick(generation) => {
                Reaction::changed(self.animator.tick(generation).is_some())
            }
        }
    }

    fn handle_file_chosen(&mut self, raw: RawFile) -> Reaction {
        // Reads finish asynchronously; one landing after a switch to Draw
        // belongs to a mode the user already left.
        if self.normalizer.mode() != CaptureMode::Upload {
            log::debug!("Ignoring file {} read outside upload mode", raw.name);
            return Reaction::default();
        }
        match self.normalizer.upload_mut().select(raw) {
            Ok(payload) => {
                let preview = self
                    .normalizer
                    .upload()
                    .selection_id()
                    .map(|selection| PreviewJob { selection, payload });
                Reaction {
                    changed: true,
                    preview,
                    ..Reaction::default()
                }
            }
            Err(err) => Reaction::notice(Notice::from(&err)),
        }
    }

    fn handle_submit(&mut self) -> Reaction {
        match self.normalizer.build_payload() {
            Ok(payload) => {
                self.latest_ticket += 1;
                self.awaiting = Some(self.latest_ticket);
                log::info!(
                    "Submission {} ready: {} ({} bytes)",
                    self.latest_ticket,
                    payload.file_name,
                    payload.len()
                );
                Reaction {
                    changed: true,
                    submission: Some(Submission {
                        ticket: self.latest_ticket,
                        payload,
                    }),
                    ..Reaction::default()
                }
            }
            Err(err) => self.blocked(err),
        }
    }

    fn blocked(&self, err: SubmissionBlockedError) -> Reaction {
        log::warn!("Submission blocked: {}", err);
        Reaction::notice(Notice::from(&err))
    }

    fn handle_prediction_finished(
        &mut self,
        ticket: u64,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> Reaction {
        let notice = match &outcome {
            Ok(_) => Notice::Processed,
            Err(err) => Notice::from(err),
        };

        if ticket != self.latest_ticket {
            log::info!(
                "Discarding result of submission {}, superseded by {}",
                ticket,
                self.latest_ticket
            );
            return Reaction::notice(notice);
        }
        self.awaiting = None;

        match outcome {
            Ok(result) => {
                let target = self.bounded(result.value());
                self.result = Some(target);
                self.animator.start(target);
            }
            Err(err) => log::error!("Submission {} failed: {}", ticket, err),
        }
        Reaction::notice(notice)
    }

    fn bounded(&self, value: f64) -> f64 {
        match self.range_policy {
            RangePolicy::Clamp => {
                let clamped = value.clamp(0.0, 100.0);
                if clamped != value {
                    log::warn!("Probability {} outside [0, 100], clamped to {}", value, clamped);
                }
                clamped
            }
            RangePolicy::PassThrough => value,
        }
    }

    /// Stops the animation timer. Call when the view goes away.
    pub fn shutdown(&mut self) {
        self.animator.cancel();
    }

    pub fn mode(&self) -> CaptureMode {
        self.normalizer.mode()
    }

    pub fn preview(&self) -> Option<&str> {
        match self.normalizer.mode() {
            CaptureMode::Upload => self.normalizer.upload().preview(),
            CaptureMode::Draw => None,
        }
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.normalizer
            .upload()
            .payload()
            .map(|payload| payload.file_name.as_str())
    }

    pub fn canvas(&self) -> &CanvasCapture {
        self.normalizer.canvas()
    }

    /// Whether the results panel is shown.
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Last committed probability, after the range policy.
    pub fn target(&self) -> Option<f64> {
        self.result
    }

    pub fn displayed(&self) -> Option<f64> {
        self.result.map(|_| self.animator.displayed())
    }

    pub fn risk_band(&self) -> Option<RiskBand> {
        self.displayed().map(RiskBand::from_value)
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }
}
