use futures::executor::block_on;
use shared::error::{CaptureError, PredictionError, SubmissionBlockedError};
use shared::testing::{RecordingTransport, VirtualScheduler};
use shared::{
    CaptureMode, Event, Notice, PipelineConfig, Point, PredictionClient, RawFile, RiskBand, Session,
};

struct Harness {
    session: Session<VirtualScheduler>,
    scheduler: VirtualScheduler,
    client: PredictionClient<RecordingTransport>,
}

impl Harness {
    fn new(transport: RecordingTransport) -> Self {
        let config = PipelineConfig::default();
        let scheduler = VirtualScheduler::default();
        Self {
            session: Session::new(&config, scheduler.clone()),
            scheduler,
            client: PredictionClient::new(transport, &config.service),
        }
    }

    /// Runs one submit the way the frontend does and returns the notice.
    fn submit(&mut self) -> Option<Notice> {
        let reaction = self.session.apply(Event::Submit);
        let Some(submission) = reaction.submission else {
            return reaction.notice;
        };
        let outcome = block_on(self.client.submit(submission.payload));
        self.session
            .apply(Event::PredictionFinished {
                ticket: submission.ticket,
                outcome,
            })
            .notice
    }

    fn settle(&mut self) -> usize {
        let mut ticks = 0;
        while self.session.is_animating() {
            for generation in self.scheduler.advance(30) {
                if self.session.apply(Event::AnimationTick(generation)).changed {
                    ticks += 1;
                }
            }
        }
        ticks
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.session.apply(Event::StrokeStarted(Point::new(from.0, from.1)));
        self.session.apply(Event::StrokeMoved(Point::new(to.0, to.1)));
        self.session.apply(Event::StrokeEnded);
    }

    fn calls(&self) -> usize {
        self.client.transport().calls().len()
    }
}

fn image_file() -> RawFile {
    RawFile {
        name: "clock.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3],
    }
}

#[test]
fn upload_submission_issues_exactly_one_call() {
    let mut harness = Harness::new(RecordingTransport::replying(
        200,
        r#"{"status": "Success", "probability": "64.20%"}"#,
    ));
    harness.session.apply(Event::FileChosen(image_file()));

    assert_eq!(harness.submit(), Some(Notice::Processed));

    let calls = harness.client.transport().calls();
    assert_eq!(calls.len(), 1);
    let form = calls[0].form.as_ref().unwrap();
    assert_eq!(form.field_name, "file");
    assert_eq!(form.file_name, "clock.png");
    assert_eq!(form.content_type, "image/png");
    assert!(!form.bytes.is_empty());

    let ticks = harness.settle();
    assert!(ticks <= 51);
    assert_eq!(harness.session.displayed(), Some(64.2));
    assert_eq!(harness.session.risk_band(), Some(RiskBand::Medium));
}

#[test]
fn draw_submission_sends_png() {
    let mut harness = Harness::new(RecordingTransport::replying(200, r#"{"probability": "10.00%"}"#));
    harness.session.apply(Event::SwitchMode(CaptureMode::Draw));
    harness.draw_line((50.0, 50.0), (200.0, 150.0));

    assert_eq!(harness.submit(), Some(Notice::Processed));
    let calls = harness.client.transport().calls();
    let form = calls[0].form.as_ref().unwrap();
    assert_eq!(form.file_name, "drawing.png");
    assert_eq!(&form.bytes[1..4], b"PNG");
}

#[test]
fn nothing_ready_never_reaches_the_network() {
    let mut harness = Harness::new(RecordingTransport::replying(200, r#"{"probability": "1%"}"#));

    assert_eq!(harness.submit(), Some(Notice::NoFileSelected));
    harness.session.apply(Event::SwitchMode(CaptureMode::Draw));
    assert_eq!(harness.submit(), Some(Notice::DrawingNotFinished));

    assert_eq!(harness.calls(), 0);
    assert!(!harness.session.has_result());
}

#[test]
fn switching_to_draw_does_not_reuse_selected_file() {
    let mut harness = Harness::new(RecordingTransport::replying(200, r#"{"probability": "1%"}"#));
    harness.session.apply(Event::FileChosen(image_file()));
    harness.session.apply(Event::SwitchMode(CaptureMode::Draw));

    let reaction = harness.session.apply(Event::Submit);
    assert_eq!(reaction.notice, Some(Notice::DrawingNotFinished));
    assert!(reaction.submission.is_none());
    assert_eq!(harness.calls(), 0);
}

#[test]
fn undo_changes_the_exported_drawing() {
    let mut harness = Harness::new(RecordingTransport::replying(200, r#"{"probability": "1%"}"#));
    harness.session.apply(Event::SwitchMode(CaptureMode::Draw));
    harness.draw_line((10.0, 10.0), (100.0, 10.0));
    harness.draw_line((10.0, 100.0), (100.0, 100.0));
    harness.draw_line((10.0, 200.0), (100.0, 200.0));

    let three = harness.session.canvas().export().unwrap();
    harness.session.apply(Event::UndoStroke);
    let two = harness.session.canvas().export().unwrap();

    assert!(!two.bytes.is_empty());
    assert_ne!(two.bytes, three.bytes);
    assert_eq!(harness.session.canvas().surface().len(), 2);
}

#[test]
fn boundary_probabilities_round_trip() {
    for (body, expected) in [
        (r#"{"probability": "0.00%"}"#, 0.0),
        (r#"{"probability": "100.00%"}"#, 100.0),
    ] {
        let mut harness = Harness::new(RecordingTransport::replying(200, body));
        harness.session.apply(Event::FileChosen(image_file()));
        assert_eq!(harness.submit(), Some(Notice::Processed));
        harness.settle();
        assert_eq!(harness.session.displayed(), Some(expected));
    }
}

#[test]
fn malformed_responses_are_reported_not_animated() {
    for body in [r#"{"probability": "abc%"}"#, r#"{"status": "Success"}"#] {
        let mut harness = Harness::new(RecordingTransport::replying(200, body));
        harness.session.apply(Event::FileChosen(image_file()));

        let payload = harness.session.apply(Event::Submit).submission.unwrap().payload;
        let err = block_on(harness.client.submit(payload)).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));

        assert_eq!(harness.submit(), Some(Notice::ProbabilityParseFailed));
        assert!(!harness.session.has_result());
        assert!(!harness.session.is_animating());
    }
}

#[test]
fn transport_failures_are_reported() {
    let mut harness = Harness::new(RecordingTransport::failing("connection refused"));
    harness.session.apply(Event::FileChosen(image_file()));
    assert_eq!(harness.submit(), Some(Notice::SubmissionFailed));
    assert_eq!(harness.calls(), 1);

    let mut harness = Harness::new(RecordingTransport::replying(500, "Internal Server Error"));
    harness.session.apply(Event::FileChosen(image_file()));
    assert_eq!(harness.submit(), Some(Notice::SubmissionFailed));
}

#[test]
fn normalizer_errors_carry_the_reason() {
    let mut normalizer = shared::InputNormalizer::new(&PipelineConfig::default());
    assert_eq!(normalizer.build_payload(), Err(SubmissionBlockedError::NoFileSelected));
    normalizer.switch_mode(CaptureMode::Draw);
    assert_eq!(
        normalizer.build_payload(),
        Err(SubmissionBlockedError::EmptyDrawing(CaptureError::EmptySurface))
    );
}
