use super::super::{Model, Msg};
use crate::api::BrowserTransport;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::{Event, Notice, PredictionClient, PreviewJob, RawFile, Reaction, Submission};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const NOTICE_DURATION_MS: u32 = 4000;

pub fn handle_session_event(model: &mut Model, ctx: &Context<Model>, event: Event) -> bool {
    let reaction = model.session.apply(event);
    react(model, ctx, reaction)
}

fn react(model: &mut Model, ctx: &Context<Model>, reaction: Reaction) -> bool {
    let Reaction {
        changed,
        notice,
        submission,
        preview,
    } = reaction;

    if let Some(job) = preview {
        build_preview(ctx, job);
    }
    if let Some(submission) = submission {
        send_prediction_request(ctx, model.client.clone(), submission);
    }
    match notice {
        Some(notice) => show_notice(model, ctx, notice),
        None => changed,
    }
}

pub fn show_notice(model: &mut Model, ctx: &Context<Model>, notice: Notice) -> bool {
    if let Some(timeout) = model.notice_timeout.take() {
        timeout.cancel();
    }
    model.notice = Some(notice);

    let link = ctx.link().clone();
    model.notice_timeout = Some(Timeout::new(NOTICE_DURATION_MS, move || {
        link.send_message(Msg::DismissNotice);
    }));
    true
}

pub fn handle_file_selected(ctx: &Context<Model>, file: GlooFile) -> bool {
    let link = ctx.link().clone();
    spawn_local(async move {
        match gloo_file::futures::read_as_bytes(&file).await {
            Ok(bytes) => {
                let raw = RawFile {
                    name: file.name(),
                    content_type: file.raw_mime_type(),
                    bytes,
                };
                link.send_message(Msg::Session(Event::FileChosen(raw)));
            }
            Err(e) => link.send_message(Msg::FileReadFailed(e.to_string())),
        }
    });
    false
}

fn build_preview(ctx: &Context<Model>, job: PreviewJob) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let preview = job.payload.to_data_uri();
        link.send_message(Msg::Session(Event::PreviewReady {
            selection: job.selection,
            preview,
        }));
    });
}

fn send_prediction_request(
    ctx: &Context<Model>,
    client: Rc<PredictionClient<BrowserTransport>>,
    submission: Submission,
) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let Submission { ticket, payload } = submission;
        let outcome = client.submit(payload).await;
        if let Err(e) = &outcome {
            gloo_console::error!(format!("Prediction {} failed: {}", ticket, e));
        }
        link.send_message(Msg::Session(Event::PredictionFinished { ticket, outcome }));
    });
}

pub fn check_service_status(ctx: &Context<Model>, client: Rc<PredictionClient<BrowserTransport>>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let status = client.status().await.map_err(|e| {
            log::warn!("Classification service unavailable: {}", e);
            e.to_string()
        });
        link.send_message(Msg::ServiceStatus(status));
    });
}
