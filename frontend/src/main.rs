mod api;
mod components;
mod scheduler;

use api::BrowserTransport;
use components::canvas_area::{redraw_canvas, render_canvas_area};
use components::handlers;
use components::header::render_header;
use components::mode_selector::render_mode_selector;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::{debounce, render_notice, render_service_status};
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use scheduler::BrowserScheduler;
use shared::{CaptureMode, Event, Notice, PipelineConfig, PredictionClient, Session};
use std::rc::Rc;
use yew::prelude::*;

const BUNDLED_CONFIG: &str = include_str!("../../config/pipeline.yaml");

pub enum Msg {
    // Everything the core state container handles
    Session(Event),

    // File reading
    FileSelected(GlooFile),
    FileReadFailed(String),

    // UI states
    ServiceStatus(Result<String, String>),
    DismissNotice,
}

#[derive(Clone, PartialEq)]
pub enum ServiceState {
    Checking,
    Online(String),
    Offline(String),
}

pub struct Model {
    session: Session<BrowserScheduler>,
    client: Rc<PredictionClient<BrowserTransport>>,
    notice: Option<Notice>,
    notice_timeout: Option<Timeout>,
    service: ServiceState,
    canvas_ref: NodeRef,
    _mouseup_listener: Option<EventListener>,
}

fn load_config() -> PipelineConfig {
    PipelineConfig::from_yaml_str(BUNDLED_CONFIG).unwrap_or_else(|e| {
        log::warn!("Falling back to default configuration: {}", e);
        PipelineConfig::default()
    })
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = load_config();
        let client = Rc::new(PredictionClient::new(BrowserTransport, &config.service));
        handlers::check_service_status(ctx, client.clone());

        // A stroke released outside the canvas still has to end.
        let mouseup_listener = web_sys::window().map(|window| {
            let link = ctx.link().clone();
            EventListener::new(&window, "mouseup", move |_| {
                link.send_message(Msg::Session(Event::StrokeEnded));
            })
        });

        Self {
            session: Session::new(&config, BrowserScheduler::new(ctx.link().clone())),
            client,
            notice: None,
            notice_timeout: None,
            service: ServiceState::Checking,
            canvas_ref: NodeRef::default(),
            _mouseup_listener: mouseup_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Session(event) => handlers::handle_session_event(self, ctx, event),
            Msg::FileSelected(file) => handlers::handle_file_selected(ctx, file),
            Msg::FileReadFailed(reason) => {
                log::error!("Failed to read selected file: {}", reason);
                handlers::show_notice(self, ctx, Notice::UploadFailed)
            }
            Msg::ServiceStatus(status) => {
                self.service = match status {
                    Ok(status) => ServiceState::Online(status),
                    Err(reason) => ServiceState::Offline(reason),
                };
                true
            }
            Msg::DismissNotice => {
                self.notice = None;
                self.notice_timeout = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link().clone();
        let mode = self.session.mode();

        html! {
            <div class="container">
                { render_header() }
                { render_service_status(&self.service) }
                { render_mode_selector(mode, ctx.link()) }

                <main class="main-content">
                    { if mode == CaptureMode::Draw { render_canvas_area(self, ctx) } else { html! {} } }
                    { if mode == CaptureMode::Upload { render_preview_area(self) } else { html! {} } }
                    <div class="side-panel">
                        { render_results(self) }
                    </div>
                </main>

                { if mode == CaptureMode::Upload { render_upload_section(ctx) } else { html! {} } }

                <button
                    class="submit-btn"
                    onclick={debounce(300, move || link.send_message(Msg::Session(Event::Submit)))}
                >
                    {
                        if self.session.is_awaiting() {
                            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> }
                        } else {
                            html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Predict"}</> }
                        }
                    }
                </button>

                { render_notice(self.notice) }
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.session.mode() == CaptureMode::Draw {
            redraw_canvas(&self.canvas_ref, self.session.canvas());
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.shutdown();
        self.notice_timeout = None;
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
