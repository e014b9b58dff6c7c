use super::super::{Model, Msg};
use shared::{CaptureMode, Event};
use strum::IntoEnumIterator;
use yew::html::Scope;
use yew::prelude::*;

fn label(mode: CaptureMode) -> Html {
    match mode {
        CaptureMode::Upload => html! { <><i class="fa-solid fa-upload"></i>{" Select an image"}</> },
        CaptureMode::Draw => html! { <><i class="fa-solid fa-pen"></i>{" Draw an image"}</> },
    }
}

pub fn render_mode_selector(active: CaptureMode, link: &Scope<Model>) -> Html {
    html! {
        <div class="mode-selector">
            { for CaptureMode::iter().map(|mode| html! {
                <label class={classes!("mode-option", (mode == active).then_some("selected"))}>
                    <input type="radio" name="capture_mode"
                        value={mode.to_string()}
                        checked={mode == active}
                        onchange={link.callback(move |_| Msg::Session(Event::SwitchMode(mode)))} />
                    <span class="radio-label-text">{ label(mode) }</span>
                </label>
            }) }
        </div>
    }
}
