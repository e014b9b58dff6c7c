use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    match (model.session.preview(), model.session.selected_file_name()) {
        (Some(url), name) => html! {
            <div class="image-container">
                <img id="actual-image-preview"
                    src={url.to_string()}
                    alt={name.unwrap_or("Selected Image").to_string()} />
            </div>
        },
        (None, Some(_)) => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Loading preview..."}</p>
            </div>
        },
        (None, None) => html! {},
    }
}
