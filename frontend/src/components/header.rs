use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-brain"></i> {" Cognitive Disorder Screening"}</h1>
            <p class="subtitle">{"Upload a drawing or sketch one on the canvas"}</p>
        </header>
    }
}
