use super::super::Model;
use shared::RiskBand;
use shared::risk::format_percentage;
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let (Some(displayed), Some(band)) = (model.session.displayed(), model.session.risk_band()) else {
        return html! {};
    };

    html! {
        <>
            <div class={classes!("probability-container", band.to_string())}>
                <p class="probability-text" style={format!("color: {};", band.color())}>
                    { format_percentage(displayed) }
                </p>
            </div>
            <div class="info-box">
                <h3><i class="fa-solid fa-circle-info"></i>{" Risk Levels"}</h3>
                { for RiskBand::iter().map(|level| html! {
                    <p class={classes!("risk-level", (level == band).then_some("current"))}>
                        <b style={format!("color: {};", level.color())}>{ level.range_label() }</b>
                        { format!(": {}", level.description()) }
                    </p>
                }) }
            </div>
        </>
    }
}
