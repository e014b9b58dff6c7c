use super::super::{Model, Msg};
use super::utils::debounce;
use shared::canvas::{CanvasCapture, Stroke};
use shared::{Event, Point};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

fn point_of(event: &MouseEvent) -> Point {
    Point::new(event.offset_x() as f32, event.offset_y() as f32)
}

pub fn render_canvas_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let (width, height) = model.session.canvas().dimensions();

    let on_down = link.callback(|e: MouseEvent| {
        e.prevent_default();
        Msg::Session(Event::StrokeStarted(point_of(&e)))
    });
    let on_move = link.batch_callback(|e: MouseEvent| {
        // Only left-button drags draw.
        (e.buttons() & 1 == 1).then(|| Msg::Session(Event::StrokeMoved(point_of(&e))))
    });
    let on_up = link.callback(|_: MouseEvent| Msg::Session(Event::StrokeEnded));

    html! {
        <div class="canvas-container">
            <canvas
                ref={model.canvas_ref.clone()}
                class="drawing-canvas"
                width={width.to_string()}
                height={height.to_string()}
                onmousedown={on_down}
                onmousemove={on_move}
                onmouseup={on_up}
            />
            <div class="canvas-buttons">
                <button
                    class="clear-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Session(Event::ClearCanvas))
                    })}
                >
                    <i class="fa-solid fa-eraser"></i>{" Clear"}
                </button>
                <button
                    class="undo-btn"
                    onclick={link.callback(|_| Msg::Session(Event::UndoStroke))}
                    disabled={model.session.canvas().surface().is_empty()}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Undo"}
                </button>
            </div>
        </div>
    }
}

/// Repaints the whole surface, including the stroke being dragged.
pub fn redraw_canvas(canvas_ref: &NodeRef, capture: &CanvasCapture) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    let Some(context) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|object| object.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        log::warn!("2d context unavailable");
        return;
    };

    let (width, height) = capture.dimensions();
    let [r, g, b] = capture.brush_color();
    let color = format!("rgb({}, {}, {})", r, g, b);

    context.set_fill_style_str("#ffffff");
    context.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
    context.set_stroke_style_str(&color);
    context.set_fill_style_str(&color);
    context.set_line_width(f64::from(capture.brush_radius()) * 2.0);
    context.set_line_cap("round");
    context.set_line_join("round");

    let radius = f64::from(capture.brush_radius());
    for stroke in capture.surface().strokes().iter().chain(capture.pending()) {
        paint_stroke(&context, stroke, radius);
    }
}

fn paint_stroke(context: &CanvasRenderingContext2d, stroke: &Stroke, radius: f64) {
    match stroke.points() {
        [] => {}
        [only] => {
            context.begin_path();
            if context
                .arc(f64::from(only.x), f64::from(only.y), radius, 0.0, std::f64::consts::TAU)
                .is_ok()
            {
                context.fill();
            }
        }
        [first, rest @ ..] => {
            context.begin_path();
            context.move_to(f64::from(first.x), f64::from(first.y));
            for point in rest {
                context.line_to(f64::from(point.x), f64::from(point.y));
            }
            context.stroke();
        }
    }
}
