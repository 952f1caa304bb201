use crate::data_uri::DataUri;
use crate::layout::{grid_style, image_style, placeholder_style, single_style, PreviewLayout};
use crate::modal::show_image_modal;
use leptos::prelude::*;

#[component]
pub fn PreviewPanel(previews: Vec<String>, layout: PreviewLayout, gap: f64) -> impl IntoView {
    if let Some(text) = layout.placeholder() {
        return view! {
            <div class="encrypt-preview-content-div" style=placeholder_style()>
                {text}
            </div>
        }
        .into_any();
    }

    let container_style = match layout {
        PreviewLayout::Grid { columns } => grid_style(columns, gap),
        _ => single_style().to_string(),
    };

    let images = previews
        .iter()
        .enumerate()
        .map(|(index, payload)| {
            let src = DataUri::png(payload);
            let modal_src = src.clone();
            view! {
                <img
                    src=src
                    alt=format!("Preview {}", index + 1)
                    style=image_style(layout)
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        if let Err(e) = show_image_modal(&modal_src) {
                            tracing::debug!(error = %e, "modal not shown");
                        }
                    }
                />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="encrypt-preview-content-div" style=container_style>
            {images}
        </div>
    }
    .into_any()
}
