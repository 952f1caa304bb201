use crate::modal::{close_image_modal, open_active_in_new_tab};
use crate::presenter::ModalContent;
use leptos::prelude::*;

#[component]
pub fn ImageModal(content: ModalContent) -> impl IntoView {
    let body = match content {
        ModalContent::Image(src) => view! {
            <img
                src=src
                style="max-width: 90%; max-height: 90%; object-fit: contain; \
                       border: 2px solid white; border-radius: 5px; cursor: zoom-in;"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    open_active_in_new_tab();
                }
            />
        }
        .into_any(),
        ModalContent::Error(message) => view! {
            <span style="color: white; font-size: 20px;">{message}</span>
        }
        .into_any(),
    };

    view! {
        <div
            class="encrypt-preview-modal-overlay"
            style="position: fixed; inset: 0; background: rgba(0, 0, 0, 0.85); \
                   display: flex; align-items: center; justify-content: center; \
                   z-index: 10001; cursor: pointer;"
            on:click=move |_| {
                close_image_modal();
            }
        >
            {body}
        </div>
    }
}
