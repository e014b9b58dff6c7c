use super::super::ServiceState;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::{Notice, NoticeLevel};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Type checking happens in the core, so any file is handed over.
pub fn first_file(file_list: &FileList) -> Option<GlooFile> {
    file_list.item(0).map(GlooFile::from)
}

pub fn render_notice(notice: Option<Notice>) -> Html {
    let Some(notice) = notice else {
        return html! {};
    };
    let (class, icon) = match notice.level() {
        NoticeLevel::Success => ("notice notice-success", "fa-solid fa-circle-check"),
        NoticeLevel::Error => ("notice notice-error", "fa-solid fa-circle-exclamation"),
    };

    html! {
        <div class={class}>
            <i class={icon}></i>
            <p>{ notice.message() }</p>
        </div>
    }
}

pub fn render_service_status(service: &ServiceState) -> Html {
    let (class, label) = match service {
        ServiceState::Checking => ("service-status checking", "Checking service...".to_string()),
        ServiceState::Online(status) => ("service-status online", format!("Service: {}", status)),
        ServiceState::Offline(_) => ("service-status offline", "Service unreachable".to_string()),
    };
    let title = match service {
        ServiceState::Offline(reason) => reason.clone(),
        _ => String::new(),
    };

    html! {
        <div class={class} title={title}>{ label }</div>
    }
}
