use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, Window};

use crate::config::ControllerConfig;
use crate::flow::UploadController;
use crate::web::{DomView, FetchTransport, PageForm, element_by_id};

type PageController = UploadController<FetchTransport, DomView>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Lowered to the configured level once the page config is read
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("Logger already initialised: {}", e).into());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let (win, doc) = (window.clone(), document.clone());
        let on_ready = Closure::<dyn FnMut(Event)>::once(move |_: Event| {
            if let Err(e) = mount(win, doc) {
                log::error!("Failed to start upload controller: {:?}", e);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        mount(window, document)
    }
}

/// Resolve the page, build the controller and attach the two listeners.
fn mount(window: Window, document: Document) -> Result<(), JsValue> {
    let config = ControllerConfig::load_from_page(&document);
    log::set_max_level(config.log_level.to_level_filter());

    let ids = config.elements.clone();
    let form_element: HtmlFormElement = element_by_id(&document, &ids.upload_form)?;
    let file_input: HtmlInputElement = element_by_id(&document, &ids.file_input)?;
    let download_button: HtmlButtonElement = element_by_id(&document, &ids.download_button)?;

    let view = DomView::new(&document, &ids)?;
    let controller: Rc<PageController> = Rc::new(UploadController::new(
        FetchTransport::new(window),
        view,
        config,
    ));
    let form = Rc::new(PageForm::new(form_element.clone(), file_input));

    {
        let controller = controller.clone();
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let controller = controller.clone();
            let form = form.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = controller.handle_analyze_submit(&form).await;
                log::debug!("Analyze flow finished: {:?}", outcome);
            });
        });
        form_element
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget(); // Listener lives as long as the page
    }

    {
        let on_click = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = controller.handle_download_click().await;
                log::debug!("Download flow finished: {:?}", outcome);
            });
        });
        download_button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    log::info!("Upload controller ready");
    Ok(())
}
