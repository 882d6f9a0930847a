//! DOM-backed [`View`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlButtonElement,
    HtmlImageElement, Url,
};

use super::describe_js_error;
use super::modal::BootstrapModal;
use crate::config::ElementIds;
use crate::constants::HIDDEN_CLASS;
use crate::error::FlowError;
use crate::flow::{FileDownload, Panel, View};
use crate::model::{ImageKind, StatRow};

/// Look up an element by id and cast it, failing with a readable message.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// The analysis page, with every element the controller touches resolved
/// once at startup.
pub struct DomView {
    document: Document,
    analyze_button: HtmlButtonElement,
    analyze_text: Element,
    analyze_spinner: Element,
    results_card: Element,
    results_table: Element,
    segmented_preview: Element,
    segmented_img: HtmlImageElement,
    colored_preview: Element,
    colored_img: HtmlImageElement,
    plots_card: Element,
    distribution_plot: HtmlImageElement,
    error_message: Element,
    /// `None` when Bootstrap is not loaded; errors then use `alert()`
    error_modal: Option<BootstrapModal>,
}

impl DomView {
    pub fn new(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        let modal_element: Element = element_by_id(document, &ids.error_modal)?;
        let error_modal = match BootstrapModal::new(&modal_element) {
            Ok(modal) => Some(modal),
            Err(e) => {
                log::warn!(
                    "Bootstrap modal unavailable, falling back to alert(): {}",
                    describe_js_error(&e)
                );
                None
            }
        };

        Ok(Self {
            document: document.clone(),
            analyze_button: element_by_id(document, &ids.analyze_button)?,
            analyze_text: element_by_id(document, &ids.analyze_text)?,
            analyze_spinner: element_by_id(document, &ids.analyze_spinner)?,
            results_card: element_by_id(document, &ids.results_card)?,
            results_table: element_by_id(document, &ids.results_table)?,
            segmented_preview: element_by_id(document, &ids.segmented_preview)?,
            segmented_img: element_by_id(document, &ids.segmented_img)?,
            colored_preview: element_by_id(document, &ids.colored_preview)?,
            colored_img: element_by_id(document, &ids.colored_img)?,
            plots_card: element_by_id(document, &ids.plots_card)?,
            distribution_plot: element_by_id(document, &ids.distribution_plot)?,
            error_message: element_by_id(document, &ids.error_message)?,
            error_modal,
        })
    }

    fn panel(&self, panel: Panel) -> &Element {
        match panel {
            Panel::Results => &self.results_card,
            Panel::Plots => &self.plots_card,
            Panel::Preview(ImageKind::Segmented) => &self.segmented_preview,
            Panel::Preview(ImageKind::Colored) => &self.colored_preview,
            // The plot has no wrapper of its own
            Panel::Preview(ImageKind::Distribution) => &self.plots_card,
        }
    }

    fn image(&self, kind: ImageKind) -> &HtmlImageElement {
        match kind {
            ImageKind::Segmented => &self.segmented_img,
            ImageKind::Colored => &self.colored_img,
            ImageKind::Distribution => &self.distribution_plot,
        }
    }

    fn fill_table(&self, rows: &[StatRow]) -> Result<(), JsValue> {
        self.results_table.set_text_content(None);

        for row in rows {
            let tr = self.document.create_element("tr")?;
            let th = self.document.create_element("th")?;
            let td = self.document.create_element("td")?;
            th.set_text_content(Some(row.label));
            td.set_text_content(Some(&row.value));
            tr.append_child(&th)?;
            tr.append_child(&td)?;
            self.results_table.append_child(&tr)?;
        }

        Ok(())
    }

    /// Click a temporary `<a download>` pointing at `url`; the anchor is
    /// removed again once it has been attached.
    fn click_download_link(&self, url: &str, filename: &str) -> Result<(), JsValue> {
        let anchor: HtmlAnchorElement = self.document.create_element("a")?.unchecked_into();
        anchor.set_href(url);
        anchor.set_download(filename);

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?;
        body.append_child(&anchor)?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
}

fn set_hidden(element: &Element, hidden: bool) {
    let classes = element.class_list();
    let result = if hidden {
        classes.add_1(HIDDEN_CLASS)
    } else {
        classes.remove_1(HIDDEN_CLASS)
    };
    if let Err(e) = result {
        log::error!("Failed to update class list: {}", describe_js_error(&e));
    }
}

impl View for DomView {
    fn set_busy(&self, busy: bool, label: &str) {
        self.analyze_text.set_text_content(Some(label));
        set_hidden(&self.analyze_spinner, !busy);
        self.analyze_button.set_disabled(busy);
    }

    fn reveal(&self, panel: Panel) {
        set_hidden(self.panel(panel), false);
    }

    fn set_stats(&self, rows: &[StatRow]) {
        if let Err(e) = self.fill_table(rows) {
            log::error!("Failed to fill statistics table: {}", describe_js_error(&e));
        }
    }

    fn set_image_source(&self, kind: ImageKind, uri: &str) {
        self.image(kind).set_src(uri);
    }

    fn show_error(&self, message: &str) {
        self.error_message.set_text_content(Some(message));

        match &self.error_modal {
            Some(modal) => modal.show(),
            None => {
                let alerted = web_sys::window()
                    .map(|window| window.alert_with_message(message).is_ok())
                    .unwrap_or(false);
                if !alerted {
                    log::error!("Could not display error: {}", message);
                }
            }
        }
    }

    fn save_file(&self, download: &FileDownload) -> Result<(), FlowError> {
        let save_error = |e: JsValue| FlowError::Save(describe_js_error(&e));

        let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(download.mime);
        let blob =
            Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(save_error)?;

        let url = Url::create_object_url_with_blob(&blob).map_err(save_error)?;
        let clicked = self.click_download_link(&url, &download.filename);
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("Failed to revoke {}: {}", url, describe_js_error(&e));
        }

        clicked.map_err(save_error)
    }
}
