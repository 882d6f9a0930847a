//! `fetch`-backed [`Transport`] and the page's upload form.

use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, HtmlInputElement, Request, RequestInit, Response, Window};

use super::describe_js_error;
use crate::error::FlowError;
use crate::flow::{HttpResponse, SelectedFile, Transport, UploadForm};

fn transport_error(e: JsValue) -> FlowError {
    FlowError::Transport(describe_js_error(&e))
}

/// The upload form together with its file input.
#[derive(Clone)]
pub struct PageForm {
    form: HtmlFormElement,
    file_input: HtmlInputElement,
}

impl PageForm {
    pub fn new(form: HtmlFormElement, file_input: HtmlInputElement) -> Self {
        Self { form, file_input }
    }

    /// All fields of the form, file included, as multipart data.
    fn form_data(&self) -> Result<FormData, JsValue> {
        FormData::new_with_form(&self.form)
    }
}

impl UploadForm for PageForm {
    fn selected_files(&self) -> Vec<SelectedFile> {
        let Some(files) = self.file_input.files() else {
            return Vec::new();
        };

        (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| SelectedFile {
                name: file.name(),
                size: file.size() as u64,
            })
            .collect()
    }

    fn field(&self, name: &str) -> Option<String> {
        let data = self.form_data().ok()?;
        if !data.has(name) {
            return None;
        }
        data.get(name).as_string()
    }
}

/// Sends requests with the browser's `fetch`.
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    async fn send(&self, request: Request) -> Result<HttpResponse, FlowError> {
        let response: Response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?
            .dyn_into()
            .map_err(|_| FlowError::Transport("fetch did not return a Response".to_string()))?;

        let buffer = JsFuture::from(response.array_buffer().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(HttpResponse {
            status: response.status(),
            body: Uint8Array::new(&buffer).to_vec(),
        })
    }
}

impl Transport for FetchTransport {
    type Form = PageForm;

    async fn post_form(&self, url: &str, form: &PageForm) -> Result<HttpResponse, FlowError> {
        let data = form.form_data().map_err(transport_error)?;

        // No Content-Type header: the browser adds the multipart boundary
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&data);

        let request = Request::new_with_str_and_init(url, &init).map_err(transport_error)?;
        self.send(request).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, FlowError> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &init).map_err(transport_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport_error)?;
        self.send(request).await
    }
}
