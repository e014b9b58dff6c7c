use gloo_file::Blob;
use gloo_net::http::{Request, Response};
use shared::client::{MultipartForm, Transport, TransportResponse};
use shared::error::TransportError;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// Sends requests through the browser's fetch.
#[derive(Clone, Copy, Default)]
pub struct BrowserTransport;

fn js_error(err: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", err))
}

fn network_error(err: gloo_net::Error) -> TransportError {
    gloo_console::error!(format!("Fetch error: {}", err));
    TransportError::Network(err.to_string())
}

fn to_form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
    let blob = Blob::new_with_options(form.bytes.as_slice(), Some(form.content_type.as_str()));
    let form_data = FormData::new().map_err(js_error)?;
    form_data
        .append_with_blob_and_filename(&form.field_name, blob.as_ref(), &form.file_name)
        .map_err(js_error)?;
    Ok(form_data)
}

async fn read_response(response: Response) -> Result<TransportResponse, TransportError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    Ok(TransportResponse { status, body })
}

impl Transport for BrowserTransport {
    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<TransportResponse, TransportError> {
        let request = Request::post(url)
            .body(to_form_data(&form)?)
            .map_err(network_error)?;
        let response = request.send().await.map_err(network_error)?;
        read_response(response).await
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = Request::get(url).send().await.map_err(network_error)?;
        read_response(response).await
    }
}
