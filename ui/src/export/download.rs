//! Hand a byte buffer to the browser as a file download.

#[cfg(target_arch = "wasm32")]
pub fn trigger_download(filename: &str, content_type: &str, bytes: &[u8]) {
    use wasm_bindgen::JsCast;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);

    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence_and_options(
        &parts, &options,
    ) else {
        tracing::error!("could not build blob for {filename}");
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        tracing::error!("could not create object url for {filename}");
        return;
    };

    let document = web_sys::window().unwrap().document().unwrap();
    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_download(filename: &str, content_type: &str, bytes: &[u8]) {
    let _ = (filename, content_type, bytes);
}
