use gloo_timers::future::TimeoutFuture;
use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::ExportError;
use crate::models::Snapshot;
use crate::pipeline::csv::{build_csv, export_file_name};

/// Serialises the visible rows and hands them to the browser as a file
/// download. Does nothing when there are no rows.
pub fn download_csv(rows: &[Snapshot], month: Option<&str>) -> Result<(), ExportError> {
    let Some(body) = build_csv(rows) else {
        return Ok(());
    };
    let file_name = export_file_name(month);

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&body));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::NoWindow)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| ExportError::Browser("created element is not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(&file_name);
    anchor.click();
    revoke_later(url);

    info!("exported {} rows to {}", rows.len(), file_name);
    Ok(())
}

// The URL has to outlive the click until the download has started.
const REVOKE_DELAY_MS: u32 = 1_000;

fn revoke_later(url: String) {
    spawn_local(async move {
        TimeoutFuture::new(REVOKE_DELAY_MS).await;
        if Url::revoke_object_url(&url).is_err() {
            debug!("could not revoke object URL {}", url);
        }
    });
}
