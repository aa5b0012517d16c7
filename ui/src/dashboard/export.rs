use dioxus::prelude::*;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use crate::core::platform;
use crate::core::{platform::share_link, ChartModel};

use super::svg::{export_svg, SvgSnapshot};

/// Raster scale applied to the export snapshot.
const PIXEL_RATIO: f64 = 2.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unable to read chart SVG: {0}")]
    Svg(String),

    #[error("unable to allocate a {width}x{height} image")]
    Canvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("unable to determine export directory")]
    ExportDir,

    #[error("unable to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser API failed: {0}")]
    Browser(&'static str),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

pub(crate) fn export_filename(topic_id: &str) -> String {
    format!("escrs_{topic_id}.png")
}

/// "Download PNG" and "Copy share link" for the current chart.
#[component]
pub fn ChartActions(model: ChartModel, accent: String) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("chart-actions__status".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "chart-actions__status chart-actions__status--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "chart-actions__status chart-actions__status--error".to_string(),
            err.clone(),
        )),
    };

    let png_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing PNG"));
            let snapshot = export_svg(&model, &accent);
            let filename = export_filename(&model.topic_id);

            #[cfg(target_arch = "wasm32")]
            {
                let mut status_signal = status_signal;
                let mut busy_signal = busy_signal;
                platform::spawn_future(async move {
                    match perform_png_export(snapshot, filename).await {
                        Ok(message) => status_signal.set(ExportStatus::Done(message)),
                        Err(err) => status_signal.set(ExportStatus::Error(err)),
                    }
                    busy_signal.set(false);
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let outcome = futures::executor::block_on(perform_png_export(snapshot, filename));
                match outcome {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            }
        }
    };

    let share_handler = {
        let mut status_signal = status;
        move |_| {
            let link = share_link();

            #[cfg(target_arch = "wasm32")]
            {
                let mut status_signal = status_signal;
                platform::spawn_future(async move {
                    match copy_to_clipboard(link).await {
                        Ok(()) => status_signal.set(ExportStatus::Done("Share link copied!".into())),
                        Err(err) => status_signal.set(ExportStatus::Error(err.to_string())),
                    }
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                match futures::executor::block_on(copy_to_clipboard(link)) {
                    Ok(()) => status_signal.set(ExportStatus::Done("Share link copied!".into())),
                    Err(err) => status_signal.set(ExportStatus::Error(err.to_string())),
                }
            }
        }
    };

    rsx! {
        div { class: "chart-actions",
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: busy(),
                onclick: png_handler,
                "Download PNG"
            }
            button {
                r#type: "button",
                class: "button",
                onclick: share_handler,
                "Copy share link"
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}

async fn perform_png_export(snapshot: SvgSnapshot, filename: String) -> Result<String, String> {
    let outcome = deliver_png(&snapshot, &filename).await;
    match &outcome {
        Ok(message) => tracing::info!(%filename, "{message}"),
        Err(err) => tracing::warn!(%filename, %err, "PNG export failed"),
    }
    outcome.map_err(|err| err.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn deliver_png(snapshot: &SvgSnapshot, filename: &str) -> Result<String, ExportError> {
    use std::fs;

    let bytes = render_png(snapshot, PIXEL_RATIO)?;
    let dir = export_dir()?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(filename);
    fs::write(&path, bytes)?;
    Ok(format!("PNG saved to {}", path.display()))
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("org", "ESCRS", "SurveyExplorer")
        .ok_or(ExportError::ExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

/// Rasterize the snapshot at `scale` and encode it as PNG.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn render_png(snapshot: &SvgSnapshot, scale: f64) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&snapshot.markup, &options)
        .map_err(|err| ExportError::Svg(err.to_string()))?;

    let width = (snapshot.width * scale).ceil() as u32;
    let height = (snapshot.height * scale).ceil() as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;

    let scale = scale as f32;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|err| ExportError::Encode(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn deliver_png(snapshot: &SvgSnapshot, filename: &str) -> Result<String, ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement,
        HtmlImageElement, Url,
    };

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&snapshot.markup));
    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Browser("unable to build SVG blob"))?;
    let svg_url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ExportError::Browser("unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Browser("document unavailable"))?;

    let image = HtmlImageElement::new().map_err(|_| ExportError::Browser("unable to create image"))?;
    image.set_src(&svg_url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| ExportError::Browser("image decode failed"))?;

    let width = (snapshot.width * PIXEL_RATIO).ceil() as u32;
    let height = (snapshot.height * PIXEL_RATIO).ceil() as u32;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| ExportError::Browser("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("canvas cast failed"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| ExportError::Browser("canvas context unavailable"))?
        .ok_or(ExportError::Browser("canvas context missing"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("context cast failed"))?;
    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )
        .map_err(|_| ExportError::Browser("unable to draw image"))?;
    Url::revoke_object_url(&svg_url).ok();

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Browser("unable to serialise canvas"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ExportError::Browser("unable to create anchor"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("anchor cast failed"))?;
    anchor.set_href(&data_url);
    anchor.set_download(filename);
    anchor.click();

    Ok("PNG download started".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(payload)
        .map_err(|err| ExportError::Clipboard(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let unavailable = |what: &str| ExportError::Clipboard(what.to_string());

    let navigator = web_sys::window()
        .ok_or_else(|| unavailable("window unavailable"))?
        .navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| unavailable("navigator.clipboard missing"))?;
    let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|_| unavailable("writeText missing"))?
        .dyn_into()
        .map_err(|_| unavailable("writeText is not callable"))?;
    let promise: js_sys::Promise = write_text
        .call1(&clipboard, &JsValue::from_str(&payload))
        .map_err(|_| unavailable("writeText rejected"))?
        .dyn_into()
        .map_err(|_| unavailable("writeText returned no promise"))?;
    JsFuture::from(promise)
        .await
        .map_err(|_| unavailable("clipboard write blocked"))?;
    Ok(())
}
