#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[allow(unused_imports)]
use price_window::{
    Cli,
    EmbeddedDemoSource,
    SeriesSource,
    SeriesStore,
    load_first_available,
    run_app, // The function from lib.rs
};

// --- WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*; // <--- REQUIRED for .dyn_into()

// This keeps the WASM memory allocator from being stripped
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn _keep_alive() {}

// The compiler still wants a main() for a binary target even though we use 'start'
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    // A. Init Logging
    console_error_panic_hook::set_once();
    let _ = eframe::WebLogger::init(log::LevelFilter::Debug);

    log::info!("Price Window starting in WASM mode...");

    let web_options = eframe::WebOptions::default();

    // B. The browser build always runs from the embedded demo
    let (store, signature) = match EmbeddedDemoSource.load() {
        Ok(store) => (store, EmbeddedDemoSource.signature()),
        Err(e) => {
            log::error!("Failed to load embedded demo: {:#}", e);
            (SeriesStore::default(), "None")
        }
    };

    // C. Find the canvas element by ID
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document on global window"))?;
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or_else(|| JsValue::from_str("Failed to find canvas with id 'the_canvas_id'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the_canvas_id was not a valid HtmlCanvasElement")?;

    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| Ok(run_app(cc, store, signature))),
        )
        .await
}

// --- NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use clap::Parser;
    use eframe::NativeOptions;
    use price_window::config::APP_STATE_PATH;
    use price_window::ui::config::UI_TEXT;
    use std::path::PathBuf;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Headless report
    if args.report {
        if let Err(e) = price_window::run_report(&args) {
            log::error!("Report failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // D. Data Loading (Blocking)
    let (store, signature) = match load_first_available(&args.series_sources()) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("⚠️  {:#}", e);
            (SeriesStore::default(), "None")
        }
    };

    // E. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        UI_TEXT.app_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, store, signature))),
    )
}
