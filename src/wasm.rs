use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::{ConfigError, ConfigFile, LogLevel};
use crate::dom::{DomProbe, DomScrollbars};
use scrollbars_core::{ScrollValues, Scrollbars, ScrollbarsConfig};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = ConfigFile::load_from_local_storage()
        .unwrap_or_default()
        .log_level;
    if let Some(level) = level.level() {
        if let Err(e) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("Logger already initialised: {}", e).into());
        }
    }
    log::info!("Scrollbars WASM ready");
}

fn stored_config() -> ConfigFile {
    ConfigFile::load_from_local_storage().unwrap_or_default()
}

fn to_js(e: ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Store `options` (widget options as JSON) for every `CustomScrollbars`
/// created later without explicit options.
#[wasm_bindgen(js_name = saveDefaultOptions)]
pub fn save_default_options(options: &str) -> Result<(), JsValue> {
    let mut config = stored_config();
    config.scrollbars = serde_json::from_str::<ScrollbarsConfig>(options)
        .map_err(|e| to_js(ConfigError::Json(e)))?;
    config.save_to_local_storage().map_err(to_js)?;
    log::info!("Saved default scrollbars options");
    Ok(())
}

/// Change the log level now and for later page loads.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level: LogLevel = level.parse().map_err(to_js)?;
    let mut config = stored_config();
    config.log_level = level;
    config.save_to_local_storage().map_err(to_js)?;
    // The logger is only installed at start when logging was on.
    if let Some(max) = level.level() {
        if console_log::init_with_level(max).is_ok() {
            log::debug!("Console logging enabled");
        }
    }
    log::set_max_level(level.into());
    Ok(())
}

/// Observer notifications forwarded to JavaScript.
#[derive(Debug, Clone, Copy)]
enum ScrollEvent {
    Scroll(ScrollValues),
    ScrollFrame(ScrollValues),
    ScrollStart,
    ScrollStop,
    Update(ScrollValues),
}

impl ScrollEvent {
    fn name(&self) -> &'static str {
        match self {
            ScrollEvent::Scroll(_) => "scroll",
            ScrollEvent::ScrollFrame(_) => "scrollFrame",
            ScrollEvent::ScrollStart => "scrollStart",
            ScrollEvent::ScrollStop => "scrollStop",
            ScrollEvent::Update(_) => "update",
        }
    }

    fn values(&self) -> Option<&ScrollValues> {
        match self {
            ScrollEvent::Scroll(values)
            | ScrollEvent::ScrollFrame(values)
            | ScrollEvent::Update(values) => Some(values),
            ScrollEvent::ScrollStart | ScrollEvent::ScrollStop => None,
        }
    }
}

fn values_object(values: &ScrollValues) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in [
        ("left", values.left),
        ("top", values.top),
        ("scrollLeft", values.scroll_left),
        ("scrollTop", values.scroll_top),
        ("scrollWidth", values.scroll_width),
        ("scrollHeight", values.scroll_height),
        ("clientWidth", values.client_width),
        ("clientHeight", values.client_height),
    ] {
        Reflect::set(&object, &key.into(), &value.into())?;
    }
    Ok(object)
}

/// Calls `listener(name, values)`; `values` is undefined for start/stop.
fn notify(listener: &Function, event: ScrollEvent) {
    let payload = match event.values().map(values_object).transpose() {
        Ok(payload) => payload.map_or(JsValue::UNDEFINED, JsValue::from),
        Err(e) => {
            log::error!("Failed to build {} payload: {:?}", event.name(), e);
            return;
        }
    };
    if let Err(e) = listener.call2(&JsValue::NULL, &event.name().into(), &payload) {
        log::error!("Scroll listener threw on {}: {:?}", event.name(), e);
    }
}

/// JavaScript handle to a scrollbars widget.
#[wasm_bindgen]
pub struct CustomScrollbars {
    inner: DomScrollbars<ScrollEvent>,
}

#[wasm_bindgen]
impl CustomScrollbars {
    /// Attach to `container`. `options` is a JSON object of widget options;
    /// without it the options saved in localStorage are used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        options: Option<String>,
        listener: Option<Function>,
    ) -> Result<CustomScrollbars, JsValue> {
        let config = match options {
            Some(json) => {
                let file = ConfigFile::new(
                    serde_json::from_str::<ScrollbarsConfig>(&json)
                        .map_err(|e| to_js(ConfigError::Json(e)))?,
                );
                file.validate().map_err(to_js)?;
                file.scrollbars
            }
            None => stored_config().scrollbars,
        };
        let widget = Scrollbars::new(config, DomProbe)
            .on_scroll(ScrollEvent::Scroll)
            .on_scroll_frame(ScrollEvent::ScrollFrame)
            .on_scroll_start(|| ScrollEvent::ScrollStart)
            .on_scroll_stop(|| ScrollEvent::ScrollStop)
            .on_update(ScrollEvent::Update);
        let inner = DomScrollbars::attach(container, widget, move |event| {
            if let Some(listener) = &listener {
                notify(listener, event);
            }
        })?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = scrollLeft)]
    pub fn scroll_left(&self) -> f64 {
        self.inner.values().scroll_left
    }

    #[wasm_bindgen(js_name = scrollTop)]
    pub fn scroll_top(&self) -> f64 {
        self.inner.values().scroll_top
    }

    #[wasm_bindgen(js_name = scrollWidth)]
    pub fn scroll_width(&self) -> f64 {
        self.inner.values().scroll_width
    }

    #[wasm_bindgen(js_name = scrollHeight)]
    pub fn scroll_height(&self) -> f64 {
        self.inner.values().scroll_height
    }

    #[wasm_bindgen(js_name = clientWidth)]
    pub fn client_width(&self) -> f64 {
        self.inner.values().client_width
    }

    #[wasm_bindgen(js_name = clientHeight)]
    pub fn client_height(&self) -> f64 {
        self.inner.values().client_height
    }

    /// Current metrics as a plain object.
    #[wasm_bindgen(js_name = getValues)]
    pub fn get_values(&self) -> Result<Object, JsValue> {
        values_object(&self.inner.values())
    }

    #[wasm_bindgen(js_name = scrollLeftTo)]
    pub fn scroll_left_to(&self, left: f64) {
        if let Some(widget) = self.inner.widget() {
            widget.set_scroll_left(left);
        }
    }

    #[wasm_bindgen(js_name = scrollTopTo)]
    pub fn scroll_top_to(&self, top: f64) {
        if let Some(widget) = self.inner.widget() {
            widget.set_scroll_top(top);
        }
    }

    #[wasm_bindgen(js_name = scrollToY)]
    pub fn scroll_to_y(&self, y: f64) {
        if let Some(widget) = self.inner.widget() {
            widget.scroll_to_y(y);
        }
    }

    #[wasm_bindgen(js_name = scrollToLeft)]
    pub fn scroll_to_left(&self) {
        if let Some(widget) = self.inner.widget() {
            widget.scroll_to_left();
        }
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&self) {
        if let Some(widget) = self.inner.widget() {
            widget.scroll_to_top();
        }
    }

    #[wasm_bindgen(js_name = scrollToRight)]
    pub fn scroll_to_right(&self) {
        if let Some(widget) = self.inner.widget() {
            widget.scroll_to_right();
        }
    }

    #[wasm_bindgen(js_name = scrollToBottom)]
    pub fn scroll_to_bottom(&self) {
        if let Some(widget) = self.inner.widget() {
            widget.scroll_to_bottom();
        }
    }

    /// Re-measure after content changes the observer cannot see.
    /// `callback`, if given, receives the metrics of that frame.
    pub fn update(&self, callback: Option<Function>) {
        match callback {
            Some(callback) => self.inner.update_with(move |values| {
                match values_object(values) {
                    Ok(values) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &values) {
                            log::error!("Update callback threw: {:?}", e);
                        }
                    }
                    Err(e) => log::error!("Failed to build update payload: {:?}", e),
                }
                None
            }),
            None => self.inner.update(),
        }
    }

    /// Detach every listener and timer. The handle is inert afterwards.
    pub fn destroy(&self) {
        self.inner.detach();
    }
}
