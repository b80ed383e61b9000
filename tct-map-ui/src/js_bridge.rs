//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Leaflet and the layer glue in `assets/js/*.js` are evaluated as
//! globals (no ES modules) and exposed via `window.*`. This module
//! provides safe Rust wrappers that serialize data and call those
//! globals, waiting for Leaflet to load before touching the map.

// Embed all map JS files at compile time
static MAP_INIT_JS: &str = include_str!("../assets/js/map-init.js");
static TRACK_LAYERS_JS: &str = include_str!("../assets/js/track-layers.js");
static DENSITY_LAYER_JS: &str = include_str!("../assets/js/density-layer.js");
static DOWNLOAD_JS: &str = include_str!("../assets/js/download.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('TCT JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Load and evaluate the map glue scripts once Leaflet is ready.
///
/// The glue files define functions via `function` declarations. To
/// ensure they become globally accessible (not block-scoped inside the
/// polling callback), they are evaluated at global scope via indirect
/// eval once `L` exists, then promoted to `window.*` explicitly.
pub fn init_map_scripts() {
    let all_js = [MAP_INIT_JS, TRACK_LAYERS_JS, DENSITY_LAYER_JS, DOWNLOAD_JS].join("\n");

    let store_js = format!(
        "window.__tctMapScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__tctMapReady) { return; }
            var waitForLeaflet = setInterval(function() {
                if (typeof L !== 'undefined') {
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__tctMapScripts);
                    delete window.__tctMapScripts;
                    if (typeof initCycloneMap !== 'undefined') window.initCycloneMap = initCycloneMap;
                    if (typeof clearOverlayLayer !== 'undefined') window.clearOverlayLayer = clearOverlayLayer;
                    if (typeof destroyCycloneMap !== 'undefined') window.destroyCycloneMap = destroyCycloneMap;
                    if (typeof renderTrackLayer !== 'undefined') window.renderTrackLayer = renderTrackLayer;
                    if (typeof renderGenesisLayer !== 'undefined') window.renderGenesisLayer = renderGenesisLayer;
                    if (typeof renderDensityLayer !== 'undefined') window.renderDensityLayer = renderDensityLayer;
                    if (typeof downloadTextFile !== 'undefined') window.downloadTextFile = downloadTextFile;
                    window.__tctMapReady = true;
                    console.log('TCT map glue initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Create the map inside the given container once the DOM node exists.
pub fn init_map(container_id: &str, center_lat: f64, center_lon: f64, zoom: u8) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__tctMapReady &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.initCycloneMap('{container_id}', {center_lat}, {center_lon}, {zoom});
                    }} catch(e) {{ console.error('[TCT] initCycloneMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

fn render_layer(function: &str, container_id: &str, data_json: &str, opts_json: &str) {
    let escaped_data = data_json.replace('\\', "\\\\").replace('\'', "\\'");
    let escaped_opts = opts_json.replace('\\', "\\\\").replace('\'', "\\'");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__tctMapReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{escaped_data}', '{escaped_opts}');
                    }} catch(e) {{ console.error('[TCT] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render track polylines (plain or intensity-segmented).
pub fn render_track_layer(container_id: &str, data_json: &str, opts_json: &str) {
    render_layer("renderTrackLayer", container_id, data_json, opts_json);
}

/// Render genesis point markers.
pub fn render_genesis_layer(container_id: &str, data_json: &str, opts_json: &str) {
    render_layer("renderGenesisLayer", container_id, data_json, opts_json);
}

/// Render a density heatmap of grid-cell rectangles.
pub fn render_density_layer(container_id: &str, data_json: &str, opts_json: &str) {
    render_layer("renderDensityLayer", container_id, data_json, opts_json);
}

/// Clear one named overlay layer group on a map.
pub fn clear_overlay_layer(container_id: &str, layer: &str) {
    call_js(&format!(
        "if (window.clearOverlayLayer) window.clearOverlayLayer('{}', '{}');",
        container_id, layer
    ));
}

/// Trigger a client-side CSV download.
pub fn download_csv(filename: &str, content: &str) {
    let escaped = serde_json::to_string(content).unwrap_or_default();
    call_js(&format!(
        "if (window.downloadTextFile) window.downloadTextFile('{}', {}, 'text/csv');",
        filename, escaped
    ));
}
