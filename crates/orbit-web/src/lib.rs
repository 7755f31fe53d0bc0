pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use orbit_engine::{InputEvent, Modifiers, SceneConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls made before `scene_init` are
/// reported and ignored.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&JsValue::from_str(
                    "orbit-web: scene not initialized, call scene_init() first",
                ));
                None
            }
        }
    })
}

fn modifiers(shift: bool, alt: bool) -> Modifiers {
    Modifiers { shift, alt }
}

/// Build the scene and start it. An empty `config_json` uses the defaults.
#[wasm_bindgen]
pub fn scene_init(config_json: &str, width: f32, height: f32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SceneConfig::default()
    } else {
        SceneConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let mut runner = SceneRunner::new(config, width, height);
    runner.start().map_err(|e| JsValue::from_str(&e.to_string()))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orbit-web: initialized");
    Ok(())
}

/// Advance one frame. Returns `false` when the host should stop requesting
/// animation frames.
#[wasm_bindgen]
pub fn scene_tick(now_ms: f64) -> bool {
    with_runner(|r| r.tick(now_ms)).unwrap_or(false)
}

// ---- Input ----

#[wasm_bindgen]
pub fn scene_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn scene_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_up() {
    with_runner(|r| r.push_input(InputEvent::PointerUp));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f32, y: f32, shift: bool, alt: bool) {
    let modifiers = modifiers(shift, alt);
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y, modifiers }));
}

#[wasm_bindgen]
pub fn scene_wheel(delta: f32, shift: bool, alt: bool) {
    let modifiers = modifiers(shift, alt);
    with_runner(|r| r.push_input(InputEvent::Wheel { delta, modifiers }));
}

// ---- Context lifecycle ----

#[wasm_bindgen]
pub fn scene_context_lost() {
    with_runner(|r| r.context_lost());
}

#[wasm_bindgen]
pub fn scene_context_restored() -> Result<(), JsValue> {
    with_runner(|r| r.context_restored())
        .unwrap_or(Ok(()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `kind`: 0 context lost, 1 shader compile, 2 program link, other resource.
#[wasm_bindgen]
pub fn scene_render_failed(kind: u32, message: String) {
    with_runner(|r| r.render_failed(runner::render_error_from_code(kind, message)));
}

#[wasm_bindgen]
pub fn scene_texture_loaded(slot: u32, generation: u32) -> bool {
    with_runner(|r| r.texture_loaded(slot, generation)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Frame data accessors ----

#[wasm_bindgen]
pub fn get_commands_ptr() -> *const f32 {
    with_runner(|r| r.commands_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_command_count() -> u32 {
    with_runner(|r| r.command_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_command_floats() -> u32 {
    orbit_engine::DrawCommand::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_projection_ptr() -> *const f32 {
    with_runner(|r| r.projection_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_fps() -> u32 {
    with_runner(|r| r.fps()).unwrap_or(0)
}

// ---- Resource accessors ----

/// True once after each (re)start: re-read the meshes and lighting below.
#[wasm_bindgen]
pub fn take_upload_request() -> bool {
    with_runner(|r| r.take_upload_request()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_sphere_vertices() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.sphere_vertices()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_sphere_indices() -> js_sys::Uint16Array {
    with_runner(|r| js_sys::Uint16Array::from(r.sphere_indices()))
        .unwrap_or_else(|| js_sys::Uint16Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_cube_vertices() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.cube_vertices()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_cube_indices() -> js_sys::Uint16Array {
    with_runner(|r| js_sys::Uint16Array::from(r.cube_indices()))
        .unwrap_or_else(|| js_sys::Uint16Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_dish_index_count() -> u32 {
    with_runner(|r| r.dish_index_count()).unwrap_or(0)
}

/// Light position, ambient, directional and specular colors, 3 floats each.
#[wasm_bindgen]
pub fn get_lighting() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.lighting()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// A texture the host should load and then acknowledge through
/// `scene_texture_loaded(slot, generation)`.
#[wasm_bindgen]
pub struct TextureLoad {
    slot: u32,
    generation: u32,
    url: String,
}

#[wasm_bindgen]
impl TextureLoad {
    #[wasm_bindgen(getter)]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }
}

#[wasm_bindgen]
pub fn take_texture_request() -> Option<TextureLoad> {
    with_runner(|r| r.take_texture_request())
        .flatten()
        .map(|request| TextureLoad {
            slot: request.slot as u32,
            generation: request.generation,
            url: request.url,
        })
}
