use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Source of per-frame callbacks and the clock they are measured against.
///
/// Dropping the returned handle cancels the frame if it has not fired yet.
pub trait FrameScheduler {
    type Handle;

    fn now(&self) -> f64;
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Handle;
}

/// `requestAnimationFrame` on the browser window, timed with `performance.now()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationFrames;

pub struct AnimationFrame {
    id: Option<i32>,
    _callback: Closure<dyn FnMut(f64)>,
}

impl FrameScheduler for AnimationFrames {
    type Handle = AnimationFrame;

    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        let closure: Closure<dyn FnMut(f64)> = Closure::once(move |timestamp: f64| callback(timestamp));
        let id = web_sys::window()
            .and_then(|window| window.request_animation_frame(closure.as_ref().unchecked_ref()).ok());
        if id.is_none() {
            log::error!("requestAnimationFrame unavailable, dropping counter frame");
        }
        AnimationFrame { id, _callback: closure }
    }
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.id, web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}
