use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::input::{HostSignal, PointerEvent};
use crate::viewport::Viewport;

/// Translates a winit `WindowEvent` into a [`HostSignal`].
///
/// Returns `None` for events the render driver does not subscribe to.
pub fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<HostSignal> {
    match event {
        WindowEvent::Resized(size) => Some(HostSignal::Resized(Viewport::from_physical(
            size.width,
            size.height,
            window.scale_factor(),
        ))),

        // winit 0.30 reports the new factor here; the physical size follows in
        // a `Resized` event, so read the current inner size.
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            let size = window.inner_size();
            Some(HostSignal::Resized(Viewport::from_physical(
                size.width,
                size.height,
                *scale_factor,
            )))
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(HostSignal::PointerMoved(PointerEvent::new(x, y)))
        }

        _ => None,
    }
}

/// Current viewport of `window`.
pub fn window_viewport(window: &Window) -> Viewport {
    let size = window.inner_size();
    Viewport::from_physical(size.width, size.height, window.scale_factor())
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}
