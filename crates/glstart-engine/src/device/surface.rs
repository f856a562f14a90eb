use std::num::NonZeroU32;

use glutin::error::ErrorKind;
use glutin::surface::SwapInterval;
use winit::dpi::PhysicalSize;

use super::SwapErrorAction;

/// Converts a framebuffer size into the non-zero pair glutin wants.
///
/// Returns `None` while the window is minimized (zero-area).
pub(crate) fn non_zero_size(size: PhysicalSize<u32>) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(size.width)?, NonZeroU32::new(size.height)?))
}

pub(crate) fn swap_interval(vsync: bool) -> SwapInterval {
    if vsync {
        SwapInterval::Wait(NonZeroU32::MIN)
    } else {
        SwapInterval::DontWait
    }
}

pub(crate) fn map_swap_error(kind: ErrorKind) -> SwapErrorAction {
    match kind {
        ErrorKind::ContextLost
        | ErrorKind::BadContext
        | ErrorKind::BadDisplay
        | ErrorKind::BadNativeWindow
        | ErrorKind::OutOfMemory => SwapErrorAction::Fatal,
        _ => SwapErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_has_no_surface_size() {
        assert!(non_zero_size(PhysicalSize::new(0, 600)).is_none());
        assert!(non_zero_size(PhysicalSize::new(800, 0)).is_none());

        let (w, h) = non_zero_size(PhysicalSize::new(800, 600)).unwrap();
        assert_eq!((w.get(), h.get()), (800, 600));
    }

    #[test]
    fn vsync_waits_one_interval() {
        assert!(matches!(swap_interval(true), SwapInterval::Wait(n) if n.get() == 1));
        assert!(matches!(swap_interval(false), SwapInterval::DontWait));
    }

    #[test]
    fn lost_context_is_fatal() {
        assert_eq!(map_swap_error(ErrorKind::ContextLost), SwapErrorAction::Fatal);
        assert_eq!(map_swap_error(ErrorKind::BadContext), SwapErrorAction::Fatal);
    }

    #[test]
    fn other_swap_errors_skip_the_frame() {
        assert_eq!(map_swap_error(ErrorKind::BadSurface), SwapErrorAction::SkipFrame);
        assert_eq!(map_swap_error(ErrorKind::Misc), SwapErrorAction::SkipFrame);
    }
}
