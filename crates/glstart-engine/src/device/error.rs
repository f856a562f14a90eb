/// High-level response after a failed buffer swap.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapErrorAction {
    /// Transient error; skip the current frame.
    SkipFrame,
    /// The context or display is gone; terminate gracefully.
    Fatal,
}
