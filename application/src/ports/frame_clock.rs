//! Frame clock port: supplies the `delta` passed to each frame.

/// Source of per-frame elapsed time.
pub trait FrameClock {
    /// Seconds elapsed since the previous frame. Never negative.
    fn tick(&mut self) -> f64;
}

impl<C: FrameClock + ?Sized> FrameClock for Box<C> {
    fn tick(&mut self) -> f64 {
        (**self).tick()
    }
}
