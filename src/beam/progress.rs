/// Maps page scroll offsets onto beam progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBinding {
    start_px: f64,
    window_px: f64,
}

impl ScrollBinding {
    /// `None` unless the window is a positive, finite distance.
    pub fn new(start_px: f64, window_px: f64) -> Option<Self> {
        (window_px > 0.0 && window_px.is_finite() && start_px.is_finite())
            .then_some(Self { start_px, window_px })
    }

    pub fn start_px(&self) -> f64 {
        self.start_px
    }

    pub fn end_px(&self) -> f64 {
        self.start_px + self.window_px
    }

    /// Linear in between, pinned at 0 before the window and at 1 after it.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        ((scroll_y - self.start_px) / self.window_px).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_empty_windows() {
        assert!(ScrollBinding::new(0.0, 0.0).is_none());
        assert!(ScrollBinding::new(0.0, -10.0).is_none());
        assert!(ScrollBinding::new(0.0, f64::NAN).is_none());
        assert!(ScrollBinding::new(f64::INFINITY, 10.0).is_none());
    }

    #[test]
    fn progress_is_clamped_and_linear() {
        let binding = ScrollBinding::new(300.0, 2400.0).unwrap();
        assert_eq!(binding.progress(-50.0), 0.0);
        assert_eq!(binding.progress(299.0), 0.0);
        assert_eq!(binding.progress(300.0), 0.0);
        assert_abs_diff_eq!(binding.progress(900.0), 0.25);
        assert_abs_diff_eq!(binding.progress(1500.0), 0.5);
        assert_eq!(binding.progress(2700.0), 1.0);
        assert_eq!(binding.progress(10_000.0), 1.0);
        assert_eq!(binding.end_px(), 2700.0);
    }

    #[test]
    fn repeated_offsets_give_identical_progress() {
        let binding = ScrollBinding::new(0.0, 777.0).unwrap();
        let once = binding.progress(333.0);
        assert_eq!(once, binding.progress(333.0));
    }
}
