/// Converts variable browser frame deltas into whole simulation frames.
///
/// Orbital speeds are expressed in radians per frame, so the simulation
/// must advance in fixed frames regardless of the display refresh rate.
pub struct FrameClock {
    frame_dt: f32,
    /// Wall time not yet consumed by a whole frame.
    pending: f32,
    /// Upper bound on frames run for a single host callback.
    max_catch_up: u32,
    frames: u64,
}

impl FrameClock {
    pub const DEFAULT_MAX_CATCH_UP: u32 = 10;

    pub fn new(frame_dt: f32) -> Self {
        Self {
            frame_dt,
            pending: 0.0,
            max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
            frames: 0,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    /// Feed elapsed wall time; returns how many frames to simulate now.
    /// Backlog beyond `max_catch_up` frames is dropped (a hidden tab
    /// should not fast-forward the planets).
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !(elapsed > 0.0) {
            return 0;
        }
        let cap = self.frame_dt * self.max_catch_up as f32;
        self.pending = (self.pending + elapsed).min(cap);
        // Tolerate f32 rounding so exactly one frame_dt yields one frame.
        let due = (self.pending / self.frame_dt + 1e-4).floor() as u32;
        self.pending = (self.pending - due as f32 * self.frame_dt).max(0.0);
        self.frames += due as u64;
        due
    }

    /// Fraction of the next frame already elapsed (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.pending / self.frame_dt
    }

    /// Total frames simulated since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_per_frame_dt() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(0.25), 1);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.25), 1);
        assert!((clock.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn backlog_is_capped() {
        let mut clock = FrameClock::new(0.25).with_max_catch_up(4);
        assert_eq!(clock.advance(5.0), 4);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn sixtieth_of_a_second_is_one_frame() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn negative_or_nan_elapsed_is_ignored() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.frames(), 0);
    }
}
