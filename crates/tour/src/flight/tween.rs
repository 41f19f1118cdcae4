use super::arc::ArcPath;

/// Identifier of one planned leg. Increases monotonically per animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightHandle(pub u64);

/// Quadratic ease-in/ease-out: slow takeoff, fast cruise, slow landing.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Outcome of a tween tick that moved the playhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    /// Eased curve parameter after this tick.
    pub t: f32,
    /// First tick that moved this tween.
    pub started: bool,
    /// The playhead reached the end on this tick.
    pub landed: bool,
}

/// Time driver for one leg.
///
/// Owns its arc; dropping the tween is the cancellation. Pausing freezes the
/// playhead without touching the arc.
#[derive(Debug, Clone)]
pub struct FlightTween {
    handle: FlightHandle,
    from: usize,
    to: usize,
    arc: ArcPath,
    elapsed: f32,
    duration: f32,
    paused: bool,
    started: bool,
}

impl FlightTween {
    pub fn new(
        handle: FlightHandle,
        from: usize,
        to: usize,
        arc: ArcPath,
        duration: f32,
        paused: bool,
    ) -> Self {
        Self {
            handle,
            from,
            to,
            arc,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            paused,
            started: false,
        }
    }

    pub fn handle(&self) -> FlightHandle {
        self.handle
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn arc(&self) -> &ArcPath {
        &self.arc
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Linear playhead in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased curve parameter in `[0, 1]`.
    pub fn eased(&self) -> f32 {
        ease_in_out(self.progress())
    }

    /// Advance the playhead by `dt` seconds.
    ///
    /// Returns `None` while paused or when `dt` does not move time.
    pub fn tick(&mut self, dt: f32) -> Option<TweenStep> {
        if self.paused || dt <= 0.0 || self.elapsed >= self.duration {
            return None;
        }
        let started = !self.started;
        self.started = true;
        self.elapsed = (self.elapsed + dt).min(self.duration);
        Some(TweenStep {
            t: self.eased(),
            started,
            landed: self.elapsed >= self.duration,
        })
    }
}
