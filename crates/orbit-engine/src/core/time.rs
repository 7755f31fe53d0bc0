/// Wall-clock animation time.
/// The start is captured lazily on the first sample; angles are derived from
/// `now - start` so dropped or delayed frames never accumulate drift.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    /// Timestamp of the first sampled frame, in milliseconds.
    start_ms: Option<f64>,
    /// Timestamp of the most recent sample.
    now_ms: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current frame time. Returns elapsed milliseconds since start.
    pub fn sample(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        self.now_ms = now_ms;
        (now_ms - start).max(0.0)
    }

    /// Elapsed milliseconds at the last sample (0 before the first).
    pub fn elapsed_ms(&self) -> f64 {
        self.start_ms.map_or(0.0, |start| (self.now_ms - start).max(0.0))
    }

    pub fn has_started(&self) -> bool {
        self.start_ms.is_some()
    }

    /// Forget the start time; the next sample becomes time zero.
    pub fn reset(&mut self) {
        self.start_ms = None;
        self.now_ms = 0.0;
    }
}

/// Frames-per-second counter reported once per wall-clock second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Frames counted since the last report.
    frames: u32,
    /// Timestamp of the last report, in milliseconds.
    window_start_ms: Option<f64>,
    /// Most recently reported value.
    last_fps: u32,
}

impl FpsCounter {
    const WINDOW_MS: f64 = 1000.0;

    pub fn new() -> Self {
        Self {
            frames: 0,
            window_start_ms: None,
            last_fps: 0,
        }
    }

    /// Count one frame at `now_ms`. Returns `Some(fps)` when a full second has
    /// passed since the last report; the count of that window excludes this frame.
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        let window_start = *self.window_start_ms.get_or_insert(now_ms);
        let mut report = None;
        if now_ms - window_start >= Self::WINDOW_MS {
            self.last_fps = self.frames;
            report = Some(self.frames);
            self.frames = 0;
            self.window_start_ms = Some(now_ms);
        }
        self.frames += 1;
        report
    }

    /// The value from the last completed one-second window.
    pub fn fps(&self) -> u32 {
        self.last_fps
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
