use std::time::Duration;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeAction {
    Next,
    Previous,
    None,
}

/// Slide position plus the hover pause flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Carousel {
    len: usize,
    index: usize,
    paused: bool,
    interval: Duration,
    swipe_threshold: f64,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            paused: false,
            interval: DEFAULT_AUTOPLAY_INTERVAL,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_swipe_threshold(mut self, px: f64) -> Self {
        self.swipe_threshold = px;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Autoplay step. Returns whether the slide advanced.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.len == 0 {
            return false;
        }
        self.next();
        true
    }

    /// Interpret a touch gesture from `start_x` to `end_x`.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> SwipeAction {
        let action = swipe_action(start_x, end_x, self.swipe_threshold);
        match action {
            SwipeAction::Next => self.next(),
            SwipeAction::Previous => self.previous(),
            SwipeAction::None => {}
        }
        action
    }
}

/// A swipe left (positive travel) goes forward. Travel must exceed the threshold.
pub fn swipe_action(start_x: f64, end_x: f64, threshold: f64) -> SwipeAction {
    let diff = start_x - end_x;
    if diff.abs() <= threshold {
        return SwipeAction::None;
    }
    if diff > 0.0 {
        SwipeAction::Next
    } else {
        SwipeAction::Previous
    }
}

/// Drive autoplay on a tokio interval for `ticks` periods.
pub async fn autoplay(carousel: &mut Carousel, ticks: usize) -> usize {
    let mut timer = tokio::time::interval(carousel.interval());
    // The first tick of a tokio interval completes immediately.
    timer.tick().await;
    let mut advanced = 0;
    for _ in 0..ticks {
        timer.tick().await;
        if carousel.tick() {
            advanced += 1;
        }
    }
    advanced
}
