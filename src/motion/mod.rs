//! Scroll and counter effects expressed as plain state.

use std::time::Duration;

pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const FRAME: Duration = Duration::from_millis(16);

/// Counts from zero up to `target` in fixed frame steps.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        let frames = COUNTER_DURATION.as_millis() as f64 / FRAME.as_millis() as f64;
        Self {
            target: target as f64,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Iterator for CounterAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(group_thousands(self.current.floor() as u64))
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Coalesces scroll events so at most one update is pending per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn complete(&mut self) {
        self.ticking = false;
    }

    pub fn is_pending(&self) -> bool {
        self.ticking
    }
}

pub fn navbar_alpha(scrolled: f64) -> f64 {
    let opacity = (scrolled / 100.0).min(1.0);
    0.95 + opacity * 0.05
}

pub fn navbar_background(scrolled: f64) -> String {
    format!("rgba(10, 14, 39, {})", navbar_alpha(scrolled))
}

/// Vertical offset and rotation (degrees) of the `index`th floating element.
pub fn parallax_offset(scrolled: f64, index: usize) -> (f64, f64) {
    let speed = 0.5 + index as f64 * 0.1;
    (scrolled * speed, scrolled * 0.1)
}
