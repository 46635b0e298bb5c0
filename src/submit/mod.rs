use std::time::Duration;

pub const DEFAULT_RESET_TIMEOUT: Duration = Duration::from_millis(3000);
pub const BUSY_LABEL: &str = "Processing...";

/// Submit button state during a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitControl {
    label: String,
    original_label: Option<String>,
    disabled: bool,
    reset_timeout: Duration,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            original_label: None,
            disabled: false,
            reset_timeout: DEFAULT_RESET_TIMEOUT,
        }
    }

    pub fn with_reset_timeout(mut self, timeout: Duration) -> Self {
        self.reset_timeout = timeout;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_busy(&self) -> bool {
        self.original_label.is_some()
    }

    /// Enter the busy state and return how long until it reverts.
    pub fn submit(&mut self) -> Duration {
        if self.original_label.is_none() {
            self.original_label = Some(std::mem::replace(&mut self.label, BUSY_LABEL.to_string()));
        }
        self.disabled = true;
        self.reset_timeout
    }

    pub fn reset(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.disabled = false;
    }
}

/// Submit, then revert after the reset timeout unless navigation happened first.
pub async fn submit_with_timeout(control: &mut SubmitControl) {
    let wait = control.submit();
    log::debug!("submit control busy, reverting in {}ms", wait.as_millis());
    tokio::time::sleep(wait).await;
    control.reset();
}
