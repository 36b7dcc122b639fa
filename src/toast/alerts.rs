/// Flash alerts older than this are closed once after page load.
pub const DEFAULT_ALERT_DISMISS_DELAY_MS: u32 = 5000;

/// Candidates for the sweep; `should_auto_dismiss` filters them.
#[cfg(target_arch = "wasm32")]
pub const ALERT_SELECTOR: &str = ".alert";

const STICKY_ALERT_CLASSES: [&str; 2] = ["alert-info", "alert-warning"];

/// Whether an element with this `class` attribute is closed by the sweep.
pub fn should_auto_dismiss(class_attr: &str) -> bool {
    let mut is_alert = false;
    for class in class_attr.split_whitespace() {
        if STICKY_ALERT_CLASSES.contains(&class) {
            return false;
        }
        if class == "alert" {
            is_alert = true;
        }
    }
    is_alert
}
