//! Window title reflecting the embed status.

use super::core::WinhostApp;

const BASE_TITLE: &str = "winhost";

impl WinhostApp {
    pub(super) fn update_window_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        window.set_title(&format_title(self.status.as_deref()));
    }
}

fn format_title(status: Option<&str>) -> String {
    match status {
        Some(status) => format!("{BASE_TITLE} - {status}"),
        None => BASE_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_without_status() {
        assert_eq!(format_title(None), "winhost");
    }

    #[test]
    fn status_is_appended() {
        assert_eq!(
            format_title(Some("embed failed: launch failed: not found")),
            "winhost - embed failed: launch failed: not found"
        );
    }
}
