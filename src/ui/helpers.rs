use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Human-readable size for the photo indicator, e.g. "(photo, 84 KB)".
pub(crate) fn photo_caption(bytes: &[u8]) -> String {
    let len = bytes.len();
    if len >= 1024 * 1024 {
        format!("(photo, {:.1} MB)", len as f64 / (1024.0 * 1024.0))
    } else if len >= 1024 {
        format!("(photo, {} KB)", len / 1024)
    } else {
        format!("(photo, {len} B)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_caption_scales_units() {
        assert_eq!(photo_caption(&[0; 10]), "(photo, 10 B)");
        assert_eq!(photo_caption(&[0; 4096]), "(photo, 4 KB)");
        assert_eq!(photo_caption(&vec![0; 2 * 1024 * 1024]), "(photo, 2.0 MB)");
    }
}
