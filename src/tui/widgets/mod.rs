//! TUI widgets for rendering the different screens.

pub mod header_bar;
pub mod help_popup;
pub mod login_form;
pub mod mail_list;
pub mod mail_view;
pub mod status_bar;

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate a centered rectangle with exact dimensions, clamped to `area`.
pub(crate) fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        let mut out = String::new();
        let mut used = 0;
        for ch in s.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > max_width {
                break;
            }
            out.push(ch);
            used += w;
        }
        return out;
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width + 3 > max_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hello", 2), "he");
        // Wide characters count as two columns.
        assert_eq!(truncate_str("邮件主题很长", 7), "邮件...");
    }

    #[test]
    fn test_centered_rect_exact_clamps() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect_exact(40, 10, screen), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect_exact(100, 30, screen), screen);
    }
}
