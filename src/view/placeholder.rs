//! Built-in placeholder rendering.
//!
//! Used when the embedder supplies no placeholder closure: a dim fill with
//! a small centered caption when the region is wide enough to carry one.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use unicode_width::UnicodeWidthStr;

const FILL: &str = "░";
const CAPTION: &str = "deferred";

pub(crate) fn default_placeholder(area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let style = Style::default().fg(Color::DarkGray);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_symbol(FILL).set_style(style);
        }
    }
    let caption_width = CAPTION.width() as u16;
    if area.width > caption_width + 1 {
        let x = area.left() + (area.width - caption_width) / 2;
        let y = area.top() + area.height / 2;
        buf.set_string(x, y, CAPTION, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_the_area() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        default_placeholder(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), FILL);
        assert_eq!(buf[(11, 2)].symbol(), FILL);
    }

    #[test]
    fn centers_the_caption_on_the_middle_row() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        default_placeholder(area, &mut buf);
        // "deferred" is 8 cells wide, centered in 20.
        assert_eq!(buf[(6, 2)].symbol(), "d");
        assert_eq!(buf[(13, 2)].symbol(), "d");
    }

    #[test]
    fn narrow_areas_skip_the_caption() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        default_placeholder(area, &mut buf);
        for x in 0..6 {
            assert_eq!(buf[(x, 1)].symbol(), FILL);
        }
    }

    #[test]
    fn empty_areas_are_left_untouched() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        default_placeholder(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
