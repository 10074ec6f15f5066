//! 页码指示器
//!
//! 只负责显示，永远不是导航的来源：控制器在确认的页面切换之后单向写入。

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// 只写的页码显示
pub trait PageIndicator {
    fn set_current_page(&mut self, page: usize);
    fn set_page_count(&mut self, count: usize);
}

/// 圆点样式的页码指示器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotIndicator {
    current: usize,
    count: usize,
}

impl PageIndicator for DotIndicator {
    fn set_current_page(&mut self, page: usize) {
        self.current = page;
    }

    fn set_page_count(&mut self, count: usize) {
        self.count = count;
    }
}

impl Widget for &DotIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = (0..self.count)
            .flat_map(|i| {
                let dot = if i == self.current {
                    Span::styled("●", Style::default().fg(Color::White))
                } else {
                    Span::styled("○", Style::default().fg(Color::DarkGray))
                };
                [dot, Span::raw(" ")]
            })
            .collect();
        Line::from(spans).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_current_dot() {
        let mut indicator = DotIndicator::default();
        indicator.set_page_count(3);
        indicator.set_current_page(1);

        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        (&indicator).render(area, &mut buf);

        let symbols: String = (0..6).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(symbols, "○ ● ○ ");
    }
}
