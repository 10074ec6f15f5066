//! 页面组件
//!
//! 单个引导页的绘制：标题、可滚动正文、滚动条和主操作按钮

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};

use crate::models::Page;

/// 页面内各区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRegions {
    pub body: Rect,
    /// 正文超出可见区域时才有滚动条
    pub scroll_indicator: Option<Rect>,
    /// 只有带主操作的页面才有按钮
    pub button: Option<Rect>,
}

/// 按钮宽度
const BUTTON_WIDTH: u16 = 20;

/// 计算页面区域划分，与是否在转场中无关
pub fn page_regions<A>(page: &Page<A>, area: Rect) -> PageRegions {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 标题
            Constraint::Min(1),    // 正文
            Constraint::Length(3), // 按钮
        ])
        .split(inner);

    let body = chunks[1];
    let lines = u16::try_from(page.body().len()).unwrap_or(u16::MAX);
    let scroll_indicator = (lines > body.height && body.width > 1).then(|| Rect {
        x: body.right() - 1,
        width: 1,
        ..body
    });

    let button = page.primary_label().map(|_| {
        let [button] = Layout::horizontal([Constraint::Length(BUTTON_WIDTH)])
            .flex(Flex::Center)
            .areas(chunks[2]);
        button
    });

    PageRegions {
        body,
        scroll_indicator,
        button,
    }
}

/// [组件] 在 area 内绘制页面，offset 为向下平移的行数
pub fn render_page<A>(frame: &mut Frame, area: Rect, page: &Page<A>, scroll: u16, offset: u16) {
    let offset = offset.min(area.height);
    let shifted = Rect {
        y: area.y + offset,
        height: area.height - offset,
        ..area
    };
    if shifted.height == 0 {
        return;
    }
    frame.render_widget(Clear, shifted);

    // 整页按原尺寸布局，再裁剪到平移后仍可见的部分
    let full = Rect {
        y: area.y + offset,
        ..area
    };
    let regions = page_regions(page, full);
    let visible = |rect: Rect| rect.intersection(shifted);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));
    if offset == 0 {
        frame.render_widget(block, area);
    } else {
        frame.render_widget(block.borders(Borders::TOP | Borders::LEFT | Borders::RIGHT), shifted);
    }

    let title_area = Rect {
        y: full.y + 1,
        height: 1,
        ..regions.body
    };
    frame.render_widget(
        Paragraph::new(page.title()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        visible(title_area),
    );

    let text_area = match regions.scroll_indicator {
        Some(_) => Rect {
            width: regions.body.width.saturating_sub(1),
            ..regions.body
        },
        None => regions.body,
    };
    let lines: Vec<Line> = page.body().iter().map(|line| Line::from(*line)).collect();
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll, 0)),
        visible(text_area),
    );

    if let Some(indicator) = regions.scroll_indicator {
        let max = page.body().len().saturating_sub(usize::from(regions.body.height));
        let mut state = ScrollbarState::new(max).position(usize::from(scroll));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            visible(indicator),
            &mut state,
        );
    }

    if let (Some(label), Some(button)) = (page.primary_label(), regions.button) {
        render_button(frame, visible(button), label);
    }
}

/// [组件] 主操作按钮，area 已由 page_regions 居中
fn render_button(frame: &mut Frame, area: Rect, label: &str) {
    if area.height == 0 {
        return;
    }
    let widget = Paragraph::new(format!("{label} [Enter]"))
        .centered()
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_indicator_only_when_overflowing() {
        let page: Page<()> = Page::Welcome(());

        let tall = page_regions(&page, Rect::new(0, 0, 60, 40));
        assert!(tall.scroll_indicator.is_none());

        let short = page_regions(&page, Rect::new(0, 0, 60, 10));
        let indicator = short.scroll_indicator.unwrap();
        assert_eq!(indicator.x, short.body.right() - 1);
        assert_eq!(indicator.height, short.body.height);
    }

    #[test]
    fn test_button_only_on_pages_with_primary_action() {
        let area = Rect::new(0, 0, 60, 20);

        let button = page_regions(&Page::Welcome(()), area).button.unwrap();
        assert_eq!(button.width, BUTTON_WIDTH);
        assert_eq!(button.x, (area.width - BUTTON_WIDTH) / 2);
        assert_eq!(button.bottom(), area.bottom() - 1);

        assert!(page_regions(&Page::<()>::Sensors, area).button.is_none());
        assert!(page_regions(&Page::Finish(()), area).button.is_some());
    }
}
