//! 视图层模块
//!
//! 把 PageFlow 的状态绘制出来，并把本帧的页面几何信息报告回控制器

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::actions::NavigationEvent;
use super::indicator::DotIndicator;
use super::state::PageFlow;
use components::{page_regions, render_page};

/// 渲染 UI，返回本帧的布局供控制器做点击判定
pub fn render(frame: &mut Frame, flow: &PageFlow<DotIndicator>) -> NavigationEvent {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 顶栏
            Constraint::Min(8),    // 页面
            Constraint::Length(1), // 页码
            Constraint::Length(1), // 帮助
        ])
        .split(frame.area());

    let close_control = render_top_bar(frame, chunks[0]);
    render_pages(frame, flow, chunks[1]);
    frame.render_widget(&flow.indicator, chunks[2]);
    render_help(frame, flow, chunks[3]);

    let regions = flow
        .current_page
        .as_ref()
        .map(|page| page_regions(page, chunks[1]));
    NavigationEvent::Layout {
        page_area: chunks[1],
        body_area: regions.map(|r| r.body).unwrap_or_default(),
        scroll_indicator: regions.and_then(|r| r.scroll_indicator),
        button: regions.and_then(|r| r.button),
        close_control,
    }
}

/// 绘制顶栏，返回关闭标签所在区域
fn render_top_bar(frame: &mut Frame, area: Rect) -> Option<Rect> {
    let brand = Span::styled(
        "S C I E N C E   J O U R N A L",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let gap = Span::raw("   ");
    let close = Span::styled("[Esc] 关闭", Style::default().fg(Color::Gray));

    let prefix = u16::try_from(brand.width() + gap.width()).unwrap_or(u16::MAX);
    let label = Rect {
        x: area.x.saturating_add(prefix),
        y: area.y,
        width: u16::try_from(close.width()).unwrap_or(u16::MAX),
        height: 1,
    }
    .intersection(area);

    let bar = Paragraph::new(Line::from(vec![brand, gap, close]))
        .style(Style::default().bg(Color::Rgb(0xc5, 0x8b, 0x00)))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(bar, area);

    (!label.is_empty()).then_some(label)
}

fn render_pages(frame: &mut Frame, flow: &PageFlow<DotIndicator>, area: Rect) {
    let Some(pending) = &flow.pending else {
        if let Some(page) = &flow.current_page {
            render_page(frame, area, page, flow.scroll, 0);
        }
        return;
    };

    for surface in pending.transition.layers().into_iter().flatten() {
        let Some(page) = flow.provider.page(surface.page) else {
            continue;
        };
        // 只有当前页保留滚动位置
        let scroll = if surface.page == flow.state.current {
            flow.scroll
        } else {
            0
        };
        render_page(frame, area, &page, scroll, surface.offset);
    }
}

fn render_help(frame: &mut Frame, flow: &PageFlow<DotIndicator>, area: Rect) {
    let mut help = String::from("[←/点击左侧] 返回  [→/点击右侧] 前进  [j/k] 滚动");
    if flow
        .current_page
        .as_ref()
        .and_then(|page| page.primary_label())
        .is_some()
    {
        help.push_str("  [Enter] 确认");
    }
    let text = format!(
        "{}  |  {}/{}",
        help,
        flow.state.current + 1,
        flow.state.total
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend, layout::Position};

    use super::*;
    use crate::storage::Config;
    use crate::ui::actions::{Effect, GesturePhase};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_reports_layout() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut flow = PageFlow::new(&Config::default());
        let now = Instant::now();
        flow.handle(NavigationEvent::Appear, now);

        let mut layout = None;
        terminal
            .draw(|frame| layout = Some(render(frame, &flow)))
            .unwrap();

        match layout {
            Some(NavigationEvent::Layout {
                page_area,
                body_area,
                scroll_indicator,
                button,
                close_control,
            }) => {
                assert_eq!(page_area, Rect::new(0, 3, 80, 15));
                assert!(page_area.contains(body_area.as_position()));
                assert!(scroll_indicator.is_some());
                // 首页的跳过按钮在页面底部
                let button = button.unwrap();
                assert!(page_area.contains(button.as_position()));
                assert_eq!(button.bottom(), page_area.bottom() - 1);
                assert_eq!(close_control, Some(Rect::new(32, 0, 10, 1)));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        // 宽字符后面跟着占位格，逐字检查
        assert!(buffer_text(&terminal).contains("跳"));
    }

    #[test]
    fn test_close_label_and_button_are_clickable() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut flow = PageFlow::new(&Config::default());
        let now = Instant::now();
        flow.handle(NavigationEvent::Appear, now);
        terminal
            .draw(|frame| {
                let layout = render(frame, &flow);
                flow.handle(layout, now);
            })
            .unwrap();

        let button = flow.button.unwrap();
        let tap = |x, y| NavigationEvent::Tap {
            position: Position::new(x, y),
            phase: GesturePhase::Ended,
        };
        assert_eq!(flow.handle(tap(button.x + 1, button.y + 1), now), vec![Effect::Close]);
        assert_eq!(flow.handle(tap(33, 0), now), vec![Effect::Close]);
        assert_eq!(flow.state.current, 0);
        assert!(!flow.is_animating());
    }

    #[test]
    fn test_render_mid_transition() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut flow = PageFlow::new(&Config::default());
        let now = Instant::now();
        flow.handle(NavigationEvent::Appear, now);
        terminal
            .draw(|frame| {
                let layout = render(frame, &flow);
                flow.handle(layout, now);
            })
            .unwrap();

        flow.handle(NavigationEvent::Forward, now);
        flow.tick(now + Duration::from_millis(150));
        assert!(flow.is_animating());

        terminal
            .draw(|frame| {
                render(frame, &flow);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        // 两页同时可见
        assert!(text.contains("欢"));
        assert!(text.contains("识"));
    }
}
