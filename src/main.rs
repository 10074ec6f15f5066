mod error;
mod models;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};
use crate::storage::{OnboardingRecord, load_config, load_record, save_record};
use crate::ui::{Effect, FlowState, GestureTracker, NavigationEvent, PageFlow, handle_event, render};

/// 动画期间的刷新间隔
const FRAME: Duration = Duration::from_millis(16);
/// 空闲时的事件等待间隔
const IDLE: Duration = Duration::from_millis(250);

/// 终端里的科学日志入门引导
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// 配置文件路径，默认 ~/.config/pageflow/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// 即使已经完成过也显示引导
    #[arg(long)]
    force: bool,

    /// 覆盖配置中的转场时长（毫秒）
    #[arg(long)]
    transition_ms: Option<u64>,
}

/// 获取应用目录 (如 ~/.local/share/pageflow/)，不存在则创建
fn app_dir(base: Option<PathBuf>, kind: &'static str) -> Result<PathBuf> {
    let dir = base.ok_or(Error::NoUserDir(kind))?.join("pageflow");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 日志写入数据目录下的文件，终端留给界面
fn init_logging(data_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(data_dir, "pageflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("PAGEFLOW_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "pageflow=info".into()),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = app_dir(dirs::data_dir(), "数据")?;
    let _guard = init_logging(&data_dir);

    let config_path = match args.config {
        Some(path) => path,
        None => app_dir(dirs::config_dir(), "配置")?.join("config.toml"),
    };
    let mut config = load_config(&config_path)?;
    if let Some(ms) = args.transition_ms {
        config.transition_ms = ms;
    }

    let record_path = data_dir.join("onboarding.toml");
    if config.show_once
        && !args.force
        && let Some(record) = load_record(&record_path)?
    {
        println!(
            "引导已于 {} 完成，使用 --force 重新查看",
            record.completed_at.format("%Y-%m-%d %H:%M")
        );
        return Ok(());
    }

    let mut flow = PageFlow::new(&config);
    let mut tracker = GestureTracker::new(config.swipe_threshold);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut flow, &mut tracker, |state| {
        info!(page = state.current, "引导结束");
        save_record(&OnboardingRecord::new(state.current), &record_path)
    });

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if result.is_ok() && record_path.exists() {
        println!("完成记录已保存到 {}", record_path.display());
    }

    result
}

/// 运行引导，直到收到关闭副作用；on_close 恰好调用一次
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    flow: &mut PageFlow,
    tracker: &mut GestureTracker,
    on_close: impl FnOnce(FlowState) -> Result<()>,
) -> Result<()> {
    let size = terminal.size()?;
    let now = Instant::now();
    flow.handle(
        NavigationEvent::Resize {
            width: size.width,
            height: size.height,
        },
        now,
    );
    flow.handle(NavigationEvent::Appear, now);

    loop {
        let mut layout = None;
        terminal.draw(|f| layout = Some(render(f, flow)))?;
        if let Some(layout) = layout {
            flow.handle(layout, Instant::now());
        }

        let timeout = if flow.is_animating() { FRAME } else { IDLE };
        if event::poll(timeout)? {
            let effects = handle_event(flow, tracker, event::read()?, Instant::now());
            if effects.contains(&Effect::Close) {
                return on_close(flow.state);
            }
        }

        flow.tick(Instant::now());
    }
}
