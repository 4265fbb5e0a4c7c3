//! sortrace - Terminal User Interface
//!
//! Quicksort and merge sort animated side by side using ratatui.
//! App logic lives in `sortrace::tui::sort_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use sortrace::engine::{Orchestrator, PlaybackController};
    use sortrace::logging::{init_logging, LogConfig};
    use sortrace::tui::sort_app::SortApp;

    let args = tui::TuiArgs::parse();

    // Log lines would tear the alternate screen; RUST_LOG can still opt in.
    if let Err(e) = init_logging(LogConfig {
        verbose: args.verbose,
        tui_mode: true,
    }) {
        eprintln!("Warning: {e}");
    }

    let config = match args.options.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: sort-tui [--config viz.yaml] [--size N] [--seed N] [--speed N]");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut orchestrator = Orchestrator::new(&config);
    if args.options.instant {
        orchestrator = orchestrator.with_playback(PlaybackController::instant());
    }
    let app = SortApp::with_orchestrator(orchestrator, config.dataset.max_value);

    match tui::run(app, config.tick()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sort-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use sortrace::cli::RunOptions;
    use sortrace::engine::Lane;
    use sortrace::tui::sort_app::{spawn_run, AppEvent, AppStatus, KeyAction, LaneView, SortApp};
    use std::io;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Command line for the terminal UI.
    #[derive(Debug, clap::Parser)]
    #[command(
        name = "sort-tui",
        version,
        about = "Quicksort and merge sort, animated side by side"
    )]
    pub struct TuiArgs {
        #[command(flatten)]
        pub options: RunOptions,

        /// Enable debug logging (written only when RUST_LOG is set).
        #[arg(short, long)]
        pub verbose: bool,
    }

    pub fn run(mut app: SortApp, tick: Duration) -> io::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = runtime.block_on(run_main_loop(&mut terminal, &mut app, tick));
        app.shutdown();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    /// Draw, poll keys, and apply frames from the running sort once per tick.
    ///
    /// Runs are spawned on the same thread, so they only advance while this
    /// loop awaits the next tick.
    async fn run_main_loop<B: Backend>(
        terminal: &mut Terminal<B>,
        app: &mut SortApp,
        tick: Duration,
    ) -> io::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            while let Ok(event) = rx.try_recv() {
                app.apply(event);
            }

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let KeyAction::Launch(run) = app.handle_key(key.code) {
                            spawn_run(run, tx.clone());
                        }
                    }
                }
            }

            if app.should_quit() {
                break;
            }

            terminal.draw(|f| ui(f, app))?;
            app.tick();
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &SortApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(8),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0]);

        let lanes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        render_lane(f, lanes[0], app.view(Lane::Quick), app.value_ceiling);
        render_lane(f, lanes[1], app.view(Lane::Merge), app.value_ceiling);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);

        render_stats(f, bottom[0], app);
        render_controls(f, bottom[1]);

        render_status_bar(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " Sort Race ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("- quicksort vs merge sort "),
            Span::styled(
                format!(
                    "[v{} {}]",
                    env!("CARGO_PKG_VERSION"),
                    env!("SORTRACE_GIT_HASH")
                ),
                Style::default().fg(Color::Gray),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL).title("sortrace"));
        f.render_widget(title, area);
    }

    fn bar_width(area: Rect, bars: usize) -> u16 {
        let inner = usize::from(area.width.saturating_sub(2));
        let width = inner / bars.max(1);
        u16::try_from(width.max(1)).unwrap_or(u16::MAX)
    }

    fn render_lane(f: &mut Frame, area: Rect, view: &LaneView, ceiling: u32) {
        let bars: Vec<Bar> = view
            .elements
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let color = if view.is_highlighted(i) {
                    Color::Red
                } else {
                    Color::Cyan
                };
                Bar::default()
                    .value(u64::from(value))
                    .text_value(String::new())
                    .style(Style::default().fg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} [{} steps] ", view.lane, view.steps)),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(area, bars.len()))
            .bar_gap(0)
            .max(u64::from(ceiling.max(1)));
        f.render_widget(chart, area);
    }

    fn render_stats(f: &mut Frame, area: Rect, app: &SortApp) {
        let playback = app.orchestrator.playback();
        let (speed_min, speed_max) = playback.speed_bounds();
        let delay_ms = playback.step_delay().as_secs_f64() * 1000.0;
        let run = app
            .orchestrator
            .active_run_id()
            .map_or_else(|| "-".to_string(), |id| id.to_string());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{} steps/s  ({speed_min}..{speed_max}, {delay_ms:.1} ms/step)",
                    playback.speed()
                )),
            ]),
            Line::from(vec![
                Span::styled("Bars:  ", Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{}  seed {}",
                    app.quick.elements.len(),
                    app.orchestrator.seed()
                )),
            ]),
            Line::from(vec![
                Span::styled("Run:   ", Style::default().fg(Color::Yellow)),
                Span::raw(run),
            ]),
        ];

        if let Some(report) = &app.last_report {
            lines.push(Line::from(vec![
                Span::styled("Last:  ", Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{:.2}s  quick {} steps, merge {} steps",
                    report.elapsed.as_secs_f64(),
                    report.quick.stats.draws,
                    report.merge.stats.draws
                )),
            ]));
        }

        let stats = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Playback"));
        f.render_widget(stats, area);
    }

    fn render_controls(f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let controls = vec![
            Line::from(vec![
                Span::styled("[S/Enter] ", key),
                Span::raw("Sort"),
            ]),
            Line::from(vec![Span::styled("[R] ", key), Span::raw("Randomize")]),
            Line::from(vec![
                Span::styled("[Space] ", key),
                Span::raw("Pause/Resume"),
            ]),
            Line::from(vec![
                Span::styled("[+/-] ", key),
                Span::raw("Faster/Slower"),
            ]),
            Line::from(vec![Span::styled("[Q/Esc] ", key), Span::raw("Quit")]),
        ];

        let controls = Paragraph::new(controls)
            .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &SortApp) {
        let status = app.status();
        let color = match status {
            AppStatus::Ready => Color::Gray,
            AppStatus::Sorting => Color::Yellow,
            AppStatus::Paused => Color::Magenta,
            AppStatus::Sorted => Color::Green,
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", status.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| Frame: {} ", app.frame_count)),
        ]);

        let bar = Paragraph::new(vec![line]).block(Block::default().borders(Borders::ALL));
        f.render_widget(bar, area);
    }

}
