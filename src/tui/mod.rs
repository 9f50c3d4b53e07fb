pub mod action;
pub mod app;
pub mod keys;
pub mod widgets;

#[cfg(test)]
pub mod testing;

pub use action::Action;
pub use app::{App, Focus, Mounted};
pub use keys::key_to_action;

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::Backend,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};

use crate::config::DisplayConfig;
use crate::picker::SelectedValue;
use widgets::{CalendarWidget, HelpBar, RenderableWidget, TriggerWidget};

/// Main entry point for interactive mode
///
/// Returns whatever value the owner holds when the user quits.
pub fn run(app: App, config: &DisplayConfig) -> Result<SelectedValue, io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    config: &DisplayConfig,
) -> Result<SelectedValue, io::Error> {
    loop {
        terminal.draw(|f| draw(f, &app, config))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = key_to_action(key, &app) {
            app.handle(action);
        }
        if app.should_quit() {
            tracing::debug!("ACTION: Quitting with {:?}", app.value());
            break;
        }
    }
    Ok(app.value())
}

/// Trigger on top, calendar under it while open, key hints at the bottom
fn draw(f: &mut Frame, app: &App, config: &DisplayConfig) {
    let view = app.view();
    let calendar = CalendarWidget::new(&view)
        .with_cursor((app.focus() == Focus::Calendar).then(|| app.cursor()))
        .with_preview(app.preview());

    let text = app.trigger_text();
    let placeholder = app.placeholder();
    let trigger = TriggerWidget::new(app.label(), &text, app.trigger())
        .with_placeholder(&placeholder)
        .with_focus(app.focus() == Focus::Input);
    let help = HelpBar::new(app.is_open(), app.focus(), app.trigger());

    let calendar_height = if app.is_open() {
        calendar.preferred_height().unwrap_or(0)
    } else {
        0
    };
    let [trigger_area, calendar_area, _, help_area] = Layout::vertical([
        Constraint::Length(trigger.preferred_height().unwrap_or(3)),
        Constraint::Length(calendar_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let buf = f.buffer_mut();
    let trigger_width = trigger
        .preferred_width()
        .unwrap_or(trigger_area.width)
        .max(calendar.preferred_width().unwrap_or(0))
        .min(trigger_area.width);
    trigger.render(Rect { width: trigger_width, ..trigger_area }, buf, config);
    if app.is_open() {
        calendar.render(calendar_area, buf, config);
    }
    help.render(help_area, buf, config);
}
