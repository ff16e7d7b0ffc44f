use anyhow::Result;
use clap::Parser;
use county_footprint::app::App;
use county_footprint::config::Config;
use county_footprint::{data, logging, ui};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::parse();
    let _log_guard = logging::init(&config)?;

    // Load before touching the terminal so errors print normally
    let dataset = data::load_dataset(&config)?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    let mut app = App::new(dataset, &config.city, size.width as usize, size.height as usize);
    let result = run(&mut terminal, &mut app);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    info!("exiting");
    result
}

/// Mouse movement drives hovering; nothing else is bound
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            app.set_mouse_pos(mouse.column, mouse.row);
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

                    // City selector
                    KeyCode::Tab | KeyCode::Char('n') => app.next_city(),
                    KeyCode::BackTab | KeyCode::Char('p') => app.prev_city(),

                    // Layer toggles
                    KeyCode::Char('y') | KeyCode::Char('Y') => app.map_renderer.toggle_counties(),
                    KeyCode::Char('s') | KeyCode::Char('S') => app.map_renderer.toggle_states(),

                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
