use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::MapLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Map, city line, tooltip/help line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_city_info(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.city() {
        Some(city) => format!(" {} ", city.label()),
        None => " County Footprint ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layers = app.map_renderer.render(
        &app.map,
        app.selection(),
        app.hovered(),
        inner.width as usize,
        inner.height as usize,
    );

    let cursor_pos = app
        .mouse_cell()
        .filter(|&(cx, cy)| cx < inner.width && cy < inner.height);

    frame.render_widget(MapWidget { layers, cursor_pos }, inner);
}

/// Custom widget that stacks the braille layers
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (col, row, ch) in canvas.cells() {
            if col >= area.width as usize || row >= area.height as usize {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            buf[(x, y)].set_char(ch).set_fg(color);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: county outlines, state outlines, selection, hover
        Self::render_layer(&self.layers.counties, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.states, Color::Yellow, area, buf);
        Self::render_layer(&self.layers.selected, Color::Green, area, buf);
        Self::render_layer(&self.layers.hovered, Color::Red, area, buf);

        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::White);
            }
        }
    }
}

fn render_city_info(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.selection().is_empty() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(app.city_info(), style))), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.map_renderer.settings;

    let mut spans = Vec::new();
    if let Some(tooltip) = app.tooltip() {
        spans.push(Span::styled(format!(" {tooltip} "), Style::default().fg(Color::White)));
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
    }

    spans.extend([
        Span::styled(
            if settings.show_counties { "[Y]county " } else { "[y]county " },
            Style::default().fg(if settings.show_counties { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(
            if settings.show_states { "[S]tate " } else { "[s]tate " },
            Style::default().fg(if settings.show_states { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(
            "| tab/n:next city shift-tab/p:prev city q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
