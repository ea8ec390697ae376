use crate::running_order::{BlockStatus, DayChart};
use crate::tui::state::{AppState, Focus, InputMode, ViewMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph,
        canvas::{Canvas, Context, Rectangle},
    },
};

const BLOCK_WIDTH: f64 = 0.95;

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(v_chunks[0]);

    draw_stages(f, state, h_chunks[0]);
    match state.view {
        ViewMode::Lineup => draw_lineup(f, state, h_chunks[1]),
        ViewMode::Chart => draw_chart(f, state, h_chunks[1]),
    }
    draw_footer(f, state, v_chunks[1]);
}

fn focus_style(state: &AppState, focus: Focus) -> Style {
    if state.active_focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn status_color(status: BlockStatus) -> Color {
    match status {
        BlockStatus::Conflict => Color::Red,
        BlockStatus::Selected => Color::Green,
        BlockStatus::Unselected => Color::Gray,
    }
}

fn draw_stages(f: &mut Frame, state: &mut AppState, area: Rect) {
    let items: Vec<ListItem> = state
        .session
        .schedule()
        .stage_names()
        .iter()
        .map(|s| {
            let (mark, style) = if state.session.is_stage_enabled(s) {
                ("[x]", Style::default())
            } else {
                ("[ ]", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(Span::styled(format!("{} {}", mark, s), style)))
        })
        .collect();

    let sidebar = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Stages ")
                .border_style(focus_style(state, Focus::Sidebar)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(sidebar, area, &mut state.stage_state);
}

fn draw_lineup(f: &mut Frame, state: &mut AppState, area: Rect) {
    let selection = state.session.selection();
    let items: Vec<ListItem> = state
        .view_indices
        .iter()
        .map(|&idx| {
            let e = &state.rows[idx];
            let picked = selection.contains(e);
            let style = if state.conflicts.contains(e) {
                Style::default().fg(Color::Red)
            } else if picked {
                Style::default().fg(Color::Green)
            } else if !state.session.is_stage_enabled(&e.stage) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let checkbox = if picked { "[x]" } else { "[ ]" };
            let text = format!(
                "{} {}  {} {}-{}  {}",
                checkbox,
                state.session.aliases().display_name(&e.name),
                e.start.format("%a"),
                e.start_label(),
                e.end_label(),
                e.stage
            );
            ListItem::new(Line::from(vec![Span::styled(text, style)]))
        })
        .collect();

    let title = format!(
        " Line-up ({}) | Picked {} | Clashes {} ",
        state.view_indices.len(),
        selection.len(),
        state.conflicts.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(state, Focus::Main)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_chart(f: &mut Frame, state: &AppState, area: Rect) {
    let charts = state.session.running_order();
    let Some(chart) = charts.get(state.day_index) else {
        let empty = Paragraph::new("No line-up loaded.")
            .block(Block::default().borders(Borders::ALL).title(" Running Order "));
        f.render_widget(empty, area);
        return;
    };
    let title = format!(
        " {} ({}/{}) ←/→ ",
        chart.title(),
        state.day_index + 1,
        charts.len()
    );
    f.render_widget(chart_canvas(chart, title), area);
}

/// Stage columns left to right, time running downwards.
fn chart_canvas<'a>(chart: &'a DayChart, title: String) -> Canvas<'a, impl Fn(&mut Context) + 'a> {
    let (lo, hi) = chart.hour_range;
    let columns = chart.columns.len().max(1) as f64;
    Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds([-0.6, columns])
        // y grows upwards on a canvas, so hours are negated.
        .y_bounds([-hi - 0.5, -lo + 0.5])
        .paint(move |ctx| {
            for (i, stage) in chart.columns.iter().enumerate() {
                ctx.print(
                    i as f64 + 0.05,
                    -lo + 0.4,
                    Line::styled(stage.clone(), Style::default().add_modifier(Modifier::BOLD)),
                );
            }
            for (hour, label) in chart.ticks() {
                ctx.print(-0.6, -hour, Line::styled(label, Style::default().fg(Color::DarkGray)));
            }
            ctx.layer();
            for block in &chart.blocks {
                let x = block.column as f64 + (1.0 - BLOCK_WIDTH) * 0.5;
                let color = status_color(block.status);
                ctx.draw(&Rectangle {
                    x,
                    y: -block.bottom,
                    width: BLOCK_WIDTH,
                    height: block.bottom - block.top,
                    color,
                });
                ctx.print(
                    x + 0.02,
                    -block.top - 0.1,
                    Line::styled(
                        format!("{} {}", block.start_label, block.label),
                        Style::default().fg(color),
                    ),
                );
                ctx.print(
                    x + 0.02,
                    -block.bottom + 0.3,
                    Line::styled(block.end_label.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
        })
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let prompt = match state.mode {
        InputMode::Searching => Some(("/ ", state.input_buffer.as_str(), " Search ".to_string())),
        InputMode::EditingAlias => Some((
            "> ",
            state.alias_buffer.as_str(),
            format!(
                " Alias for {} (empty removes) ",
                state.selected_event().map(|e| e.name.as_str()).unwrap_or_default()
            ),
        )),
        InputMode::Normal => None,
    };
    if let Some((prefix, buffer, title)) = prompt {
        let input = Paragraph::new(format!("{}{}", prefix, buffer))
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
        let cursor_x = area.x + 1 + (prefix.chars().count() + buffer.chars().count()) as u16;
        f.set_cursor_position((cursor_x, area.y + 1));
        return;
    }

    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let color = if state.message.starts_with("Error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_text = "Spc:Pick | v:Chart | i/e:Import/Export | a/A:Alias/Save | c:Clear | r:Reload | q:Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}
