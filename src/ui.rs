//! Terminal rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Screen};
use crate::platform::Platform;

pub fn draw<P: Platform>(frame: &mut Frame, app: &App<P>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    let labels = app.labels();

    let header = Paragraph::new(format!("  {}", labels.title))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.screen() {
        Screen::List => frame.render_widget(render_list(app), chunks[1]),
        Screen::ConfirmReboot => frame.render_widget(render_confirm(app), chunks[1]),
    }

    let footer_text = match app.status() {
        Some(status) => status,
        None => labels.hint,
    };
    let footer_style = if app.status().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let footer = Paragraph::new(format!("  {}", footer_text))
        .style(footer_style)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);
}

fn render_list<P: Platform>(app: &App<P>) -> List<'static> {
    let catalog = app.catalog();
    let nav = app.navigation();
    let favorites = app.favorites();

    let items: Vec<ListItem> = nav
        .visible(catalog.len())
        .filter_map(|i| catalog.get(i).map(|lang| (i, lang)))
        .map(|(i, lang)| {
            let star = if favorites.contains(lang.id) { '*' } else { ' ' };
            let cursor = if i == nav.selected() { '>' } else { ' ' };
            let mut line = format!("{} {} {}", star, cursor, lang.name);
            if lang.id == app.current_language() {
                line.push(' ');
                line.push_str(app.labels().current);
            }

            let style = if i == nav.selected() {
                Style::default().fg(Color::Black).bg(Color::LightCyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let position = format!(" {}/{} ", nav.selected() + 1, catalog.len());
    List::new(items).block(Block::default().borders(Borders::ALL).title(position))
}

fn render_confirm<P: Platform>(app: &App<P>) -> Paragraph<'static> {
    let name = app
        .catalog()
        .get(app.navigation().selected())
        .map(|lang| lang.name)
        .unwrap_or_default();

    Paragraph::new(format!("\n  {}\n\n  {}", name, app.labels().confirm_reboot))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL))
}
