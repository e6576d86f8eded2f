//! Main menu: start a battle or quit.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Play, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Default)]
pub struct MenuState {
    pub selected_index: usize,
}

impl MenuState {
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected_index.min(MenuItem::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < MenuItem::ALL.len() {
            self.selected_index += 1;
        }
    }
}

const TITLE_ART: [&str; 3] = [
    "╔═╗╦  ╔═╗╔╦╗╔═╗╔╗╔╔╦╗╔═╗╦    ╔╦╗╦ ╦╔═╗╦  ",
    "║╣ ║  ║╣ ║║║║╣ ║║║ ║ ╠═╣║     ║║║ ║║╣ ║  ",
    "╚═╝╩═╝╚═╝╩ ╩╚═╝╝╚╝ ╩ ╩ ╩╩═╝  ═╩╝╚═╝╚═╝╩═╝",
];

pub fn render_menu(frame: &mut Frame, area: Rect, menu: &MenuState) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(5), // Title
            Constraint::Length(3), // Tagline
            Constraint::Length(MenuItem::ALL.len() as u16),
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let title: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[1]);

    let tagline = Paragraph::new("Rock, Paper, Scissors - with teeth")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, chunks[2]);

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == menu.selected_index;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(format!("{}{}", prefix, item.label())).alignment(Alignment::Center))
                .style(style)
        })
        .collect();
    frame.render_widget(List::new(items), chunks[3]);

    let help = Paragraph::new("[↑/↓] Navigate  [Enter] Select  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}
