//! Battle screen rendering.

use super::game_common::{
    create_game_layout, hp_color, render_info_panel_frame, render_notice, render_result_banner,
    render_status_bar,
};
use duel::battle::{
    type_bonus, ActionId, BattlePhase, BattleResult, BattleSession, Combatant, RoundOutcome,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// Render the battle scene.
pub fn render_battle(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let layout = create_game_layout(frame, area, " Elemental Duel ", Color::Cyan, 18, 24);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // HP gauges
            Constraint::Length(5), // Type panels
            Constraint::Min(6),    // Round panel
            Constraint::Length(8), // Action list
        ])
        .split(layout.content);

    let halves = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };

    let gauges = halves(rows[0]);
    render_hp_gauge(frame, gauges[0], session.player());
    render_hp_gauge(frame, gauges[1], session.opponent());

    let types = halves(rows[1]);
    render_type_panel(frame, types[0], " Your Type ", session.player());
    render_type_panel(frame, types[1], " Rival Type ", session.opponent());

    render_round_panel(frame, rows[2], session);
    render_action_list(frame, rows[3], session);
    render_info(frame, layout.info_panel, session);
    render_phase_status(frame, layout.status_bar, session);

    if let Some(result) = session.result() {
        render_outcome_banner(frame, layout.content, session, result);
    }
    if let Some(notice) = session.notice() {
        render_notice(frame, layout.content, &notice.text);
    }
}

fn render_hp_gauge(frame: &mut Frame, area: Rect, fighter: &Combatant) {
    let ratio = fighter.health_ratio().clamp(0.0, 1.0);

    let mut title = format!(" {} (Lv {}) ", fighter.name, fighter.level());
    if fighter.defending {
        title.push_str("[DEF] ");
    }

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(
            Style::default()
                .fg(hp_color(ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{}/{}", fighter.health(), fighter.max_health()))
        .ratio(ratio);

    frame.render_widget(gauge, area);
}

fn render_type_panel(frame: &mut Frame, area: Rect, title: &str, fighter: &Combatant) {
    let lines = vec![
        Line::from(Span::styled(
            fighter.element.name(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Weak to:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(fighter.weakness().name(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Strong with: ", Style::default().fg(Color::DarkGray)),
            Span::styled(fighter.strength().name(), Style::default().fg(Color::Green)),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(panel, area);
}

fn choice_span(choice: Option<ActionId>, pending: &str) -> Span<'static> {
    match choice {
        Some(action) => Span::styled(
            action.name(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(pending.to_string(), Style::default().fg(Color::DarkGray)),
    }
}

fn damage_line(subject: &str, damage: u32, bonus: u32, color: Color) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{} ", subject)),
        Span::styled(
            damage.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" damage"),
    ];
    if bonus > 0 {
        spans.push(Span::styled(
            format!(" (+{}% type bonus)", bonus),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

fn outcome_lines(outcome: &RoundOutcome) -> Vec<Line<'static>> {
    let summary_color = if outcome.summary.favors_player() {
        Color::Green
    } else if outcome.summary.favors_opponent() {
        Color::Red
    } else {
        Color::Yellow
    };

    let mut lines = vec![Line::from(Span::styled(
        outcome.description(),
        Style::default()
            .fg(summary_color)
            .add_modifier(Modifier::BOLD),
    ))];

    if outcome.damage_to_opponent > 0 {
        lines.push(damage_line(
            "You deal",
            outcome.damage_to_opponent,
            outcome.player_type_bonus,
            Color::Green,
        ));
    }
    if outcome.damage_to_player > 0 {
        lines.push(damage_line(
            "Rival deals",
            outcome.damage_to_player,
            outcome.opponent_type_bonus,
            Color::Red,
        ));
    }
    if outcome.player_heal > 0 {
        lines.push(Line::from(Span::styled(
            format!("You heal {} HP", outcome.player_heal),
            Style::default().fg(Color::Green),
        )));
    }
    if outcome.opponent_heal > 0 {
        lines.push(Line::from(Span::styled(
            format!("Rival heals {} HP", outcome.opponent_heal),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn render_round_panel(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Round {} ", session.round() + 1))
        .border_style(Style::default().fg(Color::DarkGray));

    let opponent_pending = match session.phase() {
        BattlePhase::AwaitingOpponent => "thinking...",
        _ => "-",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("You:   ", Style::default().fg(Color::Cyan)),
            choice_span(session.player_choice(), "-"),
        ]),
        Line::from(vec![
            Span::styled("Rival: ", Style::default().fg(Color::Red)),
            choice_span(session.opponent_choice(), opponent_pending),
        ]),
        Line::from(""),
    ];

    if let Some(outcome) = session.last_outcome() {
        lines.extend(outcome_lines(outcome));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_action_list(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let player = session.player();
    let opponent = session.opponent();
    let cooldowns = session.player_cooldowns();
    let choosing = session.phase() == BattlePhase::AwaitingPlayer;

    let items: Vec<ListItem> = ActionId::ALL
        .into_iter()
        .map(|action| {
            let remaining = cooldowns.remaining(action);
            let (min, max) = action.range();

            let mut spans = vec![Span::styled(
                format!("[{}] {:<14}", action.hotkey(), action.name()),
                Style::default().fg(if remaining > 0 {
                    Color::DarkGray
                } else if choosing {
                    Color::White
                } else {
                    Color::Gray
                }),
            )];

            let detail = match action {
                ActionId::Defense => "halves damage".to_string(),
                ActionId::Heal => format!("{}-{} HP", min, max),
                _ => format!("{}-{} dmg", min, max),
            };
            spans.push(Span::styled(
                format!("{:<14}", detail),
                Style::default().fg(Color::DarkGray),
            ));

            if let Some(beaten) = action.beats() {
                spans.push(Span::styled(
                    format!("beats {:<9}", beaten.name()),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            if action.is_elemental() {
                let bonus = type_bonus(player, action, opponent);
                if bonus > 0 {
                    spans.push(Span::styled(
                        format!("+{}%", bonus),
                        Style::default().fg(Color::Magenta),
                    ));
                }
            }

            if remaining > 0 {
                spans.push(Span::styled(
                    format!(" (cooldown {})", remaining),
                    Style::default().fg(Color::Yellow),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Actions ")
            .border_style(Style::default().fg(if choosing {
                Color::Cyan
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(list, area);
}

fn render_info(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let inner = render_info_panel_frame(frame, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Wins:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.wins().to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Rival: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("Lv {}", session.opponent().level())),
        ]),
        Line::from(vec![
            Span::styled("Round: ", Style::default().fg(Color::DarkGray)),
            Span::raw((session.round() + 1).to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Rival cooldowns",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let mut cooling = session.opponent_cooldowns().active().peekable();
    if cooling.peek().is_none() {
        lines.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (action, remaining) in cooling {
        lines.push(Line::from(format!("  {} ({})", action.name(), remaining)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_phase_status(frame: &mut Frame, area: Rect, session: &BattleSession) {
    match session.phase() {
        BattlePhase::AwaitingPlayer => render_status_bar(
            frame,
            area,
            "Choose your action",
            Color::Cyan,
            &[("[1-6]", "Act"), ("[Esc]", "Menu"), ("[Q]", "Quit")],
        ),
        BattlePhase::AwaitingOpponent => {
            let seconds = session.opponent_wait_ms() as f64 / 1000.0;
            render_status_bar(
                frame,
                area,
                &format!("Rival is choosing... {:.1}s", seconds),
                Color::Yellow,
                &[("[Space]", "Skip"), ("[Esc]", "Menu")],
            )
        }
        BattlePhase::RoundResolved => render_status_bar(
            frame,
            area,
            "Round resolved",
            Color::White,
            &[("[Space]", "Continue"), ("[Esc]", "Menu")],
        ),
        BattlePhase::BattleOver => render_status_bar(
            frame,
            area,
            "Battle over",
            Color::White,
            &[("[R]", "New battle"), ("[Esc]", "Menu"), ("[Q]", "Quit")],
        ),
    }
}

fn render_outcome_banner(
    frame: &mut Frame,
    area: Rect,
    session: &BattleSession,
    result: BattleResult,
) {
    let hint = "[R] New battle  [Esc] Menu";
    match result {
        BattleResult::Victory => render_result_banner(
            frame,
            area,
            Color::Green,
            "VICTORY!",
            &format!(
                "Win streak {} - next rival is level {}",
                session.wins(),
                session.opponent_level()
            ),
            hint,
        ),
        BattleResult::Defeat => render_result_banner(
            frame,
            area,
            Color::Red,
            "DEFEAT",
            "Your streak is over",
            hint,
        ),
    }
}
