use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use burst::{clock::Clock, persist::StateStore, state::State, util::format_last_saved};

use crate::{confetti::Confetti, App, HOMEPAGE};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Levels drawn either side of the current one on the level map
const MAP_RADIUS: usize = 12;

const INSTRUCTIONS: [&str; 9] = [
    "Type the word, then space.",
    "Hit the target speed enough times in a row",
    "to unlock the next word. A typo or a slow",
    "attempt resets the streak.",
    "",
    "tab/enter  give up on this attempt",
    "arrows  move between unlocked words",
    "F3 theme  F4 speed  F5 streak  F6 confetti  F7 sound",
    "F1 close  F2 credits  esc quit",
];

impl<C: Clock, S: StateStore> Widget for &App<C, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.session.state();
        let now = self.session.clock().now_ms();

        let base = if state.dark_mode {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        };
        buf.set_style(area, base);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1), // level map
                Constraint::Min(1),
                Constraint::Length(1), // word
                Constraint::Length(1), // streak
                Constraint::Length(1), // banner
                Constraint::Length(1), // caps warning
                Constraint::Min(1),
                Constraint::Length(1), // footer
            ])
            .split(area);

        let header = Paragraph::new(Span::styled(
            format!(
                "level {} of {}   best {}   target {} wpm x {}",
                state.level + 1,
                state.wordlist().len(),
                state.highest_level + 1,
                state.target_wpm,
                state.target_streak
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        header.render(chunks[0], buf);

        Paragraph::new(level_map(state))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(word_line(state))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let streak = format!(
            "{}{}",
            "#".repeat(state.word.streak.min(state.target_streak) as usize),
            "-".repeat(state.target_streak.saturating_sub(state.word.streak) as usize)
        );
        let last_wpm = state
            .last_wpm
            .map(|wpm| format!("   last {wpm} wpm"))
            .unwrap_or_default();
        Paragraph::new(Span::styled(format!("[{streak}]{last_wpm}"), dim_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        if let Some(banner) = &self.banner {
            let color = if banner.failure { Color::Red } else { Color::Green };
            Paragraph::new(Span::styled(
                banner.text.as_str(),
                Style::default().patch(bold_style).fg(color),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        let warning = if state.caps_detected {
            Some("caps lock is on?")
        } else if !state.focused {
            Some("paused: terminal lost focus")
        } else {
            None
        };
        if let Some(warning) = warning {
            Paragraph::new(Span::styled(
                warning,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        let footer = Paragraph::new(Span::styled(
            format!(
                "saved {}   F1 help   esc quit",
                format_last_saved(state.last_save, now)
            ),
            italic_style,
        ));
        footer.render(chunks[8], buf);

        if state.finished {
            render_overlay(
                "complete",
                &[
                    "Every word in the list is mastered.",
                    "home  start over from the first word",
                    "arrows  revisit any word",
                ],
                area,
                buf,
            );
        } else if state.show_instructions {
            render_overlay("how to play", &INSTRUCTIONS, area, buf);
        } else if state.show_credits {
            let homepage = format!("F8 open {HOMEPAGE}");
            let mut lines = vec!["burst: typing practice, one word at a time", ""];
            if Browser::is_available() {
                lines.push(homepage.as_str());
            }
            lines.push("F2 close");
            render_overlay("credits", &lines, area, buf);
        }

        if self.confetti.is_active() {
            render_confetti(&self.confetti, area, buf);
        }
    }
}

/// The current word, coloured by what has been typed so far
fn word_line(state: &State) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default().patch(bold_style).add_modifier(Modifier::DIM);

    let spans = state
        .word
        .characters
        .iter()
        .map(|c| {
            let symbol = match c.character {
                ' ' => "·".to_owned(),
                ch => ch.to_string(),
            };
            match c.correct {
                Some(true) => Span::styled(symbol, green_bold_style),
                Some(false) => Span::styled(symbol, red_bold_style),
                None => Span::styled(symbol, dim_bold_style),
            }
        })
        .collect::<Vec<Span>>();

    Line::from(spans)
}

/// A strip of levels around the current one: unlocked words as `o`, the
/// current word as `@`, locked words as `.`
fn level_map(state: &State) -> Line<'static> {
    let first = state.level.saturating_sub(MAP_RADIUS);
    let last = (state.level + MAP_RADIUS).min(state.last_index());

    let spans = (first..=last)
        .map(|level| {
            if level == state.level {
                Span::styled("@", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else if level <= state.highest_level {
                Span::styled("o", Style::default().fg(Color::Cyan))
            } else {
                Span::styled(".", Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect::<Vec<Span>>();

    Line::from(spans)
}

/// A bordered box centred over `area`, sized to its text
fn render_overlay(title: &str, lines: &[&str], area: Rect, buf: &mut Buffer) {
    let text_width = lines
        .iter()
        .map(|line| line.width())
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0) as u16;

    let width = (text_width + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(rect, buf);
    Paragraph::new(lines.iter().map(|line| Line::from(*line)).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(rect, buf);
}

fn render_confetti(confetti: &Confetti, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &confetti.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let style = if particle.life() > 0.6 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if particle.life() > 0.25 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}
