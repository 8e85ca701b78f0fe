use bidikit::{BaseDirection, Direction, Playback, Speed, resolve_segments};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    config::Config,
    page::{Input, input::direction_label},
    utils::center,
};

use super::Message;

/// Page: Resolution viewer
///
/// Animates the playhead over the resolved text and shows the segment and
/// chunk breakdown underneath.
pub struct Viewer {
    text: String,
    direction: BaseDirection,
    playback: Playback,
}

impl Viewer {
    /// Resolves `text` and creates a viewer for it
    pub fn new(text: String, direction: BaseDirection, config: &Config) -> Self {
        let segments = resolve_segments(&text, direction, &config.settings.locale);
        let playback = Playback::new(&text, segments);

        Self {
            text,
            direction,
            playback,
        }
    }
}

// Rendering logic
impl Viewer {
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(90), Constraint::Percentage(90));

        let [text_area, status_area, scrubber_area, inspector_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        self.render_text(frame, text_area, config);
        self.render_status(frame, status_area);
        self.render_scrubber(frame, scrubber_area, config);
        self.render_inspector(frame, inspector_area, config);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from(
            "<Space> play/pause · <←/→> step · <t> speed · <e> edit",
        ))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key);
        }

        None
    }

    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        self.playback.poll();
        None
    }
}

// Render helpers
impl Viewer {
    fn render_text(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let progress = self.playback.progress();
        let segments = self.playback.segments();

        let spans = self
            .playback
            .frames()
            .iter()
            .enumerate()
            .map(|(index, char_frame)| {
                let mut style = if char_frame.processed {
                    let direction = char_frame
                        .group_index
                        .and_then(|group| segments.get(group))
                        .map_or(Direction::Neutral, |segment| segment.direction);
                    Style::new().fg(direction_color(direction, config))
                } else {
                    Style::new().fg(theme.neutral).dim()
                };

                if index == progress {
                    style = style.reversed();
                }

                Span::styled(char_frame.char.to_string(), style)
            })
            .collect::<Vec<_>>();

        let text = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(Block::new().title("Text"));
        frame.render_widget(text, area);
    }

    fn render_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let state = if self.playback.is_finished() {
            "finished"
        } else if self.playback.is_playing() {
            "playing"
        } else {
            "paused"
        };
        let speed = match self.playback.speed() {
            Speed::Fast => "fast",
            Speed::Slow => "slow",
        };

        let status = Line::from(format!(
            "{}/{} ({:.0}%) · {state} · speed: {speed} · base: {}",
            self.playback.progress(),
            self.playback.len(),
            self.playback.percent(),
            direction_label(self.direction),
        ));
        frame.render_widget(status, area);
    }

    fn render_scrubber(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let length = self.playback.len();
        if length == 0 || area.width == 0 {
            return;
        }

        let theme = &config.settings.theme.text;
        let width = area.width as usize;
        let progress = self.playback.progress();
        let markers = self.playback.markers();

        // Map each cell to the first character it covers; a cell is filled
        // once the playhead has passed that character, and segment
        // boundaries override the fill
        let spans = (0..width)
            .map(|cell| {
                let char_index = cell * length / width;
                let boundary_cell = markers
                    .iter()
                    .any(|&marker| marker < length && marker * width / length == cell);

                if boundary_cell {
                    Span::styled("┃", Style::new().fg(theme.highlight))
                } else if char_index < progress {
                    Span::styled("▓", Style::new().fg(theme.highlight))
                } else {
                    Span::styled("░", Style::new().fg(theme.neutral))
                }
            })
            .collect::<Vec<_>>();

        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(Block::new().title("Scrubber")),
            area,
        );
    }

    fn render_inspector(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let mut lines = Vec::new();

        for (index, segment) in self.playback.segments().iter().enumerate() {
            lines.push(Line::from(vec![
                Span::raw(format!("#{index} ")),
                Span::styled(
                    segment.direction.to_string(),
                    Style::new()
                        .bold()
                        .fg(direction_color(segment.direction, config)),
                ),
                Span::raw(format!(" ⟨{}⟩", segment.text)),
            ]));

            for chunk in segment.chunks.iter().filter(|chunk| chunk.was_rewritten()) {
                lines.push(Line::from(vec![
                    Span::raw("   "),
                    Span::styled(
                        format!("{} → {}", chunk.original, chunk.resolved),
                        Style::new().fg(theme.error),
                    ),
                    Span::raw(format!(" ⟨{}⟩", chunk.text)),
                ]));
            }
        }

        let inspector = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().title("Segments"));
        frame.render_widget(inspector, area);
    }
}

// Event handlers
impl Viewer {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char(' ') => self.playback.toggle(),
            KeyCode::Char('t') => self.playback.toggle_speed(),
            KeyCode::Char('r') => self.playback.reset(),
            KeyCode::Left => self.playback.step_backward(),
            KeyCode::Right => self.playback.step_forward(),
            KeyCode::Home => self.playback.seek_to(0),
            KeyCode::End => self.playback.seek_to(self.playback.len()),
            KeyCode::Char(digit) if digit.is_ascii_digit() => {
                // '5' jumps to 50%, '0' rewinds
                let percent = f64::from(digit as u8 - b'0') * 10.0;
                self.playback.seek_to_percent(percent);
            }
            KeyCode::Char('e') | KeyCode::Backspace => {
                let input = Input::with_text(self.text.clone(), self.direction);
                return Some(Message::Show(input.into()));
            }
            _ => (),
        };

        None
    }
}

fn direction_color(direction: Direction, config: &Config) -> ratatui::style::Color {
    let theme = &config.settings.theme.text;
    match direction {
        Direction::Ltr => theme.ltr,
        Direction::Rtl => theme.rtl,
        Direction::Neutral => theme.neutral,
    }
}
