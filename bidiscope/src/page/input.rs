use bidikit::BaseDirection;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, Paragraph},
};

use crate::{config::Config, page::Viewer, utils::center};

use super::Message;

/// Page: Text input
///
/// Pick a sample or type a custom text, choose the base direction, and
/// hand off to the viewer.
pub struct Input {
    text: String,
    direction: BaseDirection,
    sample_index: usize,
}

impl Input {
    /// Creates a new input page, pre-filled with the first sample
    pub fn new(config: &Config) -> Self {
        let text = config
            .settings
            .samples
            .first()
            .map(|sample| sample.text.clone())
            .unwrap_or_default();

        Self {
            text,
            direction: BaseDirection::default(),
            sample_index: 0,
        }
    }

    /// Creates an input page with a specific text and direction, used when
    /// returning from the viewer
    pub const fn with_text(text: String, direction: BaseDirection) -> Self {
        Self {
            text,
            direction,
            sample_index: 0,
        }
    }
}

// Rendering logic
impl Input {
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));

        let samples = &config.settings.samples;
        let [list_area, text_area, direction_area] = Layout::vertical([
            Constraint::Length(samples.len() as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let index = self.sample_index;
        let items = samples.iter().enumerate().map(|(i, sample)| {
            let mut selector = "  ";
            let style = if i == index {
                selector = "> ";
                Style::new()
                    .fg(config.settings.theme.text.highlight)
                    .reversed()
            } else {
                Style::new()
            };
            Line::from(Span::styled(format!("{selector}{}", sample.name), style))
        });

        frame.render_widget(
            List::new(items).block(Block::new().title("Samples")),
            list_area,
        );

        let text = Paragraph::new(Line::from(vec![
            Span::raw(self.text.clone()),
            Span::styled("█", Style::new().fg(config.settings.theme.text.highlight)),
        ]))
        .block(Block::new().title("Text"));
        frame.render_widget(text, text_area);

        let direction = Line::from(vec![
            Span::raw("Base direction: "),
            Span::styled(
                direction_label(self.direction),
                Style::new().bold().fg(config.settings.theme.text.highlight),
            ),
        ]);
        frame.render_widget(direction, direction_area);
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key, config);
        }

        None
    }
}

// Event handlers
impl Input {
    fn handle_key(&mut self, key: &KeyEvent, config: &Config) -> Option<Message> {
        let samples = &config.settings.samples;
        match key.code {
            KeyCode::Up => {
                if !samples.is_empty() {
                    decrement_index(&mut self.sample_index, samples.len());
                    self.text = samples[self.sample_index].text.clone();
                }
            }
            KeyCode::Down => {
                if !samples.is_empty() {
                    increment_index(&mut self.sample_index, samples.len());
                    self.text = samples[self.sample_index].text.clone();
                }
            }
            KeyCode::Tab => self.direction = cycle_direction(self.direction),
            KeyCode::Char(character) => self.text.push(character),
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Enter => {
                if !self.text.trim().is_empty() {
                    let viewer = Viewer::new(self.text.clone(), self.direction, config);
                    return Some(Message::Show(viewer.into()));
                }
            }
            _ => (),
        };

        None
    }
}

pub const fn direction_label(direction: BaseDirection) -> &'static str {
    match direction {
        BaseDirection::Ltr => "ltr",
        BaseDirection::Rtl => "rtl",
        BaseDirection::Auto => "auto",
    }
}

const fn cycle_direction(direction: BaseDirection) -> BaseDirection {
    match direction {
        BaseDirection::Auto => BaseDirection::Ltr,
        BaseDirection::Ltr => BaseDirection::Rtl,
        BaseDirection::Rtl => BaseDirection::Auto,
    }
}

const fn decrement_index(index: &mut usize, len: usize) {
    *index = if *index == 0 { len - 1 } else { *index - 1 }
}

const fn increment_index(index: &mut usize, len: usize) {
    *index = (*index + 1) % len
}
