use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod input;
pub mod viewer;

pub use error::Error;
pub use input::Input;
pub use viewer::Viewer;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Input, Viewer, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Input(page) => page.render(frame, area, config),
            Self::Viewer(page) => page.render(frame, area, config),
            Self::Error(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&mut self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Input(_) => None,
            Self::Viewer(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Input(page) => page.handle_events(event, config),
            Self::Viewer(page) => page.handle_events(event, config),
            Self::Error(page) => page.handle_events(event, config),
        }
    }

    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        match self {
            Self::Input(_) => None,
            Self::Viewer(page) => page.poll(config),
            Self::Error(_) => None,
        }
    }
}
