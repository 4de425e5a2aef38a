use ratatui::style::{Color, Style};

/// How many ticks a toast stays on screen
pub const TOAST_TICKS: u8 = 5;

/// A short-lived message in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub message: String,
    pub kind: Kind,
    ticks_left: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Success,
    Error,
}

impl Toast {
    pub fn success(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
            kind: Kind::Success,
            ticks_left: TOAST_TICKS,
        }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
            kind: Kind::Error,
            ticks_left: TOAST_TICKS,
        }
    }

    /// Age the toast by one tick. Returns `false` once it should go away.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }

    pub fn style(&self) -> Style {
        match self.kind {
            Kind::Success => Style::new().fg(Color::Black).bg(Color::Green),
            Kind::Error => Style::new().fg(Color::White).bg(Color::Red),
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.title, self.message)
    }
}
