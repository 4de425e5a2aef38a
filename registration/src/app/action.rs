use crossterm::event::KeyEvent;
use registration_core::api::{self, register};

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// A registration request came back, one way or the other
    Registered(api::Result<register::Resp>),

    /// Something bad happened; display it to the user
    Problem(String),

    /// Some amount of time passed and toasts should age
    TimePassed,
}
