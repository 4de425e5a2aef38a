use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    widgets::Paragraph,
    Frame,
};
use registration_core::{
    api::{self, register},
    form::Blocked,
    Form, Phase,
};
use reqwest::Url;
use std::process::ExitCode;

use crate::config::Config;

/// Things that can happen to this app
pub mod action;
pub use action::Action;

/// Side effects the app asks the shell to perform
pub mod effect;
pub use effect::Effect;

/// The form view's widget state
mod registration_form;
use registration_form::RegistrationForm;

/// The view after a successful registration
mod success;

/// Short-lived status messages
mod toast;
use toast::Toast;

/// The "functional core" of the app.
pub struct App {
    /// The draft and where we are in submitting it
    form: Form,

    /// Inputs and focus for the form view
    inputs: RegistrationForm,

    /// Transient message in the status line
    toast: Option<Toast>,

    /// Where registrations go
    api: api::Client,

    /// Where to send people once they're registered
    web_uri: Url,

    /// Mirror toasts for the outcome of a registration as desktop notifications
    desktop_notifications: bool,

    /// Set once the user asks to leave
    exit: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app
    pub fn new(config: &Config) -> Self {
        Self {
            form: Form::new(),
            inputs: RegistrationForm::default(),
            toast: None,
            api: api::Client::new(config.api_uri.clone()),
            web_uri: config.web_uri.clone(),
            desktop_notifications: config.desktop_notifications,
            exit: None,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match self.form.phase() {
            Phase::Succeeded(resp) => success::render(resp, &self.web_uri, body_area, frame),
            Phase::Editing { .. } | Phase::Submitting => {
                self.inputs.render(&self.form, body_area, frame);
            }
        }

        let status = match &self.toast {
            Some(toast) => Paragraph::new(toast.text()).style(toast.style()),
            None => match self.form.phase() {
                Phase::Succeeded(_) => Paragraph::new("enter: abrir sistema · n: novo registro · q: sair"),
                _ => Paragraph::new(
                    "tab/shift-tab: campos · ←/→: filial e cargos · espaço: marcar · enter: registrar · esc: sair",
                ),
            }
            .dark_gray(),
        };

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Registered(result) => self.handle_registered(result),
            Action::Problem(problem) => {
                self.toast = Some(Toast::error("Erro", problem));

                vec![]
            }
            Action::TimePassed => {
                if let Some(toast) = &mut self.toast {
                    if !toast.tick() {
                        self.toast = None;
                    }
                }

                vec![]
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exit = Some(ExitCode::SUCCESS);
            return vec![];
        }

        if matches!(self.form.phase(), Phase::Succeeded(_)) {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('o') => {
                    vec![Effect::OpenWebEntry(self.web_uri.clone())]
                }
                KeyCode::Char('n') => {
                    self.form.register_another();
                    self.inputs = RegistrationForm::default();

                    vec![]
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.exit = Some(ExitCode::SUCCESS);

                    vec![]
                }
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.exit = Some(ExitCode::SUCCESS);

                vec![]
            }
            KeyCode::Enter => self.submit(),
            _ => {
                if self.inputs.handle_event(key, &mut self.form) {
                    self.submit()
                } else {
                    vec![]
                }
            }
        }
    }

    /// Try to start a submission. Anything that stops it before the network
    /// only gets a toast; the form's phase doesn't change.
    fn submit(&mut self) -> Vec<Effect> {
        match self.form.begin_submit() {
            Ok(req) => {
                tracing::info!(draft = ?self.form.draft(), "submitting");

                vec![Effect::Register(self.api.clone(), req)]
            }
            Err(Blocked::InFlight | Blocked::AlreadyRegistered) => vec![],
            Err(blocked) => {
                tracing::debug!(%blocked, "submission blocked");

                if let Blocked::MissingField(field) = blocked {
                    self.inputs.focus(field);
                }
                self.toast = Some(Toast::error("Erro", blocked.to_string()));

                vec![]
            }
        }
    }

    fn handle_registered(&mut self, result: api::Result<register::Resp>) -> Vec<Effect> {
        self.form.finish_submit(result);

        let (title, message) = match self.form.phase() {
            Phase::Succeeded(_) => {
                // The draft was cleared, so the inputs need to be too.
                self.inputs = RegistrationForm::default();
                self.toast = Some(Toast::success(
                    "Sucesso!",
                    "Usuário registrado com sucesso",
                ));

                ("Sucesso!", "Usuário registrado com sucesso".to_owned())
            }
            Phase::Editing {
                last_error: Some(message),
            } => {
                self.toast = Some(Toast::error("Erro no registro", message.clone()));

                ("Erro no registro", message.clone())
            }
            _ => return vec![],
        };

        if self.desktop_notifications {
            vec![Effect::Notify {
                summary: title.to_owned(),
                body: message,
            }]
        } else {
            vec![]
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use ratatui::{backend::TestBackend, Terminal};
    use registration_core::validate::Invalid;
    use reqwest::StatusCode;
    use serde_json::json;

    fn app() -> App {
        App::new(
            &Config::try_parse_from([
                "registration",
                "--api-uri",
                "https://api.empresa.com/users",
                "--web-uri",
                "https://app.empresa.com",
            ])
            .unwrap(),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
        app.handle(Action::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Fill in name, email, password, and check the first role.
    fn fill(app: &mut App, password: &str) {
        type_str(app, "João Silva");
        press(app, KeyCode::Tab); // employee code
        press(app, KeyCode::Tab); // email
        type_str(app, "joao@empresa.com");
        press(app, KeyCode::Tab); // password
        type_str(app, password);
        press(app, KeyCode::Tab); // branch
        press(app, KeyCode::Tab); // roles
        press(app, KeyCode::Char(' '));
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn created() -> register::Resp {
        register::Resp {
            id: 7,
            login: "joao.silva".to_owned(),
            roles: vec![1],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn enter_sends_request_with_explicit_nulls() {
        let mut app = app();
        fill(&mut app, "senha1234");

        let effects = press(&mut app, KeyCode::Enter);

        match effects.as_slice() {
            [Effect::Register(client, req)] => {
                assert_eq!(client.endpoint.as_str(), "https://api.empresa.com/users");
                assert_eq!(
                    serde_json::to_value(req).unwrap(),
                    json!({
                        "nome_completo": "João Silva",
                        "codigo_a": null,
                        "email": "joao@empresa.com",
                        "password": "senha1234",
                        "roles_list": [1],
                        "filial_id": null,
                    })
                );
            }
            other => panic!("expected a single Register effect, got {other:?}"),
        }

        assert!(app.form.phase().is_submitting());
        assert!(screen(&mut app).contains("Registrando..."));
    }

    #[test]
    fn short_password_only_toasts() {
        let mut app = app();
        fill(&mut app, "1234567");

        let effects = press(&mut app, KeyCode::Enter);

        assert!(effects.is_empty());
        assert_eq!(app.form.phase(), &Phase::default());
        assert_eq!(
            app.toast.as_ref().map(|toast| toast.message.clone()),
            Some(Invalid::PasswordTooShort.to_string())
        );
    }

    #[test]
    fn no_roles_only_toasts() {
        let mut app = app();
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Char(' ')); // uncheck the role again

        let effects = press(&mut app, KeyCode::Enter);

        assert!(effects.is_empty());
        assert!(screen(&mut app).contains("Selecione pelo menos um cargo"));
    }

    #[test]
    fn missing_email_focuses_field() {
        let mut app = app();
        type_str(&mut app, "João Silva");
        press(&mut app, KeyCode::Tab);

        let effects = press(&mut app, KeyCode::Enter);

        assert!(effects.is_empty());
        assert_eq!(app.inputs.active(), registration_form::Field::Email);
    }

    #[test]
    fn enter_while_submitting_does_nothing() {
        let mut app = app();
        fill(&mut app, "senha1234");
        assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);

        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert!(press(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn success_shows_login_and_clears_form() {
        let mut app = app();
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Enter);

        let effects = app.handle(Action::Registered(Ok(created())));

        assert!(effects.is_empty());
        let shown = screen(&mut app);
        assert!(shown.contains("Seu login é joao.silva!"), "{shown}");
        assert!(shown.contains("Usuário registrado com sucesso"));

        assert!(press(&mut app, KeyCode::Char('n')).is_empty());

        assert_eq!(app.form.phase(), &Phase::default());
        assert!(app.form.draft().is_empty());
        assert!(!screen(&mut app).contains("João Silva"));
    }

    #[test]
    fn success_view_opens_web_entry() {
        let mut app = app();
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Enter);
        app.handle(Action::Registered(Ok(created())));

        match press(&mut app, KeyCode::Enter).as_slice() {
            [Effect::OpenWebEntry(url)] => assert_eq!(url.as_str(), "https://app.empresa.com/"),
            other => panic!("expected OpenWebEntry, got {other:?}"),
        }
    }

    #[test]
    fn rejection_keeps_values_and_shows_message() {
        let mut app = app();
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Enter);
        let before = app.form.draft().clone();

        app.handle(Action::Registered(Err(api::Error::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "email já registrado".to_owned(),
        })));

        assert_eq!(app.form.phase().last_error(), Some("email já registrado"));
        assert_eq!(app.form.draft(), &before);

        let shown = screen(&mut app);
        assert!(shown.contains("email já registrado"), "{shown}");
        assert!(shown.contains("João Silva"));
        assert!(shown.contains("Registrar Usuário"));
    }

    #[test]
    fn long_rejection_is_shown_in_full() {
        let mut app = app();
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Enter);

        app.handle(Action::Registered(Err(api::Error::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "value is not a valid email address: The part after the @-sign is not \
                      valid; ensure this value has at least 8 characters"
                .to_owned(),
        })));
        for _ in 0..toast::TOAST_TICKS {
            app.handle(Action::TimePassed);
        }

        let shown = screen(&mut app);
        assert!(shown.contains("The part after the @-sign is not valid;"), "{shown}");
        assert!(shown.contains("ensure this value has at least 8 characters"), "{shown}");
    }

    #[test]
    fn desktop_notifications_when_enabled() {
        let mut app = app();
        app.desktop_notifications = true;
        fill(&mut app, "senha1234");
        press(&mut app, KeyCode::Enter);

        let effects = app.handle(Action::Registered(Ok(created())));

        assert!(matches!(effects.as_slice(), [Effect::Notify { .. }]));
    }

    #[test]
    fn toasts_expire() {
        let mut app = app();
        app.handle(Action::Problem("boom".to_owned()));

        for _ in 0..toast::TOAST_TICKS {
            app.handle(Action::TimePassed);
        }

        assert_eq!(app.toast, None);
    }

    #[test]
    fn escape_exits() {
        let mut app = app();

        press(&mut app, KeyCode::Esc);

        assert!(app.should_exit().is_some());
    }
}
