use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};
use registration_core::{api::register, Role};
use reqwest::Url;

/// Render the confirmation shown after a user is registered.
pub fn render(resp: &register::Resp, web_uri: &Url, body_area: Rect, frame: &mut Frame<'_>) {
    let popup_vert = Layout::vertical([Constraint::Length(14)]).flex(Flex::Center);
    let popup_horiz = Layout::horizontal([Constraint::Max(64)]).flex(Flex::Center);

    let [popup_area] = popup_vert.areas(body_area);
    let [popup_area] = popup_horiz.areas(popup_area);

    let roles = resp
        .roles
        .iter()
        .map(|id| Role::name_of(*id).map_or_else(|| id.to_string(), ToOwned::to_owned))
        .collect::<Vec<_>>()
        .join(", ");

    let lines = vec![
        Line::from("✔ Registro Concluído!").green().bold(),
        Line::from(""),
        Line::from("O usuário foi registrado com sucesso no sistema."),
        Line::from(format!("Seu login é {}!", resp.login)).bold(),
        Line::from(format!("Cargos: {roles}")).dark_gray(),
        Line::from(format!(
            "Criado em {}",
            resp.created_at.with_timezone(&Local).to_rfc2822()
        ))
        .dark_gray(),
        Line::from(""),
        Line::from(format!("[enter] Entre no sistema! ({web_uri})")),
        Line::from("[n] Registrar Novo Usuário"),
        Line::from("[q] Sair"),
    ];

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(Style::new().fg(Color::Green)),
        );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
