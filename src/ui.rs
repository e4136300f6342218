use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ChatView, View};
use crate::input::InputLine;
use crate::state::{PresentationMode, Sender};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Colors of a chat view for one presentation mode
struct Palette {
    bg: Color,
    fg: Color,
    user: Color,
    bot: Color,
    muted: Color,
    border: Color,
}

fn palette(mode: PresentationMode) -> Palette {
    match mode {
        PresentationMode::Dark => Palette {
            bg: Color::Black,
            fg: Color::White,
            user: Color::Cyan,
            bot: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
        },
        PresentationMode::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            user: Color::Blue,
            bot: Color::Magenta,
            muted: Color::Gray,
            border: Color::DarkGray,
        },
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.view {
        View::Landing => render_landing(app, frame, body_area),
        View::Chat(idx) => {
            let frame_no = app.animation_frame;
            if let Some(chat) = app.chats.views.get_mut(idx) {
                render_chat(chat, frame_no, frame, body_area);
            }
        }
    }

    render_footer(app, frame, footer_area);

    if let Some(alert) = app.landing.alert() {
        if app.view == View::Landing {
            render_alert(alert, frame, area);
        }
    }
}

/// Tab strip: the landing view followed by every open chat
fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let active = Style::default().bg(Color::Blue).fg(Color::White).bold();
    let inactive = Style::default().fg(Color::Gray);

    let mut spans = vec![Span::styled(" RepoChat ", Style::default().fg(Color::Cyan).bold())];

    let home_style = if app.view == View::Landing { active } else { inactive };
    spans.push(Span::styled(" Home ", home_style));

    for (idx, chat) in app.chats.views.iter().enumerate() {
        let style = if app.view == View::Chat(idx) { active } else { inactive };
        let marker = if chat.session.is_awaiting_response() { "*" } else { "" };
        spans.push(Span::styled(format!(" {}{} ", chat.title(), marker), style));
    }

    spans.push(Span::styled(
        format!(" v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints: Vec<(&str, &str)> = match app.view {
        View::Landing if app.landing.alert().is_some() => vec![("Enter", "dismiss")],
        View::Landing if app.landing.is_loading() => vec![],
        View::Landing => vec![("Enter", "analyze repo")],
        View::Chat(_) => {
            let toggle = app
                .active_chat()
                .map(|chat| chat.session.presentation_mode().toggle_label())
                .unwrap_or("theme");
            vec![
                ("Enter", "send"),
                ("PgUp/PgDn", "scroll"),
                ("^T", toggle),
                ("^W", "close"),
                ("Esc", "home"),
            ]
        }
    };
    if !app.chats.is_empty() {
        hints.push(("Tab", "switch view"));
    }
    hints.push(("^C", "quit"));

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_landing(app: &App, frame: &mut Frame, area: Rect) {
    let form_area = centered_rect(70, 14, area);

    let [title_area, subtitle_area, _, input_area, button_area, _, status_area] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(form_area);

    let title = Paragraph::new(Line::from(Span::styled(
        "RepoChat",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let subtitle = Paragraph::new("Chat with any public GitHub repository in seconds.")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, subtitle_area);

    let loading = app.landing.is_loading();
    let border_color = if loading { Color::DarkGray } else { Color::Yellow };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" GitHub repository URL ");

    let show_cursor = !loading && app.landing.alert().is_none();
    render_input(
        app.landing.input(),
        input_block,
        Style::default().fg(if loading { Color::DarkGray } else { Color::Cyan }),
        show_cursor,
        frame,
        input_area,
    );

    let button = if loading {
        Span::styled(" Analyzing... ", Style::default().bg(Color::DarkGray).fg(Color::Gray))
    } else {
        Span::styled(" Analyze Repo ", Style::default().bg(Color::Blue).fg(Color::White).bold())
    };
    frame.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        button_area,
    );

    if loading {
        let spinner = SPINNER[app.animation_frame as usize % SPINNER.len()];
        let status = Paragraph::new(Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::raw(" Analyzing repository, please wait..."),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(status, status_area);
    } else {
        let backend = Paragraph::new(format!("Backend: {}", app.api_url))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(backend, status_area);
    }
}

fn render_chat(chat: &mut ChatView, animation_frame: u8, frame: &mut Frame, area: Rect) {
    let colors = palette(chat.session.presentation_mode());
    let base = Style::default().bg(colors.bg).fg(colors.fg);

    let [chat_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(format!(" RepoChat Assistant: {} ", chat.title()))
        .style(base);

    let awaiting = chat.session.is_awaiting_response();
    let text = if chat.session.messages().is_empty() && !awaiting {
        Text::from(Span::styled(
            "Ask a question about the repository...",
            Style::default().fg(colors.muted),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in chat.session.messages() {
            let (label, color, alignment) = match msg.sender {
                Sender::User => ("You", colors.user, Alignment::Right),
                Sender::Bot => ("RepoChat", colors.bot, Alignment::Left),
            };
            lines.push(
                Line::from(Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .alignment(alignment),
            );
            for line in msg.text.lines() {
                lines.push(Line::from(line.to_string()).alignment(alignment));
            }
            lines.push(Line::default());
        }

        // Placeholder bubble, not part of the transcript
        if awaiting {
            lines.push(Line::from(Span::styled(
                "RepoChat",
                Style::default().fg(colors.bot).add_modifier(Modifier::BOLD),
            )));
            let dots = ".".repeat((animation_frame % 3) as usize + 1);
            lines.push(Line::from(Span::styled(
                format!("Thinking{}", dots),
                Style::default().fg(colors.muted).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    // Measure with the same wrapping that draws it, inside the borders
    let transcript = Paragraph::new(text).wrap(Wrap { trim: true });
    let inner_width = chat_area.width.saturating_sub(2);
    let content_height = if inner_width == 0 {
        0
    } else {
        u16::try_from(transcript.line_count(inner_width)).unwrap_or(u16::MAX)
    };
    chat.sync_scroll(content_height, chat_area.height.saturating_sub(2));

    let transcript = transcript.block(chat_block).scroll((chat.scroll, 0));
    frame.render_widget(transcript, chat_area);

    let (input_color, title) = if awaiting {
        (colors.muted, " Waiting for answer... ")
    } else {
        (colors.user, " Type your question ")
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if awaiting { colors.muted } else { Color::Yellow }))
        .title(title)
        .style(base);

    render_input(
        chat.session.input(),
        input_block,
        Style::default().fg(input_color),
        !awaiting,
        frame,
        input_area,
    );
}

/// Draw a single line input, scrolled horizontally to keep the cursor visible
fn render_input(
    input: &InputLine,
    block: Block,
    style: Style,
    show_cursor: bool,
    frame: &mut Frame,
    area: Rect,
) {
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible, offset) = input.visible(inner_width);

    frame.render_widget(Paragraph::new(visible).style(style).block(block), area);

    if show_cursor {
        let cursor_x = (input.cursor() - offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_alert(message: &str, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 7, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Alert ");

    let text = Text::from(vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let alert = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(alert, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
