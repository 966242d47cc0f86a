use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use dsa_visualizer::phrases::QUICK_REPLIES;
use dsa_visualizer::{Category, ChatRole, IntroPhase};
use crate::app::{App, Focus};

const ROBOT: [&str; 5] = [
    "   ┌───┐   ",
    "  ┌┤◉ ◉├┐  ",
    "  └┤ ▽ ├┘  ",
    " ╭─┴───┴─╮ ",
    " ╰─┬───┬─╯ ",
];

const ROBOT_WAVING: [&str; 5] = [
    "   ┌───┐  /",
    "  ┌┤^ ^├┐/ ",
    "  └┤ ◡ ├┘  ",
    " ╭─┴───┴─╮ ",
    " ╰─┬───┬─╯ ",
];

/// Particles rise over this many ticks
const PARTICLE_RISE: u16 = 12;

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else { break };

        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        let bold = &after[..end];
        if !bold.is_empty() {
            spans.push(Span::styled(bold.to_string(), Style::default().add_modifier(Modifier::BOLD)));
        }
        rest = &after[end + 2..];
    }

    // Push any remaining text, including an unmatched **
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

/// Rows a set of lines occupies once wrapped to `width`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let chars = line.width();
            if chars == 0 { 1 } else { chars.div_ceil(width) as u16 }
        })
        .sum()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if app.controller.intro_phase().is_terminal() {
        // Main layout: header, body, footer
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header(frame, header_area);
        render_catalog(app, frame, body_area);
        render_footer(app, frame, footer_area);

        if app.chat_open() {
            render_chat(app, frame, body_area);
        }
    } else {
        render_intro(app, frame, area);
    }

    if app.notice.is_some() {
        render_notice(app, frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" DSA Visualizer ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("Learn algorithms & data structures", Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let pairs: Vec<(&str, &str)> = match (app.chat_open(), app.focus) {
        (true, Focus::ChatInput) => vec![
            (" Enter ", " send "),
            (" Tab ", " quick replies "),
            (" S-Tab ", " catalog "),
            (" Esc ", " close chat "),
        ],
        (true, Focus::QuickReplies) => vec![
            (" j/k ", " select "),
            (" Enter ", " send "),
            (" 1-6 ", " send # "),
            (" Tab ", " type "),
            (" Esc ", " close chat "),
        ],
        _ => vec![
            (" ←/→ ", " category "),
            (" j/k ", " select "),
            (" Enter ", " visualize "),
            (" c ", " chat "),
            (" p ", " practice "),
            (" ? ", " about "),
            (" q ", " quit "),
        ],
    };

    let hints: Vec<Span> = pairs
        .into_iter()
        .flat_map(|(key, label)| [Span::styled(key, key_style), Span::styled(label, label_style)])
        .collect();

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_intro(app: &App, frame: &mut Frame, area: Rect) {
    let intro = app.controller.intro();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" DSA Visualizer ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Particles drift up from the bottom edge as they age
    let buf = frame.buffer_mut();
    for particle in intro.particles() {
        let x = inner.x + ((particle.column * inner.width as f32) as u16).min(inner.width - 1);
        let rise = (particle.age as u16 * inner.height) / PARTICLE_RISE;
        let y = inner.y + inner.height.saturating_sub(1).saturating_sub(rise);
        let glyph = if particle.age % 2 == 0 { "✦" } else { "·" };
        buf.set_string(x, y, glyph, Style::default().fg(Color::Cyan));
    }

    let [_, stage, hint] = Layout::vertical([
        Constraint::Percentage(20),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    match intro.phase() {
        IntroPhase::Loading => {
            let status = intro.status().unwrap_or("");
            let line = Paragraph::new(Line::from(Span::styled(
                status,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .centered();
            frame.render_widget(line, centered(stage, stage.width, 1));
        }
        _ => render_robot(app, frame, stage),
    }

    let hint_text = if intro.choices_enabled() {
        " a/1 Algorithms   d/2 Data Structures   Esc skip intro "
    } else if intro.phase() == IntroPhase::Farewell {
        ""
    } else {
        " Esc skip intro "
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint_text, Style::default().fg(Color::DarkGray))).centered(),
        hint,
    );
}

fn render_robot(app: &App, frame: &mut Frame, area: Rect) {
    let intro = app.controller.intro();

    let art = if intro.farewell_playing() { ROBOT_WAVING } else { ROBOT };
    let robot_style = if intro.farewell_playing() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let robot_lines: Vec<Line> = art.iter().map(|l| Line::styled(*l, robot_style)).collect();

    let [robot_area, bubble_area] = Layout::vertical([
        Constraint::Length(robot_lines.len() as u16 + 1),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(robot_lines).centered(), robot_area);

    // Speech bubble only once the choices are revealed
    if intro.phase() == IntroPhase::RobotVisible {
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            intro.speech_title(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(intro.speech_text()),
    ];

    if intro.choices_visible() {
        let button = if intro.choices_enabled() {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::Gray)
        };
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(" 1 🔄 Algorithms ", button),
            Span::raw("   "),
            Span::styled(" 2 🏗️ Data Structures ", button),
        ]));
    }

    let bubble = centered(bubble_area, 64.min(bubble_area.width), lines.len() as u16 + 4);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .centered()
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, bubble);
}

fn render_catalog(app: &mut App, frame: &mut Frame, area: Rect) {
    let [tabs_area, list_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let active = app.controller.state().active_category();
    let titles: Vec<&str> = Category::all().iter().map(|c| c.display_name()).collect();
    let selected = Category::all().iter().position(|c| *c == active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Categories "))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let items: Vec<ListItem> = app
        .controller
        .visible_entries()
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(entry.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(entry.complexity.clone(), Style::default().fg(Color::Yellow)),
                ]),
                Line::styled(format!("  {}", entry.description), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let border_color = if app.focus == Focus::Catalog || !app.chat_open() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {} ", active.display_name())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.catalog_state);
}

fn render_chat(app: &mut App, frame: &mut Frame, body: Rect) {
    let width = (body.width * 3 / 5).max(40).min(body.width);
    let height = (body.height * 4 / 5).max(16).min(body.height);
    let popup = Rect::new(
        body.x + body.width - width,
        body.y + body.height - height,
        width,
        height,
    );
    frame.render_widget(Clear, popup);

    let [chat_area, replies_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(QUICK_REPLIES.len() as u16 + 2),
        Constraint::Length(3),
    ])
    .areas(popup);

    // Transcript
    let mut lines: Vec<Line> = Vec::new();
    for msg in app.controller.transcript() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "👤 You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(msg.content.clone()));
            }
            ChatRole::Bot => {
                lines.push(Line::from(Span::styled(
                    "🤖 DSA Bot:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(parse_markdown_line(line));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.controller.is_composing() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("DSA Bot is typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest message in view
    let inner_height = chat_area.height.saturating_sub(2);
    let inner_width = chat_area.width.saturating_sub(2);
    let scroll = wrapped_height(&lines, inner_width).saturating_sub(inner_height);

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" 🤖 DSA Bot "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(chat, chat_area);

    // Quick replies
    let replies_focused = app.focus == Focus::QuickReplies;
    let items: Vec<ListItem> = QUICK_REPLIES
        .iter()
        .enumerate()
        .map(|(i, reply)| ListItem::new(format!("{} {}", i + 1, reply)))
        .collect();
    let replies = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if replies_focused { Color::Cyan } else { Color::DarkGray }))
                .title(" Quick replies "),
        )
        .highlight_style(if replies_focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        })
        .highlight_symbol("> ");
    frame.render_stateful_widget(replies, replies_area, &mut app.quick_reply_state);

    // Input
    let input_focused = app.focus == Focus::ChatInput;
    let input = Paragraph::new(app.chat_input.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if input_focused { Color::Cyan } else { Color::DarkGray }))
                .title(" Ask me anything "),
        );
    frame.render_widget(input, input_area);

    if input_focused {
        let max_x = input_area.width.saturating_sub(3);
        let cursor_x = (app.chat_cursor as u16).min(max_x);
        frame.set_cursor_position((input_area.x + 1 + cursor_x, input_area.y + 1));
    }
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = app.notice.as_ref() else { return };

    let lines: Vec<Line> = notice
        .body
        .lines()
        .map(|l| Line::from(l.to_string()))
        .chain([Line::default(), Line::styled("Press any key", Style::default().fg(Color::DarkGray))])
        .collect();

    let popup = centered(area, 60, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", notice.title)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<(String, bool)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style.add_modifier.contains(Modifier::BOLD)))
            .collect()
    }

    #[test]
    fn test_bold_markdown() {
        let line = parse_markdown_line("🔸 **O(1)**: Constant");
        assert_eq!(
            texts(&line),
            vec![
                ("🔸 ".to_string(), false),
                ("O(1)".to_string(), true),
                (": Constant".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_unclosed_markdown_is_literal() {
        let line = parse_markdown_line("a **b");
        assert_eq!(texts(&line), vec![("a **b".to_string(), false)]);
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("abcdef"), Line::default(), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 3), 4);
        assert_eq!(wrapped_height(&lines, 0), 10);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
