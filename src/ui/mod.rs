use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::theme::ThemeMode;

pub fn draw(f: &mut Frame, app: &mut App) {
    let p = app.palette();
    let area = f.area();

    // Paint the themed background first
    f.render_widget(Block::default().style(Style::default().bg(p.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Search input
            Constraint::Min(9),    // Quote cards
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_search_box(f, app, chunks[1]);
    draw_results(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    // Suggestion dropdown overlays the top of the results area
    if app.show_suggestions {
        draw_suggestions(f, app, chunks[1], chunks[2]);
    } else {
        app.suggestion_area = None;
    }

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let p = app.palette();

    // Priority: status message > title line
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(p.success)))
    } else {
        let theme_name = match app.theme {
            ThemeMode::Light => "☀ light",
            ThemeMode::Dark => "☾ dark",
        };
        Line::from(vec![
            Span::styled(
                "Quote of the Day",
                Style::default().fg(p.header).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(p.text_dim)),
            Span::styled(theme_name, Style::default().fg(p.text_dim)),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_search_box(f: &mut Frame, app: &App, area: Rect) {
    let p = app.palette();
    let is_active = app.section == Section::Search && app.popup == Popup::None;
    let border_color = if is_active { p.accent } else { p.inactive };
    let title_style = if is_active {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.inactive)
    };

    let block = Block::default()
        .title(Span::styled(" Search Topic ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input = if app.query.is_empty() && !is_active {
        Paragraph::new("Search topic (e.g. love, life)")
            .style(Style::default().fg(p.text_dim))
            .block(block)
    } else {
        let cursor = if is_active { "_" } else { "" };
        Paragraph::new(format!("{}{}", app.query, cursor))
            .style(Style::default().fg(p.text))
            .block(block)
    };

    f.render_widget(input, area);
}

fn draw_suggestions(f: &mut Frame, app: &mut App, input_area: Rect, below: Rect) {
    let p = app.palette();

    let height = app.suggestions.len() as u16 + 2;
    let panel = Rect::new(
        input_area.x + 1,
        below.y,
        input_area.width.saturating_sub(2),
        height,
    )
    .intersection(below);
    if panel.height < 3 {
        // Not enough room to show the panel on this terminal
        app.suggestion_area = None;
        return;
    }

    f.render_widget(Clear, panel);

    let rows: Vec<Row> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let row_style = if i == app.selected_suggestion {
                Style::default().bg(p.bg_selected).fg(p.text)
            } else {
                Style::default().fg(p.text)
            };
            Row::new(vec![Span::styled(format!(" {}", topic), Style::default())]).style(row_style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .style(Style::default().bg(p.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.accent)),
        );

    f.render_widget(table, panel);

    // Remember where the panel landed so outside clicks can dismiss it
    app.suggestion_area = Some(panel);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let p = app.palette();

    if app.results.is_empty() {
        let placeholder = Paragraph::new("No quotes yet. Try searching a topic!")
            .style(Style::default().fg(p.text_dim))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.inactive)));
        f.render_widget(placeholder, area);
        return;
    }

    let constraints: Vec<Constraint> = app
        .results
        .iter()
        .map(|_| Constraint::Ratio(1, app.results.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let results_active = app.section == Section::Results && app.popup == Popup::None;

    for (i, quote) in app.results.iter().enumerate() {
        let is_selected = results_active && i == app.selected_result;
        let border_color = if is_selected { p.accent } else { p.inactive };
        let title_style = if is_selected {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.inactive)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", quote.topic), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let lines = vec![
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", quote.text),
                Style::default().fg(p.quote).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("— {}", quote.author),
                Style::default().fg(p.text_dim),
            )),
        ];

        let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
        f.render_widget(card, cards[i]);
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let p = app.palette();

    let hints: Vec<(&str, &str)> = match app.section {
        Section::Search => vec![
            ("Enter", "Search"),
            ("↑↓", "Suggestions"),
            ("Esc", "Clear"),
            ("Tab", "Results"),
            ("Ctrl+T", "Theme"),
        ],
        Section::Results => vec![
            ("↑↓", "Nav"),
            ("y", "Copy"),
            ("t", "Theme"),
            ("/", "Search"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 {
        4
    } else if area.width < 80 {
        5
    } else {
        hints.len()
    };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(p.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(p.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let p = app.palette();
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 60 },
        if area.height < 30 { 90 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Searching ═══",
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  type      ", Style::default().fg(p.accent)),
            Span::raw("Filter topic suggestions as you type"),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", Style::default().fg(p.accent)),
            Span::raw("Highlight a suggestion"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(p.accent)),
            Span::raw("Pick suggestion, or search the typed topic"),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", Style::default().fg(p.accent)),
            Span::raw("Close suggestions, then clear the query"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Quotes ═══",
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", Style::default().fg(p.accent)),
            Span::raw("Move between the shown quotes (up to 3)"),
        ]),
        Line::from(vec![
            Span::styled("  y/Enter   ", Style::default().fg(p.accent)),
            Span::raw("Copy the selected quote to the clipboard"),
        ]),
        Line::from(vec![
            Span::styled("  /         ", Style::default().fg(p.accent)),
            Span::raw("Back to the search box"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Theme ═══",
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  t/Ctrl+T  ", Style::default().fg(p.accent)),
            Span::raw("Toggle light/dark (remembered across runs)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Quick Start ═══",
            Style::default().fg(p.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  quotidian                  ", Style::default().fg(p.accent)),
            Span::raw("Launch this TUI"),
        ]),
        Line::from(vec![
            Span::styled("  quotidian --search life    ", Style::default().fg(p.accent)),
            Span::raw("Print matches and exit"),
        ]),
        Line::from(vec![
            Span::styled("  quotidian --topics         ", Style::default().fg(p.accent)),
            Span::raw("List all topics"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(p.text_dim)),
            Span::styled("h", Style::default().fg(p.accent)),
            Span::styled("/", Style::default().fg(p.text_dim)),
            Span::styled("?", Style::default().fg(p.accent)),
            Span::styled("/", Style::default().fg(p.text_dim)),
            Span::styled("Esc", Style::default().fg(p.accent)),
            Span::styled(" to close", Style::default().fg(p.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .style(Style::default().bg(p.bg))
        .block(
            Block::default()
                .title(Span::styled(" Help ", Style::default().fg(p.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
