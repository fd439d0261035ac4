use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::output::{format_rank_delta, format_score, format_score_delta};
use crate::scoring::Factor;
use crate::tui::app::{App, InputMode, Tab};
use crate::tui::theme::ThemeColors;

const WEIGHT_PANEL_WIDTH: u16 = 34;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = ThemeColors::dark();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, &theme);
    render_tabs(frame, chunks[1], app, &theme);

    // Body: active tab on the left, weight panel on the right
    let body = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(WEIGHT_PANEL_WIDTH),
    ])
    .split(chunks[2]);

    match app.tab {
        Tab::Rankings => render_rankings(frame, body[0], app, &theme),
        Tab::Distribution => render_distribution(frame, body[0], app, &theme),
        Tab::Trends => render_trends(frame, body[0], app, &theme),
    }
    render_weight_panel(frame, body[1], app, &theme);
    render_status_bar(frame, chunks[3], app, &theme);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let left = "happyrank";
    let right = format!("Year {}  |  {} score", app.year(), app.view.field.label());
    let padding = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(theme.title_color).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_rankings(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    if app.view.ranking.is_empty() {
        let empty = Paragraph::new("No countries for this year").alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .view
        .ranking
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let score_color = theme.score_color(entry.score);
            let mut score_spans = vec![Span::styled(
                format!("{:>5} ", format_score(entry.score)),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(entry.score, 10.0, 8, theme).spans);

            let rank_delta_style = match entry.rank_delta {
                Some(n) if n > 0 => Style::default().fg(theme.delta_up),
                Some(n) if n < 0 => Style::default().fg(theme.delta_down),
                _ => Style::default().fg(theme.muted),
            };

            let in_trends = app.trend_countries.contains(&entry.country);
            let country = if in_trends {
                format!("{} *", entry.country)
            } else {
                entry.country.clone()
            };

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", entry.rank))
                    .style(Style::default().fg(theme.index_color)),
                Cell::from(Line::from(score_spans)),
                Cell::from(format!("{:>4}", format_rank_delta(entry.rank_delta)))
                    .style(rank_delta_style),
                Cell::from(format!("{:>6}", format_score_delta(entry.score_delta)))
                    .style(Style::default().fg(theme.muted)),
                Cell::from(country),
                Cell::from(entry.region.clone()).style(Style::default().fg(theme.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),  // rank
        Constraint::Length(15), // score + bar
        Constraint::Length(5),  // rank delta
        Constraint::Length(7),  // score delta
        Constraint::Fill(2),    // country
        Constraint::Fill(1),    // region
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Score", "ΔRank", "ΔScore", "Country", "Region"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_distribution(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let dist = &app.view.distribution;
    let max_count = dist.bins.iter().map(|b| b.count).max().unwrap_or(0);
    let bar_width = (area.width as usize).saturating_sub(16).clamp(10, 50);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for bin in &dist.bins {
        let filled = if max_count > 0 {
            (bin.count as f64 / max_count as f64 * bar_width as f64).round() as usize
        } else {
            0
        };
        let midpoint = (bin.lower + bin.upper) / 2.0;
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:>5}  ", bin.label()),
                Style::default().fg(theme.muted),
            ),
            Span::styled(
                "█".repeat(filled),
                Style::default().fg(theme.score_color(midpoint)),
            ),
            Span::styled(
                format!(" {}", bin.count),
                Style::default().fg(theme.index_color),
            ),
        ]));
    }

    let s = &dist.stats;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            " n={}  mean={:.2}  median={:.2}  min={:.2}  max={:.2}  stddev={:.2}",
            s.count, s.mean, s.median, s.min, s.max, s.std_dev
        ),
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_trends(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let series = app.trend_series();
    if series.is_empty() {
        let hint = Paragraph::new("No countries selected. Press 't' on a ranking row.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(hint, area);
        return;
    }

    let mut lines: Vec<Line> = vec![Line::from("")];
    for s in &series {
        if s.points.is_empty() {
            lines.push(Line::from(format!(" {}  (no records)", s.country)));
            continue;
        }
        let spark: String = s.points.iter().map(|(_, score)| spark_char(*score)).collect();
        let first = s.points.first().map(|(y, _)| *y).unwrap_or_default();
        let last = s.points.last().map(|(y, _)| *y).unwrap_or_default();
        let latest = s.points.last().map(|(_, v)| *v).unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<24}", s.country), Style::default().bold()),
            Span::styled(spark, Style::default().fg(theme.score_color(latest))),
            Span::styled(
                format!("  {}-{}  latest {}", first, last, format_score(latest)),
                Style::default().fg(theme.muted),
            ),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Map a 0-10 score onto one of eight block heights.
fn spark_char(score: f64) -> char {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let idx = ((score / 10.0) * 8.0).floor() as usize;
    BLOCKS[idx.min(7)]
}

fn render_weight_panel(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::bordered().title(" Weights ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slider_width = 12usize;
    let mut lines: Vec<Line> = Vec::new();

    for (i, factor) in Factor::ALL.into_iter().enumerate() {
        let weight = app.weights.get(factor);
        let filled = ((weight / 100.0) * slider_width as f64).round() as usize;
        let empty = slider_width.saturating_sub(filled);
        let selected = i == app.selected_factor;

        let marker = if selected { ">" } else { " " };
        let slider_color = if selected {
            theme.slider_selected
        } else {
            theme.slider_filled
        };
        let label_style = if selected {
            Style::default().bold()
        } else {
            Style::default().fg(theme.muted)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} {:<11}", marker, factor.short_label()), label_style),
            Span::styled("█".repeat(filled), Style::default().fg(slider_color)),
            Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)),
            Span::styled(format!(" {:>5.1}", weight), label_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  total {:>6.1}", app.weights.total()),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  1-7 presets, 0 equal",
        Style::default().fg(theme.index_color),
    )));
    lines.push(Line::from(Span::styled(
        "  Up/Down pick, Left/Right set",
        Style::default().fg(theme.index_color),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Trend selection is full") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} countries", app.view.ranking.len());
        let hints = [
            ("j/k", ":nav "),
            ("t", ":trend "),
            ("[/]", ":year "),
            ("p", ":score "),
            ("Tab", ":view "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 18, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(theme.title_color).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / k             ", key_style),
            Span::raw("Move through ranking"),
        ]),
        Line::from(vec![
            Span::styled("Tab               ", key_style),
            Span::raw("Cycle Rankings/Distribution/Trends"),
        ]),
        Line::from(vec![
            Span::styled("[ / ] or h / l    ", key_style),
            Span::raw("Previous / next year"),
        ]),
        Line::from(vec![
            Span::styled("p                 ", key_style),
            Span::raw("Toggle Personalized/Original score"),
        ]),
        Line::from(vec![
            Span::styled("Up / Down         ", key_style),
            Span::raw("Select weight slider"),
        ]),
        Line::from(vec![
            Span::styled("Left / Right      ", key_style),
            Span::raw("Adjust selected weight by 5"),
        ]),
        Line::from(vec![
            Span::styled("1-7               ", key_style),
            Span::raw("Apply preset (equal..ethics)"),
        ]),
        Line::from(vec![
            Span::styled("0                 ", key_style),
            Span::raw("Reset to equal weights"),
        ]),
        Line::from(vec![
            Span::styled("t                 ", key_style),
            Span::raw("Add/remove country from Trends"),
        ]),
        Line::from(vec![
            Span::styled("?                 ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c        ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn score_bar(score: f64, max_score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    let bar_color = theme.score_color(score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(bar_color),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(theme.bar_empty),
        ));
    }
    Line::from(spans)
}
