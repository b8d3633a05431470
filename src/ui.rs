//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a vertical split: tab bar, optional search bar (Search tab
//!   only), the article list and a one-line status bar.  The detail view is
//!   drawn as a centred popup over the list.
//! * Provider tombstones are filtered here via [`App::visible_articles`]; the
//!   state holder's list is never filtered.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::source::Article;
use crate::state::NewsType;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let search_height = if app.mode == NewsType::Search { 3 } else { 0 };
    let [tabs_area, search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(search_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(app, frame, tabs_area);
    if app.mode == NewsType::Search {
        draw_search_bar(app, frame, search_area);
    }
    draw_article_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);

    if app.show_detail {
        if let Some(article) = app.selected_article() {
            let saved = app.is_saved(&article.url);
            draw_detail(article, saved, frame, main_area);
        }
    }
}

fn draw_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let titles = NewsType::ALL.iter().map(|m| format!(" {} ", m.title()));
    let tabs = Tabs::new(titles)
        .select(app.tab_index())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
        .divider("|");
    frame.render_widget(tabs, area);
}

fn draw_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let (text, style) = if app.query.is_empty() && !app.editing {
        ("Search news...".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (app.query.clone(), Style::default().fg(Color::White))
    };
    let border = if app.editing { Color::Yellow } else { Color::DarkGray };

    let bar = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" / search "),
    );
    frame.render_widget(bar, area);
}

/// Render the scrollable article list.
fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.mode.title()))
        .borders(Borders::ALL);

    let visible = app.visible_articles();
    if visible.is_empty() {
        let empty = Paragraph::new("No news")
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = visible
        .iter()
        .map(|article| {
            let mark = if app.is_saved(&article.url) { "★" } else { "☆" };
            let line = Line::from(vec![
                Span::styled(mark, Style::default().fg(Color::Yellow)),
                Span::raw(" "),
                Span::styled(
                    article.title.clone().unwrap_or_default(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("  "),
                Span::styled(
                    author_label(article).to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", article.source.name),
                    Style::default().fg(Color::Cyan),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_detail(article: &Article, saved: bool, frame: &mut Frame, area: Rect) {
    let [popup] = Layout::horizontal([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(popup);

    let text = vec![
        Line::from(Span::styled(
            article.title.clone().unwrap_or_else(|| "Article".into()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Author: {}", author_label(article))),
        Line::from(article.published_label()),
        Line::from(if saved { "★ saved" } else { "☆ not saved" }),
        Line::from(""),
        Line::from(non_empty(&article.description).unwrap_or("No description available").to_string()),
        Line::from(""),
        Line::from(format!(
            "Content: {}",
            non_empty(&article.content).unwrap_or("No content available")
        )),
        Line::from(""),
        Line::from(Span::styled(article.url.clone(), Style::default().fg(Color::Cyan))),
    ];

    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Article - Esc/Enter: close  b: bookmark ")
                .borders(Borders::ALL),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(detail, popup);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let help = if app.editing {
        "  Enter: search  Esc: stop editing  Ctrl-U: clear"
    } else {
        "  q: quit  Tab/1-3: tabs  /: search  Enter: open  b: bookmark  r: reload"
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn author_label(article: &Article) -> &str {
    non_empty(&article.author).unwrap_or("Unknown")
}
