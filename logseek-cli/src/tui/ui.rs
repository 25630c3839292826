//! Layout of the terminal search page.

use logseek_core::view::{INPUT_PLACEHOLDER, LOADING_TEXT, PAGE_TITLE, ResultBlock, ResultItem, View};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::App;

const KEY_HINTS: &str = " Enter:Search  \u{2191}\u{2193}/PgUp/PgDn:Scroll  Esc:Quit ";

pub fn draw(frame: &mut Frame, app: &App, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Result block
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    let title = Paragraph::new(PAGE_TITLE)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_search_bar(frame, app, view, chunks[1]);
    draw_result_block(frame, app, &view.block, chunks[2]);

    let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[3]);
}

fn draw_search_bar(frame: &mut Frame, app: &App, view: &View, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");

    let text = if view.query.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.query.as_str())
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    // Display width, so wide characters advance the cursor by two cells
    let width = Span::raw(&app.input[..app.cursor]).width();
    let column = u16::try_from(width).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(column)
        .min(area.right().saturating_sub(2));
    frame.set_cursor_position((x, area.y.saturating_add(1)));
}

fn draw_result_block(frame: &mut Frame, app: &App, block: &ResultBlock, area: Rect) {
    let lines = match block {
        ResultBlock::Empty => return,
        ResultBlock::Loading => vec![Line::styled(
            LOADING_TEXT,
            Style::default().fg(Color::Yellow),
        )],
        ResultBlock::Error { message } => vec![Line::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )],
        ResultBlock::Results { summary, items } => {
            let mut lines = vec![Line::styled(
                summary.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            for item in items {
                lines.push(Line::default());
                lines.extend(item_lines(item));
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn item_lines(item: &ResultItem) -> [Line<'_>; 3] {
    let label = Style::default().fg(Color::Cyan);
    let when = item
        .timestamp
        .to_datetime()
        .format("%Y-%m-%d %H:%M:%S%.3f UTC");

    [
        Line::from(vec![
            Span::styled("Event ID: ", label),
            Span::raw(item.event_id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Message: ", label),
            Span::raw(item.message.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Timestamp: ", label),
            Span::raw(item.timestamp.to_string()),
            Span::styled(format!(" ({when})"), Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use logseek_core::render;
    use logseek_core::session::{SessionSnapshot, SessionState};
    use logseek_search::{EventId, NanoTimestamp, SearchOutcome, SearchResult};
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw_page(query: &str, state: SessionState) -> Terminal<TestBackend> {
        let snapshot = SessionSnapshot {
            query: query.to_string(),
            state,
            ..Default::default()
        };
        let app = App {
            input: query.to_string(),
            cursor: query.len(),
            scroll: 0,
        };

        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal
            .draw(|frame| draw(frame, &app, &render(&snapshot)))
            .unwrap();
        terminal
    }

    fn screen(query: &str, state: SessionState) -> String {
        let terminal = draw_page(query, state);
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_idle_page_shows_placeholder_only() {
        let text = screen("", SessionState::Idle);
        assert!(text.contains("Search Engine"));
        assert!(text.contains("Enter search keywords"));
        assert!(!text.contains("Loading..."));
        assert!(!text.contains("Found"));
    }

    #[test]
    fn test_loading_and_error_blocks() {
        let text = screen("disk", SessionState::Pending);
        assert!(text.contains("disk"));
        assert!(text.contains("Loading..."));

        let text = screen("disk", SessionState::Failed("Search failed".to_string()));
        assert!(text.contains("Error: Search failed"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn test_results_block() {
        let outcome = SearchOutcome {
            results: vec![SearchResult {
                event_id: EventId::from("e1"),
                message: "hello".to_string(),
                timestamp: NanoTimestamp(123_456_789),
            }],
            count: 1,
            time_ms: 4.2,
        };

        let text = screen("hello", SessionState::Success(outcome));
        assert!(text.contains("Found 1 results in 4.2ms"));
        assert!(text.contains("Event ID: e1"));
        assert!(text.contains("Message: hello"));
        assert!(text.contains("Timestamp: 123456789 (1970-01-01 00:00:00.123 UTC)"));
    }

    #[test]
    fn test_cursor_follows_display_width() {
        let mut terminal = draw_page("ab", SessionState::Idle);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 2));

        let mut terminal = draw_page("日本語", SessionState::Idle);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(7, 2));
    }

    #[test]
    fn test_cursor_stays_inside_search_bar_for_long_input() {
        let query = "x".repeat(100_000);
        let mut terminal = draw_page(&query, SessionState::Idle);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(68, 2));
    }
}
