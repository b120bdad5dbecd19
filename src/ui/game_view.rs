use crate::game::{Board, Cell, Player, Session, SessionState};
use crate::score::ScoreRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(
    frame: &mut Frame,
    session: &Session,
    scores: &ScoreRecord,
    selected_column: usize,
    last_move: Option<(usize, usize)>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Scores
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_scores(frame, scores, chunks[1]);
    render_board(frame, session, selected_column, last_move, chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let (status, color) = match session.state() {
        SessionState::AwaitingMove(player) => (
            format!("It's {}'s Turn!", player.name()),
            player_color(player),
        ),
        SessionState::Won(player) => (format!("{} won!", player.name()), player_color(player)),
        SessionState::Tied => ("Tie game".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_scores(frame: &mut Frame, scores: &ScoreRecord, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            Player::One.name(),
            Style::default().fg(player_color(Player::One)),
        ),
        Span::raw(format!(": {}    ", scores.player_one)),
        Span::styled(
            Player::Two.name(),
            Style::default().fg(player_color(Player::Two)),
        ),
        Span::raw(format!(": {}", scores.player_two)),
    ]);

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Wins"));

    frame.render_widget(widget, area);
}

/// Text lines for the board with column numbers, frame, and selection marker.
pub(crate) fn board_lines(
    board: &Board,
    selected_column: Option<usize>,
    last_move: Option<(usize, usize)>,
    highlight: &[(usize, usize)],
) -> Vec<Line<'static>> {
    let width = board.width();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..width {
            let cell = board.get(row, col).unwrap_or(Cell::Empty);
            let (symbol, mut style) = match cell.owner() {
                None => (" . ", Style::default().fg(Color::DarkGray)),
                Some(player) => (" ● ", Style::default().fg(player_color(player))),
            };
            if last_move == Some((row, col)) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if highlight.contains(&(row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    if let Some(selected) = selected_column {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in 0..width {
            if col == selected {
                indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    lines
}

fn render_board(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    last_move: Option<(usize, usize)>,
    area: Rect,
) {
    // No selector once the game is over
    let selected = (!session.is_terminal()).then_some(selected_column);
    let highlight = session.winning_line().map(Vec::from).unwrap_or_default();

    let board_widget = Paragraph::new(board_lines(session.board(), selected, last_move, &highlight))
        .alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "←/→: Move  |  Enter/1-7: Drop  |  N: New game  |  X: Reset scores  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
