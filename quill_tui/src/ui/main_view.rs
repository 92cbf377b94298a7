use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use quill_core::{Category, OutputView};

use crate::app::state::{ActionButton, App, UiAction};

pub const LOADING_MESSAGE: &str = "Generating content, please wait...";
pub const PLACEHOLDER_MESSAGE: &str = "Your generated content will appear here.";

const HEADER_HEIGHT: u16 = 3;
const CONTROLS_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const MIN_OUTPUT_HEIGHT: u16 = 5;
// Border plus two text rows, kept for history when the output grows.
const HISTORY_RESERVE: u16 = 4;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(main_layout_constraints(output_height(app, area)))
        .split(area);

    app.buttons.clear();

    render_header(f, app, main_layout[0]);
    render_controls(f, app, main_layout[1]);
    render_output(f, app, main_layout[2]);
    render_history(f, app, main_layout[3]);
    render_footer(f, app, main_layout[4]);
}

fn main_layout_constraints(output_height: u16) -> [Constraint; 5] {
    [
        Constraint::Length(HEADER_HEIGHT),   // 1. Title/Header
        Constraint::Length(CONTROLS_HEIGHT), // 2. Categories + generate
        Constraint::Length(output_height),   // 3. Output
        Constraint::Min(0),                  // 4. History
        Constraint::Length(FOOTER_HEIGHT),   // 5. Key hints
    ]
}

/// Grows the output box to fit the wrapped text with a blank row above and a
/// spare row below, within whatever the fixed rows and a small history strip
/// leave over.
fn output_height(app: &App, area: Rect) -> u16 {
    let available = area
        .height
        .saturating_sub(HEADER_HEIGHT + CONTROLS_HEIGHT + FOOTER_HEIGHT);
    let reserve = if app.orchestrator.state().history().is_empty() {
        0
    } else {
        HISTORY_RESERVE.min(available.saturating_sub(MIN_OUTPUT_HEIGHT))
    };
    let max_height = available.saturating_sub(reserve);

    let rows = wrapped_height(&build_output_lines(app), area.width.saturating_sub(2));
    rows.saturating_add(4).max(MIN_OUTPUT_HEIGHT).min(max_height)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let very_narrow_width = area.width < 60;
    let header_text = if very_narrow_width {
        Line::from(vec![
            Span::styled(" QUILL ", app.theme.header_title_style),
            Span::styled(" // AI ", app.theme.header_subtitle_style),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Q U I L L ", app.theme.header_title_style),
            Span::styled(" // AI CONTENT GENERATOR ", app.theme.header_subtitle_style),
        ])
    };

    let header = Paragraph::new(header_text).style(app.theme.base_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style)
            .title(if very_narrow_width {
                " Pick & generate "
            } else {
                " Select a content type and click generate! "
            }),
    );
    f.render_widget(header, area);
}

pub fn category_button_label(category: Category) -> String {
    format!(" [{}] ", category.label().to_uppercase())
}

pub fn generate_button_label(loading: bool) -> &'static str {
    if loading {
        " [GENERATING...] "
    } else {
        " [GENERATE] "
    }
}

fn token_width(label: &str) -> u16 {
    label.chars().count() as u16
}

fn render_controls(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(" CONTENT TYPE ", app.theme.header_title_style));
    f.render_widget(&block, area);

    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let selected = app.orchestrator.state().selected();
    let loading = app.orchestrator.state().is_loading();
    let row = inner.y;
    let right_edge = inner.x.saturating_add(inner.width);

    let mut x = inner.x.saturating_add(1);
    for category in Category::ALL {
        let label = category_button_label(category);
        let width = token_width(&label);
        if x.saturating_add(width) > right_edge {
            break;
        }
        let style = if category == selected {
            app.theme.button_active_style
        } else {
            app.theme.button_style
        };
        let rect = Rect::new(x, row, width, 1);
        f.render_widget(Paragraph::new(label).style(style), rect);
        app.buttons.push(ActionButton {
            rect,
            action: UiAction::SelectCategory(category),
        });
        x = x.saturating_add(width + 1);
    }

    let generate_label = generate_button_label(loading);
    let generate_width = token_width(generate_label);
    let generate_x = right_edge.saturating_sub(generate_width + 1);
    if generate_x < x {
        return;
    }

    let rect = Rect::new(generate_x, row, generate_width, 1);
    let style = if loading {
        app.theme.button_disabled_style
    } else {
        app.theme.footer_key_style
    };
    f.render_widget(Paragraph::new(generate_label).style(style), rect);
    if !loading {
        app.buttons.push(ActionButton {
            rect,
            action: UiAction::Generate,
        });
    }
}

pub fn build_output_lines(app: &App) -> Vec<Line<'_>> {
    let theme = &app.theme;
    match app.orchestrator.state().output() {
        OutputView::Loading => {
            let spinner = ["|", "/", "-", "\\"];
            let idx = (app.tick_count as usize / 2) % spinner.len();
            vec![Line::from(vec![
                Span::styled(format!(" {} ", spinner[idx]), theme.processing_spinner_style),
                Span::styled(LOADING_MESSAGE, theme.processing_text_style),
            ])]
        }
        OutputView::Error(message) => message
            .lines()
            .map(|l| Line::from(Span::styled(l, theme.error_style)))
            .collect(),
        OutputView::Content(text) => text
            .lines()
            .map(|l| Line::from(Span::styled(l, theme.content_style)))
            .collect(),
        OutputView::Placeholder => vec![Line::from(Span::styled(
            PLACEHOLDER_MESSAGE,
            theme.placeholder_style,
        ))],
    }
}

fn output_title(app: &App) -> &'static str {
    match app.orchestrator.state().output() {
        OutputView::Loading => " OUTPUT: WORKING ",
        OutputView::Error(_) => " OUTPUT: ERROR ",
        OutputView::Content(_) => " OUTPUT ",
        OutputView::Placeholder => " OUTPUT: READY ",
    }
}

fn render_output(f: &mut Frame, app: &App, area: Rect) {
    let inner_height = area.height.saturating_sub(2);
    let body = build_output_lines(app);
    let rows = wrapped_height(&body, area.width.saturating_sub(2));

    let clipped = rows > inner_height;
    let showing_content = matches!(app.orchestrator.state().output(), OutputView::Content(_));
    let title = if clipped && showing_content {
        " OUTPUT: FULL TEXT IN HISTORY "
    } else {
        output_title(app)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(title, app.theme.header_title_style));

    let mut lines = Vec::with_capacity(body.len() + 1);
    if rows.saturating_add(1) < inner_height {
        lines.push(Line::from(""));
    }
    lines.extend(body);

    let output = Paragraph::new(lines)
        .style(app.theme.base_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(output, area);
}

pub fn build_history_lines(app: &App) -> Vec<Line<'_>> {
    let theme = &app.theme;
    let mut lines = Vec::new();
    for (idx, entry) in app.orchestrator.state().history().entries().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>2}. ", idx + 1), theme.footer_text_style),
            Span::styled(
                entry.category.label().to_uppercase(),
                theme.history_label_style,
            ),
        ]));
        for text_line in entry.content.lines() {
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(text_line, theme.history_text_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Rows `lines` take once word-wrapped to `width`. Words only break when
/// they are longer than a whole row.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return lines.len() as u16;
    }
    lines
        .iter()
        .map(|l| line_rows(l, width as usize))
        .fold(0u16, |acc, h| acc.saturating_add(h))
}

fn line_rows(line: &Line<'_>, width: usize) -> u16 {
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    let indent = text.chars().take_while(|c| c.is_whitespace()).count();

    let mut rows = 1usize;
    let mut col = indent.min(width);
    let mut first = true;
    for word in text.split_whitespace() {
        let w = word.chars().count();
        let gap = if first || col == 0 { 0 } else { 1 };
        first = false;
        if col + gap + w <= width {
            col += gap + w;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        let extra = (w - 1) / width;
        rows += extra;
        col = w - extra * width;
    }
    rows.min(u16::MAX as usize) as u16
}

fn render_history(f: &mut Frame, app: &mut App, area: Rect) {
    let history_len = app.orchestrator.state().history().len();
    if history_len == 0 || area.height == 0 {
        app.history_scroll = 0;
        app.history_max_scroll = 0;
        return;
    }

    let title = format!(" HISTORY ({}) ", history_len);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(title, app.theme.header_title_style));
    f.render_widget(&block, area);

    let inner = block.inner(area);
    let text_width = inner.width.saturating_sub(1);

    let (max_scroll, clamped_scroll) = {
        let lines = build_history_lines(app);
        let total = wrapped_height(&lines, text_width);
        let max_scroll = total.saturating_sub(inner.height);
        let clamped_scroll = app.history_scroll.min(max_scroll);

        let mut text_area = inner;
        text_area.width = text_width;
        let para = Paragraph::new(lines)
            .style(app.theme.base_style)
            .wrap(Wrap { trim: false })
            .scroll((clamped_scroll, 0));
        f.render_widget(para, text_area);

        if max_scroll > 0 && inner.width > 1 && inner.height > 0 {
            let mut scrollbar_state =
                ScrollbarState::new(total.max(1) as usize).position(clamped_scroll as usize);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(app.theme.border_style)
                .track_style(app.theme.base_style);
            f.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }

        (max_scroll, clamped_scroll)
    };

    app.history_max_scroll = max_scroll;
    app.history_scroll = clamped_scroll;
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = [
        ("←/→", "TYPE"),
        ("ENTER", "GENERATE"),
        ("↑/↓", "HISTORY"),
        ("Q", "QUIT"),
    ];
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {} ", key), app.theme.footer_key_style));
        spans.push(Span::styled(format!(" {}  ", action), app.theme.footer_text_style));
    }
    spans.push(Span::styled(" MODEL: ", app.theme.footer_text_style));
    spans.push(Span::styled(
        app.config.provider.model.as_str(),
        app.theme.header_subtitle_style,
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(app.theme.base_style),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{test_app, FixedGenerator};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for (i, cell) in buffer.content().iter().enumerate() {
            if i > 0 && i % width as usize == 0 {
                out.push('\n');
            }
            out.push_str(cell.symbol());
        }
        out
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn idle_screen_shows_placeholder_and_three_categories() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        let screen = render_to_text(&mut app, 100, 30);

        assert!(screen.contains(PLACEHOLDER_MESSAGE));
        assert!(screen.contains("[STORY]"));
        assert!(screen.contains("[JOKE]"));
        assert!(screen.contains("[QUOTE]"));
        assert!(screen.contains("[GENERATE]"));
        assert!(!screen.contains("HISTORY ("));

        let categories: Vec<UiAction> = app
            .buttons
            .iter()
            .map(|b| b.action)
            .filter(|a| matches!(a, UiAction::SelectCategory(_)))
            .collect();
        assert_eq!(categories.len(), 3);
        assert!(app.buttons.iter().any(|b| b.action == UiAction::Generate));
    }

    #[test]
    fn loading_disables_generate_button() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        app.orchestrator.begin_generate();
        let screen = render_to_text(&mut app, 100, 30);

        assert!(screen.contains(LOADING_MESSAGE));
        assert!(screen.contains("[GENERATING...]"));
        assert!(!app.buttons.iter().any(|b| b.action == UiAction::Generate));
    }

    #[test]
    fn history_lists_newest_first_with_labels() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        app.orchestrator
            .complete_generate(Category::Story, Ok("Once upon a time.".to_string()));
        app.orchestrator
            .complete_generate(Category::Joke, Ok("A pun.".to_string()));

        let lines: Vec<String> = build_history_lines(&app).iter().map(line_text).collect();
        assert_eq!(lines[0].trim(), "1. JOKE");
        assert_eq!(lines[1].trim(), "A pun.");
        assert_eq!(lines[3].trim(), "2. STORY");
        assert_eq!(lines[4].trim(), "Once upon a time.");

        let screen = render_to_text(&mut app, 100, 30);
        assert!(screen.contains("HISTORY (2)"));
        assert!(screen.contains("A pun."));
    }

    #[test]
    fn error_replaces_content_in_output() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        app.orchestrator.begin_generate();
        app.orchestrator.complete_generate(
            Category::Story,
            Err(quill_core::GenerationError::GenerationFailed),
        );

        let lines: Vec<String> = build_output_lines(&app).iter().map(line_text).collect();
        assert_eq!(
            lines,
            vec!["Failed to generate content from AI. Please try again.".to_string()]
        );
    }

    #[test]
    fn wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 4);
        assert_eq!(wrapped_height(&lines, 0), 2);
    }

    #[test]
    fn wrapped_height_moves_whole_words_to_the_next_row() {
        let lines = vec![Line::from("aaaa bbbb cc")];
        assert_eq!(wrapped_height(&lines, 6), 3);
        let indented = vec![Line::from(vec![Span::raw("     "), Span::raw("abc de")])];
        assert_eq!(wrapped_height(&indented, 10), 2);
    }

    const LIGHTHOUSE_STORY: &str = "The lighthouse keeper had tended the lamp for forty years, \
        waiting for a ship that never came. One stormy night, a small boat finally appeared \
        on the horizon, its sails torn by the wind. He guided it safely to shore, only to \
        find it carried a letter addressed to him. It was from the sea itself, thanking him \
        for his patience and inviting him to finally rest.";

    /// Text inside the bordered box whose top border carries `title`.
    fn box_text(screen: &str, title: &str) -> String {
        let rows: Vec<&str> = screen.lines().collect();
        let top = rows
            .iter()
            .position(|r| r.contains(title))
            .expect("box title not on screen");
        rows[top + 1..]
            .iter()
            .take_while(|r| !r.starts_with('└'))
            .map(|r| r.replace('│', " "))
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn long_story_fits_inside_output_on_short_terminal() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        app.orchestrator
            .complete_generate(Category::Story, Ok(LIGHTHOUSE_STORY.to_string()));

        let screen = render_to_text(&mut app, 80, 23);
        let output = box_text(&screen, " OUTPUT ");
        assert!(
            output.contains("It was from the sea itself, thanking him for his patience and inviting him to finally rest."),
            "output box was: {output}"
        );
        assert!(output.starts_with("The lighthouse keeper"));
        assert!(screen.contains("HISTORY (1)"));
    }

    #[test]
    fn clipped_output_points_to_history() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        app.orchestrator
            .complete_generate(Category::Story, Ok(LIGHTHOUSE_STORY.to_string()));

        let screen = render_to_text(&mut app, 80, 14);
        assert!(screen.contains("OUTPUT: FULL TEXT IN HISTORY"));
    }

    #[test]
    fn output_height_leaves_room_for_history() {
        let mut app = test_app(FixedGenerator::ok("unused"));
        assert_eq!(output_height(&app, Rect::new(0, 0, 80, 23)), MIN_OUTPUT_HEIGHT);

        app.orchestrator
            .complete_generate(Category::Story, Ok(LIGHTHOUSE_STORY.repeat(4)));
        let height = output_height(&app, Rect::new(0, 0, 80, 23));
        assert_eq!(height, 23 - 7 - HISTORY_RESERVE);
    }

    #[test]
    fn labels_reflect_loading_state() {
        assert_eq!(generate_button_label(false), " [GENERATE] ");
        assert_eq!(generate_button_label(true), " [GENERATING...] ");
        assert_eq!(category_button_label(Category::Quote), " [QUOTE] ");
    }
}
