use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Base
    pub base_style: Style,
    pub border_style: Style,
    // Header
    pub header_title_style: Style,
    pub header_subtitle_style: Style,
    // Buttons
    pub button_style: Style,
    pub button_active_style: Style,
    pub button_disabled_style: Style,
    // Output
    pub content_style: Style,
    pub placeholder_style: Style,
    pub processing_spinner_style: Style,
    pub processing_text_style: Style,
    // History
    pub history_label_style: Style,
    pub history_text_style: Style,
    // Footer
    pub footer_text_style: Style,
    pub footer_key_style: Style,
    // Alerts/Errors
    pub error_style: Style,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "auto" => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light => Self::light(),
                dark_light::Mode::Default => Self::dark(),
            },
            _ => Self::retro(),
        }
    }

    pub fn retro() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let red_alert = Color::Rgb(255, 40, 40);
        let bg = Color::Black;

        Self {
            base_style: Style::default().fg(amber),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),

            button_style: Style::default().fg(amber),
            button_active_style: Style::default()
                .fg(bg)
                .bg(amber)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(amber_dim).add_modifier(Modifier::DIM),

            content_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(amber_dim),
            processing_spinner_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            processing_text_style: Style::default().fg(amber).add_modifier(Modifier::ITALIC),

            history_label_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            history_text_style: Style::default().fg(Color::White),

            footer_text_style: Style::default().fg(amber_dim),
            footer_key_style: Style::default().fg(bg).bg(amber),

            error_style: Style::default().fg(red_alert),
        }
    }

    pub fn light() -> Self {
        let text_main = Color::Black;
        let text_dim = Color::DarkGray;
        let accent = Color::Blue;
        let go = Color::Green;

        Self {
            base_style: Style::default().fg(text_main),
            border_style: Style::default().fg(accent),

            header_title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(text_dim),

            button_style: Style::default().fg(text_main),
            button_active_style: Style::default()
                .fg(Color::White)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::Gray),

            content_style: Style::default().fg(text_main),
            placeholder_style: Style::default().fg(Color::Gray),
            processing_spinner_style: Style::default().fg(go).add_modifier(Modifier::BOLD),
            processing_text_style: Style::default().fg(text_dim).add_modifier(Modifier::ITALIC),

            history_label_style: Style::default().fg(text_dim).add_modifier(Modifier::BOLD),
            history_text_style: Style::default().fg(text_main),

            footer_text_style: Style::default().fg(text_dim),
            footer_key_style: Style::default().fg(Color::White).bg(go),

            error_style: Style::default().fg(Color::Red),
        }
    }

    pub fn dark() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let bg = Color::Rgb(14, 12, 10);
        let red_alert = Color::Rgb(255, 80, 80);

        Self {
            base_style: Style::default().fg(amber).bg(bg),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),

            button_style: Style::default().fg(amber),
            button_active_style: Style::default()
                .fg(bg)
                .bg(amber)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::Rgb(90, 98, 104)),

            content_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(Color::Rgb(170, 170, 170)),
            processing_spinner_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            processing_text_style: Style::default()
                .fg(Color::Rgb(136, 136, 136))
                .add_modifier(Modifier::ITALIC),

            history_label_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            history_text_style: Style::default().fg(Color::White),

            footer_text_style: Style::default().fg(amber_dim),
            footer_key_style: Style::default().fg(bg).bg(amber),

            error_style: Style::default().fg(red_alert),
        }
    }
}
