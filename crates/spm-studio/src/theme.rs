use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_panel: Color,
    pub bg_dialog: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Panel borders
    pub border_focused: Color,
    pub border_idle: Color,

    // Status colors
    pub status_busy: Color,
    pub status_ready: Color,
    pub status_error: Color,
    pub status_warning: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub checked: Color,

    // Sliders
    pub gauge_fill: Color,
    pub gauge_track: Color,

    /// One color per output channel, repeated when there are more channels
    pub series: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_panel: tailwind::SLATE.c900,
            bg_dialog: tailwind::SLATE.c800,

            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c300,
            text_muted: tailwind::SLATE.c500,

            border_focused: tailwind::CYAN.c400,
            border_idle: tailwind::SLATE.c600,

            status_busy: tailwind::YELLOW.c400,
            status_ready: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::AMBER.c400,

            selected_bg: tailwind::BLUE.c500,
            selected_fg: Color::White,
            checked: tailwind::GREEN.c400,

            gauge_fill: tailwind::CYAN.c500,
            gauge_track: tailwind::SLATE.c700,

            series: vec![
                tailwind::CYAN.c400,
                tailwind::AMBER.c400,
                tailwind::PINK.c400,
                tailwind::LIME.c400,
                tailwind::VIOLET.c400,
                tailwind::ORANGE.c400,
            ],
        }
    }

    /// Color of output channel `channel`
    pub fn series_color(&self, channel: usize) -> Color {
        if self.series.is_empty() {
            return self.text_primary;
        }
        self.series[channel % self.series.len()]
    }

    /// Border style, highlighted when the panel has focus
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_idle)
        }
    }

    /// Style for panel titles
    pub fn panel_title(&self, focused: bool) -> Style {
        let style = Style::default().fg(self.text_secondary);
        if focused {
            style.fg(self.border_focused).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_panel)
    }

    /// Style for key hints (e.g., "c" in "c compile")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for the row under the cursor in a focused list
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for line numbers in the code view
    pub fn line_number(&self) -> Style {
        Style::default().fg(self.text_muted).bg(self.bg_panel)
    }

    /// Status badge in the header
    pub fn badge(&self, bg: Color) -> Style {
        Style::default()
            .fg(self.bg_primary)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_colors_repeat() {
        let theme = Theme::default();
        let n = theme.series.len();
        assert_eq!(theme.series_color(0), theme.series_color(n));
        assert_ne!(theme.series_color(0), theme.series_color(1));
    }
}
