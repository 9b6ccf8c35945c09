use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub colored: bool,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub muted: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            colored: true,
            success: Style::new().green().bold(),
            error: Style::new().bright_red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().bright_blue(),
            muted: Style::new().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            colored: false,
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            muted: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
