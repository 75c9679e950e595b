//! Text decoration for rendered diagnostics.
//!
//! Decoration is ANSI styling from the `colored` crate. Whether it is emitted
//! follows `colored`'s own detection (`NO_COLOR`, `CLICOLOR`, tty) unless
//! overridden process-wide with [`set_decoration`].

use colored::Colorize;
use errata_template::{PipeFn, pipes::string_pipe};

/// A named decoration role available to fragments as a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    BoldRed,
    BoldBlue,
    BoldGreen,
    BoldYellow,
}

impl Style {
    /// Styles registered by default in every registry.
    pub const DEFAULTS: [Style; 4] = [Style::Bold, Style::BoldRed, Style::BoldBlue, Style::BoldGreen];

    /// The pipe name used in fragments (e.g. `$"error"/bold-red$`).
    pub fn name(self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::BoldRed => "bold-red",
            Style::BoldBlue => "bold-blue",
            Style::BoldGreen => "bold-green",
            Style::BoldYellow => "bold-yellow",
        }
    }

    /// Decorate `text` with this style.
    pub fn paint(self, text: &str) -> String {
        let styled = match self {
            Style::Bold => text.bold(),
            Style::BoldRed => text.red().bold(),
            Style::BoldBlue => text.blue().bold(),
            Style::BoldGreen => text.green().bold(),
            Style::BoldYellow => text.yellow().bold(),
        };
        styled.to_string()
    }

    /// This style as a template pipe.
    pub fn pipe(self) -> PipeFn {
        string_pipe(self.name(), move |text| self.paint(text))
    }
}

/// Force decoration on or off for the whole process.
pub fn set_decoration(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Return to automatic decoration detection.
pub fn reset_decoration() {
    colored::control::unset_override();
}
