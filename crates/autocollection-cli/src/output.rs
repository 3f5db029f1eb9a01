// Terminal output for run summaries

use std::io::IsTerminal;

use autocollection_generator::{Diagnostic, Severity};
use colored::{Color, Colorize};

/// Kind of a summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Units were produced
    Done,
    /// Generation continued but something was skipped
    Warning,
    /// Something was not generated
    Failure,
}

impl Tone {
    fn glyph(&self) -> (&'static str, Color) {
        match self {
            Tone::Done => ("✓", Color::Green),
            Tone::Warning => ("⚠", Color::Yellow),
            Tone::Failure => ("✗", Color::Red),
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Failure,
        }
    }
}

/// Formats summary lines, colored when stdout is a terminal
pub struct OutputStyle {
    colors: bool,
}

impl OutputStyle {
    /// Style with coloring forced on or off
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Prefix `msg` with the glyph for `tone`
    pub fn line(&self, tone: Tone, msg: &str) -> String {
        let (glyph, color) = tone.glyph();
        if self.colors {
            format!("{} {}", glyph.color(color).bold(), msg)
        } else {
            format!("{} {}", glyph, msg)
        }
    }

    /// A diagnostic, toned by its severity
    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.line(diagnostic.severity.into(), &diagnostic.to_string())
    }
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocollection_generator::diagnostics::ids;
    use autocollection_generator::SymbolId;

    #[test]
    fn test_plain_lines() {
        let style = OutputStyle::new(false);
        assert_eq!(style.line(Tone::Done, "List: wrote 2 units"), "✓ List: wrote 2 units");
        assert_eq!(style.line(Tone::Failure, "boom"), "✗ boom");
    }

    #[test]
    fn test_diagnostic_tone_follows_severity() {
        let style = OutputStyle::new(false);
        let error = Diagnostic::for_declaration(ids::NOT_PARTIAL, SymbolId(3), "Things", "not partial");
        let warning = Diagnostic::for_declaration(ids::NOT_A_CLASS, SymbolId(4), "Point", "skipped")
            .with_severity(Severity::Warning);

        assert!(style.diagnostic(&error).starts_with("✗ error AC0003"));
        assert!(style.diagnostic(&warning).starts_with("⚠ warning AC0004"));
    }
}
