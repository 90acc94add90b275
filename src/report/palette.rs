//! ANSI color formatting.
//!
//! A [`Palette`] is a plain value: callers decide once whether color is
//! wanted and pass the palette to every renderer.

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

/// Resets the foreground color only.
pub const DEFAULT_FG: &str = "\x1b[39m";

/// Colorizer that can be passed around to format functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A palette that emits ANSI codes.
    pub fn colored() -> Self {
        Self::new(true)
    }

    /// A palette that leaves text untouched.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Missing, unreferenced - RED
    pub fn red(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Clean results - GREEN
    pub fn green(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Unused, caution - YELLOW
    pub fn yellow(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// Section headers - MAGENTA
    pub fn magenta(&self, s: &str) -> String {
        self.wrap(s, MAGENTA)
    }

    /// A `[ n ]` occurrence badge.
    ///
    /// One occurrence (declared, never referenced) is red, two yellow,
    /// anything above green.
    pub fn count_badge(&self, count: usize) -> String {
        let badge = format!("[ {} ]", count);
        match count {
            0 | 1 => self.red(&badge),
            2 => self.yellow(&badge),
            _ => self.green(&badge),
        }
    }

    fn wrap(&self, s: &str, color: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color, s, DEFAULT_FG)
        } else {
            s.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        let palette = Palette::colored();

        assert_eq!(palette.red("red"), "\x1b[31mred\x1b[39m");
        assert_eq!(palette.green("green"), "\x1b[32mgreen\x1b[39m");
        assert_eq!(palette.yellow("yellow"), "\x1b[33myellow\x1b[39m");
        assert_eq!(palette.magenta("magenta"), "\x1b[35mmagenta\x1b[39m");
    }

    #[test]
    fn test_count_badge() {
        let palette = Palette::colored();

        assert_eq!(palette.count_badge(1), "\x1b[31m[ 1 ]\x1b[39m");
        assert_eq!(palette.count_badge(2), "\x1b[33m[ 2 ]\x1b[39m");
        assert_eq!(palette.count_badge(99), "\x1b[32m[ 99 ]\x1b[39m");
    }

    #[test]
    fn test_plain_palette_leaves_text() {
        let palette = Palette::plain();

        assert_eq!(palette.red("red"), "red");
        assert_eq!(palette.count_badge(3), "[ 3 ]");
    }
}
