use std::{
    env,
    io::{self, IsTerminal},
};

/// How the user asked for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPreference {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Stdout,
    Stderr,
}

impl ColorPreference {
    /// Whether output written to `target` should carry ANSI colors.
    pub fn enabled_for(self, target: ColorTarget) -> bool {
        match self {
            ColorPreference::Always => true,
            ColorPreference::Never => false,
            ColorPreference::Auto => {
                env_allows_color(|key| env::var(key).ok()).unwrap_or_else(|| match target {
                    ColorTarget::Stdout => io::stdout().is_terminal(),
                    ColorTarget::Stderr => io::stderr().is_terminal(),
                })
            }
        }
    }
}

/// Resolve the `CLICOLOR_FORCE` / `NO_COLOR` / `CLICOLOR` conventions.
///
/// Returns `None` when the environment expresses no opinion.
fn env_allows_color(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    let flag = |key: &str| lookup(key).map(|value| value != "0");

    if flag("CLICOLOR_FORCE") == Some(true) {
        return Some(true);
    }
    if lookup("NO_COLOR").is_some() {
        return Some(false);
    }
    match flag("CLICOLOR") {
        Some(false) => Some(false),
        _ => None,
    }
}
