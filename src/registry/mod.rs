//! Static language and theme registries.
//!
//! Everything here is immutable and built at compile time; lookups go by
//! identifier and return `Option` so callers never index blindly.

use ratatui::style::Color;

/// A runnable language: identifier, starter snippet, and the numeric id some
/// execution providers use for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub default_code: &'static str,
    pub provider_id: u32,
}

/// Editor color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        name: "javascript",
        default_code: "// Write your JavaScript code here\nconsole.log(\"Hello, JavaScript!\");",
        provider_id: 63,
    },
    Language {
        name: "typescript",
        default_code: "// Write your TypeScript code here\nconst greeting: string = \"Hello, TypeScript!\";\nconsole.log(greeting);",
        provider_id: 74,
    },
    Language {
        name: "python",
        default_code: "# Write your Python code here\nprint(\"Hello, Python!\")",
        provider_id: 71,
    },
    Language {
        name: "java",
        default_code: "// Write your Java code here\npublic class Main {\n  public static void main(String[] args) {\n    System.out.println(\"Hello, Java!\");\n  }\n}",
        provider_id: 62,
    },
    Language {
        name: "cpp",
        default_code: "// Write your C++ code here\n#include <iostream>\nint main() {\n  std::cout << \"Hello, C++!\" << std::endl;\n  return 0;\n}",
        provider_id: 54,
    },
];

pub const THEMES: &[Theme] = &[
    Theme {
        name: "vs-dark",
        bg: Color::Rgb(31, 41, 55),
        fg: Color::White,
    },
    Theme {
        name: "light",
        bg: Color::Rgb(229, 231, 235),
        fg: Color::Rgb(17, 24, 39),
    },
];

/// Interpreter/compiler versions the execution provider expects.
/// Must cover every entry in [`LANGUAGES`].
pub const VERSIONS: &[(&str, &str)] = &[
    ("javascript", "18.15.0"),
    ("typescript", "5.0.3"),
    ("python", "3.10.0"),
    ("java", "15.0.2"),
    ("cpp", "10.2.0"),
];

/// Look up a language by identifier.
pub fn language(name: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.name == name)
}

/// Look up a theme by identifier.
pub fn theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

/// Provider version string for a language identifier.
pub fn version_for(name: &str) -> Option<&'static str> {
    VERSIONS.iter().find(|(l, _)| *l == name).map(|(_, v)| *v)
}

/// Default selection on startup: the first registered language.
pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

/// Default theme on startup: the second registered theme (light).
pub fn default_theme() -> &'static Theme {
    &THEMES[1]
}

/// Language registered after `name`, wrapping around.
pub fn next_language(name: &str) -> &'static Language {
    let idx = LANGUAGES.iter().position(|l| l.name == name).unwrap_or(0);
    &LANGUAGES[(idx + 1) % LANGUAGES.len()]
}

/// Theme registered after `name`, wrapping around.
pub fn next_theme(name: &str) -> &'static Theme {
    let idx = THEMES.iter().position(|t| t.name == name).unwrap_or(0);
    &THEMES[(idx + 1) % THEMES.len()]
}
