//! Terminal output helpers

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const GRAY: &'static str = "\x1b[90m";
}

/// Star marker for card listings
pub fn star_marker(starred: bool, use_color: bool) -> String {
    match (starred, use_color) {
        (true, true) => format!("{}★{}", Color::YELLOW, Color::RESET),
        (true, false) => "★".to_string(),
        (false, _) => "☆".to_string(),
    }
}

/// Print a plain list of names, or "none" placeholder text
pub fn print_names(names: &[String], empty_message: &str) {
    if names.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for name in names {
        println!("{}", name);
    }
}
