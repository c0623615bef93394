//! Password strength meter and visibility toggle.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    /// Width of the meter bar, in percent.
    pub fn percentage(self) -> u8 {
        match self {
            Strength::Weak => 33,
            Strength::Medium => 66,
            Strength::Strong => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }
}

/// One point per satisfied rule, 0..=6.
pub fn score(password: &str) -> u8 {
    let length = password.chars().count();
    let rules = [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    rules.iter().filter(|ok| **ok).count() as u8
}

pub fn strength(password: &str) -> Strength {
    match score(password) {
        0..=2 => Strength::Weak,
        3..=4 => Strength::Medium,
        _ => Strength::Strong,
    }
}

/// Masked/plain toggle for a password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    revealed: bool,
}

impl Visibility {
    pub fn toggle(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn is_revealed(self) -> bool {
        self.revealed
    }

    pub fn display(self, password: &str) -> String {
        if self.revealed {
            password.to_string()
        } else {
            "•".repeat(password.chars().count())
        }
    }
}
