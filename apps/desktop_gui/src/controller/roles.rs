//! Button roles declared by the keypad layout, mirroring the
//! `data-digit` / `data-operator` / `data-action` attribute contract.

use std::str::FromStr;

use shared::domain::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clear,
    Decimal,
    Equals,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Clear => "clear",
            Action::Decimal => "decimal",
            Action::Equals => "equals",
            Action::MemoryAdd => "memory-add",
            Action::MemorySubtract => "memory-subtract",
            Action::MemoryRecall => "memory-recall",
            Action::MemoryClear => "memory-clear",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "clear" => Ok(Action::Clear),
            "decimal" => Ok(Action::Decimal),
            "equals" => Ok(Action::Equals),
            "memory-add" => Ok(Action::MemoryAdd),
            "memory-subtract" => Ok(Action::MemorySubtract),
            "memory-recall" => Ok(Action::MemoryRecall),
            "memory-clear" => Ok(Action::MemoryClear),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Digit(char),
    Operator(Operator),
    Action(Action),
}

impl ButtonRole {
    /// Resolves a control's role from its declared attributes, checked in
    /// digit, operator, action order. Empty or unrecognised values give no
    /// role, so the press is ignored.
    pub fn from_attributes(
        digit: Option<&str>,
        operator: Option<&str>,
        action: Option<&str>,
    ) -> Option<Self> {
        if let Some(digit) = digit.filter(|value| !value.is_empty()) {
            let mut chars = digit.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_digit() => Some(ButtonRole::Digit(ch)),
                _ => None,
            };
        }
        if let Some(operator) = operator.filter(|value| !value.is_empty()) {
            return operator.parse().ok().map(ButtonRole::Operator);
        }
        action
            .and_then(|value| value.parse().ok())
            .map(ButtonRole::Action)
    }

    pub fn command_name(self) -> &'static str {
        match self {
            ButtonRole::Digit(_) => "digit",
            ButtonRole::Operator(_) => "operator",
            ButtonRole::Action(action) => action.name(),
        }
    }
}
