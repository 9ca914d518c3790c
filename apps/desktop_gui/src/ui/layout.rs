//! Keypad grid. Each button declares its role through the same three
//! attribute slots a web keypad would use.

use crate::controller::roles::ButtonRole;

#[derive(Debug, Clone, Copy)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub digit: Option<&'static str>,
    pub operator: Option<&'static str>,
    pub action: Option<&'static str>,
}

impl ButtonSpec {
    const fn digit(label: &'static str) -> Self {
        Self {
            label,
            digit: Some(label),
            operator: None,
            action: None,
        }
    }

    const fn operator(label: &'static str, symbol: &'static str) -> Self {
        Self {
            label,
            digit: None,
            operator: Some(symbol),
            action: None,
        }
    }

    const fn action(label: &'static str, name: &'static str) -> Self {
        Self {
            label,
            digit: None,
            operator: None,
            action: Some(name),
        }
    }

    pub fn role(&self) -> Option<ButtonRole> {
        ButtonRole::from_attributes(self.digit, self.operator, self.action)
    }
}

pub const BUTTON_GRID: [[ButtonSpec; 4]; 5] = [
    [
        ButtonSpec::action("MC", "memory-clear"),
        ButtonSpec::action("MR", "memory-recall"),
        ButtonSpec::action("M+", "memory-add"),
        ButtonSpec::action("M-", "memory-subtract"),
    ],
    [
        ButtonSpec::digit("7"),
        ButtonSpec::digit("8"),
        ButtonSpec::digit("9"),
        ButtonSpec::operator("÷", "/"),
    ],
    [
        ButtonSpec::digit("4"),
        ButtonSpec::digit("5"),
        ButtonSpec::digit("6"),
        ButtonSpec::operator("×", "*"),
    ],
    [
        ButtonSpec::digit("1"),
        ButtonSpec::digit("2"),
        ButtonSpec::digit("3"),
        ButtonSpec::operator("−", "-"),
    ],
    [
        ButtonSpec::digit("0"),
        ButtonSpec::action(".", "decimal"),
        ButtonSpec::action("C", "clear"),
        ButtonSpec::operator("+", "+"),
    ],
];

pub const EQUALS_BUTTON: ButtonSpec = ButtonSpec::action("=", "equals");

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_button_resolves_to_a_role() {
        for spec in BUTTON_GRID.iter().flatten().chain([&EQUALS_BUTTON]) {
            assert!(spec.role().is_some(), "{} has no role", spec.label);
        }
    }

    #[test]
    fn layout_covers_all_digits_and_actions_once() {
        let roles: Vec<ButtonRole> = BUTTON_GRID
            .iter()
            .flatten()
            .chain([&EQUALS_BUTTON])
            .filter_map(ButtonSpec::role)
            .collect();
        let unique: HashSet<String> = roles.iter().map(|role| format!("{role:?}")).collect();

        assert_eq!(roles.len(), 21);
        assert_eq!(unique.len(), roles.len());
    }
}
