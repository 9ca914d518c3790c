//! Pure keypad state transitions. Every function takes the current state by
//! reference and returns a new value; nothing here performs I/O.

use shared::domain::Operator;

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub display_value: String,
    pub first_operand: Option<f64>,
    pub operator: Option<Operator>,
    pub waiting_for_second: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        create_initial_state()
    }
}

pub fn create_initial_state() -> CalculatorState {
    CalculatorState {
        display_value: "0".to_string(),
        first_operand: None,
        operator: None,
        waiting_for_second: false,
    }
}

pub fn display_value(state: &CalculatorState) -> &str {
    &state.display_value
}

pub fn input_digit(state: &CalculatorState, digit: char) -> CalculatorState {
    if state.waiting_for_second {
        return CalculatorState {
            display_value: digit.to_string(),
            waiting_for_second: false,
            ..state.clone()
        };
    }

    let display_value = if state.display_value == "0" {
        digit.to_string()
    } else {
        format!("{}{digit}", state.display_value)
    };
    CalculatorState {
        display_value,
        ..state.clone()
    }
}

pub fn input_decimal(state: &CalculatorState) -> CalculatorState {
    if state.waiting_for_second {
        return CalculatorState {
            display_value: "0.".to_string(),
            waiting_for_second: false,
            ..state.clone()
        };
    }
    if state.display_value.contains('.') {
        return state.clone();
    }
    CalculatorState {
        display_value: format!("{}.", state.display_value),
        ..state.clone()
    }
}

/// Captures the display as the first operand. Pressing another operator
/// before typing re-captures the same display and replaces the operator.
pub fn input_operator(state: &CalculatorState, operator: Operator) -> CalculatorState {
    CalculatorState {
        first_operand: Some(parse_display_number(&state.display_value)),
        operator: Some(operator),
        waiting_for_second: true,
        ..state.clone()
    }
}

pub fn clear(_state: &CalculatorState) -> CalculatorState {
    create_initial_state()
}

pub fn set_display_value(state: &CalculatorState, value: f64) -> CalculatorState {
    CalculatorState {
        display_value: format_number(value),
        ..state.clone()
    }
}

/// Lenient numeric read of a display string; anything unparseable is NaN.
pub fn parse_display_number(display: &str) -> f64 {
    display.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Renders a number the way a browser's `String(number)` would, so results
/// read `8` rather than `8.0` and huge or tiny magnitudes use `1e+21` form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}
