//! Owned calculator state plus the dispatch entry point for button presses.

use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use client_core::{CalculatorApi, ClientError};
use tracing::{debug, warn};

use crate::controller::{
    events::{UiError, UiErrorContext},
    reducer::{self, CalculatorState},
    roles::{Action, ButtonRole},
};

pub const ERROR_TEXT: &str = "Error";
pub const DEFAULT_ERROR_REVERT_DELAY: Duration = Duration::from_millis(1500);

/// Render targets: the display text, the memory indicator, and a side
/// channel for failures the window may want to describe.
pub trait CalculatorView {
    fn render_display(&mut self, text: &str);
    fn set_memory_indicator(&mut self, visible: bool);
    fn report_error(&mut self, error: UiError);
}

pub struct CalculatorController<V: CalculatorView> {
    api: Arc<dyn CalculatorApi>,
    view: V,
    state: CalculatorState,
    error_revert_delay: Duration,
    pending_reverts: VecDeque<Instant>,
}

impl<V: CalculatorView> CalculatorController<V> {
    pub fn new(api: Arc<dyn CalculatorApi>, view: V, error_revert_delay: Duration) -> Self {
        let mut controller = Self {
            api,
            view,
            state: reducer::create_initial_state(),
            error_revert_delay,
            pending_reverts: VecDeque::new(),
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn next_revert_deadline(&self) -> Option<Instant> {
        self.pending_reverts.front().copied()
    }

    pub async fn dispatch(&mut self, role: ButtonRole) {
        debug!(command = role.command_name(), "dispatching keypad input");
        match role {
            ButtonRole::Digit(digit) => self.apply(|state| reducer::input_digit(state, digit)),
            ButtonRole::Operator(operator) => {
                self.apply(|state| reducer::input_operator(state, operator))
            }
            ButtonRole::Action(Action::Clear) => self.apply(reducer::clear),
            ButtonRole::Action(Action::Decimal) => self.apply(reducer::input_decimal),
            ButtonRole::Action(Action::Equals) => self.handle_equals().await,
            ButtonRole::Action(Action::MemoryAdd) => self.handle_memory_add().await,
            ButtonRole::Action(Action::MemorySubtract) => self.handle_memory_subtract().await,
            ButtonRole::Action(Action::MemoryRecall) => self.handle_memory_recall().await,
            ButtonRole::Action(Action::MemoryClear) => self.handle_memory_clear().await,
        }
    }

    /// Applies every error revert whose deadline has passed. Returns whether
    /// any fired.
    pub fn revert_if_due(&mut self, now: Instant) -> bool {
        let mut fired = false;
        while self
            .pending_reverts
            .front()
            .is_some_and(|deadline| *deadline <= now)
        {
            self.pending_reverts.pop_front();
            fired = true;
        }
        if fired {
            self.state = reducer::create_initial_state();
            self.render();
        }
        fired
    }

    fn apply(&mut self, transition: impl FnOnce(&CalculatorState) -> CalculatorState) {
        self.state = transition(&self.state);
        self.render();
    }

    fn render(&mut self) {
        self.view.render_display(reducer::display_value(&self.state));
    }

    fn current_number(&self) -> f64 {
        reducer::parse_display_number(&self.state.display_value)
    }

    async fn handle_equals(&mut self) {
        let (Some(operator), Some(first_operand)) = (self.state.operator, self.state.first_operand)
        else {
            return;
        };

        match self
            .api
            .calculate(first_operand, self.current_number(), operator)
            .await
        {
            Ok(response) => {
                self.state =
                    reducer::set_display_value(&reducer::create_initial_state(), response.result);
                self.render();
            }
            Err(err) => {
                debug!(connection = err.is_connection(), "calculation failed: {err}");
                self.view.render_display(ERROR_TEXT);
                self.view
                    .report_error(UiError::from_client_error(UiErrorContext::Calculate, &err));
                self.pending_reverts
                    .push_back(Instant::now() + self.error_revert_delay);
            }
        }
    }

    async fn handle_memory_add(&mut self) {
        let result = self.api.memory_add(self.current_number()).await;
        match result {
            Ok(response) => self.view.set_memory_indicator(response.is_non_zero()),
            Err(err) => log_memory_failure("memory add", &err),
        }
    }

    async fn handle_memory_subtract(&mut self) {
        let result = self.api.memory_subtract(self.current_number()).await;
        match result {
            Ok(response) => self.view.set_memory_indicator(response.is_non_zero()),
            Err(err) => log_memory_failure("memory subtract", &err),
        }
    }

    async fn handle_memory_recall(&mut self) {
        match self.api.memory_recall().await {
            Ok(response) => {
                self.state = reducer::set_display_value(&self.state, response.value);
                self.render();
            }
            Err(err) => log_memory_failure("memory recall", &err),
        }
    }

    async fn handle_memory_clear(&mut self) {
        match self.api.memory_clear().await {
            Ok(_) => self.view.set_memory_indicator(false),
            Err(err) => log_memory_failure("memory clear", &err),
        }
    }
}

fn log_memory_failure(operation: &str, err: &ClientError) {
    warn!(
        operation,
        connection = err.is_connection(),
        "{operation} failed: {err}"
    );
}

#[cfg(test)]
#[path = "tests/calculator_tests.rs"]
mod tests;
