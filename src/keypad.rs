// Keypad Input - calculator-style entry for one category
//
// Two states: Empty (only digits do anything) and Editing. PLUS and MINUS
// commit the buffer into the running amount, BACKSPACE edits the buffer.
// Every commit is also appended to the ledger as a signed entry.

use crate::amount::parse_amount;
use crate::ledger::{Ledger, LedgerAware, LedgerError};
use crate::notice::Notice;
use rust_decimal::Decimal;
use tracing::{debug, warn};

// ============================================================================
// ACTIONS & STATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Plus,
    Minus,
    Backspace,
}

impl KeyAction {
    /// Map a keypad button label to its action.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "+" => Some(KeyAction::Plus),
            "-" => Some(KeyAction::Minus),
            "C" => Some(KeyAction::Backspace),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyAction::Plus => "+",
            KeyAction::Minus => "-",
            KeyAction::Backspace => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadState {
    Empty,
    Editing,
}

/// What an action press did to the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadOutcome {
    /// Empty buffer, nothing happened
    Ignored,
    /// Buffer edited, amount untouched
    InputChanged,
    /// Buffer committed into the running amount
    AmountChanged,
    /// Buffer was not a number and has been cleared
    Rejected,
}

/// Result of evaluating an action before anything is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Ignore,
    Reject(Notice),
    Commit { delta: Decimal, amount: Decimal },
    Backspace,
}

// ============================================================================
// INPUT STATE MACHINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct KeypadInput {
    input: String,
    amount: Decimal,
}

impl KeypadInput {
    /// Fresh keypad: empty buffer, amount zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn state(&self) -> KeypadState {
        if self.input.is_empty() {
            KeypadState::Empty
        } else {
            KeypadState::Editing
        }
    }

    pub fn press_digit(&mut self, digit: char) {
        self.input.push(digit);
    }

    /// Decide what `action` would do without touching any state.
    pub fn evaluate(&self, action: KeyAction) -> Step {
        if self.input.is_empty() {
            return Step::Ignore;
        }

        let value = match parse_amount(&self.input) {
            Ok(value) => value,
            Err(_) => return Step::Reject(Notice::InvalidInput(self.input.clone())),
        };

        let delta = match action {
            KeyAction::Backspace => return Step::Backspace,
            KeyAction::Plus => value,
            KeyAction::Minus => -value,
        };

        match exact_sum(self.amount, delta) {
            Some(amount) => Step::Commit { delta, amount },
            None => Step::Reject(Notice::InvalidInput(self.input.clone())),
        }
    }

    pub fn apply(&mut self, step: &Step) -> KeypadOutcome {
        match step {
            Step::Ignore => KeypadOutcome::Ignored,
            Step::Reject(_) => {
                self.input.clear();
                KeypadOutcome::Rejected
            }
            Step::Commit { amount, .. } => {
                self.amount = *amount;
                self.input.clear();
                KeypadOutcome::AmountChanged
            }
            Step::Backspace => {
                self.input.pop();
                KeypadOutcome::InputChanged
            }
        }
    }

    pub fn press_action(&mut self, action: KeyAction) -> (KeypadOutcome, Option<Notice>) {
        let step = self.evaluate(action);
        let outcome = self.apply(&step);
        match step {
            Step::Reject(notice) => (outcome, Some(notice)),
            _ => (outcome, None),
        }
    }
}

/// `a + b`, or `None` when the sum leaves the 96-bit range or would have to
/// be rounded to fit in it.
fn exact_sum(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    if a.is_zero() || b.is_zero() {
        return Some(sum);
    }
    (sum.scale() >= a.scale().max(b.scale())).then_some(sum)
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Keypad screen for one category, backed by an injected ledger.
pub struct KeypadController<L: Ledger> {
    category: String,
    ledger: L,
    keypad: KeypadInput,
    notices: Vec<Notice>,
}

impl<L: Ledger> KeypadController<L> {
    /// Open the screen. The running amount always starts at zero.
    pub fn new(ledger: L, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ledger,
            keypad: KeypadInput::new(),
            notices: Vec::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn input(&self) -> &str {
        self.keypad.input()
    }

    pub fn amount(&self) -> Decimal {
        self.keypad.amount()
    }

    pub fn state(&self) -> KeypadState {
        self.keypad.state()
    }

    /// Balance of the category as stored in the ledger.
    pub fn balance(&self) -> Result<Decimal, LedgerError> {
        self.ledger.balance(&self.category)
    }

    pub fn press_digit(&mut self, digit: char) {
        debug!(category = %self.category, %digit, "keypad digit");
        self.keypad.press_digit(digit);
    }

    pub fn press_action(&mut self, action: KeyAction) -> Result<KeypadOutcome, LedgerError> {
        debug!(category = %self.category, action = action.label(), "keypad action");

        let step = self.keypad.evaluate(action);
        match &step {
            Step::Commit { delta, .. } => {
                self.ledger.save(&self.category, *delta)?;
            }
            Step::Reject(notice) => {
                warn!(category = %self.category, "{}", notice);
                self.notices.push(notice.clone());
            }
            Step::Ignore | Step::Backspace => {}
        }

        Ok(self.keypad.apply(&step))
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }
}

impl<L: Ledger> LedgerAware for KeypadController<L> {
    type Ledger = L;

    fn ledger(&self) -> &L {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn type_in<L: Ledger>(controller: &mut KeypadController<L>, text: &str) {
        for ch in text.chars() {
            controller.press_digit(ch);
        }
    }

    #[test]
    fn test_plus_plus_is_exact() {
        let mut keypad = KeypadInput::new();
        for ch in "10.10".chars() {
            keypad.press_digit(ch);
        }
        keypad.press_action(KeyAction::Plus);
        assert_eq!(keypad.amount().to_string(), "10.10");

        for ch in "0.05".chars() {
            keypad.press_digit(ch);
        }
        keypad.press_action(KeyAction::Plus);
        assert_eq!(keypad.amount(), dec("10.15"));
        assert_eq!(keypad.input(), "");
    }

    #[test]
    fn test_minus_subtracts() {
        let mut keypad = KeypadInput::new();
        keypad.press_digit('5');
        let (outcome, notice) = keypad.press_action(KeyAction::Minus);
        assert_eq!(outcome, KeypadOutcome::AmountChanged);
        assert!(notice.is_none());
        assert_eq!(keypad.amount(), dec("-5"));
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let mut keypad = KeypadInput::new();
        keypad.press_digit('1');
        keypad.press_digit('2');
        let (outcome, _) = keypad.press_action(KeyAction::Backspace);
        assert_eq!(outcome, KeypadOutcome::InputChanged);
        assert_eq!(keypad.input(), "1");
        assert_eq!(keypad.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut keypad = KeypadInput::new();
        let (outcome, notice) = keypad.press_action(KeyAction::Backspace);
        assert_eq!(outcome, KeypadOutcome::Ignored);
        assert!(notice.is_none());
        assert_eq!(keypad.state(), KeypadState::Empty);
    }

    #[test]
    fn test_state_follows_buffer() {
        let mut keypad = KeypadInput::new();
        assert_eq!(keypad.state(), KeypadState::Empty);
        keypad.press_digit('7');
        assert_eq!(keypad.state(), KeypadState::Editing);
        keypad.press_action(KeyAction::Plus);
        assert_eq!(keypad.state(), KeypadState::Empty);
    }

    #[test]
    fn test_invalid_input_rejected_once() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");
        type_in(&mut controller, "12a");

        let outcome = controller.press_action(KeyAction::Plus).unwrap();

        assert_eq!(outcome, KeypadOutcome::Rejected);
        assert_eq!(controller.amount(), Decimal::ZERO);
        assert_eq!(controller.input(), "");
        assert_eq!(
            controller.take_notices(),
            vec![Notice::InvalidInput("12a".to_string())]
        );
        assert!(controller.take_notices().is_empty());
        drop(controller);
        assert!(ledger.is_empty(), "rejected input must not reach the ledger");
    }

    #[test]
    fn test_invalid_input_rejected_on_backspace_too() {
        let mut keypad = KeypadInput::new();
        for ch in "1..".chars() {
            keypad.press_digit(ch);
        }
        let (outcome, notice) = keypad.press_action(KeyAction::Backspace);
        assert_eq!(outcome, KeypadOutcome::Rejected);
        assert_eq!(notice, Some(Notice::InvalidInput("1..".to_string())));
        assert_eq!(keypad.input(), "");
    }

    #[test]
    fn test_empty_buffer_actions_are_silent() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");

        for action in [KeyAction::Plus, KeyAction::Minus] {
            let outcome = controller.press_action(action).unwrap();
            assert_eq!(outcome, KeypadOutcome::Ignored);
        }

        assert_eq!(controller.amount(), Decimal::ZERO);
        assert!(controller.take_notices().is_empty());
        drop(controller);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_commits_are_recorded_as_signed_entries() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");

        type_in(&mut controller, "20");
        controller.press_action(KeyAction::Plus).unwrap();
        type_in(&mut controller, "7.5");
        controller.press_action(KeyAction::Minus).unwrap();

        assert_eq!(controller.amount(), dec("12.5"));
        assert_eq!(controller.balance().unwrap(), dec("12.5"));
        drop(controller);

        let amounts: Vec<Decimal> = ledger.find_all("Food").unwrap().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec("20"), dec("-7.5")]);
    }

    #[test]
    fn test_amount_starts_at_zero_despite_existing_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.save("Food", dec("42")).unwrap();

        let controller = KeypadController::new(&mut ledger, "Food");

        assert_eq!(controller.amount(), Decimal::ZERO);
        assert_eq!(controller.balance().unwrap(), dec("42"));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");
        let max = Decimal::MAX.to_string();

        type_in(&mut controller, &max);
        controller.press_action(KeyAction::Plus).unwrap();
        type_in(&mut controller, &max);
        let outcome = controller.press_action(KeyAction::Plus).unwrap();

        assert_eq!(outcome, KeypadOutcome::Rejected);
        assert_eq!(controller.amount(), Decimal::MAX);
        assert_eq!(controller.take_notices().len(), 1);
        assert_eq!(controller.ledger().len(), 1);
    }

    #[test]
    fn test_rounding_sum_is_rejected() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");
        let wide = dec("7922816251426433759354395033");

        type_in(&mut controller, "7922816251426433759354395033");
        controller.press_action(KeyAction::Plus).unwrap();
        type_in(&mut controller, "0.55");
        let outcome = controller.press_action(KeyAction::Plus).unwrap();

        assert_eq!(outcome, KeypadOutcome::Rejected);
        assert_eq!(controller.amount(), wide);
        assert_eq!(controller.take_notices().len(), 1);

        type_in(&mut controller, "0.55");
        let outcome = controller.press_action(KeyAction::Minus).unwrap();
        assert_eq!(outcome, KeypadOutcome::Rejected);
        assert_eq!(controller.ledger().len(), 1);
    }

    #[test]
    fn test_zero_amount_keeps_later_sums() {
        let mut ledger = MemoryLedger::new();
        let mut controller = KeypadController::new(&mut ledger, "Food");

        type_in(&mut controller, "0.00");
        controller.press_action(KeyAction::Plus).unwrap();
        type_in(&mut controller, "5");
        let outcome = controller.press_action(KeyAction::Plus).unwrap();

        assert_eq!(outcome, KeypadOutcome::AmountChanged);
        assert_eq!(controller.amount(), dec("5"));
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(KeyAction::from_label("+"), Some(KeyAction::Plus));
        assert_eq!(KeyAction::from_label("-"), Some(KeyAction::Minus));
        assert_eq!(KeyAction::from_label("C"), Some(KeyAction::Backspace));
        assert_eq!(KeyAction::from_label("x"), None);
    }
}
