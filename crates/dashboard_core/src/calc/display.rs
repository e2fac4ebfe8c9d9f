use super::eval::{evaluate, format_number, CalcError};

/// Text shown after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";

const INITIAL_TEXT: &str = "0";

/// One calculator button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKey {
    /// Digit, `.`, operator or parenthesis appended to the display.
    Input(char),
    /// `C`
    Clear,
    /// `←`
    Backspace,
    /// `=`
    Evaluate,
}

impl CalcKey {
    /// Maps a button label to a key. Unknown labels return `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'C' | 'c' => Some(Self::Clear),
            '←' | '\u{8}' => Some(Self::Backspace),
            '=' => Some(Self::Evaluate),
            '0'..='9' | '.' | '+' | '-' | '*' | '/' | '(' | ')' => Some(Self::Input(ch)),
            '×' => Some(Self::Input('*')),
            '÷' => Some(Self::Input('/')),
            _ => None,
        }
    }
}

/// Calculator display state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorDisplay {
    text: String,
    last_error: Option<CalcError>,
}

impl Default for CalculatorDisplay {
    fn default() -> Self {
        Self {
            text: INITIAL_TEXT.to_string(),
            last_error: None,
        }
    }
}

impl CalculatorDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Error from the most recent `=`; cleared by the next key press.
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Applies one key and returns the resulting display text.
    pub fn press(&mut self, key: CalcKey) -> &str {
        self.last_error = None;
        match key {
            CalcKey::Clear => self.text = INITIAL_TEXT.to_string(),
            CalcKey::Backspace => {
                if self.text == ERROR_TEXT {
                    self.text.clear();
                } else {
                    self.text.pop();
                }
                if self.text.is_empty() {
                    self.text = INITIAL_TEXT.to_string();
                }
            }
            CalcKey::Evaluate => match evaluate(self.text.as_str()) {
                Ok(value) => self.text = format_number(value),
                Err(err) => {
                    self.text = ERROR_TEXT.to_string();
                    self.last_error = Some(err);
                }
            },
            CalcKey::Input(ch) => {
                if self.text == ERROR_TEXT || (self.text == INITIAL_TEXT && ch != '.') {
                    self.text.clear();
                }
                self.text.push(ch);
            }
        }
        self.text.as_str()
    }

    /// Presses every recognised key in `keys`, skipping unknown characters.
    pub fn press_all(&mut self, keys: &str) -> &str {
        for key in keys.chars().filter_map(CalcKey::from_char) {
            self.press(key);
        }
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{CalcKey, CalculatorDisplay, ERROR_TEXT};
    use crate::calc::{CalcError, MAX_DEPTH};

    #[test]
    fn leading_zero_is_replaced_except_for_decimal_point() {
        let mut display = CalculatorDisplay::new();
        assert_eq!(display.press(CalcKey::Input('7')), "7");

        let mut display = CalculatorDisplay::new();
        assert_eq!(display.press(CalcKey::Input('.')), "0.");
    }

    #[test]
    fn evaluate_and_backspace() {
        let mut display = CalculatorDisplay::new();
        assert_eq!(display.press_all("12+3="), "15");
        assert_eq!(display.press(CalcKey::Backspace), "1");
        assert_eq!(display.press(CalcKey::Backspace), "0");
    }

    #[test]
    fn failed_evaluation_shows_error_and_next_input_starts_over() {
        let mut display = CalculatorDisplay::new();
        assert_eq!(display.press_all("1/0="), ERROR_TEXT);
        assert_eq!(display.last_error(), Some(&CalcError::NonFinite));

        assert_eq!(display.press(CalcKey::Input('4')), "4");
        assert_eq!(display.last_error(), None);
    }

    #[test]
    fn clear_resets_to_zero() {
        let mut display = CalculatorDisplay::new();
        display.press_all("9*9");
        assert_eq!(display.press(CalcKey::Clear), "0");
    }

    #[test]
    fn over_nested_input_shows_error() {
        let mut display = CalculatorDisplay::new();
        let keys = format!("{}1=", "(".repeat(MAX_DEPTH * 4));
        assert_eq!(display.press_all(&keys), ERROR_TEXT);
        assert_eq!(display.last_error(), Some(&CalcError::TooDeep(MAX_DEPTH)));
    }
}
