use super::EligibilityError;

const CNIC_DIGITS: usize = 13;
const FIRST_BREAK: usize = 5;
const SECOND_BREAK: usize = 12;

/// A national identity number in canonical `DDDDD-DDDDDDD-D` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cnic(String);

impl Cnic {
    /// Strips every non-digit, keeps at most 13 digits, and re-inserts the hyphens
    /// after digits 5 and 12 when there are enough digits to place them.
    pub fn canonicalize(raw: &str) -> String {
        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(CNIC_DIGITS)
            .collect();

        let mut formatted = String::with_capacity(CNIC_DIGITS + 2);
        for (position, digit) in digits.chars().enumerate() {
            if position == FIRST_BREAK || position == SECOND_BREAK {
                formatted.push('-');
            }
            formatted.push(digit);
        }
        formatted
    }

    pub fn parse(raw: &str) -> Result<Self, EligibilityError> {
        let canonical = Self::canonicalize(raw);
        if is_canonical(&canonical) {
            Ok(Self(canonical))
        } else {
            Err(EligibilityError::Format { canonical })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_canonical(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    matches!(groups.as_slice(), [a, b, c]
        if a.len() == 5 && b.len() == 7 && c.len() == 1
            && groups.iter().all(|group| group.bytes().all(|byte| byte.is_ascii_digit())))
}
