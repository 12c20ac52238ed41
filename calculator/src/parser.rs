use std::str::FromStr;

use divider::{lut, Divider, DividerError};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Opcode {
    Rcp,
    Div,
}

pub struct Parser {
    divider: Divider<'static>,
}

impl Parser {
    pub fn new() -> Result<Self, DividerError> {
        Ok(Self {
            divider: Divider::new(
                &lut::RECIPROCAL_LUT,
                lut::CONSTANT_TERM_SIZE,
                lut::LINEAR_TERM_SIZE,
            )?,
        })
    }

    pub fn execute(&self, command: &str) -> String {
        let mut tokens = command.split_whitespace();

        let opcode = tokens
            .next()
            .and_then(|token| Opcode::from_str(token).ok());
        let opcode = match opcode {
            Some(opcode) => opcode,
            None => return "error: invalid opcode".to_string(),
        };

        match opcode {
            Opcode::Rcp => match parse_argument(tokens.next()) {
                Some(x) => self.divider.reciprocal(x).to_string(),
                None => "error: invalid argument".to_string(),
            },
            Opcode::Div => {
                let numerator = parse_argument(tokens.next());
                let denominator = parse_argument(tokens.next());
                match (numerator, denominator) {
                    (Some(numerator), Some(denominator)) => {
                        self.divider.divide(numerator, denominator).to_string()
                    }
                    _ => "error: invalid argument".to_string(),
                }
            }
        }
    }
}

fn parse_argument(token: Option<&str>) -> Option<f32> {
    token.and_then(|token| token.parse::<f32>().ok())
}

#[cfg(test)]
mod tests {
    use super::Parser;

    #[test]
    fn executes_reciprocal_commands() {
        let parser = Parser::new().unwrap();

        let result: f32 = parser.execute("rcp 2.0").parse().unwrap();
        assert!((result - 0.5).abs() < 4e-3);
    }

    #[test]
    fn executes_division_commands() {
        let parser = Parser::new().unwrap();

        let result: f32 = parser.execute("div 7 2").parse().unwrap();
        assert!((result - 3.5).abs() < 3.5 * 4e-3);
    }

    #[test]
    fn rejects_unknown_opcodes() {
        let parser = Parser::new().unwrap();
        assert_eq!(parser.execute("mul 2 3"), "error: invalid opcode");
        assert_eq!(parser.execute(""), "error: invalid opcode");
    }

    #[test]
    fn rejects_malformed_arguments() {
        let parser = Parser::new().unwrap();
        assert_eq!(parser.execute("rcp pedal"), "error: invalid argument");
        assert_eq!(parser.execute("div 1"), "error: invalid argument");
    }
}
