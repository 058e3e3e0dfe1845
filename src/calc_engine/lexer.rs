use std::fmt;

use super::errors::Construct;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
    /// Part of a general expression grammar, never of arithmetic.
    Foreign(Construct),
    /// Malformed literal or a character no grammar knows.
    Invalid(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::DoubleStar => f.write_str("'**'"),
            Token::Slash => f.write_str("'/'"),
            Token::DoubleSlash => f.write_str("'//'"),
            Token::Percent => f.write_str("'%'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Foreign(construct) => write!(f, "{}", construct),
            Token::Invalid(message) => f.write_str(message),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Splits `input` into tokens. Never fails: anything unrecognised becomes
/// [`Token::Invalid`] and is reported by the parser when it gets there.
pub fn tokenize(input: &str) -> Vec<Spanned> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let next = chars.get(pos + 1).copied();
        let start = pos;

        let token = match c {
            ' ' | '\t' | '\n' | '\r' => {
                pos += 1;
                continue;
            }
            '0'..='9' => {
                let (token, len) = read_number(&chars[pos..]);
                pos += len;
                token
            }
            '.' if next.is_some_and(|n| n.is_ascii_digit()) => {
                let (token, len) = read_number(&chars[pos..]);
                pos += len;
                token
            }
            '.' if next.is_some_and(is_ident_start) => {
                pos += 1;
                Token::Foreign(Construct::AttributeAccess)
            }
            '+' => {
                pos += 1;
                Token::Plus
            }
            '-' => {
                pos += 1;
                Token::Minus
            }
            '*' if next == Some('*') => {
                pos += 2;
                Token::DoubleStar
            }
            '*' => {
                pos += 1;
                Token::Star
            }
            '/' if next == Some('/') => {
                pos += 2;
                Token::DoubleSlash
            }
            '/' => {
                pos += 1;
                Token::Slash
            }
            '%' => {
                pos += 1;
                Token::Percent
            }
            '(' => {
                pos += 1;
                Token::LParen
            }
            ')' => {
                pos += 1;
                Token::RParen
            }
            c if is_ident_start(c) => {
                let word: String = chars[pos..]
                    .iter()
                    .take_while(|&&ch| is_ident_continue(ch))
                    .collect();
                pos += word.chars().count();
                let called = chars[pos..]
                    .iter()
                    .find(|ch| !ch.is_whitespace())
                    .is_some_and(|&ch| ch == '(');
                Token::Foreign(classify_word(&word, called))
            }
            '\'' | '"' => {
                // The literal's content is irrelevant; skip to the closing quote.
                pos += 1;
                while pos < chars.len() && chars[pos] != c {
                    pos += 1;
                }
                pos = (pos + 1).min(chars.len());
                Token::Foreign(Construct::StringLiteral)
            }
            '[' | ']' | '{' | '}' | ',' => {
                pos += 1;
                Token::Foreign(Construct::Collection)
            }
            ':' if next == Some('=') => {
                pos += 2;
                Token::Foreign(Construct::Assignment)
            }
            ':' => {
                pos += 1;
                Token::Foreign(Construct::Collection)
            }
            '=' | '!' | '<' | '>' => {
                let (construct, len) = classify_relational(c, next);
                pos += len;
                Token::Foreign(construct)
            }
            '&' | '|' if next == Some(c) => {
                pos += 2;
                Token::Foreign(Construct::BooleanOperator)
            }
            '&' | '|' | '^' | '~' => {
                pos += 1;
                Token::Foreign(Construct::BitwiseOperator)
            }
            other => {
                pos += 1;
                Token::Invalid(format!("unrecognized character '{}'", other))
            }
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    tokens
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Reads `digits`, `digits.`, `.digits` or `digits.digits` from the front of `chars`.
fn read_number(chars: &[char]) -> (Token, usize) {
    let mut literal = String::new();
    let mut has_dot = false;

    for &ch in chars {
        match ch {
            '0'..='9' => literal.push(ch),
            '.' if !has_dot => {
                has_dot = true;
                literal.push(ch);
            }
            _ => break,
        }
    }

    let len = literal.len();

    let leading_zero = !has_dot
        && literal.len() > 1
        && literal.starts_with('0')
        && literal.chars().any(|ch| ch != '0');
    if leading_zero {
        return (
            Token::Invalid(format!("leading zeros are not permitted in '{}'", literal)),
            len,
        );
    }

    match literal.parse::<f64>() {
        Ok(value) => (Token::Number(value), len),
        Err(_) => (Token::Invalid(format!("invalid number '{}'", literal)), len),
    }
}

fn classify_word(word: &str, called: bool) -> Construct {
    match word {
        "True" | "False" => Construct::BooleanLiteral,
        "None" => Construct::NoneLiteral,
        "and" | "or" | "not" => Construct::BooleanOperator,
        "is" | "in" => Construct::Comparison,
        _ if called => Construct::FunctionCall,
        _ => Construct::Identifier,
    }
}

fn classify_relational(c: char, next: Option<char>) -> (Construct, usize) {
    match (c, next) {
        ('=', Some('=')) | ('!', Some('=')) | ('<', Some('=')) | ('>', Some('=')) => {
            (Construct::Comparison, 2)
        }
        ('<', Some('<')) | ('>', Some('>')) => (Construct::BitwiseOperator, 2),
        ('=', _) => (Construct::Assignment, 1),
        ('!', _) => (Construct::BooleanOperator, 1),
        _ => (Construct::Comparison, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_arithmetic_tokens() {
        assert_eq!(
            kinds("2 ** 3 // (4 % 5)"),
            vec![
                Token::Number(2.0),
                Token::DoubleStar,
                Token::Number(3.0),
                Token::DoubleSlash,
                Token::LParen,
                Token::Number(4.0),
                Token::Percent,
                Token::Number(5.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(kinds("3."), vec![Token::Number(3.0)]);
        assert_eq!(kinds(".5"), vec![Token::Number(0.5)]);
        assert_eq!(kinds("12.25"), vec![Token::Number(12.25)]);
        assert_eq!(kinds("1.2.3"), vec![Token::Number(1.2), Token::Number(0.3)]);
    }

    #[test]
    fn test_leading_zeros() {
        assert!(matches!(kinds("007")[0], Token::Invalid(_)));
        assert_eq!(kinds("00"), vec![Token::Number(0.0)]);
        assert_eq!(kinds("007.5"), vec![Token::Number(7.5)]);
    }

    #[test]
    fn test_positions_are_char_offsets() {
        let tokens = tokenize("  1 +\t23");
        let positions: Vec<usize> = tokens.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![2, 4, 6]);
    }

    #[test]
    fn test_foreign_constructs() {
        assert_eq!(
            kinds("__import__('os')"),
            vec![
                Token::Foreign(Construct::FunctionCall),
                Token::LParen,
                Token::Foreign(Construct::StringLiteral),
                Token::RParen,
            ]
        );
        assert_eq!(kinds("x"), vec![Token::Foreign(Construct::Identifier)]);
        assert_eq!(kinds("True"), vec![Token::Foreign(Construct::BooleanLiteral)]);
        assert_eq!(
            kinds("1 == 1")[1],
            Token::Foreign(Construct::Comparison)
        );
        assert_eq!(kinds("x = 1")[1], Token::Foreign(Construct::Assignment));
        assert_eq!(kinds("1 << 2")[1], Token::Foreign(Construct::BitwiseOperator));
        assert_eq!(kinds("[1]")[0], Token::Foreign(Construct::Collection));
        assert_eq!(kinds("(1).real")[3], Token::Foreign(Construct::AttributeAccess));
    }

    #[test]
    fn test_unknown_characters_are_invalid() {
        assert!(matches!(kinds("$")[0], Token::Invalid(_)));
        assert!(matches!(kinds("2 ? 3")[1], Token::Invalid(_)));
        assert!(matches!(kinds("×")[0], Token::Invalid(_)));
        assert!(matches!(kinds(".")[0], Token::Invalid(_)));
    }
}
