use std::fmt;

use super::error::ExprError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Int(i128),
    Bool(bool),
    Ident(String),
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(value) => write!(f, "{value}"),
            Token::Bool(value) => write!(f, "{value}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
            Token::Not => f.write_str("not"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::DoubleSlash => f.write_str("//"),
            Token::Percent => f.write_str("%"),
            Token::Lt => f.write_str("<"),
            Token::Le => f.write_str("<="),
            Token::Gt => f.write_str(">"),
            Token::Ge => f.write_str(">="),
            Token::EqEq => f.write_str("=="),
            Token::Ne => f.write_str("!="),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Byte ranges of the maximal runs of word characters in `expr`.
pub fn word_spans(expr: &str) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in expr.char_indices() {
        match (is_word_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(s..expr.len());
    }
    spans
}

/// Whether a word names something (as opposed to being a numeric literal).
pub fn is_identifier(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

pub fn tokenize(expr: &str) -> Result<Vec<Spanned>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if is_word_char(c) {
            let mut end = expr.len();
            while let Some(&(i, c)) = chars.peek() {
                if !is_word_char(c) {
                    end = i;
                    break;
                }
                chars.next();
            }
            let word = &expr[offset..end];
            tokens.push(Spanned {
                token: word_token(word)?,
                offset,
            });
            continue;
        }

        chars.next();
        let next = chars.peek().map(|&(_, c)| c);
        let (token, wide) = match (c, next) {
            ('+', _) => (Token::Plus, false),
            ('-', _) => (Token::Minus, false),
            ('*', _) => (Token::Star, false),
            ('/', Some('/')) => (Token::DoubleSlash, true),
            ('/', _) => (Token::Slash, false),
            ('%', _) => (Token::Percent, false),
            ('(', _) => (Token::LParen, false),
            (')', _) => (Token::RParen, false),
            ('<', Some('=')) => (Token::Le, true),
            ('<', _) => (Token::Lt, false),
            ('>', Some('=')) => (Token::Ge, true),
            ('>', _) => (Token::Gt, false),
            ('=', Some('=')) => (Token::EqEq, true),
            ('!', Some('=')) => (Token::Ne, true),
            ('!', _) => (Token::Not, false),
            ('&', Some('&')) => (Token::And, true),
            ('|', Some('|')) => (Token::Or, true),
            _ => return Err(ExprError::UnexpectedChar { ch: c, offset }),
        };
        if wide {
            chars.next();
        }
        tokens.push(Spanned { token, offset });
    }

    Ok(tokens)
}

fn word_token(word: &str) -> Result<Token, ExprError> {
    if !is_identifier(word) {
        return parse_int_literal(word).map(Token::Int);
    }
    Ok(match word {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "true" | "True" => Token::Bool(true),
        "false" | "False" => Token::Bool(false),
        _ => Token::Ident(word.to_string()),
    })
}

fn parse_int_literal(word: &str) -> Result<i128, ExprError> {
    let (digits, radix) = if let Some(rest) = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = word
        .strip_prefix("0b")
        .or_else(|| word.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (word, 10)
    };

    i128::from_str_radix(digits, radix).map_err(|_| ExprError::InvalidLiteral {
        literal: word.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<Token> {
        tokenize(expr)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn lexes_operators_and_words() {
        assert_eq!(
            kinds("(len*8) // 2 >= hdr_size && !flag"),
            vec![
                Token::LParen,
                Token::Ident("len".to_string()),
                Token::Star,
                Token::Int(8),
                Token::RParen,
                Token::DoubleSlash,
                Token::Int(2),
                Token::Ge,
                Token::Ident("hdr_size".to_string()),
                Token::And,
                Token::Not,
                Token::Ident("flag".to_string()),
            ]
        );
    }

    #[test]
    fn lexes_prefixed_literals() {
        assert_eq!(
            kinds("0x1F 0b101 42"),
            vec![Token::Int(31), Token::Int(5), Token::Int(42)]
        );
    }

    #[test]
    fn keywords_and_boolean_spellings() {
        assert_eq!(
            kinds("True or false and not true"),
            vec![
                Token::Bool(true),
                Token::Or,
                Token::Bool(false),
                Token::And,
                Token::Not,
                Token::Bool(true),
            ]
        );
    }

    #[test]
    fn identifiers_are_maximal() {
        assert_eq!(
            kinds("length-len"),
            vec![
                Token::Ident("length".to_string()),
                Token::Minus,
                Token::Ident("len".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_single_equals() {
        assert_eq!(
            tokenize("a = 1").unwrap_err(),
            ExprError::UnexpectedChar { ch: '=', offset: 2 }
        );
    }

    #[test]
    fn rejects_malformed_literal() {
        assert!(matches!(
            tokenize("12ab").unwrap_err(),
            ExprError::InvalidLiteral { .. }
        ));
        assert!(matches!(
            tokenize("99999999999999999999").unwrap_err(),
            ExprError::InvalidLiteral { .. }
        ));
    }

    #[test]
    fn word_spans_cover_words_only() {
        let expr = "ab + a*(b)";
        let words: Vec<&str> = word_spans(expr).into_iter().map(|r| &expr[r]).collect();
        assert_eq!(words, vec!["ab", "a", "b"]);
    }
}
