use crate::text::is_space;

/// A trailing `{...}` attribute block found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBlock {
    /// Byte index of the opening `{` within the scanned line.
    pub open: usize,
    /// Pairs in source order. Repeated `.class` tokens are merged.
    pub attributes: Vec<(String, String)>,
}

/// Scans `line` from the right for a trailing attribute block.
///
/// Accepted tokens, separated by whitespace:
/// - `#id`
/// - `.class`
/// - `key=value`, `key="quoted value"`, `key='quoted value'`
///
/// Trailing whitespace after the closing `}` is allowed. Any malformed
/// token, or an empty `{}`, yields `None`.
#[must_use]
pub fn find_attributes_reverse(line: &str) -> Option<AttributeBlock> {
    let body = line.trim_end_matches(is_space);
    let inner_end = body.strip_suffix('}')?.len();

    // Try every `{` from the right so quoted values may contain braces.
    body[..inner_end]
        .rmatch_indices('{')
        .find_map(|(open, _)| {
            parse_tokens(&body[open + 1..inner_end]).map(|attributes| AttributeBlock {
                open,
                attributes,
            })
        })
}

fn parse_tokens(inner: &str) -> Option<Vec<(String, String)>> {
    let mut cursor = Cursor { s: inner, pos: 0 };
    let mut attributes: Vec<(String, String)> = Vec::new();

    loop {
        cursor.skip_spaces();
        let Some(c) = cursor.peek() else {
            break;
        };
        match c {
            '#' => {
                cursor.bump();
                let id = cursor.take_name()?;
                set(&mut attributes, "id", id);
            }
            '.' => {
                cursor.bump();
                let class = cursor.take_name()?;
                match attributes.iter_mut().find(|(k, _)| k == "class") {
                    Some((_, existing)) => {
                        existing.push(' ');
                        existing.push_str(class);
                    }
                    None => attributes.push(("class".to_string(), class.to_string())),
                }
            }
            _ => {
                let key = cursor.take_key()?;
                if cursor.peek() != Some('=') {
                    return None;
                }
                cursor.bump();
                let value = cursor.take_value()?;
                set(&mut attributes, key, value);
            }
        }
        match cursor.peek() {
            None => break,
            Some(c) if is_space(c) => {}
            Some(_) => return None,
        }
    }

    (!attributes.is_empty()).then_some(attributes)
}

fn set(attributes: &mut Vec<(String, String)>, key: &str, value: &str) {
    match attributes.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value.to_string(),
        None => attributes.push((key.to_string(), value.to_string())),
    }
}

struct Cursor<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.s[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.bump();
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
        &self.s[start..self.pos]
    }

    /// Identifier after `#` or `.`.
    fn take_name(&mut self) -> Option<&'a str> {
        let name = self.take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':'));
        (!name.is_empty()).then_some(name)
    }

    fn take_key(&mut self) -> Option<&'a str> {
        if !self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '_' | ':'))
        {
            return None;
        }
        Some(self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
    }

    fn take_value(&mut self) -> Option<&'a str> {
        match self.peek()? {
            quote @ ('"' | '\'') => {
                self.bump();
                let value = self.take_while(|c| c != quote);
                self.peek()?;
                self.bump();
                Some(value)
            }
            _ => {
                let value = self.take_while(|c| !is_space(c) && !matches!(c, '"' | '\'' | '=' | '{' | '}'));
                (!value.is_empty()).then_some(value)
            }
        }
    }
}
