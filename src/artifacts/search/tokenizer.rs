/// Split a raw query into tokens
///
/// Tokens are separated by ASCII whitespace outside double quotes. Quotes are
/// stripped but do not end a token, so `author:"Jane Doe"` yields the single
/// token `author:Jane Doe`. An unterminated quote runs to the end of the input.
/// Empty tokens are dropped; order is preserved.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in raw.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
