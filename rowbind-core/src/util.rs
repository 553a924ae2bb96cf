use std::borrow::Cow;

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut first = true;
    for v in values {
        if !first {
            out.push_str(separator);
        }
        first = false;
        f(out, v);
    }
}

/// Shortens long SQL text for logs and error messages.
pub fn truncate_long(query: &str) -> Cow<'_, str> {
    const LIMIT: usize = 497;
    if query.len() <= LIMIT {
        return Cow::Borrowed(query.trim_end());
    }
    let mut end = LIMIT;
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", query[..end].trim_end()))
}

#[cfg(test)]
mod tests {
    use super::{separated_by, truncate_long};

    #[test]
    fn separated() {
        let mut out = String::from("(");
        separated_by(&mut out, ["a", "b", "c"], |out, v| out.push_str(v), ", ");
        out.push(')');
        assert_eq!(out, "(a, b, c)");
        let mut out = String::new();
        separated_by(&mut out, Vec::<&str>::new(), |out, v| out.push_str(v), ", ");
        assert!(out.is_empty());
    }

    #[test]
    fn truncate() {
        let short = "SELECT 1";
        assert_eq!(truncate_long(short), "SELECT 1");
        let long = "x".repeat(600);
        let printed = truncate_long(&long);
        assert_eq!(printed.len(), 500);
        assert!(printed.ends_with("..."));
    }
}
