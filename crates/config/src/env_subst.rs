/// Replace `${ENV_VAR}` placeholders in raw config text.
///
/// Unresolvable variables are left as-is, so a literal `${...}` survives into
/// the parsed value and shows up in diagnostics instead of silently vanishing.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

/// Placeholder expansion with a caller-supplied lookup.
pub fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            Some(_) => {
                // `${}`: nothing to resolve.
                out.push_str("${}");
                rest = &after[1..];
            },
            None => {
                // Unterminated, emit literally.
                out.push_str(&rest[start..]);
                rest = "";
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        (name == "HERALD_TOKENS").then(|| "/srv/tokens.txt".to_string())
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_with("tokens_file = \"${HERALD_TOKENS}\"", lookup),
            "tokens_file = \"/srv/tokens.txt\""
        );
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_with("${HERALD_NONEXISTENT_XYZ}", lookup),
            "${HERALD_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(substitute_with("a ${HERALD_TOKENS", lookup), "a ${HERALD_TOKENS");
    }

    #[test]
    fn empty_placeholder_is_literal() {
        assert_eq!(substitute_with("x${}y", lookup), "x${}y");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
