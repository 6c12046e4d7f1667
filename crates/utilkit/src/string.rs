/// Split text into words at separators and case changes.
///
/// `"fooBar baz-qux"` gives `["foo", "Bar", "baz", "qux"]` and `"XMLHttp"`
/// gives `["XML", "Http"]`.
pub fn words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

pub fn camel_case(text: &str) -> String {
    words(text)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

pub fn kebab_case(text: &str) -> String {
    join_lower(text, "-")
}

pub fn snake_case(text: &str) -> String {
    join_lower(text, "_")
}

fn join_lower(text: &str, sep: &str) -> String {
    words(text)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    const OMISSION: &str = "...";
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(OMISSION.len());
    let mut out: String = text.chars().take(keep).collect();
    out.extend(OMISSION.chars().take(max - keep));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words() {
        assert_eq!(words("fooBar baz-qux"), vec!["foo", "Bar", "baz", "qux"]);
        assert_eq!(words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(words("  __snake_case__ "), vec!["snake", "case"]);
        assert!(words("--").is_empty());
    }

    #[test]
    fn case_conversions() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(camel_case("Foo Bar"), "fooBar");
        assert_eq!(camel_case("--foo-bar--"), "fooBar");
        assert_eq!(kebab_case("fooBar baz"), "foo-bar-baz");
        assert_eq!(snake_case("Foo Bar"), "foo_bar");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("hello", 2), "..");
        assert_eq!(truncate("héllo wörld", 7), "héll...");
    }
}
