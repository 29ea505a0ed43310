//! Name normalisation shared by species and move lookups

/// Status prefixes stripped from the front of a label (first match only)
const STATUS_PREFIXES: &[&str] = &["apex shadow ", "shadow ", "purified ", "mega ", "apex "];

/// Parenthesised descriptors that say nothing about the species form
const IGNORED_FORM_TOKENS: &[&str] = &[
    "preferred", "form", "forme", "forms", "raid", "build", "team", "lucky", "hundo", "l40",
    "lvl40", "level40", "xl", "shadow", "mega", "purified", "best", "buddy",
];

/// Normalise a display label into a lookup slug.
///
/// `"Shadow Tyranitar (Raid Build)"` and `"tyranitar"` both become
/// `"tyranitar"`, while `"Darmanitan (Galarian Standard)"` keeps its form as
/// `"darmanitan-galarian-standard"`. Returns an empty string when nothing
/// meaningful remains.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('\u{2019}', "'");
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut cleaned = collapsed.as_str();
    for prefix in STATUS_PREFIXES {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest;
            break;
        }
    }

    // Pull parenthesised groups out of the base text
    let mut base = String::with_capacity(cleaned.len());
    let mut form_tokens: Vec<String> = Vec::new();
    let mut group: Option<String> = None;
    for ch in cleaned.chars() {
        if ch == ')' && group.is_some() {
            let inner = group.take().unwrap_or_default().replace('\'', "");
            form_tokens.extend(
                alphanumeric_tokens(&inner)
                    .filter(|t| !IGNORED_FORM_TOKENS.contains(&t.as_str())),
            );
        } else if let Some(inner) = group.as_mut() {
            inner.push(ch);
        } else if ch == '(' {
            group = Some(String::new());
        } else {
            base.push(ch);
        }
    }
    // An unclosed group is treated as plain text
    if let Some(inner) = group {
        base.push('(');
        base.push_str(&inner);
    }

    let base = base.split('#').next().unwrap_or("").replace('\'', "");
    let mut parts: Vec<String> = alphanumeric_tokens(&base).collect();
    parts.extend(form_tokens);
    parts.join("-")
}

fn alphanumeric_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
