//! Prompt template normalisation.

/// Strip the common leading indentation and surrounding blank lines from a raw
/// template.
///
/// Lines made only of whitespace do not take part in the margin computation
/// and come out empty. The operation is idempotent.
pub fn normalize_template(raw: &str) -> String {
    let margin = raw
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .fold(None, |margin: Option<&str>, indent| match margin {
            None => Some(indent),
            Some(current) => Some(common_prefix(current, indent)),
        })
        .unwrap_or("");

    let dedented: Vec<&str> = raw
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect();

    dedented.join("\n").trim().to_string()
}

fn leading_whitespace(line: &str) -> &str {
    let rest = line.trim_start();
    &line[..line.len() - rest.len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}
