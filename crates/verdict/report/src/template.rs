//! Positional `{i}` message formatting.

use std::fmt;

/// Replace each `{i}` placeholder with the display form of `args[i]`.
///
/// Total over any input: a placeholder without a matching argument, a
/// non-numeric brace group, or an unterminated `{` passes through verbatim.
pub(crate) fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close) if close > 0 && tail[..close].bytes().all(|b| b.is_ascii_digit()) => {
                let index = tail[..close].parse::<usize>().unwrap_or(usize::MAX);
                match args.get(index) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&tail[..close]);
                        out.push('}');
                    }
                }
                rest = &tail[close + 1..];
            }
            _ => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
