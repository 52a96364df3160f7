//! Positional message templates
//!
//! Messages carry `{0}`, `{1}`, ... placeholders that are resolved against the
//! entry's arguments at render time. A placeholder whose index has no argument
//! is kept verbatim, braces included.

use super::log_arg::LogArg;

/// Substitute every in-bounds `{N}` placeholder with the argument's display form.
///
/// # Example
///
/// ```
/// use logora::core::template;
/// use logora::LogArg;
///
/// let out = template::format("A:{0} B:{1}", &[LogArg::from("x")]);
/// assert_eq!(out, "A:x B:{1}");
/// ```
#[must_use]
pub fn format(template: &str, args: &[LogArg]) -> String {
    format_with(template, args, |arg| arg.to_string())
}

/// Like [`format`], but lets the caller decide how each argument is rendered
/// (writers use this to color substituted values).
pub fn format_with<F>(template: &str, args: &[LogArg], mut render: F) -> String
where
    F: FnMut(&LogArg) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b'}');

        let arg = if closed {
            after[..digits].parse::<usize>().ok().and_then(|i| args.get(i))
        } else {
            None
        };

        match arg {
            Some(arg) => {
                out.push_str(&render(arg));
                rest = &after[digits + 1..];
            }
            None if closed => {
                // out of range: keep `{N}` as written
                out.push_str(&rest[open..open + digits + 2]);
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<LogArg> {
        values.iter().map(|v| LogArg::from(*v)).collect()
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(
            format("User {0} logged in", &args(&["Alice"])),
            "User Alice logged in"
        );
    }

    #[test]
    fn test_out_of_range_left_verbatim() {
        assert_eq!(format("A:{0} B:{1}", &args(&["x"])), "A:x B:{1}");
        assert_eq!(format("{5}", &[]), "{5}");
    }

    #[test]
    fn test_repeat_and_reorder() {
        assert_eq!(format("{1}-{0}-{1}", &args(&["a", "b"])), "b-a-b");
    }

    #[test]
    fn test_malformed_placeholders() {
        assert_eq!(format("{} {x} {0", &args(&["a"])), "{} {x} {0");
        assert_eq!(format("{{0}}", &args(&["a"])), "{a}");
        assert_eq!(format("trailing {", &[]), "trailing {");
    }

    #[test]
    fn test_non_string_args() {
        let values = vec![LogArg::from(3), LogArg::from(false)];
        assert_eq!(format("{0} retries, ok={1}", &values), "3 retries, ok=false");
    }

    #[test]
    fn test_format_with_wraps_values() {
        let out = format_with("Hello {0}", &args(&["World"]), |a| format!("<{}>", a));
        assert_eq!(out, "Hello <World>");
    }

    #[test]
    fn test_unicode_template() {
        assert_eq!(format("héllo {0} ✓", &args(&["wörld"])), "héllo wörld ✓");
    }
}
