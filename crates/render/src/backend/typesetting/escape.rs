/// Escapes text for safe inclusion in a LaTeX document body.
///
/// Handles the ten characters that carry meaning in LaTeX. Everything else,
/// including non-ASCII text, passes through unchanged.
pub fn escape_latex(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '{' | '}' | '$' | '&' | '%' | '#' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
