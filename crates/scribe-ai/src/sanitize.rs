//! Sanitization of raw model output.
//!
//! Models wrap completions in markdown code fences despite being told not
//! to, and some chat templates leak instruction delimiters back into the
//! output. Both are stripped; everything else (whitespace included) is
//! preserved byte-for-byte because the result is inserted into source code
//! as-is.

use once_cell::sync::Lazy;
use regex::Regex;

// A fence marker is three backticks plus an optional language annotation
// ("```python"). The newline after the annotation is not part of the marker.
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+.#-]*").expect("valid fence regex"));

// Llama-style instruction/system delimiters: [INST], [/INST], <<SYS>>,
// <</SYS>>, and sentinel tokens <s>, </s>.
static DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[/?INST\]|<</?SYS>>|</?s>").expect("valid delimiter regex"));

/// Strip fence markers and delimiter tokens from `raw`.
///
/// Removals are applied to a fixpoint: deleting a token can juxtapose
/// fragments that themselves form a marker, and the transform must be
/// idempotent so a second pass never changes the result.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let pass = DELIMITER_RE.replace_all(&text, "");
        let pass = FENCE_RE.replace_all(&pass, "");
        if pass == text {
            return text;
        }
        text = pass.into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_with_language_annotation() {
        assert_eq!(
            sanitize("```python\n    return a + b\n```"),
            "\n    return a + b\n"
        );
    }

    #[test]
    fn strips_bare_fences() {
        assert_eq!(sanitize("```\nx = 1\n```"), "\nx = 1\n");
    }

    #[test]
    fn strips_instruction_delimiters() {
        assert_eq!(sanitize("[INST]hello[/INST]"), "hello");
        assert_eq!(sanitize("<<SYS>>rules<</SYS>>"), "rules");
        assert_eq!(sanitize("<s>token</s>"), "token");
    }

    #[test]
    fn preserves_whitespace_exactly() {
        assert_eq!(sanitize("\n    indented\n\n"), "\n    indented\n\n");
        assert_eq!(sanitize("  a  "), "  a  ");
    }

    #[test]
    fn leaves_clean_code_untouched() {
        let code = "fn main() {\n    println!(\"a < b\");\n}\n";
        assert_eq!(sanitize(code), code);
    }

    #[test]
    fn is_idempotent() {
        let cases = [
            "```python\ncode\n```",
            "[INST]x[/INST]",
            "plain text",
            // Removing the delimiter joins the backticks into a fence, which
            // the fixpoint loop must also remove.
            "``[INST]`code",
            "`[/INST]``<s>`rest",
            "``<<SYS>>`python\ncode",
        ];
        for case in cases {
            let once = sanitize(case);
            assert_eq!(sanitize(&once), once, "not idempotent for {case:?}");
        }
    }

    #[test]
    fn single_backticks_survive() {
        assert_eq!(sanitize("use `foo` here"), "use `foo` here");
    }
}
