//! Word wrapping for message lines.
//!
//! A message renders as one logical line which may be wider than the
//! terminal. [`wrap_line`] yields the physical lines lazily: the longest
//! prefix that fits the width, cut at the last whitespace before the limit
//! when there is one, hard-cut otherwise. The iterator is restartable
//! (plain `&str` slicing, no allocation) and measures display width per
//! code point, so multi-byte characters are never split.

use unicode_width::UnicodeWidthChar;

/// Iterator over the physical lines of one logical line.
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    rest: &'a str,
    width: usize,
}

/// Wrap `line` to `width` columns. `width` is clamped to at least 1.
pub fn wrap_line(line: &str, width: usize) -> WrapLines<'_> {
    WrapLines { rest: line, width: width.max(1) }
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut used = 0usize;
        // Byte index where the last whitespace run before the limit starts.
        let mut last_ws: Option<usize> = None;

        for (idx, ch) in self.rest.char_indices() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > self.width {
                // Over the limit at `idx`: prefer the last whitespace cut,
                // fall back to a hard cut. A first character wider than the
                // whole viewport is still consumed so we always progress.
                let cut = match last_ws {
                    Some(ws) if ws > 0 => ws,
                    _ if idx > 0 => idx,
                    _ => ch.len_utf8(),
                };
                let (line, rest) = self.rest.split_at(cut);
                self.rest = rest.trim_start();
                return Some(line);
            }
            if ch.is_whitespace() {
                last_ws = Some(idx);
            }
            used += ch_width;
        }

        // Whole remainder fits.
        let line = self.rest;
        self.rest = "";
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    fn wrapped(line: &str, width: usize) -> Vec<&str> {
        wrap_line(line, width).collect()
    }

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(wrapped("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn test_breaks_on_whitespace() {
        assert_eq!(
            wrapped("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_hard_cut_for_long_word() {
        assert_eq!(wrapped("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_long_word_after_short_word() {
        // Cut at the whitespace first, then hard-cut the long word.
        assert_eq!(wrapped("ok abcdefghij", 5), vec!["ok", "abcde", "fghij"]);
    }

    #[test]
    fn test_empty_line_yields_nothing() {
        assert_eq!(wrapped("", 10), Vec::<&str>::new());
    }

    #[test]
    fn test_width_one_terminates() {
        let lines = wrapped("ab cd", 1);
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_multibyte_never_split() {
        // Cyrillic: 2 bytes per char, display width 1.
        let lines = wrapped("привет мир", 6);
        assert_eq!(lines, vec!["привет", "мир"]);
        for l in wrapped("привет", 4) {
            assert!(l.is_char_boundary(0) && !l.is_empty());
        }
    }

    #[test]
    fn test_wide_chars_counted_by_display_width() {
        // CJK chars are 2 columns wide: only two fit in width 5.
        assert_eq!(wrapped("日本語的字", 5), vec!["日本", "語的", "字"]);
    }

    #[test]
    fn test_oversized_char_still_progresses() {
        // A double-width char in a width-1 viewport must still be consumed.
        let lines = wrapped("日本", 1);
        assert_eq!(lines, vec!["日", "本"]);
    }

    #[test]
    fn test_no_line_exceeds_width_and_words_survive() {
        let input = "lorem ipsum dolorsitametconsectetur adipiscing elit sed do";
        for width in 3..30 {
            let lines: Vec<&str> = wrap_line(input, width).collect();
            for line in &lines {
                assert!(line.width() <= width, "{line:?} wider than {width}");
            }
            // Rejoining on single spaces reconstructs the original words.
            let rejoined = lines.join(" ");
            let words_in: Vec<&str> = input.split_whitespace().collect();
            let words_out: Vec<String> =
                rejoined.split_whitespace().map(str::to_string).collect();
            assert_eq!(words_out.concat(), words_in.concat());
        }
    }

    #[test]
    fn test_restartable() {
        let wrapper = wrap_line("one two three", 5);
        let a: Vec<&str> = wrapper.clone().collect();
        let b: Vec<&str> = wrapper.collect();
        assert_eq!(a, b);
    }
}
