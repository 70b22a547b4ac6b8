/// Word-aware line wrapping for text that arrives in pieces.
///
/// Every line starts with `left` spaces and words are kept whole, breaking before a word that
/// would run past `width - left - right` columns. Newlines in the input are kept. A word is
/// only emitted once the whitespace after it (or [`WrapWriter::finish`]) arrives, so output
/// lags the input by at most one word.
#[derive(Debug)]
pub struct WrapWriter {
    left: usize,
    max_line_width: usize,
    position: usize,
    word: String,
    at_line_start: bool,
}

impl WrapWriter {
    pub fn new(width: usize, left: usize, right: usize) -> Self {
        Self {
            left,
            max_line_width: width.saturating_sub(left + right).max(1),
            position: 0,
            word: String::new(),
            at_line_start: true,
        }
    }

    /// Feed a chunk, returning the text that is ready to print
    pub fn push(&mut self, chunk: &str) -> String {
        let mut out = String::new();
        for ch in chunk.chars() {
            if self.at_line_start {
                self.start_line(&mut out);
            }

            match ch {
                '\n' => {
                    out.push_str(&self.word);
                    self.word.clear();
                    out.push('\n');
                    self.at_line_start = true;
                }
                ' ' | '\t' => {
                    self.flush_word(&mut out);
                    out.push(ch);
                    self.position += 1;
                }
                _ => self.word.push(ch),
            }
        }
        out
    }

    /// Emit whatever word is still buffered and reset for the next reply
    pub fn finish(&mut self) -> String {
        let mut out = String::new();
        if !self.word.is_empty() && self.at_line_start {
            self.start_line(&mut out);
        }
        self.flush_word(&mut out);
        self.position = 0;
        self.at_line_start = true;
        out
    }

    fn start_line(&mut self, out: &mut String) {
        out.push_str(&" ".repeat(self.left));
        self.at_line_start = false;
        self.position = 0;
    }

    fn flush_word(&mut self, out: &mut String) {
        if self.word.is_empty() {
            return;
        }
        let length = self.word.chars().count();
        if self.position > 0 && self.position + length > self.max_line_width {
            out.push('\n');
            self.start_line(out);
        }
        out.push_str(&self.word);
        self.position += length;
        self.word.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(writer: &mut WrapWriter, chunks: &[&str]) -> String {
        let mut out: String = chunks.iter().map(|c| writer.push(c)).collect();
        out.push_str(&writer.finish());
        out
    }

    #[test]
    fn test_words_wrap_before_the_right_margin() {
        let mut writer = WrapWriter::new(20, 2, 2);
        assert_eq!(
            wrap(&mut writer, &["hello ", "there ", "friend"]),
            "  hello there \n  friend"
        );
    }

    #[test]
    fn test_newlines_start_padded_lines() {
        let mut writer = WrapWriter::new(80, 2, 2);
        assert_eq!(wrap(&mut writer, &["one\ntwo", "\n\nthree"]), "  one\n  two\n  \n  three");
    }

    #[test]
    fn test_long_word_is_not_preceded_by_a_blank_line() {
        let mut writer = WrapWriter::new(10, 2, 2);
        assert_eq!(wrap(&mut writer, &["abcdefghij ", "k"]), "  abcdefghij \n  k");
    }

    #[test]
    fn test_words_split_across_chunks() {
        let mut writer = WrapWriter::new(80, 0, 0);
        assert_eq!(writer.push("hel"), "");
        assert_eq!(writer.push("lo wor"), "hello ");
        assert_eq!(writer.finish(), "wor");
    }

    #[test]
    fn test_finish_resets_for_the_next_reply() {
        let mut writer = WrapWriter::new(80, 2, 2);
        assert_eq!(wrap(&mut writer, &["first"]), "  first");
        assert_eq!(wrap(&mut writer, &["second"]), "  second");
    }
}
