//! Line tokenizer used for both indexing and scoring.
//!
//! A line is lower-cased, every non-alphanumeric character acts as a
//! separator, and empty fragments are dropped. No stemming or Unicode
//! normalization is applied beyond `char::is_alphanumeric`.

/// Lazily yield the lowercase words of `line`.
pub fn tokenize(line: &str) -> Tokens {
    Tokens {
        lowered: line.to_lowercase(),
        offset: 0,
    }
}

/// Iterator returned by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens {
    lowered: String,
    offset: usize,
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = &self.lowered[self.offset..];
        let start = rest.find(char::is_alphanumeric)?;
        let word = &rest[start..];
        let len = word
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(word.len());

        self.offset += start + len;
        Some(word[..len].to_string())
    }
}
