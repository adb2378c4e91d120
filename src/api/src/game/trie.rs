use std::{fs, path::Path, str::Chars};

use anyhow::{Context, Result};

#[derive(Debug, PartialEq, Clone)]
pub struct Trie {
    // Use Vec instead of HashMap for small branching factors (memory efficient)
    // Most nodes will have only a few children, so linear search is faster and uses less memory
    next: Vec<(char, Box<Trie>)>,
    finish: bool,
}

impl Trie {
    fn new() -> Self {
        Trie {
            next: Vec::new(),
            finish: false,
        }
    }

    /// Loads a newline-separated word list. Words are upper-cased; lines
    /// holding anything but ASCII letters are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        Ok(Trie::from(text))
    }

    fn insert(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return;
        }
        self.insert_chars(&mut word.to_ascii_uppercase().chars());
    }

    fn insert_chars(&mut self, word: &mut Chars) {
        match word.next() {
            None => self.finish = true,
            Some(c) => {
                // Find existing entry or create new one
                if let Some(pos) = self.next.iter().position(|(ch, _)| *ch == c) {
                    self.next[pos].1.insert_chars(word);
                } else {
                    let mut trie = Trie::new();
                    trie.insert_chars(word);
                    self.next.push((c, Box::new(trie)));
                }
            }
        }
    }

    fn isearch(&self, word: &mut Chars) -> bool {
        match word.next() {
            Some(c) => {
                // Linear search for small branching factors
                if let Some((_, child)) = self.next.iter().find(|(ch, _)| *ch == c) {
                    child.isearch(word)
                } else {
                    false
                }
            }
            None => self.finish,
        }
    }

    pub fn search(&self, word: &str) -> bool {
        !word.is_empty() && self.isearch(&mut word.to_ascii_uppercase().chars())
    }

    fn imatching(&self, pattern: &[Option<char>], prefix: &mut String, found: &mut Vec<String>) {
        match pattern.split_first() {
            None => {
                if self.finish {
                    found.push(prefix.clone());
                }
            }
            Some((Some(c), rest)) => {
                let c = c.to_ascii_uppercase();
                if let Some((_, child)) = self.next.iter().find(|(ch, _)| *ch == c) {
                    prefix.push(c);
                    child.imatching(rest, prefix, found);
                    prefix.pop();
                }
            }
            Some((None, rest)) => {
                for (c, child) in &self.next {
                    prefix.push(*c);
                    child.imatching(rest, prefix, found);
                    prefix.pop();
                }
            }
        }
    }

    /// Every word of exactly `pattern.len()` letters that has the fixed
    /// letters of `pattern` in place; `None` slots match any letter.
    /// Results are sorted.
    pub fn matching(&self, pattern: &[Option<char>]) -> Vec<String> {
        let mut found = Vec::new();
        if !pattern.is_empty() {
            self.imatching(pattern, &mut String::with_capacity(pattern.len()), &mut found);
        }
        found.sort();
        found
    }

    pub fn word_count(&self) -> usize {
        let below: usize = self.next.iter().map(|(_, child)| child.word_count()).sum();
        below + usize::from(self.finish)
    }
}

impl From<Vec<&str>> for Trie {
    fn from(words: Vec<&str>) -> Self {
        let mut result = Trie::new();
        for word in words {
            result.insert(word)
        }

        result
    }
}

impl From<Vec<String>> for Trie {
    fn from(words: Vec<String>) -> Self {
        let mut result = Trie::new();
        for word in words {
            result.insert(&word)
        }

        result
    }
}

impl From<String> for Trie {
    fn from(text: String) -> Self {
        let mut result = Trie::new();
        for word in text.lines() {
            result.insert(word);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_wordlist;

    #[test]
    fn test_search() {
        let t = Trie::from(vec!["apple", "banana"]);
        assert!(t.search("APPLE"));
        assert!(t.search("banana"));
        assert!(!t.search("testingtesting"));
        assert!(!t.search(""));

        let t2 = Trie::from(vec!["apple", "app", "application", "applause", "happy"]);
        assert!(!t2.search("abdsas"));
        assert!(!t2.search("appl"));
        assert!(t2.search("happy"));
    }

    #[test]
    fn test_skips_non_letter_lines() {
        let t = Trie::from("cat\n  dog  \nrock'n'roll\n\nx-ray\n123".to_string());
        assert!(t.search("CAT"));
        assert!(t.search("DOG"));
        assert!(!t.search("ROCK'N'ROLL"));
        assert_eq!(t.word_count(), 2);
    }

    #[test]
    fn test_matching_single_wildcard() {
        let t = Trie::from(vec!["cat", "cot", "cut", "cart", "coat", "dot"]);
        let pattern = [Some('C'), None, Some('T')];
        assert_eq!(t.matching(&pattern), vec!["CAT", "COT", "CUT"]);
    }

    #[test]
    fn test_matching_is_exact_length() {
        let t = Trie::from(vec!["at", "bat", "cat", "cart", "bats"]);
        let pattern = [None, Some('A'), None];
        assert_eq!(t.matching(&pattern), vec!["BAT", "CAT"]);
    }

    #[test]
    fn test_matching_fixed_letters_only() {
        let t = Trie::from(vec!["cat", "dog"]);
        assert_eq!(t.matching(&[Some('d'), Some('o'), Some('g')]), vec!["DOG"]);
        assert!(t.matching(&[Some('D'), Some('O')]).is_empty());
        assert!(t.matching(&[]).is_empty());
    }

    #[test]
    fn test_from_file() {
        let file = create_test_wordlist();
        let t = Trie::from_file(file.path()).unwrap();
        assert!(t.search("CAT"));
        assert!(t.search("cats"));
        assert!(!t.search("XQZ"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Trie::from_file("/definitely/not/a/wordlist").unwrap_err();
        assert!(err.to_string().contains("failed to read word list"));
    }

    #[test]
    fn test_from_vec_string() {
        let words = vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()];
        let t = Trie::from(words);

        assert!(t.search("apple"));
        assert!(t.search("cherry"));
        assert!(!t.search("grape"));
        assert_eq!(t.word_count(), 3);
    }
}
