use super::board::Position;
use super::placement::PlayedWord;
use super::trie::Trie;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlankResolution {
    Unique(String),
    /// More than one word fits; a person has to pick one.
    Multiple(Vec<String>),
    Unmatched,
}

/// Looks up every dictionary word that fits the letters of `word`, treating
/// its unresolved blanks as wildcards.
pub fn resolve(dictionary: &Trie, word: &PlayedWord) -> BlankResolution {
    let mut candidates = dictionary.matching(&word.pattern());
    match candidates.len() {
        0 => BlankResolution::Unmatched,
        1 => BlankResolution::Unique(candidates.remove(0)),
        _ => BlankResolution::Multiple(candidates),
    }
}

/// Letters `chosen` gives to the unresolved blanks of `word`.
pub fn assignments(word: &PlayedWord, chosen: &str) -> Vec<(Position, char)> {
    let letters: Vec<char> = chosen.chars().collect();
    word.unresolved_blanks()
        .filter_map(|(index, position)| {
            letters
                .get(index)
                .map(|letter| (position, letter.to_ascii_uppercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Board;
    use crate::game::directions::Axis;
    use crate::game::placement::extract;
    use crate::test_utils::grid_with;

    fn main_word(letters: &str) -> PlayedWord {
        let proposed = grid_with(&[(7, 7, Axis::Horizontal, letters)]);
        extract(&Board::new(), &proposed).unwrap().main_word
    }

    #[test]
    fn test_multiple_candidates_sorted() {
        let dictionary = Trie::from(vec!["cot", "cat", "cart"]);
        assert_eq!(
            resolve(&dictionary, &main_word("C_T")),
            BlankResolution::Multiple(vec!["CAT".to_string(), "COT".to_string()])
        );
    }

    #[test]
    fn test_unique_candidate() {
        let dictionary = Trie::from(vec!["cat", "dog"]);
        assert_eq!(
            resolve(&dictionary, &main_word("C_T")),
            BlankResolution::Unique("CAT".to_string())
        );
    }

    #[test]
    fn test_unmatched() {
        let dictionary = Trie::from(vec!["cat", "dog"]);
        assert_eq!(resolve(&dictionary, &main_word("Q_Z")), BlankResolution::Unmatched);
    }

    #[test]
    fn test_two_blanks_in_one_word() {
        let dictionary = Trie::from(vec!["bat", "cat", "bag", "at"]);
        let word = main_word("_A_");
        assert_eq!(
            resolve(&dictionary, &word),
            BlankResolution::Multiple(vec!["BAG".into(), "BAT".into(), "CAT".into()])
        );
        assert_eq!(
            assignments(&word, "cat"),
            vec![(Position::new(7, 7), 'C'), (Position::new(7, 9), 'T')]
        );
    }

    #[test]
    fn test_assignments_only_cover_blanks() {
        let word = main_word("C_T");
        assert_eq!(assignments(&word, "COT"), vec![(Position::new(7, 8), 'O')]);
        assert!(assignments(&main_word("CAT"), "CAT").is_empty());
    }
}
