//! Deterministic keyword matcher.
//!
//! Works with no model and no I/O, so it is always available as the fallback. Priority
//! order: any tag contained in the prompt (catalog order, then tag order), then any
//! description word longer than three characters contained in the prompt, then the
//! first catalog entry.

use catalog::{AssetDescriptor, Catalog};

/// Why the keyword matcher picked an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordReason<'a> {
    /// The prompt contains this tag.
    Tag(&'a str),
    /// The prompt contains this (lowercased) description word.
    DescriptionWord(String),
    /// Nothing matched; the first catalog entry is the default.
    Default,
}

/// A keyword decision together with its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    pub asset: &'a AssetDescriptor,
    pub reason: KeywordReason<'a>,
}

/// Pick an entry for `text` by substring containment. Never fails.
pub fn match_by_keyword<'a>(text: &str, catalog: &'a Catalog) -> &'a AssetDescriptor {
    explain_keyword_match(text, catalog).asset
}

/// Same decision as [`match_by_keyword`], plus the tag or word that decided it.
pub fn explain_keyword_match<'a>(text: &str, catalog: &'a Catalog) -> KeywordMatch<'a> {
    let prompt = text.to_lowercase();

    for asset in catalog {
        if let Some(tag) = asset.tags.iter().find(|tag| prompt.contains(tag.as_str())) {
            return KeywordMatch {
                asset,
                reason: KeywordReason::Tag(tag),
            };
        }
    }

    for asset in catalog {
        let description = asset.description.to_lowercase();
        if let Some(word) = description
            .split_whitespace()
            .find(|word| word.chars().count() > 3 && prompt.contains(word))
        {
            return KeywordMatch {
                asset,
                reason: KeywordReason::DescriptionWord(word.to_string()),
            };
        }
    }

    KeywordMatch {
        asset: catalog.first(),
        reason: KeywordReason::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, description: &str, tags: &[&str]) -> AssetDescriptor {
        AssetDescriptor {
            id: id.into(),
            name: id.into(),
            description: description.into(),
            url: format!("https://assets.example/{id}.glb"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn fruit_and_furniture() -> Catalog {
        Catalog::new(vec![
            entry("apple", "A shiny piece of fruit.", &["apple", "fruit"]),
            entry("table", "Sturdy dining furniture.", &["table", "furniture"]),
        ])
        .unwrap()
    }

    #[test]
    fn earlier_catalog_entry_wins_on_tag_hits() {
        let catalog = fruit_and_furniture();
        let hit = explain_keyword_match("a red apple on a table", &catalog);
        assert_eq!(hit.asset.id, "apple");
        assert_eq!(hit.reason, KeywordReason::Tag("apple"));
    }

    #[test]
    fn tag_order_within_entry() {
        let catalog = Catalog::new(vec![entry("lamp", "Light.", &["desk", "lamp"])]).unwrap();
        let hit = explain_keyword_match("lamp on a desk", &catalog);
        assert_eq!(hit.reason, KeywordReason::Tag("desk"));
    }

    #[test]
    fn tags_match_as_substrings_case_insensitively() {
        let catalog = fruit_and_furniture();
        assert_eq!(match_by_keyword("PINEAPPLES!", &catalog).id, "apple");
    }

    #[test]
    fn reference_catalog_prefers_chair_for_table_mentions() {
        // "table" is also a chair tag and the chair comes first.
        let catalog = Catalog::reference();
        assert_eq!(match_by_keyword("a red apple on a table", &catalog).id, "chair");
    }

    #[test]
    fn tag_pass_beats_description_pass() {
        let catalog = Catalog::new(vec![
            entry("first", "Something sturdy.", &["zzz"]),
            entry("second", "Unrelated.", &["sturdy"]),
        ])
        .unwrap();
        // "sturdy" is a description word of `first` but a tag of `second`.
        assert_eq!(match_by_keyword("a sturdy thing", &catalog).id, "second");
    }

    #[test]
    fn description_words_used_when_no_tag_matches() {
        let catalog = Catalog::reference();
        let hit = explain_keyword_match("a classic look", &catalog);
        assert_eq!(hit.asset.id, "chair");
        assert_eq!(hit.reason, KeywordReason::DescriptionWord("classic".into()));
    }

    #[test]
    fn short_description_words_ignored() {
        let catalog = Catalog::new(vec![
            entry("first", "A big box.", &["qqq"]),
            entry("second", "Another item.", &["rrr"]),
        ])
        .unwrap();
        // "big" and "box." are too short / not contained; falls through to default.
        let hit = explain_keyword_match("big", &catalog);
        assert_eq!(hit.reason, KeywordReason::Default);
        assert_eq!(hit.asset.id, "first");
    }

    #[test]
    fn no_overlap_returns_first_entry() {
        let catalog = Catalog::reference();
        let hit = explain_keyword_match("xyzxyz", &catalog);
        assert_eq!(hit.asset.id, "astronaut");
        assert_eq!(hit.reason, KeywordReason::Default);
    }

    #[test]
    fn empty_text_returns_first_entry() {
        let catalog = Catalog::reference();
        assert_eq!(match_by_keyword("", &catalog).id, "astronaut");
    }

    #[test]
    fn deterministic_across_calls() {
        let catalog = Catalog::reference();
        let prompts = ["a desk lamp for studying", "something to sit on", "xyzxyz"];
        for prompt in prompts {
            let first = match_by_keyword(prompt, &catalog).id.clone();
            for _ in 0..10 {
                assert_eq!(match_by_keyword(prompt, &catalog).id, first);
            }
        }
    }

    #[test]
    fn reference_prompts() {
        let catalog = Catalog::reference();
        let cases = [
            ("an astronaut in space", "astronaut"),
            ("a wooden chair next to a desk", "chair"),
            ("a modern vase with flowers", "vase"),
            ("a piece of fruit", "apple"),
            ("lighting for my office", "chair"),
            ("exploring the milky way", "astronaut"),
        ];
        for (prompt, expected) in cases {
            assert_eq!(match_by_keyword(prompt, &catalog).id, expected, "{prompt}");
        }
    }
}
