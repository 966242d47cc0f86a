//! Keyword classifier for chat input.
//!
//! Rules are evaluated in declaration order and the first rule with any
//! keyword contained in the lower-cased input wins. There is no scoring:
//! text that mentions both "sorting" and "complexity" is a sorting question
//! because the sorting rule is declared first.

use crate::phrases::PhraseKey;

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub key: PhraseKey,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Priority-ordered rule table.
pub const RULES: &[Rule] = &[
    Rule { keywords: &["what is dsa", "what's dsa"], key: PhraseKey::WhatIsDsa },
    Rule { keywords: &["help me choose", "which algorithm"], key: PhraseKey::HelpChoose },
    Rule { keywords: &["sorting", "explain sorting"], key: PhraseKey::SortingExplain },
    Rule { keywords: &["complexity", "big o"], key: PhraseKey::Complexity },
    Rule { keywords: &["study tips", "how to study"], key: PhraseKey::StudyTips },
    Rule { keywords: &["interview", "preparation"], key: PhraseKey::Interview },
    Rule { keywords: &["hello", "hi", "hey"], key: PhraseKey::Hello },
    Rule { keywords: &["thank", "thanks"], key: PhraseKey::Thanks },
    Rule { keywords: &["tree", "binary tree"], key: PhraseKey::Trees },
    Rule { keywords: &["graph", "dfs", "bfs"], key: PhraseKey::Graphs },
    Rule { keywords: &["array", "linear search"], key: PhraseKey::Arrays },
];

/// Classify `text` against [`RULES`], falling back to [`PhraseKey::Default`].
pub fn classify(text: &str) -> PhraseKey {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.key)
        .unwrap_or(PhraseKey::Default)
}
