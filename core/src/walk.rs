//! Reduction of a rewritten token group into option values.
//!
//! The walk is a single left-to-right pass. A flag token consumes the value
//! candidates that directly follow it (`Value` tokens and still-undetermined
//! tokens) and the index always advances past everything it consumed.

use std::collections::BTreeMap;

use crate::option_set::OptionSet;
use crate::token::{ArgToken, TokenKind};
use crate::types::ArgOption;

/// Values and diagnostics collected from one token group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Reduced {
    pub values: BTreeMap<String, Vec<String>>,
    pub rests: Vec<String>,
    pub ambiguous: Vec<String>,
    pub undefined: Vec<String>,
}

impl OptionSet {
    pub(crate) fn walk(&self, tokens: &[ArgToken]) -> Reduced {
        let mut reduced = Reduced::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            match token.kind {
                TokenKind::RestSign
                | TokenKind::GroupSeparator
                | TokenKind::AmbiguousFlagValue
                | TokenKind::UndefinedFlagValue => {}
                TokenKind::Rest | TokenKind::Undetermined | TokenKind::Value => {
                    reduced.rests.push(token.text.clone());
                }
                TokenKind::AmbiguousFlag => reduced.ambiguous.push(token.text.clone()),
                TokenKind::UndefinedFlag => reduced.undefined.push(token.text.clone()),
                TokenKind::Flag => match self.option_by_flag(&token.text) {
                    Some(option) => i += bind(option, &tokens[i..], &mut reduced.values),
                    None => reduced.rests.push(token.text.clone()),
                },
            }
        }

        reduced
    }
}

fn is_value_candidate(token: &&ArgToken) -> bool {
    matches!(token.kind, TokenKind::Value | TokenKind::Undetermined)
}

/// Records one occurrence of `option`. Returns how many of the `following`
/// tokens were consumed as values.
fn bind(option: &ArgOption, following: &[ArgToken], values: &mut BTreeMap<String, Vec<String>>) -> usize {
    if !option.accepts_value {
        values.entry(option.key.clone()).or_default();
        return 0;
    }

    if !option.multi_value {
        return match following.first().filter(is_value_candidate) {
            Some(token) => {
                let recorded = values.get(&option.key).is_some_and(|v| !v.is_empty());
                if !recorded || option.override_previous {
                    values.insert(option.key.clone(), vec![token.text.clone()]);
                }
                1
            }
            None => {
                values.entry(option.key.clone()).or_default();
                0
            }
        };
    }

    let consumed: Vec<&ArgToken> = following.iter().take_while(is_value_candidate).collect();
    let entry = values.entry(option.key.clone()).or_default();
    if option.override_previous && !consumed.is_empty() {
        entry.clear();
    }

    for token in &consumed {
        for value in split_value(option, &token.text) {
            if option.unique_values && entry.iter().any(|v| v == value) {
                continue;
            }
            entry.push(value.to_string());
        }
    }

    consumed.len()
}

fn split_value<'a>(option: &ArgOption, text: &'a str) -> Vec<&'a str> {
    if option.delimiters.is_empty() {
        return vec![text];
    }
    text.split(|c: char| option.is_delimiter(c))
        .filter(|piece| !piece.is_empty())
        .collect()
}
