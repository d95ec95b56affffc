//! Token rewrite passes.
//!
//! Passes run in a fixed order over the whole token stream:
//!
//! 1. merged short flags (`-abc`, `-abcVALUE`)
//! 2. assignment signs (`--name=VALUE`, `--na=VALUE`)
//! 3. concatenated values (`-nVALUE`)
//! 4. abbreviated and ambiguous flags
//! 5. undefined flags
//!
//! Splitting passes only touch [`TokenKind::Undetermined`] tokens and are
//! skipped when no registered flag has the matching capability. Tokens still
//! undetermined afterwards are value candidates for the walk.

use tracing::debug;

use crate::option_set::{OptionSet, PrefixMatch};
use crate::token::{ArgToken, TokenKind};
use crate::types::{ArgOption, Flag};

impl OptionSet {
    pub(crate) fn rewrite(&self, mut tokens: Vec<ArgToken>) -> Vec<ArgToken> {
        if self.has_mergeable_flags() {
            tokens = self.split_merged_flags(tokens);
        }
        if self.has_assign_signs() {
            tokens = split_with(tokens, |text| self.match_assign_sign(text));
        }
        if self.has_concat_assign_flags() {
            tokens = split_with(tokens, |text| self.match_concat_assign(text));
        }
        self.mark_ambiguous_flags(&mut tokens);
        self.mark_undefined_flags(&mut tokens);

        debug!(
            tokens = tokens.len(),
            ambiguous = tokens.iter().filter(|t| t.kind == TokenKind::AmbiguousFlag).count(),
            undefined = tokens.iter().filter(|t| t.kind == TokenKind::UndefinedFlag).count(),
            "Rewrote argument tokens"
        );
        tokens
    }

    fn split_merged_flags(&self, tokens: Vec<ArgToken>) -> Vec<ArgToken> {
        let prefix = self.settings().merge_flag_prefix.as_str();
        let mut output = Vec::with_capacity(tokens.len());

        for token in tokens {
            if !token.is_undetermined()
                || token.text.len() <= prefix.len()
                || !token.text.starts_with(prefix)
            {
                output.push(token);
                continue;
            }

            match self.split_merged(&token.text[prefix.len()..]) {
                Some(split) => output.extend(split),
                None => output.push(token),
            }
        }

        output
    }

    /// Splits the text after the merge prefix into flags.
    ///
    /// Returns `None` if any character before a value is not a mergeable
    /// flag. A value-taking flag whose next character is not itself a
    /// mergeable flag takes the remaining text as its value, minus one
    /// leading assign sign, and splitting stops there.
    fn split_merged(&self, merged: &str) -> Option<Vec<ArgToken>> {
        let mut split = Vec::new();
        let mut chars = merged.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            let (flag, option) = self.mergeable_flag(c)?;
            split.push(ArgToken::new(flag.name.as_str(), TokenKind::Flag));

            if !option.accepts_value {
                continue;
            }
            if let Some(&(next_index, next)) = chars.peek() {
                if self.mergeable_flag(next).is_none() {
                    let rest = &merged[next_index..];
                    let value = flag
                        .assign_signs
                        .iter()
                        .filter(|s| !s.is_empty())
                        .find_map(|s| rest.strip_prefix(s.as_str()))
                        .unwrap_or(rest);
                    split.push(ArgToken::new(value, TokenKind::Value));
                    break;
                }
            }
        }

        Some(split)
    }

    fn mergeable_flag(&self, c: char) -> Option<(&Flag, &ArgOption)> {
        let name = format!("{}{c}", self.settings().merge_flag_prefix);
        self.flag(&name).filter(|(flag, _)| flag.can_merge)
    }

    /// Matches `NAME<sign>VALUE`, or `ABBR<sign>VALUE` where `ABBR`
    /// abbreviates exactly one flag.
    fn match_assign_sign(&self, text: &str) -> Option<(String, String)> {
        for (flag, option) in self.flags_in_order() {
            if !option.accepts_value || !flag.can_follow_assign {
                continue;
            }
            for sign in flag.assign_signs.iter().filter(|s| !s.is_empty()) {
                let exact = text
                    .strip_prefix(flag.name.as_str())
                    .and_then(|rest| rest.strip_prefix(sign.as_str()));
                if let Some(value) = exact {
                    return Some((flag.name.clone(), value.to_string()));
                }

                if let Some(pos) = text.find(sign.as_str()) {
                    let head = &text[..pos];
                    if self.resolve_abbreviation(head) == PrefixMatch::Unique(flag.name.as_str()) {
                        return Some((flag.name.clone(), text[pos + sign.len()..].to_string()));
                    }
                }
            }
        }
        None
    }

    fn match_concat_assign(&self, text: &str) -> Option<(String, String)> {
        self.flags_in_order()
            .filter(|(flag, option)| flag.can_concat_assign && option.accepts_value)
            .find_map(|(flag, _)| {
                text.strip_prefix(flag.name.as_str())
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (flag.name.clone(), rest.to_string()))
            })
    }

    fn mark_ambiguous_flags(&self, tokens: &mut [ArgToken]) {
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].is_undetermined() {
                match self.resolve_abbreviation(&tokens[i].text) {
                    PrefixMatch::Unique(name) => {
                        tokens[i].text = name.to_string();
                        tokens[i].kind = TokenKind::Flag;
                    }
                    PrefixMatch::Ambiguous => {
                        tokens[i].kind = TokenKind::AmbiguousFlag;
                        i = self.mark_flag_values(tokens, i + 1, TokenKind::AmbiguousFlagValue);
                        continue;
                    }
                    PrefixMatch::None if self.has_ambiguous_assign_head(&tokens[i].text) => {
                        tokens[i].kind = TokenKind::AmbiguousFlag;
                        i = self.mark_flag_values(tokens, i + 1, TokenKind::AmbiguousFlagValue);
                        continue;
                    }
                    PrefixMatch::None => {}
                }
            }
            i += 1;
        }
    }

    /// `HEAD<sign>VALUE` where `HEAD` abbreviates more than one flag.
    fn has_ambiguous_assign_head(&self, text: &str) -> bool {
        self.flags_in_order()
            .filter(|(flag, option)| option.accepts_value && flag.can_follow_assign)
            .flat_map(|(flag, _)| flag.assign_signs.iter())
            .filter(|sign| !sign.is_empty())
            .filter_map(|sign| text.find(sign.as_str()))
            .any(|pos| self.resolve_abbreviation(&text[..pos]) == PrefixMatch::Ambiguous)
    }

    fn mark_undefined_flags(&self, tokens: &mut [ArgToken]) {
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].is_undetermined() && self.looks_like_flag(&tokens[i].text) {
                tokens[i].kind = TokenKind::UndefinedFlag;
                i = self.mark_flag_values(tokens, i + 1, TokenKind::UndefinedFlagValue);
                continue;
            }
            i += 1;
        }
    }

    /// Marks the run of undetermined, non-flag-looking tokens starting at
    /// `start`. Returns the index after the run.
    fn mark_flag_values(&self, tokens: &mut [ArgToken], start: usize, kind: TokenKind) -> usize {
        let mut i = start;
        while i < tokens.len() && tokens[i].is_undetermined() && !self.looks_like_flag(&tokens[i].text)
        {
            tokens[i].kind = kind;
            i += 1;
        }
        i
    }
}

fn split_with<F>(tokens: Vec<ArgToken>, mut matcher: F) -> Vec<ArgToken>
where
    F: FnMut(&str) -> Option<(String, String)>,
{
    let mut output = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.is_undetermined() {
            if let Some((flag, value)) = matcher(&token.text) {
                output.push(ArgToken::new(flag, TokenKind::Flag));
                output.push(ArgToken::new(value, TokenKind::Value));
                continue;
            }
        }
        output.push(token);
    }
    output
}
