//! Argument tokens and the tokenizer.
//!
//! Tokenizing classifies only what is certain from a single argument: group
//! separators, rest signs, rest-mode arguments and exact flag names.
//! Everything else stays [`TokenKind::Undetermined`] until the rewrite passes
//! in [`crate::rewrite`] look at it in context.

use crate::option_set::OptionSet;

/// Classification of one argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Not classified yet.
    Undetermined,
    /// A registered flag name.
    Flag,
    /// A value split off a flag argument.
    Value,
    /// Positional rest.
    Rest,
    /// A rest sign such as `--`.
    RestSign,
    /// A group separator such as `,,`.
    GroupSeparator,
    /// Prefix of two or more flags.
    AmbiguousFlag,
    /// Argument following an ambiguous flag.
    AmbiguousFlagValue,
    /// Looks like a flag but is not registered.
    UndefinedFlag,
    /// Argument following an undefined flag.
    UndefinedFlagValue,
}

/// One classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgToken {
    /// Argument text; rewrite passes may replace it with a full flag name.
    pub text: String,
    /// Current classification.
    pub kind: TokenKind,
}

impl ArgToken {
    pub(crate) fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub(crate) fn is_undetermined(&self) -> bool {
        self.kind == TokenKind::Undetermined
    }
}

impl OptionSet {
    /// Classifies raw arguments into tokens in a single pass.
    pub(crate) fn tokenize<S: AsRef<str>>(&self, args: &[S]) -> Vec<ArgToken> {
        let settings = self.settings();
        let mut tokens = Vec::with_capacity(args.len());
        let mut rest_mode = false;

        for arg in args {
            let arg = arg.as_ref();
            let kind = if settings.group_separators.iter().any(|s| s == arg) {
                rest_mode = false;
                TokenKind::GroupSeparator
            } else if rest_mode {
                TokenKind::Rest
            } else if settings.rest_signs.iter().any(|s| s == arg) {
                rest_mode = true;
                TokenKind::RestSign
            } else if self.is_flag(arg) {
                TokenKind::Flag
            } else {
                TokenKind::Undetermined
            };
            tokens.push(ArgToken::new(arg, kind));
        }

        tokens
    }
}

/// Splits a token stream on group separators.
///
/// Always returns at least one group; separators are dropped.
pub(crate) fn split_groups(tokens: Vec<ArgToken>) -> Vec<Vec<ArgToken>> {
    let mut groups = vec![Vec::new()];
    for token in tokens {
        if token.kind == TokenKind::GroupSeparator {
            groups.push(Vec::new());
        } else if let Some(group) = groups.last_mut() {
            group.push(token);
        }
    }
    groups
}
