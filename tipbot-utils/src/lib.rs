/// Duration expression parser (`2d 3h`, `1Y`, ...).
pub mod duration;
/// Generic embed builders shared across commands.
pub mod embed;
/// Number formatting for heights and coin amounts.
pub mod format;
/// Integer literal conversion and primality helpers.
pub mod numbers;
/// Reaction-driven embed pagination.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
/// Reaction emoji, reaction events and event sources.
pub mod reactions;
/// Script detection for text-to-speech input.
pub mod script;
