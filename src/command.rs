//! Chat command dispatch.
//!
//! Accepts `喜报 内容` / `悲报 内容`, with an optional leading `/`, an
//! optional full-width or ASCII colon after the command word, and the ASCII
//! aliases `xibao` / `beibao`.

use thiserror::Error;

use crate::presets::Preset;

/// Rejections the chat front-end replies with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Text has `limit` characters or more.
    #[error("字数太多啦！长度应在 {limit} 个字符以内。")]
    TooLong { limit: usize },

    /// The message does not start with a known command word.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// A validated render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub preset: Preset,
    pub text: String,
    /// Bypasses size fitting when set
    pub font_size: Option<u32>,
}

impl RenderRequest {
    pub fn new(preset: Preset, text: impl Into<String>) -> Self {
        Self {
            preset,
            text: text.into(),
            font_size: None,
        }
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Parse a raw chat message into a request.
///
/// The text after the command word is trimmed and must be shorter than
/// `max_chars` characters.
pub fn parse_command(message: &str, max_chars: usize) -> Result<RenderRequest, CommandError> {
    let body = message.trim_start();
    let body = body.strip_prefix('/').unwrap_or(body);

    let (preset, rest) = Preset::all()
        .into_iter()
        .find_map(|preset| strip_command_word(body, preset).map(|rest| (preset, rest)))
        .ok_or_else(|| {
            CommandError::UnknownCommand(body.split_whitespace().next().unwrap_or("").to_string())
        })?;

    let rest = rest
        .strip_prefix('：')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    let text = rest.trim();

    if text.chars().count() >= max_chars {
        log::debug!("Rejected {} request of {} chars", preset, text.chars().count());
        return Err(CommandError::TooLong { limit: max_chars });
    }

    Ok(RenderRequest::new(preset, text))
}

/// Text after `preset`'s command word, if `body` starts with it.
///
/// The CJK word may run straight into the text; the ASCII alias must be
/// followed by whitespace, a colon or the end of the message.
fn strip_command_word(body: &str, preset: Preset) -> Option<&str> {
    if let Some(rest) = body.strip_prefix(preset.command_word()) {
        return Some(rest);
    }

    let alias = preset.alias();
    let head = body.get(..alias.len())?;
    if !head.eq_ignore_ascii_case(alias) {
        return None;
    }
    let rest = &body[alias.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || c == ':' || c == '：' => Some(rest),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_word_forms() {
        for message in ["喜报 好消息", "/喜报 好消息", "喜报：好消息", "/喜报:好消息", "喜报好消息"] {
            let request = parse_command(message, 30).unwrap();
            assert_eq!(request, RenderRequest::new(Preset::Celebratory, "好消息"), "{message}");
        }
    }

    #[test]
    fn test_ascii_alias_needs_boundary() {
        assert_eq!(parse_command("beibao exams", 30).unwrap().preset, Preset::Lamenting);
        assert_eq!(parse_command("/XiBao: yay", 30).unwrap().text, "yay");
        assert!(matches!(
            parse_command("xibaoyay", 30),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_length_limit_is_exclusive() {
        let ok = "字".repeat(29);
        assert!(parse_command(&format!("喜报 {ok}"), 30).is_ok());
        let long = "字".repeat(30);
        let err = parse_command(&format!("喜报 {long}"), 30).unwrap_err();
        assert_eq!(err, CommandError::TooLong { limit: 30 });
        assert_eq!(err.to_string(), "字数太多啦！长度应在 30 个字符以内。");
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("/help me", 30),
            Err(CommandError::UnknownCommand("help".to_string()))
        );
    }

    #[test]
    fn test_empty_text_is_allowed() {
        assert_eq!(parse_command("悲报", 30).unwrap().text, "");
    }
}
