//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting.

use std::time::Duration;

use console::style;
use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use parley_types::chat::Turn;
use parley_types::llm::{MessageRole, StopReason};

const CODE_THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    /// Create a new renderer with an optional accent color.
    pub fn new(accent_color: Option<Color>) -> Self {
        let mut skin = MadSkin::default_dark();

        if let Some(color) = accent_color {
            let tc = Self::crossterm_to_termimad(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }

        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown reply with syntax-highlighted code blocks.
    ///
    /// Code fences are highlighted via syntect; everything else is rendered
    /// through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Print one turn with its speaker label.
    ///
    /// User turns are echoed verbatim; assistant turns go through the
    /// markdown renderer.
    pub fn print_turn(&self, turn: &Turn) {
        match turn.role() {
            MessageRole::User => {
                println!("  {} {}", style("You >").green().bold(), turn.content());
            }
            MessageRole::Assistant => self.print_reply(turn.content()),
            MessageRole::System => {}
        }
    }

    /// Print an assistant reply.
    pub fn print_reply(&self, content: &str) {
        println!();
        println!("  {}", style("Assistant").cyan().bold());
        println!("  {}", self.render_final(content).trim());
    }

    /// Print the stats footer after a reply.
    ///
    /// Format: "| {tokens} tokens . {time}s . {model}"
    pub fn print_stats_footer(&self, tokens: u32, elapsed: Duration, model: &str) {
        let footer = format!(
            "\n  {} {} tokens {} {:.1}s {} {}",
            style("|").dim(),
            style(tokens).dim(),
            style("\u{00b7}").dim(),
            elapsed.as_secs_f64(),
            style("\u{00b7}").dim(),
            style(model).dim(),
        );
        println!("{footer}");
    }

    /// Print a note when the reply did not end naturally.
    pub fn print_stop_notice(&self, stop_reason: StopReason) {
        if let Some(notice) = stop_notice(stop_reason) {
            println!("  {} {}", style("!").yellow().bold(), style(notice).dim());
        }
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }

    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Yellow => termimad::crossterm::style::Color::Yellow,
            Color::Magenta => termimad::crossterm::style::Color::Magenta,
            Color::Blue => termimad::crossterm::style::Color::Blue,
            Color::Red => termimad::crossterm::style::Color::Red,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}

/// Explanation shown under a reply that was cut short.
pub fn stop_notice(stop_reason: StopReason) -> Option<&'static str> {
    match stop_reason {
        StopReason::EndTurn => None,
        StopReason::MaxTokens => {
            Some("Reply truncated at the max_tokens limit; raise max_tokens in config.toml.")
        }
        StopReason::ContentFilter => Some("Reply cut short by the provider's content filter."),
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new(Some(Color::Cyan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_code_text() {
        let renderer = ChatRenderer::default();
        let out = renderer.render_final("Here:\n```rust\nfn main() {}\n```\n");
        assert!(out.contains("--- rust ---"));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_render_unclosed_fence() {
        let renderer = ChatRenderer::new(None);
        let out = renderer.render_final("```\nlet x = 1;");
        assert!(out.contains("let x = 1;"));
    }

    #[test]
    fn test_stop_notice_only_for_cut_replies() {
        assert!(stop_notice(StopReason::EndTurn).is_none());
        assert!(stop_notice(StopReason::MaxTokens).unwrap().contains("max_tokens"));
        assert!(stop_notice(StopReason::ContentFilter).is_some());
    }

    #[test]
    fn test_render_prose() {
        let renderer = ChatRenderer::new(None);
        let out = renderer.render_final("Quantum things are tiny.");
        assert!(out.contains("tiny"));
    }
}
