//! Context window management for AI copilot calls.
//!
//! Provides model-aware token budgeting, transcript fitting, and
//! conversation history trimming so prompts never overflow the
//! selected model's context window.
//!
//! Token counts are estimated with a characters-per-token heuristic
//! (default 4 chars/token for English text).

use serde::{Deserialize, Serialize};

/// Default characters-per-token ratio for heuristic estimation.
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Fallback context window when the model is unknown.
const FALLBACK_CONTEXT_WINDOW: usize = 16_000;

/// Minimum tokens to reserve so the model can produce a meaningful answer.
const MIN_RESPONSE_RESERVE: usize = 512;

/// Inserted where the middle of a transcript is elided.
const ELISION_MARKER_PREFIX: &str = "\n\n[... middle of transcript omitted due to length: ";
const ELISION_MARKER_SUFFIX: &str = " tokens elided ...]\n\n";

/// A message in an AI conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Transcript fitting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Keep the first N tokens.
    Truncate,
    /// Keep the last N tokens.
    Tail,
    /// Preserve beginning and end, elide the middle with a marker.
    HeadTail,
    /// Pick automatically based on how badly the transcript overflows.
    #[default]
    Smart,
}

impl std::str::FromStr for FitStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(FitStrategy::Truncate),
            "tail" => Ok(FitStrategy::Tail),
            "head_tail" | "head-tail" => Ok(FitStrategy::HeadTail),
            "smart" => Ok(FitStrategy::Smart),
            _ => Err(format!(
                "Unknown fit strategy: {}. Use truncate, tail, head_tail, or smart.",
                s
            )),
        }
    }
}

impl std::fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitStrategy::Truncate => write!(f, "truncate"),
            FitStrategy::Tail => write!(f, "tail"),
            FitStrategy::HeadTail => write!(f, "head_tail"),
            FitStrategy::Smart => write!(f, "smart"),
        }
    }
}

/// User-configurable knobs for context management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextWindowSettings {
    /// Fitting strategy for overlong transcripts.
    pub strategy: FitStrategy,
    /// Fraction of available context to allocate to the transcript (0.0-1.0).
    pub transcript_budget_pct: f64,
    /// Tokens reserved for the model's response.
    pub response_reserve_tokens: usize,
    /// Maximum conversation turns to keep in history (0 = unlimited).
    pub max_conversation_turns: usize,
    /// In head_tail strategy, fraction of budget for the head portion.
    pub head_tail_ratio: f64,
    /// Characters-per-token ratio for estimation.
    pub chars_per_token: f64,
}

impl Default for ContextWindowSettings {
    fn default() -> Self {
        Self {
            strategy: FitStrategy::Smart,
            transcript_budget_pct: 0.70,
            response_reserve_tokens: 4096,
            max_conversation_turns: 20,
            head_tail_ratio: 0.6,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

/// Token budget allocation for a single AI call. All values in tokens.
#[derive(Debug, Clone)]
pub struct ContextBudget {
    /// Total context window of the selected model.
    pub model_context_window: usize,
    /// Tokens consumed by the system prompt / instructions.
    pub system_prompt_tokens: usize,
    /// Tokens reserved for the model's response.
    pub response_reserve_tokens: usize,
    /// Tokens consumed by prior conversation turns.
    pub conversation_history_tokens: usize,
    /// Tokens available for transcript context.
    pub transcript_budget_tokens: usize,
    /// Estimated tokens in the full, untruncated transcript.
    pub transcript_actual_tokens: usize,
    /// Tokens in the transcript after fitting to the budget.
    pub transcript_fitted_tokens: usize,
    /// Which fitting strategy was applied, or None if the transcript fit.
    pub strategy_used: Option<FitStrategy>,
}

impl ContextBudget {
    /// Whether the transcript was truncated to fit.
    pub fn is_truncated(&self) -> bool {
        self.strategy_used.is_some()
    }

    /// Total tokens consumed (system + history + fitted transcript).
    pub fn total_used_tokens(&self) -> usize {
        self.system_prompt_tokens + self.conversation_history_tokens + self.transcript_fitted_tokens
    }

    /// Percentage of the effective context window used (0-100).
    pub fn utilisation_pct(&self) -> f64 {
        if self.model_context_window == 0 {
            return 0.0;
        }
        let effective = self
            .model_context_window
            .saturating_sub(self.response_reserve_tokens);
        if effective == 0 {
            return 100.0;
        }
        (self.total_used_tokens() as f64 / effective as f64 * 100.0).min(100.0)
    }

    /// Free tokens remaining after all allocations.
    pub fn headroom_tokens(&self) -> usize {
        self.model_context_window
            .saturating_sub(self.response_reserve_tokens)
            .saturating_sub(self.total_used_tokens())
    }
}

/// Result of context preparation, ready to send to an AI provider.
#[derive(Debug, Clone)]
pub struct PreparedContext {
    /// Transcript text fitted to the available budget.
    pub fitted_transcript: String,
    /// Conversation history after trimming.
    pub trimmed_history: Vec<ChatMessage>,
    /// Detailed budget breakdown.
    pub budget: ContextBudget,
}

/// Transcript text after fitting to a token budget.
#[derive(Debug, Clone)]
pub struct FittedTranscript {
    pub text: String,
    /// None when the transcript fit without truncation.
    pub strategy_used: Option<FitStrategy>,
    pub tokens: usize,
}

/// Estimate the number of tokens in `text` using a character ratio.
pub fn estimate_tokens(text: &str, chars_per_token: f64) -> usize {
    if text.is_empty() {
        return 0;
    }
    ((text.chars().count() as f64 / chars_per_token) + 0.5).max(1.0) as usize
}

/// Convert a token count to an approximate character count.
pub fn chars_for_tokens(tokens: usize, chars_per_token: f64) -> usize {
    (tokens as f64 * chars_per_token).max(0.0) as usize
}

/// Return the context window size (in tokens) for a model.
///
/// Heuristic lookup by model family; returns a safe fallback for
/// unknown models (e.g. custom local models).
pub fn model_context_window(model: &str) -> usize {
    let model = model.to_lowercase();
    if model.contains("gpt-4") || model.contains("gpt4") {
        128_000
    } else if model.contains("gpt-3.5") {
        16_385
    } else if model.contains("claude") {
        200_000
    } else if model.contains("gemini") {
        1_048_576
    } else if model.contains("llama") {
        128_000
    } else if model.contains("mistral") {
        32_768
    } else {
        FALLBACK_CONTEXT_WINDOW
    }
}

/// Return the maximum output tokens for a model.
pub fn model_max_output(_model: &str) -> usize {
    4096
}

/// Fit transcript text into a token budget.
pub fn fit_transcript(
    text: &str,
    budget_tokens: usize,
    strategy: FitStrategy,
    head_tail_ratio: f64,
    chars_per_token: f64,
) -> FittedTranscript {
    if text.is_empty() || budget_tokens == 0 {
        return FittedTranscript {
            text: String::new(),
            strategy_used: if text.is_empty() {
                None
            } else {
                Some(FitStrategy::Truncate)
            },
            tokens: 0,
        };
    }

    let actual_tokens = estimate_tokens(text, chars_per_token);
    if actual_tokens <= budget_tokens {
        return FittedTranscript {
            text: text.to_string(),
            strategy_used: None,
            tokens: actual_tokens,
        };
    }

    let effective = match strategy {
        FitStrategy::Smart => {
            let ratio = actual_tokens as f64 / budget_tokens as f64;
            if ratio <= 1.3 {
                // Only slightly over, just trim the end
                FitStrategy::Truncate
            } else {
                // Head + tail preserves both the opening and the close
                FitStrategy::HeadTail
            }
        }
        other => other,
    };

    let max_chars = chars_for_tokens(budget_tokens, chars_per_token);

    match effective {
        FitStrategy::Tail => {
            let fitted = take_suffix(text, max_chars).to_string();
            let tokens = estimate_tokens(&fitted, chars_per_token);
            FittedTranscript {
                text: fitted,
                strategy_used: Some(FitStrategy::Tail),
                tokens,
            }
        }
        FitStrategy::HeadTail => {
            // Reserve room for the elision marker
            let marker_tokens = 30;
            if budget_tokens <= marker_tokens {
                let fitted = take_prefix(text, max_chars).to_string();
                return FittedTranscript {
                    tokens: estimate_tokens(&fitted, chars_per_token),
                    text: fitted,
                    strategy_used: Some(FitStrategy::Truncate),
                };
            }
            let usable = budget_tokens - marker_tokens;
            // Ratios at or above 1.0 give everything to the head
            let head_tokens = ((usable as f64 * head_tail_ratio) as usize).min(usable);
            let tail_tokens = usable - head_tokens;

            let head = take_prefix(text, chars_for_tokens(head_tokens, chars_per_token));
            let tail = take_suffix(text, chars_for_tokens(tail_tokens, chars_per_token));

            let omitted = actual_tokens.saturating_sub(head_tokens + tail_tokens);
            let fitted = format!(
                "{}{}{}{}{}",
                head, ELISION_MARKER_PREFIX, omitted, ELISION_MARKER_SUFFIX, tail
            );
            let tokens = estimate_tokens(&fitted, chars_per_token);
            FittedTranscript {
                text: fitted,
                strategy_used: Some(FitStrategy::HeadTail),
                tokens,
            }
        }
        // Truncate (and Smart, already resolved above)
        _ => {
            let fitted = take_prefix(text, max_chars).to_string();
            let tokens = estimate_tokens(&fitted, chars_per_token);
            FittedTranscript {
                text: fitted,
                strategy_used: Some(FitStrategy::Truncate),
                tokens,
            }
        }
    }
}

/// Trim conversation history to fit within limits.
///
/// Removes the oldest messages first, always preserving the most
/// recent exchange. Limits of 0 mean unlimited.
pub fn trim_conversation_history(
    messages: &[ChatMessage],
    max_turns: usize,
    max_tokens: usize,
    chars_per_token: f64,
) -> Vec<ChatMessage> {
    if messages.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<ChatMessage> = if max_turns > 0 && messages.len() > max_turns {
        messages[messages.len() - max_turns..].to_vec()
    } else {
        messages.to_vec()
    };

    if max_tokens > 0 {
        while result.len() > 2 {
            let total: usize = result
                .iter()
                .map(|m| estimate_tokens(&m.content, chars_per_token))
                .sum();
            if total <= max_tokens {
                break;
            }
            result.remove(0);
        }
    }

    result
}

/// Format a human-readable budget summary for status display,
/// e.g. `"Context: 45K/128K tokens (35%)"`.
pub fn format_budget_summary(budget: &ContextBudget) -> String {
    fn fmt(n: usize) -> String {
        if n >= 1_000_000 {
            format!("{:.1}M", n as f64 / 1_000_000.0)
        } else if n >= 1_000 {
            format!("{:.0}K", n as f64 / 1_000.0)
        } else {
            n.to_string()
        }
    }

    let used = budget.total_used_tokens() + budget.response_reserve_tokens;
    let mut summary = format!(
        "Context: {}/{} tokens ({:.0}%)",
        fmt(used),
        fmt(budget.model_context_window),
        budget.utilisation_pct()
    );
    if let Some(strategy) = budget.strategy_used {
        summary.push_str(&format!(" • transcript {}", strategy));
    }
    summary
}

/// Orchestrates context window budgeting for AI calls.
#[derive(Debug, Clone, Default)]
pub struct ContextWindowManager {
    pub settings: ContextWindowSettings,
}

impl ContextWindowManager {
    pub fn new(settings: ContextWindowSettings) -> Self {
        Self { settings }
    }

    /// Prepare chat context: trim history, then fit the transcript into
    /// what remains of the model's window.
    pub fn prepare_chat_context(
        &self,
        model: &str,
        system_prompt: &str,
        transcript: &str,
        conversation_history: &[ChatMessage],
        response_reserve: Option<usize>,
    ) -> PreparedContext {
        let cpt = self.settings.chars_per_token;

        let context_window = model_context_window(model);
        let reserve = self.resolve_reserve(model, response_reserve);

        let Some(mut available) = context_window.checked_sub(reserve) else {
            tracing::warn!(
                context_window,
                reserve,
                "context window minus response reserve leaves no room"
            );
            return Self::empty_context(context_window, reserve, transcript, cpt);
        };

        let sys_tokens = estimate_tokens(system_prompt, cpt);
        available = available.saturating_sub(sys_tokens);

        let mut history = trim_conversation_history(
            conversation_history,
            self.settings.max_conversation_turns,
            0,
            cpt,
        );
        let mut history_tokens: usize = history
            .iter()
            .map(|m| estimate_tokens(&m.content, cpt))
            .sum();

        // If history alone would crowd out the transcript, trim further
        let max_history_tokens =
            (available as f64 * (1.0 - self.settings.transcript_budget_pct)) as usize;
        if history_tokens > max_history_tokens && max_history_tokens > 0 {
            history = trim_conversation_history(&history, 0, max_history_tokens, cpt);
            history_tokens = history
                .iter()
                .map(|m| estimate_tokens(&m.content, cpt))
                .sum();
        }
        available = available.saturating_sub(history_tokens);

        let transcript_budget = if history.is_empty() {
            available
        } else {
            (available as f64 * self.settings.transcript_budget_pct) as usize
        };

        let transcript_actual = estimate_tokens(transcript, cpt);
        let fitted = fit_transcript(
            transcript,
            transcript_budget,
            self.settings.strategy,
            self.settings.head_tail_ratio,
            cpt,
        );

        let budget = ContextBudget {
            model_context_window: context_window,
            system_prompt_tokens: sys_tokens,
            response_reserve_tokens: reserve,
            conversation_history_tokens: history_tokens,
            transcript_budget_tokens: transcript_budget,
            transcript_actual_tokens: transcript_actual,
            transcript_fitted_tokens: fitted.tokens,
            strategy_used: fitted.strategy_used,
        };

        let strategy_label = fitted
            .strategy_used
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        tracing::info!(
            window = context_window,
            system = sys_tokens,
            history = history_tokens,
            messages = history.len(),
            transcript_fitted = fitted.tokens,
            transcript_actual,
            transcript_budget,
            strategy = %strategy_label,
            reserve,
            utilisation = budget.utilisation_pct(),
            "prepared chat context"
        );

        PreparedContext {
            fitted_transcript: fitted.text,
            trimmed_history: history,
            budget,
        }
    }

    /// Prepare context for a one-shot AI action (no conversation history).
    ///
    /// Attachment text is charged to the fixed overhead before the
    /// transcript budget is computed, so oversized attachments shrink the
    /// transcript share rather than overflowing the window.
    pub fn prepare_action_context(
        &self,
        model: &str,
        instructions: &str,
        transcript: &str,
        attachments_text: &str,
        response_reserve: Option<usize>,
    ) -> PreparedContext {
        let cpt = self.settings.chars_per_token;

        let context_window = model_context_window(model);
        let reserve = self.resolve_reserve(model, response_reserve);

        let framing_overhead = "\n\n--- TRANSCRIPT ---\n\n--- END TRANSCRIPT ---\n\n\
             Please process this transcript according to the instructions above.";
        let instructions_tokens =
            estimate_tokens(instructions, cpt) + estimate_tokens(framing_overhead, cpt);

        let attachment_tokens = if attachments_text.is_empty() {
            0
        } else {
            let framed = format!(
                "\n\n--- ATTACHED DOCUMENTS ---\n{}\n--- END ATTACHED DOCUMENTS ---\n",
                attachments_text
            );
            estimate_tokens(&framed, cpt)
        };

        let fixed_tokens = instructions_tokens + attachment_tokens;
        let transcript_budget = context_window
            .saturating_sub(reserve)
            .saturating_sub(fixed_tokens);

        let transcript_actual = estimate_tokens(transcript, cpt);
        let fitted = fit_transcript(
            transcript,
            transcript_budget,
            self.settings.strategy,
            self.settings.head_tail_ratio,
            cpt,
        );

        let budget = ContextBudget {
            model_context_window: context_window,
            system_prompt_tokens: fixed_tokens,
            response_reserve_tokens: reserve,
            conversation_history_tokens: 0,
            transcript_budget_tokens: transcript_budget,
            transcript_actual_tokens: transcript_actual,
            transcript_fitted_tokens: fitted.tokens,
            strategy_used: fitted.strategy_used,
        };

        tracing::info!(
            window = context_window,
            instructions = instructions_tokens,
            attachments = attachment_tokens,
            transcript_fitted = fitted.tokens,
            transcript_actual,
            transcript_budget,
            reserve,
            utilisation = budget.utilisation_pct(),
            "prepared action context"
        );

        PreparedContext {
            fitted_transcript: fitted.text,
            trimmed_history: Vec::new(),
            budget,
        }
    }

    fn resolve_reserve(&self, model: &str, response_reserve: Option<usize>) -> usize {
        let reserve = response_reserve.unwrap_or(self.settings.response_reserve_tokens);
        reserve.max(MIN_RESPONSE_RESERVE).min(model_max_output(model))
    }

    fn empty_context(
        context_window: usize,
        reserve: usize,
        transcript: &str,
        cpt: f64,
    ) -> PreparedContext {
        PreparedContext {
            fitted_transcript: String::new(),
            trimmed_history: Vec::new(),
            budget: ContextBudget {
                model_context_window: context_window,
                system_prompt_tokens: 0,
                response_reserve_tokens: reserve,
                conversation_history_tokens: 0,
                transcript_budget_tokens: 0,
                transcript_actual_tokens: estimate_tokens(transcript, cpt),
                transcript_fitted_tokens: 0,
                strategy_used: if transcript.is_empty() {
                    None
                } else {
                    Some(FitStrategy::Truncate)
                },
            },
        }
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
fn take_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Last `max_chars` characters of `text`, on a char boundary.
fn take_suffix(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    let len = text.chars().count();
    if len <= max_chars {
        return text;
    }
    match text.char_indices().nth(len - max_chars) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("", 4.0), 0);
        assert_eq!(estimate_tokens("abcd", 4.0), 1);
        assert_eq!(estimate_tokens(&"a".repeat(400), 4.0), 100);
    }

    #[test]
    fn test_model_context_window_families() {
        assert_eq!(model_context_window("gpt-4o"), 128_000);
        assert_eq!(model_context_window("claude-sonnet"), 200_000);
        assert_eq!(model_context_window("gemini-1.5-pro"), 1_048_576);
        assert_eq!(model_context_window("totally-custom"), 16_000);
    }

    #[test]
    fn test_fit_strategy_parse() {
        assert_eq!("smart".parse::<FitStrategy>().unwrap(), FitStrategy::Smart);
        assert_eq!(
            "head_tail".parse::<FitStrategy>().unwrap(),
            FitStrategy::HeadTail
        );
        assert!("bogus".parse::<FitStrategy>().is_err());
    }

    #[test]
    fn test_fit_transcript_no_truncation_when_it_fits() {
        let text = "short transcript";
        let fitted = fit_transcript(text, 1000, FitStrategy::Smart, 0.6, 4.0);
        assert_eq!(fitted.text, text);
        assert!(fitted.strategy_used.is_none());
    }

    #[test]
    fn test_fit_transcript_truncate_keeps_head() {
        let text = format!("HEAD{}TAIL", "x".repeat(4000));
        let fitted = fit_transcript(&text, 100, FitStrategy::Truncate, 0.6, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::Truncate));
        assert!(fitted.text.starts_with("HEAD"));
        assert!(!fitted.text.ends_with("TAIL"));
        assert_eq!(fitted.text.chars().count(), 400);
    }

    #[test]
    fn test_fit_transcript_tail_keeps_end() {
        let text = format!("HEAD{}TAIL", "x".repeat(4000));
        let fitted = fit_transcript(&text, 100, FitStrategy::Tail, 0.6, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::Tail));
        assert!(fitted.text.ends_with("TAIL"));
        assert!(!fitted.text.starts_with("HEAD"));
    }

    #[test]
    fn test_fit_transcript_head_tail_inserts_marker() {
        let text = format!("BEGIN{}FINISH", "y".repeat(10_000));
        let fitted = fit_transcript(&text, 200, FitStrategy::HeadTail, 0.6, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::HeadTail));
        assert!(fitted.text.starts_with("BEGIN"));
        assert!(fitted.text.ends_with("FINISH"));
        assert!(fitted.text.contains("tokens elided"));
    }

    #[test]
    fn test_fit_transcript_head_tail_ratio_above_one() {
        // A misconfigured ratio >= 1.0 gives the whole usable budget to
        // the head instead of underflowing the tail allocation.
        let text = format!("BEGIN{}FINISH", "z".repeat(4000));
        let fitted = fit_transcript(&text, 100, FitStrategy::HeadTail, 1.2, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::HeadTail));
        assert!(fitted.text.starts_with("BEGIN"));
        assert!(fitted.text.ends_with(ELISION_MARKER_SUFFIX));
        assert!(fitted.tokens <= 100);
    }

    #[test]
    fn test_smart_picks_truncate_for_small_overflow() {
        // 120 tokens into a 100-token budget: ratio 1.2 <= 1.3
        let text = "z".repeat(480);
        let fitted = fit_transcript(&text, 100, FitStrategy::Smart, 0.6, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::Truncate));
    }

    #[test]
    fn test_smart_picks_head_tail_for_large_overflow() {
        let text = "z".repeat(4000);
        let fitted = fit_transcript(&text, 100, FitStrategy::Smart, 0.6, 4.0);
        assert_eq!(fitted.strategy_used, Some(FitStrategy::HeadTail));
    }

    #[test]
    fn test_fit_respects_char_boundaries() {
        let text = "å".repeat(1000);
        let fitted = fit_transcript(&text, 50, FitStrategy::HeadTail, 0.6, 4.0);
        // Would panic on a byte-slicing implementation
        assert!(!fitted.text.is_empty());
    }

    #[test]
    fn test_trim_history_by_turns() {
        let messages: Vec<ChatMessage> = (0..30)
            .map(|i| ChatMessage::new("user", format!("message {}", i)))
            .collect();
        let trimmed = trim_conversation_history(&messages, 20, 0, 4.0);
        assert_eq!(trimmed.len(), 20);
        assert_eq!(trimmed[0].content, "message 10");
        assert_eq!(trimmed.last().unwrap().content, "message 29");
    }

    #[test]
    fn test_trim_history_by_tokens_keeps_last_exchange() {
        let messages: Vec<ChatMessage> = (0..10)
            .map(|i| ChatMessage::new("user", format!("{}{}", i, "w".repeat(400))))
            .collect();
        let trimmed = trim_conversation_history(&messages, 0, 50, 4.0);
        assert!(trimmed.len() >= 2);
        assert_eq!(trimmed.last().unwrap().content, messages[9].content);
    }

    #[test]
    fn test_prepare_chat_context_small_input() {
        let mgr = ContextWindowManager::default();
        let prepared = mgr.prepare_chat_context(
            "gpt-4o",
            "You are a helpful assistant.",
            "A short transcript.",
            &[],
            None,
        );
        assert_eq!(prepared.fitted_transcript, "A short transcript.");
        assert!(!prepared.budget.is_truncated());
        assert!(prepared.budget.headroom_tokens() > 0);
    }

    #[test]
    fn test_prepare_action_context_attachments_shrink_budget() {
        let mgr = ContextWindowManager::default();
        let transcript = "t".repeat(100);

        let without = mgr.prepare_action_context("gpt-3.5-turbo", "Summarize.", &transcript, "", None);
        let attachments = "a".repeat(20_000);
        let with =
            mgr.prepare_action_context("gpt-3.5-turbo", "Summarize.", &transcript, &attachments, None);

        assert!(with.budget.transcript_budget_tokens < without.budget.transcript_budget_tokens);
        assert!(with.budget.system_prompt_tokens > without.budget.system_prompt_tokens);
    }

    #[test]
    fn test_prepare_action_context_truncates_overlong_transcript() {
        let mgr = ContextWindowManager::default();
        // ~50k tokens into gpt-3.5's 16k window
        let transcript = "t".repeat(200_000);
        let prepared = mgr.prepare_action_context("gpt-3.5-turbo", "Summarize.", &transcript, "", None);
        assert!(prepared.budget.is_truncated());
        assert!(
            prepared.budget.transcript_fitted_tokens <= prepared.budget.transcript_budget_tokens
        );
    }

    #[test]
    fn test_budget_summary_format() {
        let budget = ContextBudget {
            model_context_window: 128_000,
            system_prompt_tokens: 1000,
            response_reserve_tokens: 4096,
            conversation_history_tokens: 0,
            transcript_budget_tokens: 50_000,
            transcript_actual_tokens: 40_000,
            transcript_fitted_tokens: 40_000,
            strategy_used: None,
        };
        let summary = format_budget_summary(&budget);
        assert!(summary.starts_with("Context: 45K/128K tokens"));
        assert!(!summary.contains("transcript"));
    }

    #[test]
    fn test_budget_summary_mentions_truncation() {
        let budget = ContextBudget {
            model_context_window: 16_000,
            system_prompt_tokens: 100,
            response_reserve_tokens: 512,
            conversation_history_tokens: 0,
            transcript_budget_tokens: 10_000,
            transcript_actual_tokens: 50_000,
            transcript_fitted_tokens: 10_000,
            strategy_used: Some(FitStrategy::HeadTail),
        };
        let summary = format_budget_summary(&budget);
        assert!(summary.contains(" • transcript head_tail"));
    }
}
