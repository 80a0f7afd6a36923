//! Budget command - report the AI context budget for a transcript.

use crate::cli::Output;
use crate::config::Settings;
use crate::context::{format_budget_summary, ContextWindowManager};
use crate::copilot::{build_attachments_text, AgentConfig};
use crate::job::TranscriptionResult;
use anyhow::Result;
use std::path::Path;

/// Run the budget command.
pub fn run_budget(
    input: &str,
    model: Option<String>,
    agent: Option<String>,
    settings: Settings,
) -> Result<()> {
    let content = std::fs::read_to_string(input)?;
    let result: TranscriptionResult = serde_json::from_str(&content)?;
    let transcript = result.text();

    let agent_config = match agent {
        Some(path) => AgentConfig::load(Path::new(&path))?,
        None => AgentConfig::default(),
    };
    let model = model.unwrap_or_else(|| settings.ai.model.clone());
    let attachments_text = build_attachments_text(&agent_config.attachments);

    let manager = ContextWindowManager::new(settings.ai.context_settings());
    let prepared = manager.prepare_action_context(
        &model,
        &agent_config.instructions,
        &transcript,
        &attachments_text,
        None,
    );
    let budget = &prepared.budget;

    Output::header("Context Budget");
    Output::kv("Model", &model);
    Output::kv("Window", &budget.model_context_window.to_string());
    Output::kv("Instructions + attachments", &budget.system_prompt_tokens.to_string());
    Output::kv("Response reserve", &budget.response_reserve_tokens.to_string());
    Output::kv(
        "Transcript",
        &format!(
            "{} of {} tokens (budget {})",
            budget.transcript_fitted_tokens,
            budget.transcript_actual_tokens,
            budget.transcript_budget_tokens
        ),
    );
    Output::kv("Headroom", &budget.headroom_tokens().to_string());

    if let Some(strategy) = budget.strategy_used {
        Output::warning(&format!(
            "Transcript does not fit; fitted with the {} strategy",
            strategy
        ));
    }
    Output::info(&format_budget_summary(budget));

    Ok(())
}
