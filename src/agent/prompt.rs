//! System prompt assembly
//!
//! Every call combines the agent's persona with the shared response
//! guidelines, plus a block of live GitHub activity when the user asked
//! about project progress.

use crate::agent::conversation::{latest_user_message, transcript, Message};
use crate::providers::GenerationRequest;

/// Formatting rules shared by every agent
pub const RESPONSE_GUIDELINES: &str = "Response Guidelines:
1. Keep responses brief and direct - users prefer short answers
2. Focus on explaining what makes this project unique and valuable
3. If users want more details, they'll ask follow-up questions
4. If users have questions about staking, NFTs, or the overall platform, direct them to speak with Wooly
5. End each response with a clear call to action:
   - Fork and build: \"Ready to build? Fork our code and mint a builder NFT\"
   - Stake: \"Support this project by staking MON tokens\"";

/// Builds the system prompt for one call
///
/// # Examples
///
/// ```
/// use agentswarm::agent::prompt::{system_prompt, RESPONSE_GUIDELINES};
///
/// let prompt = system_prompt("You are Wooly.", None);
/// assert!(prompt.starts_with("You are Wooly."));
/// assert!(prompt.ends_with(RESPONSE_GUIDELINES));
/// ```
pub fn system_prompt(persona: &str, github_activity: Option<&str>) -> String {
    let mut prompt = persona.trim().to_string();

    if let Some(activity) = github_activity.filter(|a| !a.trim().is_empty()) {
        prompt.push_str("\n\nCurrent GitHub Activity:\n");
        prompt.push_str(activity.trim_end());
        prompt.push_str(
            "\n\nIncorporate this GitHub data naturally in your response if the user is asking about project progress or activity.",
        );
    }

    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_GUIDELINES);
    prompt
}

/// Renders a conversation into a provider-neutral request
pub fn build_request(
    agent_name: &str,
    persona: &str,
    messages: &[Message],
    github_activity: Option<&str>,
) -> GenerationRequest {
    GenerationRequest {
        agent_name: agent_name.to_string(),
        system_prompt: system_prompt(persona, github_activity),
        transcript: transcript(messages),
        latest_user_message: latest_user_message(messages).to_string(),
    }
}
