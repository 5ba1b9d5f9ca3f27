use crate::ai::{gateway, ExplanationProvider, ImageProvider, SuggestionProvider};
use crate::error::StudyError;
use crate::models::Suggestion;
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

const SYSTEM_PROMPT: &str =
    "You are a patient Japanese tutor helping a beginner study JLPT N5 vocabulary. \
     Be concise, concrete and encouraging.";

/// One OpenRouter-backed implementation of every AI collaborator the study
/// core consumes: explanation, image and suggestion.
#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
}

impl OpenRouterClient {
    /// Reads the API key from the environment, like the `quick` constructor
    /// documents.
    pub fn new() -> Result<Self, StudyError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| StudyError::Collaborator(format!("Failed to create AI client: {}", e)))?;

        Ok(Self { client })
    }

    async fn chat(&self, prompt: &str) -> Result<String, StudyError> {
        let messages = vec![Message::text("system", SYSTEM_PROMPT), Message::text("user", prompt)];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| StudyError::Collaborator(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| StudyError::Collaborator(format!("OpenRouter API error: {}", e)))?;

        if let Some(choice) = response.choices.first() {
            match &choice.message.content {
                openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
                openrouter_api::MessageContent::Parts(parts) => {
                    let text_parts: Vec<String> = parts
                        .iter()
                        .filter_map(|p| {
                            if let openrouter_api::ContentPart::Text(tc) = p {
                                Some(tc.text.clone())
                            } else {
                                None
                            }
                        })
                        .collect();
                    Ok(text_parts.join("\n"))
                }
            }
        } else {
            Err(StudyError::Collaborator(
                "No response choices received".to_string(),
            ))
        }
    }
}

#[async_trait]
impl ExplanationProvider for OpenRouterClient {
    async fn explain(
        &self,
        kanji: &str,
        reading: &str,
        meaning: &str,
    ) -> Result<String, StudyError> {
        let prompt = format!(
            "Explain the N5 vocabulary word \"{}\" ({}), which means \"{}\". \
             Give two example sentences with translations and a note on typical usage.",
            kanji, reading, meaning
        );
        self.chat(&prompt).await
    }
}

#[async_trait]
impl SuggestionProvider for OpenRouterClient {
    async fn suggest(&self, headword: &str) -> Result<Suggestion, StudyError> {
        let prompt = format!(
            r#"Provide the details for the N5 word "{}" and respond ONLY with valid JSON (no markdown, no extra text):
{{
    "reading": "hiragana reading",
    "meaning": "short English meaning",
    "category": "kanji" | "verb" | "general",
    "lesson": integer between 1 and 25, following the Minna no Nihongo ordering
}}"#,
            headword
        );
        let response = self.chat(&prompt).await?;
        gateway::parse_suggestion(&response).map_err(StudyError::Collaborator)
    }
}

#[async_trait]
impl ImageProvider for OpenRouterClient {
    /// Chat-only models cannot render pixels; an image-capable model routed
    /// through OpenRouter returns the illustration as a data URI in the
    /// message text. Anything else counts as "no image".
    async fn illustrate(
        &self,
        kanji: &str,
        meaning: &str,
    ) -> Result<Option<String>, StudyError> {
        let prompt = format!(
            "A clear, simple educational illustration representing the Japanese word \"{}\" \
             which means \"{}\". Respond with the image as a single data URI, or the word none.",
            kanji, meaning
        );
        let response = self.chat(&prompt).await?;
        let trimmed = response.trim();
        if trimmed.starts_with("data:image") {
            Ok(Some(trimmed.to_string()))
        } else {
            Ok(None)
        }
    }
}
