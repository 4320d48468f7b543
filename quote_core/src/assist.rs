//! # AI Assist Contract
//!
//! Request/response types for the external AI endpoint that can read a
//! furniture photo or sketch and suggest dimensions or a cost analysis.
//! This module only fixes the wire contract - the HTTP call itself lives
//! in the front-end, and nothing here performs I/O.
//!
//! The assistant is advisory: a [`DimensionGuess`] may pre-fill the
//! dimension fields, and a [`CostAnalysis`] may be shown next to the
//! estimate, but the engine's own arithmetic is always authoritative for
//! the numbers the customer gets.
//!
//! ## Request shapes
//!
//! The endpoint accepts three JSON shapes:
//!
//! ```json
//! { "prompt": "Ước tính chi phí tủ bếp...", "image": { "mimeType": "image/jpeg", "data": "..." } }
//! { "chatHistory": [{ "role": "user", "text": "..." }], "newChatMessage": "..." }
//! { "image": { "mimeType": "image/png", "data": "..." }, "analyzeDimensions": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::session::EstimateSession;

/// An inline image payload (base64-encoded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// One turn of an assist chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A request to the assist endpoint. Serializes to one of the three
/// accepted JSON shapes; see the module docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssistRequest {
    /// Extract product dimensions from a photo/sketch
    #[serde(rename_all = "camelCase")]
    AnalyzeDimensions {
        image: ImageData,
        analyze_dimensions: bool,
    },
    /// Continue a chat about the current estimate
    #[serde(rename_all = "camelCase")]
    Chat {
        chat_history: Vec<ChatMessage>,
        new_chat_message: String,
    },
    /// One-shot prompt, optionally with an image
    Prompt {
        prompt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<ImageData>,
    },
}

impl AssistRequest {
    /// Dimension-analysis request for an uploaded image
    pub fn analyze_dimensions(image: ImageData) -> Self {
        AssistRequest::AnalyzeDimensions {
            image,
            analyze_dimensions: true,
        }
    }
}

/// Dimensions the assistant read off an image, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionGuess {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl DimensionGuess {
    /// Pre-fill a session's dimension fields from this guess. The user
    /// can still type over any of them afterwards.
    pub fn apply_to(&self, session: &mut EstimateSession) {
        session.set_dimensions(self.length, self.width, self.height);
    }
}

/// One advisory cost item suggested by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryCost {
    pub item: String,
    pub cost: f64,
    pub reason: String,
}

/// A structured cost analysis returned by the assistant. Informational
/// only - never merged into the engine's own breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    #[serde(default)]
    pub cost_breakdown: Vec<AdvisoryCost>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Free-text description of a suggested sheet cutting layout
    #[serde(default)]
    pub cutting_layout: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn png() -> ImageData {
        ImageData {
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        }
    }

    #[test]
    fn test_analyze_request_shape() {
        let request = AssistRequest::analyze_dimensions(png());
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"analyzeDimensions\":true"));
        assert!(json.contains("\"mimeType\":\"image/png\""));
    }

    #[test]
    fn test_chat_request_shape() {
        let request = AssistRequest::Chat {
            chat_history: vec![ChatMessage {
                role: ChatRole::User,
                text: "Tủ này bao nhiêu tiền?".to_string(),
            }],
            new_chat_message: "Còn màu trắng thì sao?".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"chatHistory\""));
        assert!(json.contains("\"newChatMessage\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_prompt_without_image_omits_field() {
        let request = AssistRequest::Prompt {
            prompt: "Gợi ý vật liệu".to_string(),
            image: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_request_roundtrip() {
        let request = AssistRequest::analyze_dimensions(png());
        let json = serde_json::to_string(&request).unwrap();
        let back: AssistRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }

    #[test]
    fn test_dimension_guess_prefills_session() {
        let mut session = EstimateSession::new(Catalog::new());
        let guess: DimensionGuess =
            serde_json::from_str(r#"{ "length": 1200, "width": 550, "height": 2100 }"#).unwrap();
        guess.apply_to(&mut session);
        assert_eq!(session.length_mm, 1200.0);
        assert_eq!(session.width_mm, 550.0);
        assert_eq!(session.height_mm, 2100.0);
    }

    #[test]
    fn test_cost_analysis_tolerates_partial_payload() {
        let analysis: CostAnalysis = serde_json::from_str(r#"{ "suggestions": ["Dùng MDF chống ẩm"] }"#).unwrap();
        assert!(analysis.cost_breakdown.is_empty());
        assert_eq!(analysis.suggestions.len(), 1);
        assert!(analysis.cutting_layout.is_none());
    }
}
