use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Inbound body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[schema(example = "Which books about Rust are available?")]
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    Blocking,
}

/// Body the upstream chat-messages endpoint expects. Only `query` varies per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamRequestBody {
    pub query: String,
    pub inputs: Map<String, Value>,
    pub citation: bool,
    pub response_mode: ResponseMode,
}

impl From<&ChatRequest> for UpstreamRequestBody {
    fn from(req: &ChatRequest) -> Self {
        Self {
            query: req.query.clone(),
            inputs: Map::new(),
            citation: true,
            response_mode: ResponseMode::Blocking,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn upstream_body_has_fixed_shape() {
        let body = UpstreamRequestBody::from(&ChatRequest {
            query: "hello".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "query": "hello",
                "inputs": {},
                "citation": true,
                "response_mode": "blocking"
            })
        );
    }

    #[test]
    fn chat_request_requires_query() {
        assert!(serde_json::from_value::<ChatRequest>(json!({})).is_err());
        assert!(serde_json::from_value::<ChatRequest>(json!({ "query": 42 })).is_err());

        // Empty text is accepted as-is.
        let req: ChatRequest = serde_json::from_value(json!({ "query": "" })).unwrap();
        assert_eq!(req.query, "");
    }
}
