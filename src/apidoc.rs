use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Relay",
        version = "0.1.0",
        description = "Forwards chat queries to the Softnix GenAI chat-messages API and returns its JSON answer."
    ),
    servers(
        (url = "http://localhost:8000", description = "Local dev")
    ),
    tags(
        (name = "chat", description = "Chat relay endpoint")
    ),
    paths(
        crate::routes::chat::chat,
    ),
    components(
        schemas(
            crate::models::chat::ChatRequest,
            crate::models::common::ErrorMessage
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_the_chat_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/chat"));
    }
}
