use std::time::Instant;

use tracing::{info, warn};

use crate::{
    AppState,
    models::chat::{ChatRequest, UpstreamRequestBody},
    services::upstream::{UpstreamError, UpstreamReply, send_chat},
};

/// Forwards one query upstream and hands back whatever it answered.
pub async fn relay(state: &AppState, req: &ChatRequest) -> Result<UpstreamReply, UpstreamError> {
    let body = UpstreamRequestBody::from(req);
    let started = Instant::now();

    let reply = send_chat(&state.http, &state.cfg, &body)
        .await
        .inspect_err(|err| {
            warn!(
                "Upstream call failed after {:?}: {}",
                started.elapsed(),
                err
            )
        })?;

    info!(
        "Relayed chat query (upstream status={} elapsed={:?})",
        reply.status,
        started.elapsed()
    );
    Ok(reply)
}
