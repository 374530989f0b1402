//! Per client rate limiting for credential endpoints.

use std::sync::Arc;

use salvo::{http::header::RETRY_AFTER, prelude::*};
use tracing::{error, warn};

use scoutline_app::domain::rate_limits::RateLimitError;

use crate::state::State;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let key = client_key(req);

    if let Err(RateLimitError::Exceeded { retry_after }) = state.app.rate_limiter.check(&key).await
    {
        let retry_after = retry_after.as_secs();

        warn!(key, retry_after, "rate limit exceeded");

        if let Err(source) = res.add_header(RETRY_AFTER, retry_after.to_string(), true) {
            error!("failed to set retry-after header: {source}");
        }

        res.render(StatusError::too_many_requests().brief("Too many requests, try again later"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// `{ip}:{path}`; the port is dropped so reconnecting does not reset the budget.
fn client_key(req: &Request) -> String {
    let addr = req.remote_addr();

    let ip = addr
        .as_ipv4()
        .map(|addr| addr.ip().to_string())
        .or_else(|| addr.as_ipv6().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| addr.to_string());

    format!("{ip}:{}", req.uri().path())
}
