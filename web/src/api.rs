use gloo::net::http::Request;
use pairmatch_protocol::{self as protocol, LeaderboardEntry, LeaderboardError};

fn network(err: gloo::net::Error) -> LeaderboardError {
    LeaderboardError::Network(err.to_string())
}

/// Current leaders, in the order the server keeps them.
pub(crate) async fn fetch_leaders() -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    let response = Request::get(protocol::LEADERS_URL)
        .send()
        .await
        .map_err(network)?;
    if !response.ok() {
        return Err(LeaderboardError::Rejected(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let body = response.text().await.map_err(network)?;
    protocol::parse_leaders(&body)
}

/// Posts `entry` once, there is no retry.
pub(crate) async fn add_leader(
    entry: &LeaderboardEntry,
) -> Result<LeaderboardEntry, LeaderboardError> {
    let body =
        serde_json::to_string(entry).map_err(|err| LeaderboardError::Decode(err.to_string()))?;
    log::debug!("submitting leader: {}", body);

    let response = Request::post(protocol::ADD_LEADER_URL)
        .body(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    let text = response.text().await.map_err(network)?;

    protocol::parse_submit_response(response.ok(), &text, entry)
}
