/// Liveness probe
#[allow(clippy::unused_async)]
pub(crate) async fn ping() -> &'static str {
    "pong"
}
