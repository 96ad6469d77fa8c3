use anyhow::Result;
use bitkub_dca::exchange::BitkubClient;
use bitkub_dca::logging::{log, obj, v_str, Domain, Level};
use bitkub_dca::runner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    log(
        Level::Info,
        Domain::System,
        "system.start",
        obj(&[
            ("msg", v_str("starting")),
            ("version", v_str(env!("CARGO_PKG_VERSION"))),
        ]),
    );

    // Any error here exits the process with status 1.
    runner::run(|key| std::env::var(key).ok(), BitkubClient::new).await?;
    Ok(())
}
