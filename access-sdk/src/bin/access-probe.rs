//! Access probe
//!
//! Calls one Access endpoint using `ACCESS_*` settings and prints the response.
//!
//! ```text
//! access-probe device   <session>
//! access-probe velocity <session> [username] [password]
//! access-probe decision <session> [username] [password]
//! access-probe trust    <device_id> <uniq> <trusted|banned|not_trusted>
//! access-probe gather   <session> <return_value> <device_id> [uniq]
//! ```

use access_sdk::{AccessClient, ClientConfig, TransportConfig};
use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("ACCESS_LOG_JSON").is_ok() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("usage: access-probe <device|velocity|decision|trust|gather> <args...>");
    };
    let arg = |i: usize| args.get(i).map(String::as_str);

    let config = ClientConfig::from_env().context("failed to load ACCESS_* configuration")?;
    let transport = TransportConfig::from_env().context("failed to load transport configuration")?;
    let client = AccessClient::with_transport_config(config, &transport)?;
    info!("Probing {} as merchant {}", client.config().host, client.merchant_id());

    let required = |i: usize, name: &str| arg(i).with_context(|| format!("missing <{}>", name));

    let result = match command.as_str() {
        "device" => client.get_device(required(1, "session")?, &[]).await,
        "velocity" => {
            client
                .get_velocity(required(1, "session")?, arg(2), arg(3), &[])
                .await
        }
        "decision" => {
            client
                .get_decision(required(1, "session")?, arg(2), arg(3), &[])
                .await
        }
        "trust" => {
            client
                .set_device_trust_by_device(
                    required(1, "device_id")?,
                    required(2, "uniq")?,
                    required(3, "trust_state")?,
                    &[],
                )
                .await
        }
        "gather" => {
            let return_value: i64 = required(2, "return_value")?
                .parse()
                .context("<return_value> must be an integer")?;
            client
                .gather_device_info(
                    required(1, "session")?,
                    None,
                    None,
                    return_value,
                    required(3, "device_id")?,
                    arg(4),
                    &[],
                )
                .await
        }
        other => bail!("unknown command: {}", other),
    };

    match result {
        Ok(Some(document)) => {
            println!("{}", document);
            Ok(())
        }
        Ok(None) => {
            info!("Request accepted (empty response)");
            Ok(())
        }
        Err(e) => {
            error!("ERROR Type: {}", e.kind());
            Err(e.into())
        }
    }
}
