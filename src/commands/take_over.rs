//! Implementation of the `formlock take-over` command.

use super::{model_key, open_cookie_jar};
use crate::cli::ModelArgs;
use formlock::config::Config;
use formlock::cookies::{TAKEOVER_COOKIE_TTL, TakeoverIntent};
use formlock::error::Result;

/// Record a takeover intent consumed by the next `hold` of this model.
pub fn cmd_take_over(config: &Config, args: ModelArgs) -> Result<()> {
    let model = model_key(&args);
    let mut jar = open_cookie_jar(config)?;

    TakeoverIntent::for_model(&model).record(&mut jar)?;

    println!(
        "Takeover recorded for {}: the next `formlock hold {} {} <id>` within {}s takes over the lock.",
        model,
        args.app,
        args.model,
        TAKEOVER_COOKIE_TTL.as_secs()
    );
    Ok(())
}
