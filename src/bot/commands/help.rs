use crate::bot::{render, Data};

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// How to use OTPBridge
#[poise::command(slash_command, prefix_command, aliases("start"))]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let ttl_secs = ctx.data().service.store().ttl().num_seconds().max(0) as u64;
    ctx.say(render::help_message(ttl_secs)).await?;
    Ok(())
}
