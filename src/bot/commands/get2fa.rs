use crate::bot::{render, Data};
use tracing::error;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Get the current 2FA code for a secret
#[poise::command(slash_command)]
pub async fn get2fa(
    ctx: Context<'_>,
    #[description = "Base32 secret (e.g. JBSWY3DPEHPK3PXP) or otpauth:// URI"] secret: String,
) -> Result<(), Error> {
    let reply = match ctx.data().service.issue(&secret) {
        Ok(issued) => poise::CreateReply::default()
            .content(render::code_message(&issued, false))
            .components(render::code_buttons(&issued.token)),
        Err(e) => {
            if !e.is_user_error() {
                error!("Could not issue code: {}", e);
            }
            poise::CreateReply::default().content(e.user_message())
        }
    };

    // Secrets and codes are only ever shown to the requesting user
    ctx.send(reply.ephemeral(true)).await?;

    Ok(())
}
