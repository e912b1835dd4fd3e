use poise::serenity_prelude::{
    self as serenity, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use tracing::{debug, error};

use super::render::{self, ButtonAction};
use crate::error::AppError;
use crate::otp::OtpService;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Handle a press on one of the Refresh / Remove buttons.
///
/// The original message is edited in place; the secret is never re-sent by
/// the user for a refresh.
pub async fn handle_component(
    ctx: &Context,
    component: &ComponentInteraction,
    service: &OtpService,
) -> Result<(), Error> {
    let reply = match ButtonAction::parse(&component.data.custom_id) {
        Some((ButtonAction::Refresh, token)) => {
            let result = match token {
                Some(token) => service.refresh(&token),
                None => Err(AppError::SessionExpired),
            };
            match result {
                Ok(issued) => CreateInteractionResponseMessage::new()
                    .content(render::code_message(&issued, true))
                    .components(render::code_buttons(&issued.token)),
                Err(e) => {
                    if !e.is_user_error() {
                        error!("Refresh failed: {}", e);
                    }
                    CreateInteractionResponseMessage::new()
                        .content(e.user_message())
                        .components(vec![])
                }
            }
        }
        Some((ButtonAction::Remove, token)) => {
            if let Some(token) = token {
                service.discard(&token);
            }
            CreateInteractionResponseMessage::new()
                .content(render::REMOVED_MESSAGE)
                .components(vec![])
        }
        None => {
            let action = component.data.custom_id.split(':').next().unwrap_or_default();
            debug!(action, "Unknown component interaction");
            CreateInteractionResponseMessage::new()
                .content(render::UNKNOWN_ACTION_MESSAGE)
                .components(vec![])
        }
    };

    component
        .create_response(ctx, CreateInteractionResponse::UpdateMessage(reply))
        .await?;

    Ok(())
}

/// Route interactions that are not slash commands.
pub async fn handle_interaction(
    ctx: &Context,
    interaction: &serenity::Interaction,
    service: &OtpService,
) -> Result<(), Error> {
    if let serenity::Interaction::Component(component) = interaction {
        handle_component(ctx, component, service).await?;
    }
    Ok(())
}
