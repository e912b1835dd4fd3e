pub mod commands;
pub mod handler;
pub mod render;

use crate::error::{AppError, AppResult};
use crate::otp::OtpService;
use poise::serenity_prelude::{self as serenity, FullEvent, GatewayIntents};
use std::sync::Arc;
use tracing::{error, info};

/// Shared data accessible in all commands
#[derive(Debug)]
pub struct Data {
    pub service: Arc<OtpService>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Event handler for Discord events
async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            info!(
                "Bot is ready! Logged in as {}",
                data_about_bot.user.name
            );
        }
        FullEvent::InteractionCreate { interaction } => {
            handler::handle_interaction(ctx, interaction, &data.service).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Create and configure the Discord bot framework
pub fn create_framework(service: Arc<OtpService>, prefix: String) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all_commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {}", error);
                            let _ = ctx.say("An error occurred, please try again.").await;
                        }
                        poise::FrameworkError::Setup { error, .. } => {
                            error!("Setup error: {}", error);
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} slash commands globally", framework.options().commands.len());
                Ok(Data { service })
            })
        })
        .build()
}

/// Gateway intents the bot connects with.
///
/// `MESSAGE_CONTENT` is privileged and must be enabled for the application in
/// the Discord developer portal. It is only needed by the text-prefix `help`
/// alias; slash commands and buttons work without it.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT
}

/// Connect to Discord and run until the gateway shuts down.
pub async fn start_bot(service: Arc<OtpService>, token: &str, prefix: String) -> AppResult<()> {
    if token.is_empty() {
        return Err(AppError::Config(config::ConfigError::NotFound(
            "discord.token".to_string(),
        )));
    }

    let framework = create_framework(service, prefix);

    let mut client = serenity::ClientBuilder::new(token, gateway_intents())
        .framework(framework)
        .await?;

    info!("Starting Discord bot...");
    client.start().await?;

    Ok(())
}
