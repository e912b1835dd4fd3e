//! Message text and buttons for code replies.

use poise::serenity_prelude::{self as serenity, ButtonStyle, CreateActionRow, CreateButton};

use crate::otp::IssuedCode;
use crate::store::Token;

const REFRESH_PREFIX: &str = "refresh";
const REMOVE_PREFIX: &str = "expire";

pub const REMOVED_MESSAGE: &str =
    "Ephemeral secret removed. Send it again if you want a new code.";
pub const UNKNOWN_ACTION_MESSAGE: &str = "Unknown action.";

/// What a button press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Refresh,
    Remove,
}

impl ButtonAction {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Refresh => REFRESH_PREFIX,
            Self::Remove => REMOVE_PREFIX,
        }
    }

    pub fn custom_id(&self, token: &Token) -> String {
        format!("{}:{}", self.prefix(), token)
    }

    /// Split a custom id into its action and token.
    ///
    /// The token is `None` when it is malformed; callers treat that the same
    /// as an expired one.
    pub fn parse(custom_id: &str) -> Option<(Self, Option<Token>)> {
        let (prefix, token) = custom_id.split_once(':')?;
        let action = match prefix {
            REFRESH_PREFIX => Self::Refresh,
            REMOVE_PREFIX => Self::Remove,
            _ => return None,
        };
        Some((action, Token::parse(token)))
    }
}

/// Body of a code reply.
pub fn code_message(issued: &IssuedCode, refreshed: bool) -> String {
    let mut text = if refreshed {
        String::from("🔐 **2FA code (refreshed)**\n\n")
    } else {
        String::from("🔐 **2FA code generated!**\n\n")
    };

    if !issued.label.is_empty() {
        text.push_str(
            &serenity::MessageBuilder::new()
                .push_bold_safe(issued.label.as_str())
                .build(),
        );
        text.push('\n');
    }

    text.push_str(&format!(
        "🔐 Code: `{}`\n⏱️ Valid for: **{} seconds**\n\n",
        issued.code.code, issued.code.seconds_remaining
    ));

    if !refreshed {
        text.push_str("💡 Enter this code in the app asking for it.\n\n");
    }

    text.push_str(&format!("📘 Secret key: `{}`", issued.display_secret));
    text
}

/// The Refresh / Remove button row for a token.
pub fn code_buttons(token: &Token) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(ButtonAction::Refresh.custom_id(token))
            .label("🔁 Refresh")
            .style(ButtonStyle::Primary),
        CreateButton::new(ButtonAction::Remove.custom_id(token))
            .label("🗑️ Remove")
            .style(ButtonStyle::Danger),
    ])]
}

pub fn help_message(ttl_secs: u64) -> String {
    format!(
        "Use `/get2fa` to get a code.\n\
        Send a Base32 secret (e.g. `JBSWY3DPEHPK3PXP`) or an `otpauth://` URI.\n\n\
        Secrets are never written to disk. The Refresh button keeps working for \
        {} seconds after you send a secret; Remove forgets it immediately.",
        ttl_secs
    )
}
