use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};

use crate::{
    plan::{Outbound, Plan},
    HandlerResult,
};

fn keyboard(message: &Outbound) -> Option<InlineKeyboardMarkup> {
    if message.choices.is_empty() && message.links.is_empty() {
        return None;
    }
    // One button per row; labels are often whole sentences.
    let rows = message
        .choices
        .iter()
        .map(|c| vec![InlineKeyboardButton::callback(c.label.clone(), c.value.clone())])
        .chain(
            message
                .links
                .iter()
                .map(|l| vec![InlineKeyboardButton::url(l.label.clone(), l.url.clone())]),
        )
        .collect::<Vec<_>>();
    Some(InlineKeyboardMarkup::new(rows))
}

/// Sends the plan in order. The first failed send aborts the rest.
pub async fn deliver(bot: &Bot, chat_id: ChatId, plan: Plan) -> HandlerResult {
    if plan.is_empty() {
        log::debug!("nothing to send to chat {}", chat_id.0);
        return Ok(());
    }
    for message in plan.messages {
        let markup = keyboard(&message);
        match message.photo {
            Some(url) => {
                let mut request = bot
                    .send_photo(chat_id, InputFile::url(url))
                    .caption(message.text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await?;
            }
            None => {
                let mut request = bot.send_message(chat_id, message.text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await?;
            }
        }
    }
    Ok(())
}
