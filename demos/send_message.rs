use std::io;

use tgbot::{Bot, ChatId, SendMessage, SendOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELEGRAM_BOT_TOKEN environment variable is required",
        )
    })?;
    let chat_id = std::env::var("TELEGRAM_CHAT_ID")
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "TELEGRAM_CHAT_ID environment variable is required",
            )
        })?
        .parse::<i64>()?;
    let text = std::env::var("TELEGRAM_TEXT")
        .unwrap_or_else(|_| "Hello from the tgbot demo.".to_owned());

    let bot = Bot::new(token).await?;
    let request = SendMessage::new(ChatId(chat_id), text, SendOptions::default())?;

    let message = bot.send_message(request).await?;
    println!(
        "message_id: {}, date: {}, entities: {}",
        message.message_id.0,
        message.date.0,
        message.entities().len()
    );

    Ok(())
}
