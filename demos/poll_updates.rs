use std::io;
use std::time::Duration;

use tgbot::{Bot, BotToken, CallOptions, GetUpdates};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELEGRAM_BOT_TOKEN environment variable is required",
        )
    })?;

    let bot = Bot::builder(BotToken::new(token)?)
        .timeout(Duration::from_secs(40))
        .connect()
        .await?;

    let request = GetUpdates::new().with_limit(10)?.with_timeout(30);
    let updates = bot.poll_updates(request, &CallOptions::default()).await?;
    for update in &updates {
        let text = update.message().and_then(|message| message.text.as_deref());
        println!("update {}: {:?}", update.update_id.0, text);
    }
    println!("next offset: {:?}", bot.next_update_offset());

    Ok(())
}
