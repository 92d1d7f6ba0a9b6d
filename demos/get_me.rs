use std::io;

use tgbot::Bot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELEGRAM_BOT_TOKEN environment variable is required",
        )
    })?;

    let bot = Bot::new(token).await?;
    let me = bot.me();
    println!(
        "id: {}, username: {:?}, can_join_groups: {}, supports_inline_queries: {}",
        me.id.0, me.username, me.can_join_groups, me.supports_inline_queries
    );

    Ok(())
}
