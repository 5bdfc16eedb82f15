use crate::{
    conf::settings,
    pkg::internal::feed::{FeedSource, Rss2JsonClient, RoundupPost, roundup_posts},
    prelude::Result,
};

pub async fn print() -> Result<()> {
    let client = Rss2JsonClient::new(&settings.feed_url)?;
    let feed = client.fetch().await?;
    let posts: Vec<RoundupPost> = roundup_posts(feed.items, &settings.roundup_title_filter)
        .iter()
        .map(RoundupPost::from_item)
        .collect();
    tracing::debug!("{} roundup posts", posts.len());
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}
