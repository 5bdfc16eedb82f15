use axum::{Json, extract::State};

use crate::{
    pkg::{
        internal::feed::{RoundupPost, roundup_posts},
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RoundupPost>>> {
    let feed = state.feed.fetch().await?;
    let posts: Vec<RoundupPost> = roundup_posts(feed.items, &state.site.roundup_title_filter)
        .iter()
        .map(RoundupPost::from_item)
        .collect();
    tracing::debug!("{} roundup posts", posts.len());
    Ok(Json(posts))
}
