use serde_json::Value;

use crate::catalog::{Category, MediaType};
use crate::cli::guard::require_user;
use crate::cli::utils::{output_items, output_record};
use crate::cli::view::{results, RowSource, ViewMode, HOME_ROWS};
use crate::cli::Context;

/// Every home row in order. A row that fails to load is shown empty.
pub async fn home(ctx: &Context) -> anyhow::Result<()> {
    require_user(&ctx.session)?;
    let client = ctx.client()?;

    for row in HOME_ROWS.iter() {
        let items: anyhow::Result<Vec<Value>> = match row.source {
            RowSource::MyList => client.watchlist().await,
            RowSource::Catalog(category) => client
                .movies(category.key(), 1)
                .await
                .map(|payload| results(&payload)),
        };

        let items = items.unwrap_or_else(|e| {
            tracing::warn!("Row '{}' failed to load: {}", row.title, e);
            Vec::new()
        });
        output_items(&ctx.output, row.title, &items)?;
    }

    Ok(())
}

pub async fn browse(ctx: &Context, category: &str, page: u32) -> anyhow::Result<()> {
    require_user(&ctx.session)?;

    let category = Category::from_key(category);
    let payload = ctx.client()?.movies(category.key(), page).await?;
    output_items(&ctx.output, category.key(), &results(&payload))
}

pub async fn search(ctx: &Context, query: &str, page: u32) -> anyhow::Result<()> {
    require_user(&ctx.session)?;

    match ViewMode::from_query(query) {
        ViewMode::Rows => home(ctx).await,
        ViewMode::Search(query) => {
            let payload = ctx.client()?.search(&query, page).await?;
            output_items(
                &ctx.output,
                &format!("Results for \"{}\"", query),
                &results(&payload),
            )
        }
    }
}

pub async fn details(ctx: &Context, media_type: &str, id: u64) -> anyhow::Result<()> {
    require_user(&ctx.session)?;

    let media_type = MediaType::normalize(media_type);
    let record = ctx.client()?.details(media_type.as_str(), id).await?;
    output_record(&ctx.output, &record)
}
