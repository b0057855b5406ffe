use crate::{
    core::{Article, CfClient, CfError, client::RetryConfig, conversions::parse_rfc3339, net},
    news::wire::{EverythingEnvelope, RawArticle},
};

pub(super) async fn fetch_everything(
    client: &CfClient,
    query: &str,
    page_size: u32,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Article>, CfError> {
    let mut url = client.base_news().join("v2/everything")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("pageSize", &page_size.to_string());

    // The key travels as a header so it never shows up in URLs we log or report.
    let mut req = client.http().get(url.clone());
    if let Some(key) = client.news_api_key() {
        req = req.header("X-Api-Key", key);
    }

    let resp = client.send_with_retry(req, retry_override).await?;
    let status = resp.status();
    let body = net::get_text(resp, "news_everything", query, "json").await?;

    // NewsAPI reports errors as `{"status":"error",...}` with a 4xx status.
    let parsed = serde_json::from_str::<EverythingEnvelope>(&body);
    if let Ok(envelope) = &parsed
        && envelope.status.as_deref() == Some("error")
    {
        return Err(CfError::Api {
            code: envelope.code.clone().unwrap_or_else(|| "unknown".into()),
            message: envelope.message.clone().unwrap_or_default(),
        });
    }
    if !status.is_success() {
        return Err(CfError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let envelope = parsed?;

    let total = envelope.articles.len();
    let articles: Vec<Article> = envelope.articles.into_iter().filter_map(map_article).collect();
    if articles.len() < total {
        tracing::debug!(
            dropped = total - articles.len(),
            "news: dropped articles without a parseable publishedAt"
        );
    }

    Ok(articles)
}

/// Without a publish instant an article has no identity, so it is dropped here.
/// Missing title or content is kept as empty text and rejected later by the pipeline.
fn map_article(raw: RawArticle) -> Option<Article> {
    let published_at = parse_rfc3339(raw.published_at.as_deref()?)?;
    Some(Article {
        title: raw.title.unwrap_or_default(),
        image_url: raw.url_to_image.filter(|u| !u.is_empty()),
        published_at,
        content: raw.content.unwrap_or_default(),
    })
}
