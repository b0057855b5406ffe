use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct EverythingEnvelope {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
pub(crate) struct RawArticle {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub(crate) url_to_image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub(crate) published_at: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
}
