//! Google Slides REST client.
//!
//! Only the handful of endpoints the calendar needs: reading the deck
//! structure, creating slides from a layout and applying batch updates.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::calendar::requests::{Request, create_slide, emu_to_points};
use crate::calendar::{LayoutSelector, SlideService};
use crate::core::AppConfig;
use crate::google::oauth::refresh_access_token;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub presentation_id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub slides: Vec<Page>,
    #[serde(default)]
    pub masters: Vec<Page>,
    #[serde(default)]
    pub layouts: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
    pub layout_properties: Option<LayoutProperties>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    pub master_object_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,
    pub size: Option<ElementSize>,
    pub transform: Option<Transform>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSize {
    pub width: Option<Magnitude>,
    pub height: Option<Magnitude>,
}

/// A dimension as returned by the API. Zero magnitudes are omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Magnitude {
    #[serde(default)]
    pub magnitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    #[serde(default)]
    pub translate_x: f64,
    #[serde(default)]
    pub translate_y: f64,
}

/// Where an element sits on its page, in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSummary {
    pub object_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&PageElement> for ElementSummary {
    fn from(element: &PageElement) -> Self {
        let transform = element.transform.as_ref();
        let scale_x = transform.and_then(|t| t.scale_x).unwrap_or(1.0);
        let scale_y = transform.and_then(|t| t.scale_y).unwrap_or(1.0);
        let size = element.size.as_ref();
        let width = size
            .and_then(|s| s.width.as_ref())
            .map_or(0.0, |w| w.magnitude);
        let height = size
            .and_then(|s| s.height.as_ref())
            .map_or(0.0, |h| h.magnitude);

        ElementSummary {
            object_id: element.object_id.clone(),
            x: emu_to_points(transform.map_or(0.0, |t| t.translate_x)),
            y: emu_to_points(transform.map_or(0.0, |t| t.translate_y)),
            width: emu_to_points(width * scale_x),
            height: emu_to_points(height * scale_y),
        }
    }
}

/// Find the layout a selector refers to.
///
/// An index counts the layouts of the last master in deck order. A name
/// matches either the layout's name or its display name.
pub fn find_layout<'a>(presentation: &'a Presentation, selector: &LayoutSelector) -> Result<&'a Page> {
    let found = match selector {
        LayoutSelector::Index(index) => {
            let master = presentation
                .masters
                .last()
                .ok_or_else(|| anyhow!("Presentation has no masters"))?;
            presentation
                .layouts
                .iter()
                .filter(|layout| {
                    layout
                        .layout_properties
                        .as_ref()
                        .and_then(|p| p.master_object_id.as_deref())
                        == Some(master.object_id.as_str())
                })
                .nth(*index)
        }
        LayoutSelector::Name(name) => presentation.layouts.iter().find(|layout| {
            layout.layout_properties.as_ref().is_some_and(|p| {
                p.name.as_deref() == Some(name.as_str())
                    || p.display_name.as_deref() == Some(name.as_str())
            })
        }),
    };
    found.ok_or_else(|| anyhow!("No {} in presentation {}", selector, presentation.presentation_id))
}

#[derive(Debug, Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [Request],
}

pub struct GoogleSlides {
    client: Client,
    api_url: String,
    presentation_id: String,
    access_token: String,
}

impl GoogleSlides {
    pub fn new(api_url: &str, presentation_id: &str, access_token: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            presentation_id: presentation_id.to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Mint an access token from the configured refresh token and point
    /// the client at the configured deck.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let presentation_id = config.presentation_id()?;
        let credentials = config.google_credentials()?;
        let token = refresh_access_token(
            &config.oauth_token_url,
            &credentials.client_id,
            &credentials.client_secret,
            &credentials.refresh_token,
        )
        .await
        .context("Could not refresh the Google access token")?;
        Ok(Self::new(
            &config.slides_api_url,
            presentation_id,
            &token.access_token,
        ))
    }

    fn presentation_url(&self) -> String {
        format!(
            "{}/v1/presentations/{}",
            self.api_url,
            urlencoding::encode(&self.presentation_id)
        )
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str, what: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("{} fetch failed: {} ({})", what, status, text);
        }
        let parsed: T = serde_json::from_str(&text)?;
        Ok(parsed)
    }

    pub async fn presentation(&self) -> Result<Presentation> {
        self.get(&self.presentation_url(), "Presentation").await
    }

    pub async fn page(&self, page_id: &str) -> Result<Page> {
        let url = format!(
            "{}/pages/{}",
            self.presentation_url(),
            urlencoding::encode(page_id)
        );
        self.get(&url, "Page").await
    }

    async fn batch_update(&self, requests: &[Request]) -> Result<BatchUpdateResponse> {
        let url = format!("{}:batchUpdate", self.presentation_url());
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&BatchUpdateBody { requests })
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Batch update failed: {} ({})", status, text);
        }
        let response: BatchUpdateResponse = serde_json::from_str(&text)?;
        Ok(response)
    }
}

#[async_trait]
impl SlideService for GoogleSlides {
    async fn resolve_layout(&self, layout: &LayoutSelector) -> Result<String> {
        let presentation = self.presentation().await?;
        let page = find_layout(&presentation, layout)?;
        Ok(page.object_id.clone())
    }

    async fn new_page(&self, layout_id: &str) -> Result<String> {
        let page_id = Uuid::new_v4().to_string();
        let response = self
            .batch_update(&[create_slide(&page_id, layout_id)])
            .await?;
        response
            .replies
            .first()
            .and_then(|reply| reply.pointer("/createSlide/objectId"))
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| anyhow!("createSlide reply is missing the new object id"))
    }

    async fn submit_batch(&self, requests: &[Request]) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }
        self.batch_update(requests).await?;
        Ok(())
    }
}
