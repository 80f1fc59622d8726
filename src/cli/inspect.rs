use anyhow::{Result, anyhow};

use crate::core::AppConfig;
use crate::google::GoogleSlides;
use crate::google::slides::ElementSummary;

/// Print every element of the slide at `index`, positions in points.
pub async fn run(index: usize, json: bool) -> Result<()> {
    let config = AppConfig::default();
    let slides = GoogleSlides::connect(&config).await?;

    let presentation = slides.presentation().await?;
    let slide = presentation.slides.get(index).ok_or_else(|| {
        anyhow!(
            "Slide {} does not exist, the deck has {} slides",
            index,
            presentation.slides.len()
        )
    })?;
    let page = slides.page(&slide.object_id).await?;
    let elements: Vec<ElementSummary> = page.page_elements.iter().map(ElementSummary::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&elements)?);
        return Ok(());
    }

    println!("Slide {} ({}), {} elements", index, page.object_id, elements.len());
    for e in elements {
        println!(
            "{}\tx={:.2}pt y={:.2}pt w={:.2}pt h={:.2}pt",
            e.object_id, e.x, e.y, e.width, e.height
        );
    }
    Ok(())
}
