use anyhow::Result;

use super::CalendarArgs;
use crate::calendar::{DateCategory, preview};
use crate::core::AppConfig;

pub async fn run(args: CalendarArgs) -> Result<()> {
    let config = AppConfig::default();
    let (input, theme, layout) = args.resolve(&config)?;

    let preview = preview(theme, layout, DateCategory::OVERLAY_ORDER.to_vec(), &input).await?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}
