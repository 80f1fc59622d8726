use anyhow::{Result, bail};

use super::CalendarArgs;
use crate::calendar::{CalendarGenerator, MonthOutcome, MonthReport};
use crate::core::AppConfig;
use crate::google::GoogleSlides;

/// One summary line per month, e.g. `2024-01  rendered  page p1 (812 requests)`.
pub fn summary_line(report: &MonthReport) -> String {
    let date = format!("{}-{:02}", report.year, report.month);
    match (&report.outcome, &report.page_id) {
        (MonthOutcome::Rendered, Some(page_id)) => format!(
            "{}  rendered     page {} ({} requests)",
            date, page_id, report.requests
        ),
        (MonthOutcome::Rendered, None) => format!("{}  rendered", date),
        (MonthOutcome::Partial { reason }, page_id) => format!(
            "{}  partial      page {} left incomplete: {}",
            date,
            page_id.as_deref().unwrap_or("?"),
            reason
        ),
        (MonthOutcome::NotCreated { reason }, _) => {
            format!("{}  not created  {}", date, reason)
        }
    }
}

pub async fn run(args: CalendarArgs) -> Result<()> {
    let config = AppConfig::default();
    let (input, theme, layout) = args.resolve(&config)?;

    let slides = GoogleSlides::connect(&config).await?;
    let mut generator = CalendarGenerator::new(slides, theme).with_layout(layout);
    let report = generator.generate(&input).await?;

    for month in &report.months {
        println!("{}", summary_line(month));
    }

    let failed = report
        .months
        .iter()
        .filter(|m| m.outcome != MonthOutcome::Rendered)
        .count();
    if failed > 0 {
        bail!("{} of {} months were not fully rendered", failed, report.months.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(page_id: Option<&str>, outcome: MonthOutcome) -> MonthReport {
        MonthReport {
            year: 2024,
            month: 3,
            page_id: page_id.map(String::from),
            requests: 10,
            outcome,
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&report(Some("p1"), MonthOutcome::Rendered)),
            "2024-03  rendered     page p1 (10 requests)"
        );
        let partial = summary_line(&report(
            Some("p1"),
            MonthOutcome::Partial {
                reason: String::from("quota"),
            },
        ));
        assert!(partial.contains("partial") && partial.contains("quota"));
        let missing = summary_line(&report(
            None,
            MonthOutcome::NotCreated {
                reason: String::from("403"),
            },
        ));
        assert!(missing.starts_with("2024-03  not created"));
    }
}
