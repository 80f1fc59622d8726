pub mod dates;
pub mod generator;
pub mod layout;
pub mod locale;
pub mod overlay;
pub mod preview;
pub mod requests;
pub mod service;
pub mod theme;

pub use dates::{CalendarInput, CategoryDates, DateCategory, RawCalendarInput, Semester};
pub use generator::{CalendarGenerator, CalendarReport, MonthOutcome, MonthReport, MonthSlide};
pub use preview::{CalendarPreview, PreviewMonth, preview};
pub use service::{DryRunSlides, ElementIds, LayoutSelector, SequentialIds, SlideService, UuidIds};
pub use theme::Theme;
