//! Text rendering for chat replies
//!
//! Pure functions from cache snapshots to the exact user-facing text blocks:
//! the menu listing, the attribute legend, and the status line. No I/O
//! happens here; failures upstream degrade to fixed fallback messages.

use chrono::{DateTime, Datelike, Local, Weekday};

use crate::data::MenuItem;

/// Header/date format, e.g. "Monday, 05 Feb 2024"
const DATE_FORMAT: &str = "%A, %d %b %Y";

/// Status timestamp format
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reply when the weekend suppression variant is active on Sat/Sun
const WEEKEND_MESSAGE: &str = "It's the weekend! No cafeteria food today.";

/// Reply when no menu data is available, whatever the reason
const FALLBACK_MESSAGE: &str = "I'm sorry, I'm having trouble getting the menu today. \
     Try again later, or visit the LDAC cafeteria web page at \
     http://public-ldac.cafebonappetit.com/";

/// Renders the menu reply
///
/// With `weekend_aware` set and a Saturday/Sunday fetch date, the weekend
/// message wins regardless of cached content. An empty menu (or one never
/// fetched) renders the fallback message. Otherwise the reply is a dated
/// header followed by one block per item, built as separate blocks and
/// joined once.
pub fn render_menu(
    menu: &[MenuItem],
    fetched_at: Option<DateTime<Local>>,
    weekend_aware: bool,
) -> String {
    if weekend_aware && fetched_at.is_some_and(is_weekend) {
        return WEEKEND_MESSAGE.to_string();
    }

    let date = match fetched_at {
        Some(date) if !menu.is_empty() => date,
        _ => return FALLBACK_MESSAGE.to_string(),
    };

    let blocks: Vec<String> = menu.iter().map(render_item).collect();
    format!(
        "Today's menu for {}\n\n{}",
        date.format(DATE_FORMAT),
        blocks.concat()
    )
}

/// Renders one menu item block
///
/// Bold name, optional parenthesized attribute list (omitted entirely when
/// empty), price, then the description in italics and a blank separator.
fn render_item(item: &MenuItem) -> String {
    let attributes = if item.attributes.is_empty() {
        String::new()
    } else {
        format!(" ({})", item.attributes.join(", "))
    };

    format!(
        "*{}*{} {}\n_{}_\n\n",
        item.name, attributes, item.price, item.description
    )
}

/// Renders the fixed attribute legend
pub fn render_legend() -> String {
    [
        "*FF* Farm to Fork",
        "*↓G* Made without gluten ingredients (not necessarily gluten free)",
        "*V* Vegetarian",
        "*VG* Vegan",
        "*S* Seafood Watch",
    ]
    .join("\n")
}

/// Renders the status reply from cache metadata
pub fn render_status(last_fetched_at: Option<DateTime<Local>>, usage_count: u64) -> String {
    let refreshed = match last_fetched_at {
        Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        None => "never".to_string(),
    };

    format!(
        "Last refreshed menu at {}\nAccessed {} times since startup.",
        refreshed, usage_count
    )
}

/// True for Saturday and Sunday
fn is_weekend(date: DateTime<Local>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
