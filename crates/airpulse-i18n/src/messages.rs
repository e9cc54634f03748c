//! Message identifiers of the bundled resources.

/// Dashboard heading.
pub const DASHBOARD_TITLE: &str = "dashboard-title";
/// Sentiment distribution panel.
pub const PANEL_DISTRIBUTION: &str = "panel-distribution";
/// Sentiment over time panel.
pub const PANEL_OVER_TIME: &str = "panel-over-time";
/// Airline comparison panel.
pub const PANEL_COMPARISON: &str = "panel-comparison";
/// Geo panel, takes `$start` and `$end` hours.
pub const PANEL_GEO: &str = "panel-geo";
/// Word cloud panel, takes `$sentiment`.
pub const PANEL_WORDCLOUD: &str = "panel-wordcloud";
/// Avatar section.
pub const PANEL_AVATAR: &str = "panel-avatar";
/// Raw-data preview section.
pub const PANEL_PREVIEW: &str = "panel-preview";

/// Sentiment axis.
pub const AXIS_SENTIMENT: &str = "axis-sentiment";
/// Tweet count axis.
pub const AXIS_TWEETS: &str = "axis-tweets";
/// Time axis, takes `$bucket`.
pub const AXIS_TIME: &str = "axis-time";

/// Filters left no rows.
pub const NOTICE_NO_DATA: &str = "notice-no-data";
/// No airline selected.
pub const NOTICE_NO_AIRLINES: &str = "notice-no-airlines";
/// No located tweet in the hour window.
pub const NOTICE_NO_LOCATIONS: &str = "notice-no-locations";
/// Word cloud has nothing to draw.
pub const NOTICE_NO_WORDS: &str = "notice-no-words";
/// Tweet count line, takes `$count`.
pub const NOTICE_TWEETS_FOUND: &str = "notice-tweets-found";

/// Malformed date selection, takes `$reason`.
pub const WARNING_DATE_RANGE: &str = "warning-date-range";
/// Avatar fetch failed, takes `$cause`.
pub const WARNING_IMAGE: &str = "warning-image";
/// Rasterizing a chart failed, takes `$cause`.
pub const WARNING_RENDER: &str = "warning-render";

/// Every identifier above.
pub const ALL: &[&str] = &[
    DASHBOARD_TITLE,
    PANEL_DISTRIBUTION,
    PANEL_OVER_TIME,
    PANEL_COMPARISON,
    PANEL_GEO,
    PANEL_WORDCLOUD,
    PANEL_AVATAR,
    PANEL_PREVIEW,
    AXIS_SENTIMENT,
    AXIS_TWEETS,
    AXIS_TIME,
    NOTICE_NO_DATA,
    NOTICE_NO_AIRLINES,
    NOTICE_NO_LOCATIONS,
    NOTICE_NO_WORDS,
    NOTICE_TWEETS_FOUND,
    WARNING_DATE_RANGE,
    WARNING_IMAGE,
    WARNING_RENDER,
];
