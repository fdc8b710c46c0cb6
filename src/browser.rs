//! Browsers a PR can target.

/// A browser with its short and long display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub id: &'static str,
    pub name: &'static str,
    pub long_name: &'static str,
}

/// How a browser is written in [`BROWSERS`]: a single display string reused
/// for both names, or explicit short and long names.
#[derive(Debug, Clone, Copy)]
pub enum BrowserEntry {
    Short(&'static str),
    Full {
        name: &'static str,
        long_name: &'static str,
    },
}

impl BrowserEntry {
    pub fn normalize(self, id: &'static str) -> Browser {
        match self {
            BrowserEntry::Short(name) => Browser {
                id,
                name,
                long_name: name,
            },
            BrowserEntry::Full { name, long_name } => Browser {
                id,
                name,
                long_name,
            },
        }
    }
}

const fn full(name: &'static str, long_name: &'static str) -> BrowserEntry {
    BrowserEntry::Full { name, long_name }
}

pub const BROWSERS: &[(&str, BrowserEntry)] = &[
    (
        "chrome",
        full(
            "Chromium",
            "Chromium (Chrome, Opera, Samsung Internet, WebView Android)",
        ),
    ),
    ("edge", full("Edge", "Microsoft Edge")),
    ("firefox", full("Firefox", "Firefox and Firefox Android")),
    ("opera", full("Opera", "Opera and Opera Android")),
    ("safari", full("Safari", "Safari (Desktop and iOS/iPadOS)")),
    ("safariios", full("Safari iOS", "Safari iOS/iPadOS")),
    ("webkit", full("Chrome/Safari", "Chrome and Safari")),
    ("chromeandroid", BrowserEntry::Short("Chrome Android")),
    ("fenix", BrowserEntry::Short("Firefox Android")),
    ("samsung", BrowserEntry::Short("Samsung Internet")),
    ("webview_android", BrowserEntry::Short("WebView Android")),
    ("webview_ios", full("WebView iOS", "WebView iOS/iPadOS")),
    ("nodejs", BrowserEntry::Short("NodeJS")),
    ("deno", BrowserEntry::Short("Deno")),
    ("all", BrowserEntry::Short("all browsers")),
];

/// Every browser in table order, normalized.
pub fn all() -> Vec<Browser> {
    BROWSERS
        .iter()
        .map(|&(id, entry)| entry.normalize(id))
        .collect()
}

pub fn by_id(id: &str) -> Option<Browser> {
    BROWSERS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|&(key, entry)| entry.normalize(key))
}
