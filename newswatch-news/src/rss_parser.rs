//! RSS channel parsing into raw feed items

use chrono::DateTime;

use newswatch_core::RawFeedItem;

/// Convert every usable item of an RSS channel into a `RawFeedItem`.
///
/// Items without a link are skipped; a missing title or description becomes
/// an empty string.
pub fn parse_channel(channel: &rss::Channel) -> Vec<RawFeedItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let link = item.link()?.trim().to_string();
            if link.is_empty() {
                return None;
            }

            let title = item.title().map(strip_html).unwrap_or_default();
            let summary = item.description().map(strip_html).unwrap_or_default();

            let published = item.pub_date().and_then(parse_feed_date);

            // Dublin Core date doubles as the "updated" stamp
            let updated = item
                .dublin_core_ext()
                .and_then(|dc| dc.dates().first())
                .and_then(|d| parse_feed_date(d));

            let source_url = item
                .source()
                .map(|s| s.url().trim().to_string())
                .filter(|u| !u.is_empty());

            Some(RawFeedItem {
                title,
                summary,
                link,
                published,
                updated,
                source_url,
            })
        })
        .collect()
}

/// Parse an RFC 2822 or RFC 3339 date into epoch seconds
pub fn parse_feed_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.timestamp())
}

/// Strip HTML tags from text
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // Clean up whitespace and HTML entities
    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>"NVIDIA" OR NVDA - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Nvidia beats estimates - Reuters</title>
      <link>https://news.google.com/rss/articles/abc?oc=5</link>
      <pubDate>Mon, 13 Oct 2025 14:00:00 GMT</pubDate>
      <description>&lt;a href="x"&gt;Nvidia beats&lt;/a&gt;&amp;nbsp;&lt;font&gt;Reuters&lt;/font&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Chip rally fades</title>
      <link>https://www.cnbc.com/2025/10/13/chips.html</link>
      <dc:date>2025-10-13T15:30:00Z</dc:date>
    </item>
    <item>
      <title>No link here</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_channel() {
        let channel = rss::Channel::read_from(SAMPLE.as_bytes()).unwrap();
        let items = parse_channel(&channel);

        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Nvidia beats estimates - Reuters");
        assert_eq!(items[0].summary, "Nvidia beats Reuters");
        assert_eq!(items[0].published, Some(1760364000));
        assert_eq!(items[0].updated, None);
        assert_eq!(items[0].source_url.as_deref(), Some("https://www.reuters.com"));

        assert_eq!(items[1].published, None);
        assert_eq!(items[1].updated, Some(1760369400));
        assert_eq!(items[1].summary, "");
    }

    #[test]
    fn test_parse_feed_date() {
        assert_eq!(parse_feed_date("Mon, 13 Oct 2025 14:00:00 GMT"), Some(1760364000));
        assert_eq!(parse_feed_date("2025-10-13T14:00:00+00:00"), Some(1760364000));
        assert_eq!(parse_feed_date("yesterday"), None);
    }

    #[test]
    fn test_strip_html() {
        let html = "<p>Hello <b>world</b>!</p>";
        assert_eq!(strip_html(html), "Hello world!");
    }
}
