//! Rendering of extraction outcomes as Telegram HTML.

use std::fmt::Write as _;

use super::Outcome;
use super::record::BalanceRecord;

const DEFAULT_PROMO_URL: &str = "https://t.me/Hossiy_DevDiary";
const DEFAULT_PROMO_LABEL: &str = "Join our channel for more powerful resources";

/// Escape the configured promo text for Telegram's HTML parse mode.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fixed-layout renderer with a promotional footer link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    promo_url: String,
    promo_label: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_PROMO_URL, DEFAULT_PROMO_LABEL)
    }
}

impl Formatter {
    #[must_use]
    pub fn new(promo_url: impl Into<String>, promo_label: impl Into<String>) -> Self {
        Self {
            promo_url: promo_url.into(),
            promo_label: promo_label.into(),
        }
    }

    /// The `👉 link 👈` line closing every reply.
    #[must_use]
    pub fn footer(&self) -> String {
        format!(
            "👉 <a href=\"{}\">{}</a> 👈",
            escape_html(&self.promo_url),
            escape_html(&self.promo_label)
        )
    }

    /// Help text describing the expected input.
    #[must_use]
    pub fn guidance(&self) -> String {
        format!(
            "🤔 <b>Sorry, I couldn’t understand that message.</b>\n\
             <i>Please send a valid Ethio Telecom SMS like:</i>\n\
             \"Dear Customer, your remaining Monthly voice is 219 Min...\"\n\n{}",
            self.footer()
        )
    }

    #[must_use]
    pub fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::NotUnderstood => self.guidance(),
            Outcome::Partial(record) => {
                let mut out =
                    String::from("⚠️ <i>Some details were not found in your message.</i>\n\n");
                self.write_balance(&mut out, record);
                out
            }
            Outcome::Full(record) => {
                let mut out = String::new();
                self.write_balance(&mut out, record);
                out
            }
        }
    }

    fn write_balance(&self, out: &mut String, record: &BalanceRecord) {
        let _ = write!(
            out,
            "📝 <b>Original Package</b>\n\
             Minutes: {}\n\
             Data: {}\n\
             SMS: {}\n\n\
             💬 <b>Remaining Balance</b>\n\
             Minutes: {}\n\
             Data: {}\n\
             SMS: {}\n\n{}",
            record.original_minutes,
            record.original_data,
            record.original_sms,
            record.remaining_minutes,
            record.remaining_data,
            record.remaining_sms,
            self.footer()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::record::Field;

    fn full_record() -> BalanceRecord {
        BalanceRecord {
            original_minutes: Field::Found("440".into()),
            original_data: Field::Found("1.1GB".into()),
            original_sms: Field::Found("105".into()),
            remaining_minutes: Field::Found("90".into()),
            remaining_data: Field::Found("0 MB".into()),
            remaining_sms: Field::Found("111".into()),
        }
    }

    #[test]
    fn full_layout_has_both_sections_and_footer() {
        let text = Formatter::default().render(&Outcome::Full(full_record()));

        assert!(text.starts_with("📝 <b>Original Package</b>\nMinutes: 440\nData: 1.1GB\nSMS: 105"));
        assert!(text.contains("💬 <b>Remaining Balance</b>\nMinutes: 90\nData: 0 MB\nSMS: 111"));
        assert!(text.ends_with("👉 <a href=\"https://t.me/Hossiy_DevDiary\">Join our channel for more powerful resources</a> 👈"));
    }

    #[test]
    fn partial_layout_keeps_every_line() {
        let record = BalanceRecord {
            original_minutes: Field::Found("300".into()),
            ..BalanceRecord::default()
        };
        let text = Formatter::default().render(&Outcome::Partial(record));

        assert!(text.starts_with("⚠️"));
        assert!(text.contains("Minutes: 300\nData: N/A\nSMS: N/A"));
        assert!(text.contains("Minutes: 0\nData: N/A\nSMS: 0"));
    }

    #[test]
    fn guidance_uses_configured_promo() {
        let formatter = Formatter::new("https://example.org/?a=1&b=2", "More <tips>");
        let text = formatter.render(&Outcome::NotUnderstood);

        assert!(text.contains("couldn’t understand"));
        assert!(text.contains("href=\"https://example.org/?a=1&amp;b=2\""));
        assert!(text.contains("More &lt;tips&gt;"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
