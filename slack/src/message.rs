use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directory::Directory;
use crate::models::{ChannelId, Ts, UserId};

/// A message as it appears on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Channel, group, or DM id the message belongs to
    #[serde(default)]
    pub channel: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,

    /// Raw text, with `&`, `<`, `>` entity-escaped and mentions in
    /// `<@U…>` / `<#C…>` form
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub ts: Ts,

    /// Attachments are carried opaquely; this layer does not interpret them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Value>,
}

impl Message {
    /// Render the text for display: resolve mention tokens against the
    /// directory, then undo entity escaping. Unknown ids stay as raw ids
    /// rather than disappearing.
    pub fn render_text(&self, directory: &Directory) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('<') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('>') {
                Some(end) => {
                    out.push_str(&render_token(&after[..end], directory));
                    rest = &after[end + 1..];
                }
                None => {
                    // Unterminated token, keep it verbatim
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        unescape_text(&out)
    }
}

fn render_token(token: &str, directory: &Directory) -> String {
    let (body, label) = match token.split_once('|') {
        Some((body, label)) => (body, Some(label)),
        None => (token, None),
    };

    if let Some(id) = body.strip_prefix('@') {
        return match directory.user_name(&UserId::new(id)) {
            Some(name) => format!("@{}", name),
            None => format!("@{}", label.unwrap_or(id)),
        };
    }

    if let Some(id) = body.strip_prefix('#') {
        return match directory.channel_name(&ChannelId::new(id)) {
            Some(name) => format!("#{}", name),
            None => format!("#{}", label.unwrap_or(id)),
        };
    }

    if let Some(command) = body.strip_prefix('!') {
        return format!("@{}", label.unwrap_or(command));
    }

    // Anything else is a link; show the label when one was provided
    label.unwrap_or(body).to_string()
}

/// Escape `&`, `<`, `>` the way the platform requires for outbound text
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Undo entity escaping on inbound text
pub fn unescape_text(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelRecord, UserRecord};

    fn directory_with_names() -> Directory {
        let directory = Directory::new();
        directory.insert_user(UserRecord {
            id: UserId::new("U024BE7LH"),
            name: "bob".to_string(),
            ..UserRecord::default()
        });
        directory.insert_channel(ChannelRecord {
            id: ChannelId::new("C024BE91L"),
            name: "general".to_string(),
            ..ChannelRecord::default()
        });
        directory
    }

    #[test]
    fn test_escape_round_trip() {
        let raw = "a <b> & c";

        let escaped = escape_text(raw);
        assert_eq!(escaped, "a &lt;b&gt; &amp; c");
        assert_eq!(unescape_text(&escaped), raw);
    }

    #[test]
    fn test_render_resolves_mentions() {
        let directory = directory_with_names();
        let message = Message {
            text: "hey <@U024BE7LH>, see <#C024BE91L>".to_string(),
            ..Message::default()
        };

        assert_eq!(
            message.render_text(&directory),
            "hey @bob, see #general"
        );
    }

    #[test]
    fn test_render_unknown_id_falls_back() {
        let directory = Directory::new();
        let message = Message {
            text: "ping <@U999|carol> and <@U888>".to_string(),
            ..Message::default()
        };

        // Label wins when present, raw id otherwise
        assert_eq!(
            message.render_text(&directory),
            "ping @carol and @U888"
        );
    }

    #[test]
    fn test_render_links_and_commands() {
        let directory = Directory::new();
        let message = Message {
            text: "<!everyone> read <https://example.test|the doc>".to_string(),
            ..Message::default()
        };

        assert_eq!(
            message.render_text(&directory),
            "@everyone read the doc"
        );
    }

    #[test]
    fn test_render_unterminated_token_kept() {
        let directory = Directory::new();
        let message = Message {
            text: "broken <@U123".to_string(),
            ..Message::default()
        };

        assert_eq!(message.render_text(&directory), "broken <@U123");
    }

    #[test]
    fn test_render_unescapes_entities() {
        let directory = Directory::new();
        let message = Message {
            text: "2 &lt; 3 &amp; 4 &gt; 1".to_string(),
            ..Message::default()
        };

        assert_eq!(message.render_text(&directory), "2 < 3 & 4 > 1");
    }

    #[test]
    fn test_message_deserializes_wire_shape() {
        let json = r#"{
            "type": "message",
            "channel": "G024BE91L",
            "user": "U024BE7LH",
            "text": "status?",
            "ts": "1355517523.000005"
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();

        assert_eq!(message.kind, "message");
        assert_eq!(message.channel, "G024BE91L");
        assert_eq!(message.user, Some(UserId::new("U024BE7LH")));
        assert_eq!(message.ts, Ts::new("1355517523.000005"));
        assert!(message.subtype.is_none());
        assert!(message.attachments.is_empty());
    }
}
