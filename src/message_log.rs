use crate::components::Rgb;

/// One line in the message log. Identical consecutive lines stack into a
/// single entry with a repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub plain_text: String,
    pub fg: Rgb,
    pub count: u32,
}

impl Message {
    pub fn new(text: impl Into<String>, fg: Rgb) -> Self {
        Self {
            plain_text: text.into(),
            fg,
            count: 1,
        }
    }

    /// Text as shown to the player, with a "(xN)" suffix once stacked.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.plain_text, self.count)
        } else {
            self.plain_text.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. With `stack`, a text identical to the newest entry
    /// bumps that entry's count instead of adding a line.
    pub fn add_message(&mut self, text: impl Into<String>, fg: Rgb, stack: bool) {
        let text = text.into();
        if stack
            && let Some(last) = self.messages.last_mut()
            && last.plain_text == text
        {
            last.count += 1;
            return;
        }
        self.messages.push(Message::new(text, fg));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Up to `n` newest messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn identical_text_stacks() {
        let mut log = MessageLog::new();
        log.add_message("Orc attacks", color::ENEMY_ATK, true);
        log.add_message("Orc attacks", color::ENEMY_ATK, true);
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].count, 2);
        assert_eq!(log.messages()[0].full_text(), "Orc attacks (x2)");
    }

    #[test]
    fn stacking_disabled_appends() {
        let mut log = MessageLog::new();
        log.add_message("hello", color::WHITE, true);
        log.add_message("hello", color::WHITE, false);
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[1].full_text(), "hello");
    }

    #[test]
    fn different_text_appends() {
        let mut log = MessageLog::new();
        log.add_message("a", color::WHITE, true);
        log.add_message("b", color::WHITE, true);
        log.add_message("a", color::WHITE, true);
        let texts: Vec<String> = log.messages().iter().map(Message::full_text).collect();
        assert_eq!(texts, vec!["a", "b", "a"]);
    }

    #[test]
    fn stacking_keeps_first_color() {
        let mut log = MessageLog::new();
        log.add_message("x", color::PLAYER_ATK, true);
        log.add_message("x", color::ENEMY_ATK, true);
        assert_eq!(log.last().map(|m| m.fg), Some(color::PLAYER_ATK));
    }

    #[test]
    fn recent_returns_tail() {
        let mut log = MessageLog::new();
        for i in 0..5 {
            log.add_message(format!("m{i}"), color::WHITE, true);
        }
        let tail: Vec<&str> = log.recent(2).iter().map(|m| m.plain_text.as_str()).collect();
        assert_eq!(tail, vec!["m3", "m4"]);
        assert_eq!(log.recent(100).len(), 5);
        assert!(MessageLog::new().recent(3).is_empty());
    }
}
