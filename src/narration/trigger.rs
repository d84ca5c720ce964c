//! Narration trigger
//!
//! Requests narration only when the displayed header or intro text has
//! actually changed since the last request.

#[derive(Debug, Default, Clone)]
pub struct NarrationTrigger {
    last: Option<(String, String)>,
}

impl NarrationTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to narrate for these texts, `None` if they were narrated last time
    pub fn observe(&mut self, header: &str, intro: &str) -> Option<String> {
        if let Some((last_header, last_intro)) = &self.last {
            if last_header == header && last_intro == intro {
                return None;
            }
        }

        self.last = Some((header.to_string(), intro.to_string()));
        Some(format!("{} {}", header, intro))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_narrates() {
        let mut trigger = NarrationTrigger::new();
        assert_eq!(
            trigger.observe("Header", "Intro"),
            Some("Header Intro".to_string())
        );
    }

    #[test]
    fn test_unchanged_texts_do_not_repeat() {
        let mut trigger = NarrationTrigger::new();
        trigger.observe("Header", "Intro");
        assert_eq!(trigger.observe("Header", "Intro"), None);
        assert_eq!(trigger.observe("Header", "Intro"), None);
    }

    #[test]
    fn test_either_text_changing_narrates() {
        let mut trigger = NarrationTrigger::new();
        trigger.observe("Header", "Intro");
        assert_eq!(
            trigger.observe("Header", "Other"),
            Some("Header Other".to_string())
        );
        assert_eq!(
            trigger.observe("Done", "Other"),
            Some("Done Other".to_string())
        );
    }
}
