use tracing::info;

/// The browsing context the app runs in.
pub trait FrameContext: Send + Sync {
    /// True when the app is the top-level context rather than embedded in a frame.
    fn is_top_level(&self) -> bool;

    /// Full navigation of this context to `url`.
    fn navigate(&self, url: &str) -> Result<(), String>;
}

/// Headless frame used by the binary: navigation is logged so an operator
/// can follow it.
pub struct ConsoleFrame {
    embedded: bool,
}

impl ConsoleFrame {
    pub fn new(embedded: bool) -> Self {
        Self { embedded }
    }
}

impl FrameContext for ConsoleFrame {
    fn is_top_level(&self) -> bool {
        !self.embedded
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        info!(
            event_name = "frame.navigate",
            event_domain = "redirect",
            url,
            "navigating top-level context"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_frame_reports_embedding_and_navigates() {
        assert!(ConsoleFrame::new(false).is_top_level());
        let embedded = ConsoleFrame::new(true);
        assert!(!embedded.is_top_level());
        assert!(embedded.navigate("https://target").is_ok());
    }
}
