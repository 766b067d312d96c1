/// A transient "collected" message. Fire and forget: the presenter decides
/// how to show it and drops it after `duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub number: u32,
    pub id: String,
    pub shown_at_ms: f64,
    pub duration_ms: u64,
}

impl Notification {
    pub fn message(&self) -> String {
        format!("Collected #{}!", self.number)
    }

    pub fn expires_at_ms(&self) -> f64 {
        self.shown_at_ms + self.duration_ms as f64
    }
}

/// Presentation collaborator: score display and transient notifications.
pub trait Presenter {
    fn update_score(&mut self, score: u32);
    fn show_notification(&mut self, notification: Notification);
    /// The last collectible of a batch was picked up.
    fn show_batch_complete(&mut self, _score: u32) {}
    /// Called once per frame so time-limited content can expire.
    fn expire(&mut self, _now_ms: f64) {}
}

/// In-memory HUD, standing in for an on-screen overlay.
#[derive(Debug, Default)]
pub struct Hud {
    score: u32,
    toasts: Vec<Notification>,
    banner: Option<String>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Notifications currently on screen, oldest first.
    pub fn visible(&self) -> &[Notification] {
        &self.toasts
    }

    /// Batch-complete message, held until the next pickup.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }
}

impl Presenter for Hud {
    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_notification(&mut self, notification: Notification) {
        tracing::info!("{}", notification.message());
        self.toasts.push(notification);
        self.banner = None;
    }

    fn show_batch_complete(&mut self, score: u32) {
        self.banner = Some(format!("All collected! Score: {score}"));
    }

    fn expire(&mut self, now_ms: f64) {
        self.toasts.retain(|n| n.expires_at_ms() > now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(number: u32, at: f64) -> Notification {
        Notification {
            number,
            id: "gem_red".into(),
            shown_at_ms: at,
            duration_ms: 3000,
        }
    }

    #[test]
    fn score_text_follows_updates() {
        let mut hud = Hud::new();
        assert_eq!(hud.score_text(), "Score: 0");
        hud.update_score(3);
        assert_eq!(hud.score_text(), "Score: 3");
    }

    #[test]
    fn notifications_expire_after_duration() {
        let mut hud = Hud::new();
        hud.show_notification(toast(1, 0.0));
        hud.show_notification(toast(2, 1000.0));
        hud.expire(2999.0);
        assert_eq!(hud.visible().len(), 2);
        hud.expire(3000.0);
        assert_eq!(hud.visible().len(), 1);
        assert_eq!(hud.visible()[0].number, 2);
        hud.expire(4000.0);
        assert!(hud.visible().is_empty());
    }

    #[test]
    fn banner_holds_until_next_pickup() {
        let mut hud = Hud::new();
        assert_eq!(hud.banner(), None);
        hud.show_batch_complete(5);
        assert_eq!(hud.banner(), Some("All collected! Score: 5"));
        hud.show_notification(toast(1, 0.0));
        assert_eq!(hud.banner(), None);
    }

    #[test]
    fn message_names_the_number() {
        assert_eq!(toast(4, 0.0).message(), "Collected #4!");
    }
}
