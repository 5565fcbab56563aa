use crate::app::validate::is_valid_email;
use crate::app::AppContext;
use tracing::error;

/// Newsletter sign-up box
pub struct SubscribeForm {
    ctx: AppContext,
    subscribed: bool,
    submitting: bool,
}

impl SubscribeForm {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            subscribed: false,
            submitting: false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate locally, then subscribe. Returns whether the subscription went through.
    pub async fn submit(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() {
            self.ctx.notifier.warning("Please enter your email address");
            return false;
        }
        if !is_valid_email(email) {
            self.ctx.notifier.error("Please enter a valid email address");
            return false;
        }

        self.submitting = true;
        let result = self.ctx.subscriptions.subscribe(email).await;
        self.submitting = false;

        match result {
            Ok(_) => {
                self.subscribed = true;
                self.ctx.notifier.success("Thank you for subscribing to property alerts!");
                true
            }
            Err(err) => {
                error!("Error subscribing: {}", err);
                self.ctx.notifier.error(format!("Subscription failed: {err}"));
                false
            }
        }
    }
}
